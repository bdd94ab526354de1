use crate::{
    instruction::{InstructionEnv, InstructionResult, SIGNATURE_SIZE},
    variant::Variant,
};

/// Multiplies every float input slot. Unwired slots contribute the identity.
pub(crate) fn run(
    inputs: &[Variant; SIGNATURE_SIZE],
    outputs: &mut [Variant; SIGNATURE_SIZE],
    _env: &mut InstructionEnv,
) -> InstructionResult {
    let mut product = 1.0;
    for input in inputs.iter() {
        if let Variant::Float(value) = input {
            product *= value;
        }
    }

    outputs[0] = Variant::Float(product);
    InstructionResult::Continue
}
