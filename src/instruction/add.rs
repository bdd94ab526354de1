use crate::{
    instruction::{InstructionEnv, InstructionResult, SIGNATURE_SIZE},
    variant::Variant,
};

/// Sums every float input slot, however many are wired.
pub(crate) fn run(
    inputs: &[Variant; SIGNATURE_SIZE],
    outputs: &mut [Variant; SIGNATURE_SIZE],
    _env: &mut InstructionEnv,
) -> InstructionResult {
    let mut sum = 0.0;
    for input in inputs.iter() {
        if let Variant::Float(value) = input {
            sum += value;
        }
    }

    outputs[0] = Variant::Float(sum);
    InstructionResult::Continue
}
