use crate::{
    instruction::{InstructionEnv, InstructionResult, SIGNATURE_SIZE},
    variant::Variant,
};

pub(crate) fn run(
    inputs: &[Variant; SIGNATURE_SIZE],
    outputs: &mut [Variant; SIGNATURE_SIZE],
    _env: &mut InstructionEnv,
) -> InstructionResult {
    match (inputs[0], inputs[1]) {
        (Variant::Float(a), Variant::Float(b)) => {
            outputs[0] = Variant::Float(a - b);
        }
        (a, b) => {
            eprintln!(
                "sub expects float inputs, got {} and {}",
                a.type_name(),
                b.type_name()
            );
            outputs[0] = Variant::Float(0.0);
        }
    }

    InstructionResult::Continue
}
