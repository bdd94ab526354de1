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
        (Variant::Vec2(a), Variant::Vec2(b)) => {
            outputs[0] = Variant::Float((a - b).norm());
        }
        (a, b) => {
            eprintln!(
                "distance expects vec2 inputs, got {} and {}",
                a.type_name(),
                b.type_name()
            );
        }
    }

    InstructionResult::Continue
}
