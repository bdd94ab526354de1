use crate::{
    instruction::{InstructionEnv, InstructionResult, SIGNATURE_SIZE},
    variant::Variant,
};

/// Lets flow pass only while `MIN <= VAL <= MAX`.
pub(crate) fn run(
    inputs: &[Variant; SIGNATURE_SIZE],
    _outputs: &mut [Variant; SIGNATURE_SIZE],
    _env: &mut InstructionEnv,
) -> InstructionResult {
    match (inputs[0], inputs[1], inputs[2]) {
        (Variant::Float(val), Variant::Float(min), Variant::Float(max)) => {
            if min <= val && val <= max {
                InstructionResult::Continue
            } else {
                InstructionResult::Halt
            }
        }
        (val, min, max) => {
            eprintln!(
                "if_between expects float inputs, got {}, {} and {}",
                val.type_name(),
                min.type_name(),
                max.type_name()
            );
            InstructionResult::Halt
        }
    }
}
