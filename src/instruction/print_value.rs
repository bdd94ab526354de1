use crate::{
    instruction::{InstructionEnv, InstructionResult, SIGNATURE_SIZE},
    variant::Variant,
};

pub(crate) fn run(
    inputs: &[Variant; SIGNATURE_SIZE],
    _outputs: &mut [Variant; SIGNATURE_SIZE],
    _env: &mut InstructionEnv,
) -> InstructionResult {
    println!("{}", inputs[0]);
    InstructionResult::Continue
}
