use crate::{
    instruction::{InstructionEnv, InstructionResult, SIGNATURE_SIZE},
    variant::Variant,
};

pub(crate) fn run(
    _inputs: &[Variant; SIGNATURE_SIZE],
    _outputs: &mut [Variant; SIGNATURE_SIZE],
    env: &mut InstructionEnv,
) -> InstructionResult {
    println!("#{}", env.node_id);
    InstructionResult::Continue
}
