use crate::{
    instruction::{InstructionEnv, InstructionResult, SIGNATURE_SIZE},
    variant::Variant,
};

pub(crate) fn run(
    _inputs: &[Variant; SIGNATURE_SIZE],
    outputs: &mut [Variant; SIGNATURE_SIZE],
    env: &mut InstructionEnv,
) -> InstructionResult {
    outputs[0] = Variant::Float(env.state.random_float());
    InstructionResult::Continue
}
