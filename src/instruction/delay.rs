use crate::{
    instruction::{InstructionEnv, InstructionResult, SIGNATURE_SIZE},
    variant::Variant,
};

/// Holds flow until `TIME` seconds of state time have passed. The first
/// invocation stores the deadline in the work token as whole milliseconds.
pub(crate) fn run(
    inputs: &[Variant; SIGNATURE_SIZE],
    _outputs: &mut [Variant; SIGNATURE_SIZE],
    env: &mut InstructionEnv,
) -> InstructionResult {
    let seconds = inputs[0].as_float();

    if env.work == 0 {
        env.work = ((env.time + seconds) * 1000.0) as u32;
        InstructionResult::Wait
    } else if (env.time * 1000.0) as u32 >= env.work {
        InstructionResult::Continue
    } else {
        InstructionResult::Wait
    }
}
