use crate::{
    instruction::{InstructionEnv, InstructionResult, SIGNATURE_SIZE},
    variant::Variant,
};

/// Schedules its flow targets `TIMES` times, counting invocations in the
/// work token.
pub(crate) fn run(
    inputs: &[Variant; SIGNATURE_SIZE],
    _outputs: &mut [Variant; SIGNATURE_SIZE],
    env: &mut InstructionEnv,
) -> InstructionResult {
    let times = inputs[0].as_int();

    if (env.work as i64) < times as i64 {
        env.schedule_flow_targets();
        env.work += 1;
        InstructionResult::Wait
    } else {
        InstructionResult::Halt
    }
}
