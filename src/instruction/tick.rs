use crate::{
    instruction::{InstructionEnv, InstructionResult, SIGNATURE_SIZE},
    variant::Variant,
};

/// Does nothing itself; hosts schedule `tick` nodes as periodic entry points.
pub(crate) fn run(
    _inputs: &[Variant; SIGNATURE_SIZE],
    _outputs: &mut [Variant; SIGNATURE_SIZE],
    _env: &mut InstructionEnv,
) -> InstructionResult {
    InstructionResult::Continue
}
