pub mod add;
pub mod delay;
pub mod distance;
pub mod if_between;
pub mod mul;
pub mod print_own_id;
pub mod print_value;
pub mod randomize_number;
pub mod repeat;
pub mod sub;
pub mod tick;

use crate::{
    graph::{Graph, NodeId},
    state::GraphState,
    variant::Variant,
};
use std::{any::Any, fmt};

/// Upper bound on input and output slots per instruction.
pub const SIGNATURE_SIZE: usize = 8;

/// Identifies an instruction. Values below [`crate::vm::HOST_INSTRUCTION_BASE`]
/// index the core table, values at or above it index the host table.
pub type Opcode = u16;

// Core opcodes, in table order. `print_own_id` doubles as the registry's
// non-destructive fallback and must stay first.
pub const PRINT_OWN_ID: Opcode = 0;
pub const TICK: Opcode = 1;
pub const RANDOMIZE_NUMBER: Opcode = 2;
pub const ADD: Opcode = 3;
pub const SUB: Opcode = 4;
pub const MUL: Opcode = 5;
pub const DISTANCE: Opcode = 6;
pub const PRINT_VALUE: Opcode = 7;
pub const IF_BETWEEN: Opcode = 8;
pub const REPEAT: Opcode = 9;
pub const DELAY: Opcode = 10;

/// What a step should do once the instruction returns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InstructionResult {
    /// Schedule the node's flow targets.
    Continue,
    /// Park the node on the deferred queue, carrying the work token.
    Wait,
    /// Stop this strand of execution.
    Halt,
}

/// Everything an instruction may see or touch during one invocation. The
/// graph stays read-only for the duration of the step.
pub struct InstructionEnv<'a> {
    pub node_id: NodeId,
    pub graph: &'a Graph,
    pub state: &'a mut GraphState,
    /// Opaque resume scalar; survives `Wait` round-trips through the
    /// deferred queue and is zero when dequeued from the scheduled queue.
    pub work: u32,
    pub time: f32,
    pub custom_data: Option<&'a dyn Any>,
}

impl<'a> InstructionEnv<'a> {
    /// Schedules every flow target of the executing node, in link order.
    pub fn schedule_flow_targets(&mut self) {
        self.state.schedule_flow_targets(self.node_id, self.graph);
    }
}

pub type InstructionFn = fn(
    &[Variant; SIGNATURE_SIZE],
    &mut [Variant; SIGNATURE_SIZE],
    &mut InstructionEnv,
) -> InstructionResult;

/// One input or output position in an instruction signature. A slot exists
/// iff it is named; the default supplies values for unwired inputs and
/// never-executed outputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotSignature {
    pub name: Option<&'static str>,
    pub default: Variant,
}

impl SlotSignature {
    pub const EMPTY: SlotSignature = SlotSignature {
        name: None,
        default: Variant::Nil,
    };

    pub const fn new(name: &'static str, default: Variant) -> Self {
        Self {
            name: Some(name),
            default,
        }
    }

    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

#[derive(Clone, Copy)]
pub struct InstructionDef {
    pub name: &'static str,
    pub run: InstructionFn,
    pub inputs: [SlotSignature; SIGNATURE_SIZE],
    pub outputs: [SlotSignature; SIGNATURE_SIZE],
}

impl fmt::Debug for InstructionDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InstructionDef: {}", self.name)
    }
}

/// Pads a short signature out to `SIGNATURE_SIZE` with empty slots.
pub fn signature(slots: &[SlotSignature]) -> [SlotSignature; SIGNATURE_SIZE] {
    assert!(slots.len() <= SIGNATURE_SIZE);
    let mut padded = [SlotSignature::EMPTY; SIGNATURE_SIZE];
    padded[..slots.len()].copy_from_slice(slots);
    padded
}

/// The core instruction table, indexed by the opcode constants above.
pub(crate) fn core_instructions() -> Vec<InstructionDef> {
    vec![
        InstructionDef {
            name: "print_own_id",
            run: print_own_id::run,
            inputs: signature(&[]),
            outputs: signature(&[]),
        },
        InstructionDef {
            name: "tick",
            run: tick::run,
            inputs: signature(&[]),
            outputs: signature(&[]),
        },
        InstructionDef {
            name: "randomize_number",
            run: randomize_number::run,
            inputs: signature(&[]),
            outputs: signature(&[SlotSignature::new("RND", Variant::Float(0.0))]),
        },
        InstructionDef {
            name: "add",
            run: add::run,
            inputs: signature(&[
                SlotSignature::new("A", Variant::Float(0.0)),
                SlotSignature::new("B", Variant::Float(0.0)),
            ]),
            outputs: signature(&[SlotSignature::new("SUM", Variant::Float(0.0))]),
        },
        InstructionDef {
            name: "sub",
            run: sub::run,
            inputs: signature(&[
                SlotSignature::new("A", Variant::Float(0.0)),
                SlotSignature::new("B", Variant::Float(0.0)),
            ]),
            outputs: signature(&[SlotSignature::new("DIFF", Variant::Float(0.0))]),
        },
        InstructionDef {
            name: "mul",
            run: mul::run,
            inputs: signature(&[
                SlotSignature::new("A", Variant::Float(1.0)),
                SlotSignature::new("B", Variant::Float(1.0)),
            ]),
            outputs: signature(&[SlotSignature::new("PROD", Variant::Float(1.0))]),
        },
        InstructionDef {
            name: "distance",
            run: distance::run,
            inputs: signature(&[
                SlotSignature::new("A", Variant::vec2(0.0, 0.0)),
                SlotSignature::new("B", Variant::vec2(0.0, 0.0)),
            ]),
            outputs: signature(&[SlotSignature::new("DIST", Variant::Float(0.0))]),
        },
        InstructionDef {
            name: "print_value",
            run: print_value::run,
            inputs: signature(&[SlotSignature::new("VAL", Variant::Float(0.0))]),
            outputs: signature(&[]),
        },
        InstructionDef {
            name: "if_between",
            run: if_between::run,
            inputs: signature(&[
                SlotSignature::new("VAL", Variant::Float(0.0)),
                SlotSignature::new("MIN", Variant::Float(0.0)),
                SlotSignature::new("MAX", Variant::Float(1.0)),
            ]),
            outputs: signature(&[]),
        },
        InstructionDef {
            name: "repeat",
            run: repeat::run,
            inputs: signature(&[SlotSignature::new("TIMES", Variant::Int(1))]),
            outputs: signature(&[]),
        },
        InstructionDef {
            name: "delay",
            run: delay::run,
            inputs: signature(&[SlotSignature::new("TIME", Variant::Float(1.0))]),
            outputs: signature(&[]),
        },
    ]
}
