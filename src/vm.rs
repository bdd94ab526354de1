use crate::instruction::{core_instructions, InstructionDef, Opcode, PRINT_OWN_ID};
use std::any::Any;

/// Opcodes below this value index the core table; opcodes at or above it
/// index the host table at `opcode - HOST_INSTRUCTION_BASE`.
pub const HOST_INSTRUCTION_BASE: Opcode = 256;

/// The instruction registry: the core table, the host-supplied table, and an
/// opaque payload handed to every instruction invocation.
pub struct Vm {
    core: Vec<InstructionDef>,
    host: Vec<InstructionDef>,
    custom_data: Option<Box<dyn Any>>,
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

impl Vm {
    pub fn new() -> Self {
        Self::with_host_instructions(Vec::new())
    }

    pub fn with_host_instructions(host: Vec<InstructionDef>) -> Self {
        Self {
            core: core_instructions(),
            host,
            custom_data: None,
        }
    }

    pub fn with_custom_data(mut self, custom_data: Box<dyn Any>) -> Self {
        self.custom_data = Some(custom_data);
        self
    }

    pub fn custom_data(&self) -> Option<&dyn Any> {
        self.custom_data.as_deref()
    }

    /// Looks up a definition by opcode. An opcode outside both tables is a
    /// programmer error and panics.
    pub fn instruction(&self, opcode: Opcode) -> &InstructionDef {
        if opcode < HOST_INSTRUCTION_BASE {
            &self.core[opcode as usize]
        } else {
            &self.host[(opcode - HOST_INSTRUCTION_BASE) as usize]
        }
    }

    pub fn instruction_name(&self, opcode: Opcode) -> &'static str {
        self.instruction(opcode).name
    }

    /// Resolves a name to an opcode. The host table shadows the core table,
    /// so scripts keep their meaning when a later core release claims a name
    /// a host was already using. Unknown names warn and fall back to
    /// `print_own_id` so saved scripts stay loadable.
    pub fn find_instruction(&self, name: &str) -> Opcode {
        if let Some(index) = self.host.iter().position(|def| def.name == name) {
            return HOST_INSTRUCTION_BASE + index as Opcode;
        }
        if let Some(index) = self.core.iter().position(|def| def.name == name) {
            return index as Opcode;
        }

        eprintln!(
            "Unknown instruction '{}', falling back to 'print_own_id'",
            name
        );
        PRINT_OWN_ID
    }

    /// Number of input slots carrying a non-nil default.
    pub fn count_inputs(&self, opcode: Opcode) -> usize {
        self.instruction(opcode)
            .inputs
            .iter()
            .filter(|slot| !slot.default.is_nil())
            .count()
    }

    /// Number of output slots carrying a non-nil default.
    pub fn count_outputs(&self, opcode: Opcode) -> usize {
        self.instruction(opcode)
            .outputs
            .iter()
            .filter(|slot| !slot.default.is_nil())
            .count()
    }

    /// All registered instructions with their opcodes, core table first.
    pub fn instructions(&self) -> impl Iterator<Item = (Opcode, &InstructionDef)> {
        let core = self
            .core
            .iter()
            .enumerate()
            .map(|(index, def)| (index as Opcode, def));
        let host = self
            .host
            .iter()
            .enumerate()
            .map(|(index, def)| (HOST_INSTRUCTION_BASE + index as Opcode, def));
        core.chain(host)
    }
}
