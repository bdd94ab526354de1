use crate::{
    error::{FlowScriptError, Result},
    graph::{NodeId, SlotId},
    instruction::{Opcode, SIGNATURE_SIZE},
    sparse_table::SparseTable,
    variant::Variant,
};
use nalgebra::Vector2;

pub const DEFAULT_MAX_NODES: usize = 16;
pub const DEFAULT_MAX_ID_RANGE: usize = 1024;

/// Horizontal spacing between freshly added nodes.
const NODE_SPACING: f32 = 250.0;

/// One input position on a node. The slot is *linked* while `source_id` is
/// non-null, otherwise it is *fixed* and `fixed` (or the instruction default)
/// supplies the value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSlot {
    pub source_id: NodeId,
    pub source_slot: SlotId,
    pub fixed: Variant,
}

impl InputSlot {
    pub fn is_linked(&self) -> bool {
        self.source_id != NodeId(0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub instruction: Opcode,
    pub inputs: [InputSlot; SIGNATURE_SIZE],
    pub default_outputs: [Variant; SIGNATURE_SIZE],
}

impl Node {
    pub fn new(instruction: Opcode) -> Self {
        Self {
            instruction,
            inputs: [InputSlot::default(); SIGNATURE_SIZE],
            default_outputs: [Variant::Nil; SIGNATURE_SIZE],
        }
    }
}

/// Node rows plus their 2D layout positions, addressed by stable `NodeId`.
#[derive(Clone, Debug)]
pub struct NodeTable {
    table: SparseTable,
    rows: Vec<Node>,
    positions: Vec<Vector2<f32>>,
    next_position: Vector2<f32>,
}

impl Default for NodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_NODES, DEFAULT_MAX_ID_RANGE)
    }

    pub fn with_capacity(max_rows: usize, max_id_range: usize) -> Self {
        Self {
            table: SparseTable::new(max_rows, max_id_range),
            rows: Vec::with_capacity(max_rows),
            positions: Vec::with_capacity(max_rows),
            next_position: Vector2::new(100.0, 100.0),
        }
    }

    pub fn has(&self, node_id: NodeId) -> bool {
        self.table.has(node_id)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Live ids in dense order.
    pub fn ids(&self) -> &[NodeId] {
        self.table.ids()
    }

    pub fn node(&self, node_id: NodeId) -> Result<&Node> {
        let index = self
            .table
            .index_of(node_id)
            .ok_or(FlowScriptError::InvalidNodeId)?;
        Ok(&self.rows[index])
    }

    pub(crate) fn node_mut(&mut self, node_id: NodeId) -> Result<&mut Node> {
        let index = self
            .table
            .index_of(node_id)
            .ok_or(FlowScriptError::InvalidNodeId)?;
        Ok(&mut self.rows[index])
    }

    /// Adds a row for the given instruction. New nodes line up left to right.
    pub fn insert(&mut self, instruction: Opcode) -> Result<NodeId> {
        let node_id = self.table.insert()?;
        self.rows.push(Node::new(instruction));
        self.positions.push(self.next_position);
        self.next_position.x += NODE_SPACING;
        Ok(node_id)
    }

    pub fn remove(&mut self, node_id: NodeId) -> Result<Node> {
        let index = self.table.remove(node_id)?;
        self.positions.swap_remove(index);
        Ok(self.rows.swap_remove(index))
    }

    pub fn relabel(&mut self, old_id: NodeId, new_id: NodeId) -> Result<()> {
        self.table.relabel(old_id, new_id)
    }

    pub fn position(&self, node_id: NodeId) -> Result<Vector2<f32>> {
        let index = self
            .table
            .index_of(node_id)
            .ok_or(FlowScriptError::InvalidNodeId)?;
        Ok(self.positions[index])
    }

    pub fn set_position(&mut self, node_id: NodeId, position: Vector2<f32>) -> Result<()> {
        let index = self
            .table
            .index_of(node_id)
            .ok_or(FlowScriptError::InvalidNodeId)?;
        self.positions[index] = position;
        Ok(())
    }

    pub fn fixed_input(&self, node_id: NodeId, slot: SlotId) -> Result<Variant> {
        Ok(self.node(node_id)?.inputs[checked_slot(slot)?].fixed)
    }

    /// Pins an input to a fixed value. Any data link into the slot is
    /// dropped; linked and fixed are mutually exclusive.
    pub fn set_fixed_input(&mut self, node_id: NodeId, slot: SlotId, value: Variant) -> Result<()> {
        let slot = checked_slot(slot)?;
        let input = &mut self.node_mut(node_id)?.inputs[slot];
        input.source_id = NodeId(0);
        input.source_slot = SlotId(0);
        input.fixed = value;
        Ok(())
    }

    pub fn default_output(&self, node_id: NodeId, slot: SlotId) -> Result<Variant> {
        Ok(self.node(node_id)?.default_outputs[checked_slot(slot)?])
    }

    /// Seeds an output slot, making the node act as a data source before it
    /// has executed.
    pub fn set_default_output(
        &mut self,
        node_id: NodeId,
        slot: SlotId,
        value: Variant,
    ) -> Result<()> {
        let slot = checked_slot(slot)?;
        self.node_mut(node_id)?.default_outputs[slot] = value;
        Ok(())
    }
}

pub(crate) fn checked_slot(slot: SlotId) -> Result<usize> {
    if slot.as_usize() < SIGNATURE_SIZE {
        Ok(slot.as_usize())
    } else {
        Err(FlowScriptError::InvalidSlotId)
    }
}
