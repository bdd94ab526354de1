use crate::{
    error::{FlowScriptError, Result},
    instruction::Opcode,
    link::FlowLink,
    node::{checked_slot, NodeTable, DEFAULT_MAX_ID_RANGE, DEFAULT_MAX_NODES},
    vm::HOST_INSTRUCTION_BASE,
};
use std::fmt;

pub const DEFAULT_MAX_FLOW_LINKS: usize = 32;

/// A directed graph of instruction nodes: the node table plus the flow links
/// sequencing execution. Data links live inside the nodes' input slots.
#[derive(Clone, Debug)]
pub struct Graph {
    pub nodes: NodeTable,
    flow_links: Vec<FlowLink>,
    max_flow_links: usize,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::with_capacity(
            DEFAULT_MAX_NODES,
            DEFAULT_MAX_ID_RANGE,
            DEFAULT_MAX_FLOW_LINKS,
        )
    }

    pub fn with_capacity(max_nodes: usize, max_id_range: usize, max_flow_links: usize) -> Self {
        Self {
            nodes: NodeTable::with_capacity(max_nodes, max_id_range),
            flow_links: Vec::with_capacity(max_flow_links),
            max_flow_links,
        }
    }

    pub fn has_node(&self, node_id: NodeId) -> bool {
        self.nodes.has(node_id)
    }

    pub fn add_node(&mut self, instruction: Opcode) -> Result<NodeId> {
        self.nodes.insert(instruction)
    }

    /// Adds a node running the host instruction at the given index in the
    /// host table.
    pub fn add_host_node(&mut self, host_index: u16) -> Result<NodeId> {
        self.add_node(HOST_INSTRUCTION_BASE + host_index)
    }

    /// Removes a node after disconnecting it: every flow link incident to it
    /// goes away and every input slot referencing it reverts to fixed.
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<()> {
        self.nodes.node(node_id)?;

        while let Some(index) = self
            .flow_links
            .iter()
            .position(|link| link.source_id == node_id || link.target_id == node_id)
        {
            self.flow_links.swap_remove(index);
        }

        for other_id in self.nodes.ids().to_vec() {
            if other_id == node_id {
                continue;
            }
            let other = self.nodes.node_mut(other_id)?;
            for input in other.inputs.iter_mut() {
                if input.source_id == node_id {
                    input.source_id = NodeId(0);
                    input.source_slot = SlotId(0);
                }
            }
        }

        self.nodes.remove(node_id)?;
        Ok(())
    }

    pub fn flow_links(&self) -> &[FlowLink] {
        &self.flow_links
    }

    pub fn has_link(&self, source_id: NodeId, target_id: NodeId) -> bool {
        self.flow_links
            .contains(&FlowLink::new(source_id, target_id))
    }

    /// Links execution of one node to another. Linking the same ordered pair
    /// twice is a no-op.
    pub fn link_nodes(&mut self, source_id: NodeId, target_id: NodeId) -> Result<()> {
        self.nodes.node(source_id)?;
        self.nodes.node(target_id)?;

        if self.has_link(source_id, target_id) {
            return Ok(());
        }
        if self.flow_links.len() >= self.max_flow_links {
            return Err(FlowScriptError::CapacityExceeded);
        }

        self.flow_links.push(FlowLink::new(source_id, target_id));
        Ok(())
    }

    pub fn unlink_nodes(&mut self, source_id: NodeId, target_id: NodeId) -> Result<()> {
        let index = self
            .flow_links
            .iter()
            .position(|link| *link == FlowLink::new(source_id, target_id))
            .ok_or(FlowScriptError::InvalidLink)?;
        self.flow_links.swap_remove(index);
        Ok(())
    }

    /// Number of flow links leaving the given node.
    pub fn count_source_links(&self, node_id: NodeId) -> usize {
        self.flow_links
            .iter()
            .filter(|link| link.source_id == node_id)
            .count()
    }

    /// Number of flow links arriving at the given node.
    pub fn count_target_links(&self, node_id: NodeId) -> usize {
        self.flow_links
            .iter()
            .filter(|link| link.target_id == node_id)
            .count()
    }

    /// Wires an output slot into an input slot. The input slot keeps any
    /// stored fixed value, but it stays inert while the link exists.
    pub fn link_data(
        &mut self,
        source_id: NodeId,
        source_slot: SlotId,
        target_id: NodeId,
        target_slot: SlotId,
    ) -> Result<()> {
        self.nodes.node(source_id)?;
        checked_slot(source_slot)?;
        let target_slot = checked_slot(target_slot)?;

        let input = &mut self.nodes.node_mut(target_id)?.inputs[target_slot];
        input.source_id = source_id;
        input.source_slot = source_slot;
        Ok(())
    }

    pub fn unlink_input_data(&mut self, node_id: NodeId, slot: SlotId) -> Result<()> {
        let slot = checked_slot(slot)?;
        let input = &mut self.nodes.node_mut(node_id)?.inputs[slot];
        input.source_id = NodeId(0);
        input.source_slot = SlotId(0);
        Ok(())
    }

    /// Clears every input slot in the graph fed by the given output slot.
    pub fn unlink_output_data(&mut self, node_id: NodeId, slot: SlotId) -> Result<()> {
        checked_slot(slot)?;
        self.nodes.node(node_id)?;

        for other_id in self.nodes.ids().to_vec() {
            let other = self.nodes.node_mut(other_id)?;
            for input in other.inputs.iter_mut() {
                if input.source_id == node_id && input.source_slot == slot {
                    input.source_id = NodeId(0);
                    input.source_slot = SlotId(0);
                }
            }
        }
        Ok(())
    }
}

/// Stable node handle. Id `0` is the reserved null and never names a live
/// node.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SlotId(pub u32);

impl SlotId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
