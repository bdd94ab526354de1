use crate::{
    error::Result,
    graph::{Graph, NodeId},
    instruction::{Opcode, SIGNATURE_SIZE},
    node::{DEFAULT_MAX_ID_RANGE, DEFAULT_MAX_NODES},
    sparse_table::SparseTable,
    variant::Variant,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

pub const DEFAULT_QUEUE_CAPACITY: usize = 8;

/// The last-produced output row of every node that has executed at least
/// once. A missing row means "never executed; resolve against defaults".
#[derive(Clone, Debug)]
pub struct NodeStateTable {
    table: SparseTable,
    outputs: Vec<[Variant; SIGNATURE_SIZE]>,
}

impl NodeStateTable {
    pub fn new(max_rows: usize, max_id_range: usize) -> Self {
        Self {
            table: SparseTable::new(max_rows, max_id_range),
            outputs: Vec::with_capacity(max_rows),
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

    pub fn get(&self, node_id: NodeId) -> Option<&[Variant; SIGNATURE_SIZE]> {
        self.table.index_of(node_id).map(|index| &self.outputs[index])
    }

    pub fn set(&mut self, node_id: NodeId, outputs: [Variant; SIGNATURE_SIZE]) -> Result<()> {
        match self.table.index_of(node_id) {
            Some(index) => {
                self.outputs[index] = outputs;
            }
            None => {
                self.table.insert_id(node_id)?;
                self.outputs.push(outputs);
            }
        }
        Ok(())
    }
}

/// An entry parked on the deferred queue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeferredEntry {
    pub node_id: NodeId,
    pub work: u32,
}

/// Everything that changes while a graph runs: the two work queues, the
/// per-node output rows, logical time and the RNG behind
/// `randomize_number`. The graph itself stays untouched.
pub struct GraphState {
    scheduled: VecDeque<NodeId>,
    deferred: VecDeque<DeferredEntry>,
    node_states: NodeStateTable,
    pub time: f32,
    queue_capacity: usize,
    rng: StdRng,
}

impl Default for GraphState {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphState {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic state for reproducible runs and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            scheduled: VecDeque::with_capacity(DEFAULT_QUEUE_CAPACITY),
            deferred: VecDeque::with_capacity(DEFAULT_QUEUE_CAPACITY),
            node_states: NodeStateTable::new(DEFAULT_MAX_NODES, DEFAULT_MAX_ID_RANGE),
            time: 0.0,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            rng,
        }
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn node_state_capacity(mut self, max_rows: usize, max_id_range: usize) -> Self {
        self.node_states = NodeStateTable::new(max_rows, max_id_range);
        self
    }

    /// The host owns the clock; `delay` and friends only observe it.
    pub fn forward_time(&mut self, dt: f32) {
        self.time += dt;
    }

    pub fn random_float(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Puts a node at the tail of the high-priority queue. The node must be
    /// alive in the given graph.
    pub fn schedule_node(&mut self, node_id: NodeId, graph: &Graph) {
        assert!(
            graph.has_node(node_id),
            "scheduled node #{} is not in the graph",
            node_id
        );

        if self.scheduled.len() >= self.queue_capacity {
            eprintln!("Scheduled queue is full, dropping node #{}", node_id);
            return;
        }
        self.scheduled.push_back(node_id);
    }

    /// Parks a node at the tail of the low-priority queue, carrying its work
    /// token.
    pub fn defer_node(&mut self, node_id: NodeId, work: u32, graph: &Graph) {
        assert!(
            graph.has_node(node_id),
            "deferred node #{} is not in the graph",
            node_id
        );

        if self.deferred.len() >= self.queue_capacity {
            eprintln!("Deferred queue is full, dropping node #{}", node_id);
            return;
        }
        self.deferred.push_back(DeferredEntry { node_id, work });
    }

    /// Schedules every node running the given instruction, in table order.
    pub fn schedule_instruction(&mut self, opcode: Opcode, graph: &Graph) {
        for &node_id in graph.nodes.ids() {
            if let Ok(node) = graph.nodes.node(node_id) {
                if node.instruction == opcode {
                    self.schedule_node(node_id, graph);
                }
            }
        }
    }

    pub fn defer_instruction(&mut self, opcode: Opcode, work: u32, graph: &Graph) {
        for &node_id in graph.nodes.ids() {
            if let Ok(node) = graph.nodes.node(node_id) {
                if node.instruction == opcode {
                    self.defer_node(node_id, work, graph);
                }
            }
        }
    }

    /// Schedules the flow targets of a node in link-insertion order.
    pub fn schedule_flow_targets(&mut self, node_id: NodeId, graph: &Graph) {
        for link in graph.flow_links() {
            if link.source_id == node_id {
                self.schedule_node(link.target_id, graph);
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.scheduled.is_empty() && self.deferred.is_empty()
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    pub fn deferred_count(&self) -> usize {
        self.deferred.len()
    }

    /// Pending high-priority nodes, head first.
    pub fn scheduled(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.scheduled.iter().copied()
    }

    /// Pending low-priority entries, head first.
    pub fn deferred(&self) -> impl Iterator<Item = DeferredEntry> + '_ {
        self.deferred.iter().copied()
    }

    pub fn node_outputs(&self, node_id: NodeId) -> Option<&[Variant; SIGNATURE_SIZE]> {
        self.node_states.get(node_id)
    }

    pub(crate) fn commit_outputs(
        &mut self,
        node_id: NodeId,
        outputs: [Variant; SIGNATURE_SIZE],
    ) -> Result<()> {
        self.node_states.set(node_id, outputs)
    }

    /// The scheduled queue drains strictly before the deferred queue.
    pub(crate) fn next_queued(&mut self) -> Option<DeferredEntry> {
        if let Some(node_id) = self.scheduled.pop_front() {
            return Some(DeferredEntry { node_id, work: 0 });
        }
        self.deferred.pop_front()
    }
}
