use crate::{
    error::Result,
    graph::{Graph, NodeId, SlotId},
    instruction::{InstructionEnv, InstructionResult, SIGNATURE_SIZE},
    node::{checked_slot, Node},
    state::GraphState,
    variant::Variant,
    vm::Vm,
};

/// Advances the runtime by one cooperative step: dequeue a node, resolve its
/// inputs, invoke its instruction, commit the outputs and act on the result.
/// Returns `false` when both queues were empty and nothing ran.
pub fn step(vm: &Vm, graph: &Graph, state: &mut GraphState) -> bool {
    let entry = match state.next_queued() {
        Some(entry) => entry,
        None => return false,
    };
    let node_id = entry.node_id;

    // The node may have been removed after it was queued. Stale handles are
    // consumed and skipped.
    let node = match graph.nodes.node(node_id) {
        Ok(node) => node,
        Err(_) => {
            eprintln!("Skipping queued node #{}, it is no longer in the graph", node_id);
            return true;
        }
    };
    let def = vm.instruction(node.instruction);

    let mut inputs = [Variant::Nil; SIGNATURE_SIZE];
    for (slot, input) in inputs.iter_mut().enumerate() {
        *input = resolve_input(node, slot, vm, graph, state);
    }

    let mut outputs = [Variant::Nil; SIGNATURE_SIZE];
    let (result, work) = {
        let mut env = InstructionEnv {
            node_id,
            graph,
            work: entry.work,
            time: state.time,
            custom_data: vm.custom_data(),
            state: &mut *state,
        };
        let result = (def.run)(&inputs, &mut outputs, &mut env);
        (result, env.work)
    };

    if let Err(e) = state.commit_outputs(node_id, outputs) {
        eprintln!("Could not store outputs of node #{}: {}", node_id, e);
    }

    match result {
        InstructionResult::Continue => {
            for link in graph.flow_links() {
                if link.source_id == node_id {
                    state.schedule_node(link.target_id, graph);
                }
            }
        }
        InstructionResult::Wait => state.defer_node(node_id, work, graph),
        InstructionResult::Halt => (),
    }

    true
}

/// What the given input slot carries right now: the linked upstream output,
/// else the slot's fixed value, else the instruction's default. Exactly one
/// data-edge hop; deeper chains settle over successive steps.
pub fn input_value(
    node_id: NodeId,
    slot: SlotId,
    vm: &Vm,
    graph: &Graph,
    state: &GraphState,
) -> Result<Variant> {
    let node = graph.nodes.node(node_id)?;
    let slot = checked_slot(slot)?;
    Ok(resolve_input(node, slot, vm, graph, state))
}

/// What the given output slot carries right now: the last produced value,
/// else the node's default output, else the instruction's default.
pub fn output_value(
    node_id: NodeId,
    slot: SlotId,
    vm: &Vm,
    graph: &Graph,
    state: &GraphState,
) -> Result<Variant> {
    graph.nodes.node(node_id)?;
    let slot = checked_slot(slot)?;
    Ok(resolve_output(node_id, slot, vm, graph, state))
}

fn resolve_input(node: &Node, slot: usize, vm: &Vm, graph: &Graph, state: &GraphState) -> Variant {
    let input = node.inputs[slot];

    if input.is_linked() {
        return resolve_output(
            input.source_id,
            input.source_slot.as_usize(),
            vm,
            graph,
            state,
        );
    }
    if !input.fixed.is_nil() {
        return input.fixed;
    }

    vm.instruction(node.instruction).inputs[slot].default
}

fn resolve_output(
    node_id: NodeId,
    slot: usize,
    vm: &Vm,
    graph: &Graph,
    state: &GraphState,
) -> Variant {
    if let Some(outputs) = state.node_outputs(node_id) {
        return outputs[slot];
    }

    match graph.nodes.node(node_id) {
        Ok(node) => {
            let default = node.default_outputs[slot];
            if !default.is_nil() {
                return default;
            }
            vm.instruction(node.instruction).outputs[slot].default
        }
        // A dangling reference resolves to nothing rather than aborting the
        // step.
        Err(_) => Variant::Nil,
    }
}
