use flowscript_core::{
    format,
    graph::{Graph, NodeId, SlotId},
    instruction::{
        self, signature, InstructionDef, InstructionEnv, InstructionResult, SIGNATURE_SIZE,
    },
    scheduler,
    sparse_table::SparseTable,
    state::{DeferredEntry, GraphState},
    variant::Variant,
    vm::{Vm, HOST_INSTRUCTION_BASE},
};
use nalgebra::Vector2;
use ntest::timeout;
use std::{cell::RefCell, collections::HashMap};

fn float_of(variant: Variant) -> f32 {
    match variant {
        Variant::Float(value) => value,
        other => panic!("expected a float, got {}", other),
    }
}

fn drain(vm: &Vm, graph: &Graph, state: &mut GraphState) -> usize {
    let mut steps = 0;
    while scheduler::step(vm, graph, state) {
        steps += 1;
    }
    steps
}

#[test]
fn minimal_chain() {
    let vm = Vm::new();
    let mut graph = Graph::new();

    let a = graph.add_node(instruction::PRINT_OWN_ID).unwrap();
    let b = graph.add_node(instruction::PRINT_OWN_ID).unwrap();
    let c = graph.add_node(instruction::PRINT_OWN_ID).unwrap();
    graph.link_nodes(a, b).unwrap();
    graph.link_nodes(a, c).unwrap();

    let mut state = GraphState::with_seed(0);
    state.schedule_node(a, &graph);

    assert!(scheduler::step(&vm, &graph, &mut state));
    assert_eq!(state.scheduled().collect::<Vec<_>>(), vec![b, c]);

    assert!(scheduler::step(&vm, &graph, &mut state));
    assert!(scheduler::step(&vm, &graph, &mut state));

    for &node_id in &[a, b, c] {
        assert!(state.node_outputs(node_id).is_some());
    }
    assert!(state.is_idle());
    assert!(!scheduler::step(&vm, &graph, &mut state));
}

#[test]
fn data_pull() {
    let vm = Vm::new();
    let mut graph = Graph::new();

    let random = graph.add_node(instruction::RANDOMIZE_NUMBER).unwrap();
    let sum = graph.add_node(instruction::ADD).unwrap();
    graph
        .nodes
        .set_fixed_input(sum, SlotId(0), Variant::Float(1.5))
        .unwrap();
    graph.link_data(random, SlotId(0), sum, SlotId(1)).unwrap();
    graph.link_nodes(random, sum).unwrap();

    let mut state = GraphState::with_seed(42);
    state.schedule_node(random, &graph);

    assert!(scheduler::step(&vm, &graph, &mut state));
    let rnd = float_of(state.node_outputs(random).unwrap()[0]);
    assert!((0.0..1.0).contains(&rnd));

    assert!(scheduler::step(&vm, &graph, &mut state));
    let total = float_of(
        scheduler::output_value(sum, SlotId(0), &vm, &graph, &state).unwrap(),
    );
    assert!((total - (1.5 + rnd)).abs() < 1e-6);
}

fn count_calls(
    _inputs: &[Variant; SIGNATURE_SIZE],
    _outputs: &mut [Variant; SIGNATURE_SIZE],
    env: &mut InstructionEnv,
) -> InstructionResult {
    let counts = env
        .custom_data
        .expect("the host forgot its custom data")
        .downcast_ref::<RefCell<HashMap<NodeId, u32>>>()
        .unwrap();
    *counts.borrow_mut().entry(env.node_id).or_insert(0) += 1;
    InstructionResult::Continue
}

fn counting_vm() -> Vm {
    let host = vec![InstructionDef {
        name: "count_calls",
        run: count_calls,
        inputs: signature(&[]),
        outputs: signature(&[]),
    }];
    Vm::with_host_instructions(host)
        .with_custom_data(Box::new(RefCell::new(HashMap::<NodeId, u32>::new())))
}

fn call_count(vm: &Vm, node_id: NodeId) -> u32 {
    let counts = vm
        .custom_data()
        .unwrap()
        .downcast_ref::<RefCell<HashMap<NodeId, u32>>>()
        .unwrap()
        .borrow();
    counts.get(&node_id).copied().unwrap_or(0)
}

#[test]
#[timeout(1000)]
fn repeat_runs_targets_thrice() {
    let vm = counting_vm();
    let mut graph = Graph::new();

    let repeat = graph.add_node(instruction::REPEAT).unwrap();
    graph
        .nodes
        .set_fixed_input(repeat, SlotId(0), Variant::Int(3))
        .unwrap();
    let target_1 = graph.add_host_node(0).unwrap();
    let target_2 = graph.add_host_node(0).unwrap();
    graph.link_nodes(repeat, target_1).unwrap();
    graph.link_nodes(repeat, target_2).unwrap();

    let mut state = GraphState::with_seed(0);
    state.schedule_node(repeat, &graph);

    // The repeat node is dequeued four times (three waits and a halt), its
    // two targets three times each.
    assert_eq!(drain(&vm, &graph, &mut state), 10);
    assert_eq!(call_count(&vm, target_1), 3);
    assert_eq!(call_count(&vm, target_2), 3);
}

#[test]
#[timeout(1000)]
fn delay_waits_for_state_time() {
    let vm = Vm::new();
    let mut graph = Graph::new();

    let delay = graph.add_node(instruction::DELAY).unwrap();
    graph
        .nodes
        .set_fixed_input(delay, SlotId(0), Variant::Float(0.5))
        .unwrap();
    let target = graph.add_node(instruction::PRINT_OWN_ID).unwrap();
    graph.link_nodes(delay, target).unwrap();

    let mut state = GraphState::with_seed(0);
    state.schedule_node(delay, &graph);

    assert!(scheduler::step(&vm, &graph, &mut state));
    assert_eq!(
        state.deferred().collect::<Vec<_>>(),
        vec![DeferredEntry {
            node_id: delay,
            work: 500
        }]
    );

    state.forward_time(0.3);
    assert!(scheduler::step(&vm, &graph, &mut state));
    assert_eq!(state.scheduled_count(), 0);
    assert_eq!(state.deferred_count(), 1);

    state.forward_time(0.3);
    assert!(scheduler::step(&vm, &graph, &mut state));
    assert_eq!(state.scheduled().collect::<Vec<_>>(), vec![target]);
    assert_eq!(state.deferred_count(), 0);
}

#[test]
fn round_trip_preserves_the_graph() {
    let vm = Vm::new();
    let mut graph = Graph::new();

    let entry = graph.add_node(instruction::PRINT_OWN_ID).unwrap();
    let random = graph.add_node(instruction::RANDOMIZE_NUMBER).unwrap();
    let scratch = graph.add_node(instruction::TICK).unwrap();
    let sum = graph.add_node(instruction::ADD).unwrap();

    // Leave a hole in the id sequence so loading has to honor file ids
    // instead of counting from one.
    graph.remove_node(random).unwrap();

    graph
        .nodes
        .set_fixed_input(sum, SlotId(0), Variant::Float(1.5))
        .unwrap();
    graph
        .nodes
        .set_fixed_input(sum, SlotId(2), Variant::Int(7))
        .unwrap();
    graph
        .nodes
        .set_fixed_input(sum, SlotId(3), Variant::Bool(true))
        .unwrap();
    graph
        .nodes
        .set_fixed_input(sum, SlotId(4), Variant::vec2(3.0, 4.0))
        .unwrap();
    graph.link_data(scratch, SlotId(0), sum, SlotId(1)).unwrap();
    graph.link_nodes(entry, scratch).unwrap();
    graph.link_nodes(scratch, sum).unwrap();
    graph
        .nodes
        .set_position(entry, Vector2::new(40.0, 80.0))
        .unwrap();

    let text = format::save_graph_to_string(&graph, &vm).unwrap();
    let loaded = format::load_graph(text.as_bytes(), &vm).unwrap();

    let mut expected_ids: Vec<NodeId> = graph.nodes.ids().to_vec();
    let mut loaded_ids: Vec<NodeId> = loaded.nodes.ids().to_vec();
    expected_ids.sort();
    loaded_ids.sort();
    assert_eq!(expected_ids, loaded_ids);

    for &node_id in graph.nodes.ids() {
        let original = graph.nodes.node(node_id).unwrap();
        let copy = loaded.nodes.node(node_id).unwrap();
        assert_eq!(
            vm.instruction_name(original.instruction),
            vm.instruction_name(copy.instruction)
        );
        assert_eq!(original.inputs, copy.inputs);

        let original_pos = graph.nodes.position(node_id).unwrap();
        let copy_pos = loaded.nodes.position(node_id).unwrap();
        assert!((original_pos - copy_pos).norm() < 1e-3);
    }

    let mut expected_links: Vec<(NodeId, NodeId)> = graph
        .flow_links()
        .iter()
        .map(|link| (link.source_id, link.target_id))
        .collect();
    let mut loaded_links: Vec<(NodeId, NodeId)> = loaded
        .flow_links()
        .iter()
        .map(|link| (link.source_id, link.target_id))
        .collect();
    expected_links.sort();
    loaded_links.sort();
    assert_eq!(expected_links, loaded_links);
}

#[test]
fn removal_cascades_to_links_and_references() {
    let vm = Vm::new();
    let mut graph = Graph::new();

    let a = graph.add_node(instruction::RANDOMIZE_NUMBER).unwrap();
    let b = graph.add_node(instruction::PRINT_OWN_ID).unwrap();
    let c = graph.add_node(instruction::PRINT_VALUE).unwrap();
    graph.link_nodes(a, b).unwrap();
    graph
        .nodes
        .set_fixed_input(a, SlotId(1), Variant::Bool(true))
        .unwrap();
    graph.link_data(a, SlotId(0), c, SlotId(0)).unwrap();

    graph.remove_node(a).unwrap();

    assert!(!graph.has_node(a));
    assert!(graph.has_node(b));
    assert!(graph.has_node(c));
    assert_eq!(graph.flow_links().len(), 0);
    assert!(!graph.nodes.node(c).unwrap().inputs[0].is_linked());

    // The cleared slot falls back to the instruction default.
    let state = GraphState::with_seed(0);
    assert_eq!(
        scheduler::input_value(c, SlotId(0), &vm, &graph, &state).unwrap(),
        Variant::Float(0.0)
    );
}

#[test]
fn sparse_table_probes_and_reuses_ids() {
    let mut table = SparseTable::new(2, 4);

    let a = table.insert().unwrap();
    let b = table.insert().unwrap();
    assert_eq!((a, b), (NodeId(1), NodeId(2)));
    assert!(table.insert().is_err());

    table.remove(a).unwrap();
    let c = table.insert().unwrap();
    assert_eq!(c, NodeId(3));

    // The cursor wraps past the null id and reuses the freed slot.
    table.remove(b).unwrap();
    let d = table.insert().unwrap();
    assert_eq!(d, NodeId(1));

    assert!(table.has(c) && table.has(d));
    assert!(!table.has(b));
}

#[test]
fn sparse_table_relabel() {
    let mut table = SparseTable::new(4, 16);

    let a = table.insert().unwrap();
    let b = table.insert().unwrap();

    table.relabel(a, NodeId(9)).unwrap();
    assert!(!table.has(a));
    assert!(table.has(NodeId(9)));

    assert!(table.relabel(NodeId(9), b).is_err());
    assert!(table.relabel(NodeId(5), NodeId(6)).is_err());
    assert!(table.relabel(b, NodeId(0)).is_err());

    // Relabeling to the current id is fine.
    table.relabel(b, b).unwrap();
    assert!(table.has(b));
}

#[test]
fn variant_coercions_are_total() {
    assert_eq!(Variant::Bool(true).as_float(), 1.0);
    assert_eq!(Variant::Int(3).as_float(), 3.0);
    assert_eq!(Variant::Float(2.5).as_float(), 2.5);
    assert_eq!(Variant::vec2(1.0, 2.0).as_float(), 1.0);
    assert_eq!(Variant::Nil.as_float(), 0.0);

    assert_eq!(Variant::Float(2.9).as_int(), 2);
    assert_eq!(Variant::Float(-1.5).as_int(), -1);
    assert_eq!(Variant::vec2(3.7, 9.9).as_int(), 3);
    assert_eq!(Variant::Bool(false).as_int(), 0);
    assert_eq!(Variant::Nil.as_int(), 0);

    assert!(Variant::Int(-2).as_bool());
    assert!(!Variant::Int(0).as_bool());
    // Truncation first: a fraction below one is not truthy.
    assert!(!Variant::Float(0.4).as_bool());
}

#[test]
fn fresh_nodes_start_fixed_and_defaultless() {
    let mut graph = Graph::new();
    let node_id = graph.add_node(instruction::ADD).unwrap();

    let node = graph.nodes.node(node_id).unwrap();
    assert!(node.inputs.iter().all(|input| !input.is_linked()));
    assert!(node.inputs.iter().all(|input| input.fixed.is_nil()));
    assert!(node.default_outputs.iter().all(|value| value.is_nil()));
}

#[test]
fn input_resolution_prefers_link_then_fixed_then_default() {
    let vm = Vm::new();
    let mut graph = Graph::new();
    let mut state = GraphState::with_seed(7);

    let source = graph.add_node(instruction::RANDOMIZE_NUMBER).unwrap();
    let sink = graph.add_node(instruction::ADD).unwrap();

    // Nothing wired: the signature default.
    assert_eq!(
        scheduler::input_value(sink, SlotId(0), &vm, &graph, &state).unwrap(),
        Variant::Float(0.0)
    );

    // Linked to a node that has not run: its output signature default.
    graph.link_data(source, SlotId(0), sink, SlotId(0)).unwrap();
    assert_eq!(
        scheduler::input_value(sink, SlotId(0), &vm, &graph, &state).unwrap(),
        Variant::Float(0.0)
    );

    // A default output takes over until the source actually runs.
    graph
        .nodes
        .set_default_output(source, SlotId(0), Variant::Float(0.25))
        .unwrap();
    assert_eq!(
        scheduler::input_value(sink, SlotId(0), &vm, &graph, &state).unwrap(),
        Variant::Float(0.25)
    );

    // After a run the stored output wins.
    state.schedule_node(source, &graph);
    assert!(scheduler::step(&vm, &graph, &mut state));
    let produced = state.node_outputs(source).unwrap()[0];
    assert_eq!(
        scheduler::input_value(sink, SlotId(0), &vm, &graph, &state).unwrap(),
        produced
    );

    // Pinning a fixed value severs the link.
    graph
        .nodes
        .set_fixed_input(sink, SlotId(0), Variant::Float(9.0))
        .unwrap();
    assert_eq!(
        scheduler::input_value(sink, SlotId(0), &vm, &graph, &state).unwrap(),
        Variant::Float(9.0)
    );
    assert!(!graph.nodes.node(sink).unwrap().inputs[0].is_linked());

    // Resolution is pure: asking twice changes nothing.
    assert_eq!(
        scheduler::input_value(sink, SlotId(0), &vm, &graph, &state).unwrap(),
        scheduler::input_value(sink, SlotId(0), &vm, &graph, &state).unwrap()
    );
}

#[test]
fn registry_falls_back_on_unknown_names() {
    let vm = Vm::new();
    assert_eq!(vm.find_instruction("no_such_thing"), instruction::PRINT_OWN_ID);

    let text = "node\t#5\tteleport\n";
    let graph = format::load_graph(text.as_bytes(), &vm).unwrap();
    assert!(graph.has_node(NodeId(5)));
    assert_eq!(
        graph.nodes.node(NodeId(5)).unwrap().instruction,
        instruction::PRINT_OWN_ID
    );
}

#[test]
fn host_instructions_shadow_core_names() {
    let host = vec![InstructionDef {
        name: "add",
        run: count_calls,
        inputs: signature(&[]),
        outputs: signature(&[]),
    }];
    let vm = Vm::with_host_instructions(host);

    assert_eq!(vm.find_instruction("add"), HOST_INSTRUCTION_BASE);
    assert_eq!(vm.find_instruction("sub"), instruction::SUB);
    assert_eq!(vm.instruction_name(HOST_INSTRUCTION_BASE), "add");
}

#[test]
fn signature_slot_counting() {
    let vm = Vm::new();
    assert_eq!(vm.count_inputs(instruction::ADD), 2);
    assert_eq!(vm.count_outputs(instruction::ADD), 1);
    assert_eq!(vm.count_inputs(instruction::IF_BETWEEN), 3);
    assert_eq!(vm.count_inputs(instruction::REPEAT), 1);
    assert_eq!(vm.count_inputs(instruction::PRINT_OWN_ID), 0);
    assert_eq!(vm.count_outputs(instruction::PRINT_OWN_ID), 0);
}

#[test]
fn full_queues_drop_new_entries() {
    let mut graph = Graph::new();
    let node_id = graph.add_node(instruction::TICK).unwrap();

    let mut state = GraphState::with_seed(0);
    for _ in 0..10 {
        state.schedule_node(node_id, &graph);
    }
    assert_eq!(state.scheduled_count(), 8);

    for work in 0..10 {
        state.defer_node(node_id, work, &graph);
    }
    assert_eq!(state.deferred_count(), 8);
}

#[test]
fn node_table_capacity_is_enforced() {
    let mut graph = Graph::new();
    for _ in 0..16 {
        graph.add_node(instruction::TICK).unwrap();
    }
    assert!(graph.add_node(instruction::TICK).is_err());
}

#[test]
fn stale_queue_entries_are_skipped() {
    let vm = Vm::new();
    let mut graph = Graph::new();
    let node_id = graph.add_node(instruction::PRINT_OWN_ID).unwrap();

    let mut state = GraphState::with_seed(0);
    state.schedule_node(node_id, &graph);
    graph.remove_node(node_id).unwrap();

    // The stale entry is consumed without executing anything.
    assert!(scheduler::step(&vm, &graph, &mut state));
    assert!(state.node_outputs(node_id).is_none());
    assert!(state.is_idle());
}

#[test]
fn duplicate_flow_links_are_a_no_op() {
    let mut graph = Graph::new();
    let a = graph.add_node(instruction::TICK).unwrap();
    let b = graph.add_node(instruction::TICK).unwrap();

    graph.link_nodes(a, b).unwrap();
    graph.link_nodes(a, b).unwrap();
    assert_eq!(graph.flow_links().len(), 1);
    assert_eq!(graph.count_source_links(a), 1);
    assert_eq!(graph.count_target_links(b), 1);

    graph.unlink_nodes(a, b).unwrap();
    assert!(!graph.has_link(a, b));
    assert!(graph.unlink_nodes(a, b).is_err());
}

#[test]
#[timeout(1000)]
fn flow_cycles_keep_running() {
    let vm = Vm::new();
    let mut graph = Graph::new();
    let node_id = graph.add_node(instruction::PRINT_OWN_ID).unwrap();
    graph.link_nodes(node_id, node_id).unwrap();

    let mut state = GraphState::with_seed(0);
    state.schedule_node(node_id, &graph);

    // No cycle detection: every step reschedules the node.
    for _ in 0..5 {
        assert!(scheduler::step(&vm, &graph, &mut state));
        assert_eq!(state.scheduled_count(), 1);
    }
}

#[test]
fn if_between_gates_flow() {
    let vm = Vm::new();
    let mut graph = Graph::new();

    let gate = graph.add_node(instruction::IF_BETWEEN).unwrap();
    let target = graph.add_node(instruction::PRINT_OWN_ID).unwrap();
    graph.link_nodes(gate, target).unwrap();

    let mut state = GraphState::with_seed(0);

    graph
        .nodes
        .set_fixed_input(gate, SlotId(0), Variant::Float(5.0))
        .unwrap();
    state.schedule_node(gate, &graph);
    assert!(scheduler::step(&vm, &graph, &mut state));
    assert!(state.is_idle());

    graph
        .nodes
        .set_fixed_input(gate, SlotId(0), Variant::Float(0.5))
        .unwrap();
    state.schedule_node(gate, &graph);
    assert!(scheduler::step(&vm, &graph, &mut state));
    assert_eq!(state.scheduled().collect::<Vec<_>>(), vec![target]);
}

#[test]
fn arithmetic_defaults_and_mismatches() {
    let vm = Vm::new();
    let mut graph = Graph::new();
    let mut state = GraphState::with_seed(0);

    // An unwired mul yields its identity, an unwired add its zero.
    let product = graph.add_node(instruction::MUL).unwrap();
    let total = graph.add_node(instruction::ADD).unwrap();
    state.schedule_node(product, &graph);
    state.schedule_node(total, &graph);
    assert_eq!(drain(&vm, &graph, &mut state), 2);
    assert_eq!(state.node_outputs(product).unwrap()[0], Variant::Float(1.0));
    assert_eq!(state.node_outputs(total).unwrap()[0], Variant::Float(0.0));

    // A mistyped sub logs, yields zero and keeps the flow alive.
    let diff = graph.add_node(instruction::SUB).unwrap();
    let after = graph.add_node(instruction::TICK).unwrap();
    graph.link_nodes(diff, after).unwrap();
    graph
        .nodes
        .set_fixed_input(diff, SlotId(0), Variant::Bool(true))
        .unwrap();
    state.schedule_node(diff, &graph);
    assert!(scheduler::step(&vm, &graph, &mut state));
    assert_eq!(state.node_outputs(diff).unwrap()[0], Variant::Float(0.0));
    assert_eq!(state.scheduled().collect::<Vec<_>>(), vec![after]);
}

#[test]
fn distance_between_fixed_points() {
    let vm = Vm::new();
    let mut graph = Graph::new();
    let mut state = GraphState::with_seed(0);

    let dist = graph.add_node(instruction::DISTANCE).unwrap();
    graph
        .nodes
        .set_fixed_input(dist, SlotId(1), Variant::vec2(3.0, 4.0))
        .unwrap();

    state.schedule_node(dist, &graph);
    assert!(scheduler::step(&vm, &graph, &mut state));
    let value = float_of(state.node_outputs(dist).unwrap()[0]);
    assert!((value - 5.0).abs() < 1e-6);
}

#[test]
fn scheduled_queue_drains_before_deferred() {
    let vm = Vm::new();
    let mut graph = Graph::new();
    let early = graph.add_node(instruction::TICK).unwrap();
    let late = graph.add_node(instruction::TICK).unwrap();

    let mut state = GraphState::with_seed(0);
    state.defer_node(late, 0, &graph);
    state.schedule_node(early, &graph);

    assert!(scheduler::step(&vm, &graph, &mut state));
    assert!(state.node_outputs(early).is_some());
    assert!(state.node_outputs(late).is_none());

    assert!(scheduler::step(&vm, &graph, &mut state));
    assert!(state.node_outputs(late).is_some());
}

#[test]
fn schedule_instruction_hits_every_matching_node() {
    let mut graph = Graph::new();
    let tick_1 = graph.add_node(instruction::TICK).unwrap();
    let tick_2 = graph.add_node(instruction::TICK).unwrap();
    graph.add_node(instruction::ADD).unwrap();

    let mut state = GraphState::with_seed(0);
    state.schedule_instruction(instruction::TICK, &graph);
    assert_eq!(state.scheduled().collect::<Vec<_>>(), vec![tick_1, tick_2]);

    state.defer_instruction(instruction::TICK, 9, &graph);
    assert_eq!(state.deferred_count(), 2);
    assert!(state.deferred().all(|entry| entry.work == 9));
}

#[test]
fn unlinking_data_edges() {
    let mut graph = Graph::new();
    let source = graph.add_node(instruction::RANDOMIZE_NUMBER).unwrap();
    let sink_1 = graph.add_node(instruction::ADD).unwrap();
    let sink_2 = graph.add_node(instruction::ADD).unwrap();

    graph.link_data(source, SlotId(0), sink_1, SlotId(0)).unwrap();
    graph.link_data(source, SlotId(0), sink_1, SlotId(1)).unwrap();
    graph.link_data(source, SlotId(0), sink_2, SlotId(0)).unwrap();

    graph.unlink_input_data(sink_1, SlotId(0)).unwrap();
    assert!(!graph.nodes.node(sink_1).unwrap().inputs[0].is_linked());
    assert!(graph.nodes.node(sink_1).unwrap().inputs[1].is_linked());

    graph.unlink_output_data(source, SlotId(0)).unwrap();
    assert!(!graph.nodes.node(sink_1).unwrap().inputs[1].is_linked());
    assert!(!graph.nodes.node(sink_2).unwrap().inputs[0].is_linked());
}

#[test]
fn loader_skips_junk_lines() {
    let vm = Vm::new();
    let text = "node\t#1\ttick\n\
                \n\
                banana\t#1\n\
                value\t#1:0 =\tcolor purple\n\
                place\t#1\t(10.000000, 20.000000)\n\
                link\t#1 -> #9\n";
    let graph = format::load_graph(text.as_bytes(), &vm).unwrap();

    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.has_node(NodeId(1)));
    assert_eq!(graph.flow_links().len(), 0);
    let position = graph.nodes.position(NodeId(1)).unwrap();
    assert!((position - Vector2::new(10.0, 20.0)).norm() < 1e-3);
}

#[test]
fn seeded_states_are_deterministic() {
    let vm = Vm::new();
    let mut graph = Graph::new();
    let random = graph.add_node(instruction::RANDOMIZE_NUMBER).unwrap();

    let mut first = GraphState::with_seed(123);
    let mut second = GraphState::with_seed(123);
    first.schedule_node(random, &graph);
    second.schedule_node(random, &graph);
    assert!(scheduler::step(&vm, &graph, &mut first));
    assert!(scheduler::step(&vm, &graph, &mut second));

    assert_eq!(
        state_output(&first, random),
        state_output(&second, random)
    );
}

fn state_output(state: &GraphState, node_id: NodeId) -> Variant {
    state.node_outputs(node_id).unwrap()[0]
}
