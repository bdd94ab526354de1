use flowscript_core::{
    format,
    graph::{Graph, SlotId},
    instruction, scheduler,
    state::GraphState,
    variant::Variant,
    vm::Vm,
};
use std::env;

const ROUNDS: u32 = 10;
const STEPS_PER_ROUND: u32 = 32;
const TIME_PER_ROUND: f32 = 0.25;

/// Demo host: run a graph from a file, or a built-in example when no path is
/// given. A file graph is saved back to its path on exit.
fn main() {
    let vm = Vm::new();
    let path = env::args().nth(1);

    let graph = match &path {
        Some(path) => {
            println!("Loading graph from file: {}", path);
            format::load_graph_from_path(path, &vm).expect("could not load the graph")
        }
        None => example_graph(),
    };

    let mut state = GraphState::new();
    run(&vm, &graph, &mut state);

    match &path {
        Some(path) => {
            println!("Saving graph to file: {}", path);
            format::save_graph_to_path(&graph, &vm, path).expect("could not save the graph");
        }
        None => {
            let script =
                format::save_graph_to_string(&graph, &vm).expect("could not print the graph");
            print!("{}", script);
        }
    }
}

fn run(vm: &Vm, graph: &Graph, state: &mut GraphState) {
    state.schedule_instruction(instruction::TICK, graph);
    if state.is_idle() {
        state.schedule_instruction(instruction::PRINT_OWN_ID, graph);
    }

    // A deferred node can outlive a whole round (a pending `delay` for one),
    // so each round runs a bounded number of steps before time moves on.
    for _ in 0..ROUNDS {
        for _ in 0..STEPS_PER_ROUND {
            if !scheduler::step(vm, graph, state) {
                break;
            }
        }
        state.forward_time(TIME_PER_ROUND);
        if state.is_idle() {
            break;
        }
    }
}

/// `print_own_id` entry feeding a randomizer and an adder; the sum of a
/// fixed 1.5 and the random number ends up printed.
fn example_graph() -> Graph {
    let mut graph = Graph::new();

    let entry = graph.add_node(instruction::PRINT_OWN_ID).unwrap();
    graph
        .nodes
        .set_default_output(entry, SlotId(0), Variant::Float(0.5))
        .unwrap();

    let random = graph.add_node(instruction::RANDOMIZE_NUMBER).unwrap();

    let sum = graph.add_node(instruction::ADD).unwrap();
    graph
        .nodes
        .set_fixed_input(sum, SlotId(0), Variant::Float(1.5))
        .unwrap();
    graph.link_data(random, SlotId(0), sum, SlotId(1)).unwrap();

    let print = graph.add_node(instruction::PRINT_VALUE).unwrap();
    graph.link_data(sum, SlotId(0), print, SlotId(0)).unwrap();

    graph.link_nodes(entry, random).unwrap();
    graph.link_nodes(entry, sum).unwrap();
    graph.link_nodes(sum, print).unwrap();

    graph
}
