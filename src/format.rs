//! The textual graph format: one line per fact, tab-separated, diffable.
//!
//! Save order is nodes, placements, data links, fixed values, flow links.
//! Instruction names are the canonical key; opcodes are never written.

use crate::{
    error::Result,
    graph::{Graph, NodeId, SlotId},
    variant::Variant,
    vm::Vm,
};
use nalgebra::Vector2;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
};

pub fn save_graph<W: Write>(graph: &Graph, vm: &Vm, w: &mut W) -> io::Result<()> {
    for &node_id in graph.nodes.ids() {
        let node = match graph.nodes.node(node_id) {
            Ok(node) => node,
            Err(_) => continue,
        };
        writeln!(
            w,
            "node\t#{}\t{}",
            node_id,
            vm.instruction_name(node.instruction)
        )?;
    }

    for &node_id in graph.nodes.ids() {
        if let Ok(position) = graph.nodes.position(node_id) {
            writeln!(
                w,
                "place\t#{}\t({:.6}, {:.6})",
                node_id, position.x, position.y
            )?;
        }
    }

    for &node_id in graph.nodes.ids() {
        let node = match graph.nodes.node(node_id) {
            Ok(node) => node,
            Err(_) => continue,
        };
        for (slot, input) in node.inputs.iter().enumerate() {
            if input.is_linked() {
                writeln!(
                    w,
                    "data\t#{}:{} -> #{}:{}",
                    input.source_id, input.source_slot, node_id, slot
                )?;
            }
        }
    }

    for &node_id in graph.nodes.ids() {
        let node = match graph.nodes.node(node_id) {
            Ok(node) => node,
            Err(_) => continue,
        };
        for (slot, input) in node.inputs.iter().enumerate() {
            // A nil fixed value means "use the instruction default" and is
            // expressed by the absence of a line.
            if input.is_linked() || input.fixed.is_nil() {
                continue;
            }
            write!(w, "value\t#{}:{} =\t", node_id, slot)?;
            match input.fixed {
                Variant::Nil => unreachable!("nil fixed values are never written"),
                Variant::Bool(b) => writeln!(w, "bool {}", if b { "t" } else { "f" })?,
                Variant::Int(i) => writeln!(w, "int {}", i)?,
                Variant::Float(v) => writeln!(w, "float {:.6}", v)?,
                Variant::Vec2(v) => writeln!(w, "vec2 ({:.6}, {:.6})", v.x, v.y)?,
            }
        }
    }

    for link in graph.flow_links() {
        writeln!(w, "link\t#{} -> #{}", link.source_id, link.target_id)?;
    }

    Ok(())
}

pub fn save_graph_to_string(graph: &Graph, vm: &Vm) -> io::Result<String> {
    let mut buffer = Vec::new();
    save_graph(graph, vm, &mut buffer)?;
    Ok(String::from_utf8(buffer).expect("the graph format is plain ascii"))
}

pub fn save_graph_to_path(graph: &Graph, vm: &Vm, path: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    save_graph(graph, vm, &mut file)
}

/// One-pass streaming load. Unknown line kinds and value types warn on
/// stderr and are skipped, so a partially understood file still yields a
/// usable graph.
pub fn load_graph<R: BufRead>(reader: R, vm: &Vm) -> Result<Graph> {
    let mut graph = Graph::new();

    for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            None => continue,
            Some("node") => {
                let node_id = tokens.next().and_then(parse_node_ref);
                let name = tokens.next();
                let (node_id, name) = match (node_id, name) {
                    (Some(node_id), Some(name)) => (node_id, name),
                    _ => {
                        eprintln!("Skipping malformed node line: {}", line);
                        continue;
                    }
                };

                let opcode = vm.find_instruction(name);
                let fresh_id = graph.add_node(opcode)?;
                if let Err(e) = graph.nodes.relabel(fresh_id, node_id) {
                    eprintln!("Could not give node the id #{}: {}", node_id, e);
                    graph.remove_node(fresh_id)?;
                }
            }
            Some("place") => {
                let node_id = tokens.next().and_then(parse_node_ref);
                let position = parse_pair(tokens.next(), tokens.next());
                match (node_id, position) {
                    (Some(node_id), Some((x, y))) => {
                        if let Err(e) = graph.nodes.set_position(node_id, Vector2::new(x, y)) {
                            eprintln!("Skipping placement of node #{}: {}", node_id, e);
                        }
                    }
                    _ => eprintln!("Skipping malformed place line: {}", line),
                }
            }
            Some("data") => {
                let source = tokens.next().and_then(parse_slot_ref);
                let arrow = tokens.next();
                let target = tokens.next().and_then(parse_slot_ref);
                match (source, arrow, target) {
                    (Some((source_id, source_slot)), Some("->"), Some((target_id, target_slot))) => {
                        if let Err(e) =
                            graph.link_data(source_id, source_slot, target_id, target_slot)
                        {
                            eprintln!("Skipping data link: {}", e);
                        }
                    }
                    _ => eprintln!("Skipping malformed data line: {}", line),
                }
            }
            Some("value") => {
                let slot_ref = tokens.next().and_then(parse_slot_ref);
                let equals = tokens.next();
                let (node_id, slot) = match (slot_ref, equals) {
                    (Some(slot_ref), Some("=")) => slot_ref,
                    _ => {
                        eprintln!("Skipping malformed value line: {}", line);
                        continue;
                    }
                };

                let value = match tokens.next() {
                    Some("float") => tokens
                        .next()
                        .and_then(|t| t.parse::<f32>().ok())
                        .map(Variant::Float),
                    Some("int") => tokens
                        .next()
                        .and_then(|t| t.parse::<i32>().ok())
                        .map(Variant::Int),
                    Some("bool") => match tokens.next() {
                        Some("t") => Some(Variant::Bool(true)),
                        Some("f") => Some(Variant::Bool(false)),
                        _ => None,
                    },
                    Some("vec2") => {
                        parse_pair(tokens.next(), tokens.next()).map(|(x, y)| Variant::vec2(x, y))
                    }
                    Some(unknown) => {
                        eprintln!("Skipping value of unknown type '{}'", unknown);
                        continue;
                    }
                    None => None,
                };

                match value {
                    Some(value) => {
                        if let Err(e) = graph.nodes.set_fixed_input(node_id, slot, value) {
                            eprintln!("Skipping value for node #{}: {}", node_id, e);
                        }
                    }
                    None => eprintln!("Skipping malformed value line: {}", line),
                }
            }
            Some("link") => {
                let source = tokens.next().and_then(parse_node_ref);
                let arrow = tokens.next();
                let target = tokens.next().and_then(parse_node_ref);
                match (source, arrow, target) {
                    (Some(source_id), Some("->"), Some(target_id)) => {
                        if let Err(e) = graph.link_nodes(source_id, target_id) {
                            eprintln!("Skipping flow link: {}", e);
                        }
                    }
                    _ => eprintln!("Skipping malformed link line: {}", line),
                }
            }
            Some(kind) => {
                eprintln!("Skipping line of unknown kind '{}'", kind);
            }
        }
    }

    Ok(graph)
}

pub fn load_graph_from_path(path: &str, vm: &Vm) -> Result<Graph> {
    let file = File::open(path)?;
    load_graph(BufReader::new(file), vm)
}

/// `#7` parses to node id 7.
fn parse_node_ref(token: &str) -> Option<NodeId> {
    token
        .strip_prefix('#')?
        .parse::<u32>()
        .ok()
        .map(NodeId)
}

/// `#7:2` parses to (node id 7, slot 2).
fn parse_slot_ref(token: &str) -> Option<(NodeId, SlotId)> {
    let mut parts = token.strip_prefix('#')?.splitn(2, ':');
    let node_id = parts.next()?.parse::<u32>().ok().map(NodeId)?;
    let slot = parts.next()?.parse::<u32>().ok().map(SlotId)?;
    Some((node_id, slot))
}

/// Reassembles a `(x, y)` pair that whitespace splitting broke in two.
fn parse_pair(a: Option<&str>, b: Option<&str>) -> Option<(f32, f32)> {
    let x = a?
        .trim_start_matches('(')
        .trim_end_matches(',')
        .parse::<f32>()
        .ok()?;
    let y = b?.trim_end_matches(')').parse::<f32>().ok()?;
    Some((x, y))
}
