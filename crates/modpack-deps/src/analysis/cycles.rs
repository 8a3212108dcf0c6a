use petgraph::prelude::*;
use serde::{Serialize, Deserialize};

use crate::dependency_graph::DependencyGraph;

/// A closed chain of dependencies.
///
/// `cycle` starts at the mod the search ran back into and the last entry depends on the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircularDependency {
	pub cycle: Vec<String>,
	pub length: usize,
}

impl CircularDependency {
	pub fn new(cycle: Vec<String>) -> Self {
		let length = cycle.len();
		Self { cycle, length }
	}

	pub fn contains(&self, mod_id: &str) -> bool {
		self.cycle.iter().any(|m| m == mod_id)
	}
}

impl std::fmt::Display for CircularDependency {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.cycle.join(" -> "))?;
		if let Some(first) = self.cycle.first() {
			write!(f, " -> {}", first)?;
		}
		Ok(())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
	/// Not visited yet.
	White,
	/// On the current search path.
	Gray,
	/// Fully explored, never expanded again.
	Black,
}

/// Finds cycles using a depth first search over every mod in id order.
///
/// Each edge back into the current search path is reported as one cycle, in the order they are found.
/// This is not every cycle in the graph, but every group of mods that depend on each other produces at least one.
/// A mod depending on itself is a cycle of length 1.
pub fn find_circular_dependencies(graph: &DependencyGraph) -> Vec<CircularDependency> {
	let mut color = vec![Color::White; graph.node_bound()];
	let mut cycles = Vec::<CircularDependency>::new();

	for start in graph.mod_indices() {
		if color[start.index()] != Color::White {
			continue;
		}

		/* The stack is the search path, each frame holding the dependencies still left to visit */
		let mut stack = Vec::<(NodeIndex, std::vec::IntoIter<NodeIndex>)>::new();
		color[start.index()] = Color::Gray;
		stack.push((start, graph.mod_neighbors(start, Outgoing).into_iter()));

		loop {
			let next = match stack.last_mut() {
				Some((_, remaining)) => remaining.next(),
				None => break,
			};

			match next {
				Some(next) => match color[next.index()] {
					Color::White => {
						color[next.index()] = Color::Gray;
						stack.push((next, graph.mod_neighbors(next, Outgoing).into_iter()));
					},
					Color::Gray => {
						if let Some(pos) = stack.iter().position(|(n, _)| *n == next) {
							let cycle = stack[pos..].iter().map(|(n, _)| graph.id_of(*n).to_string()).collect();
							cycles.push(CircularDependency::new(cycle));
						}
					},
					Color::Black => {},
				},
				None => {
					if let Some((done, _)) = stack.pop() {
						color[done.index()] = Color::Black;
					}
				},
			}
		}
	}

	log::debug!("Found {} circular dependencies", cycles.len());
	cycles
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::*;

	fn graph_of(edges: &[(&str, &str)], ids: &[&str]) -> DependencyGraph {
		let mut graph = DependencyGraph::new();
		for id in ids {
			graph.add_mod(ModRecord::new(*id, *id, "1.0"));
		}
		for (from, to) in edges {
			graph.add_dependency(from, to);
		}
		graph
	}

	#[test]
	fn chain_has_no_cycles() {
		let graph = graph_of(&[("A", "B"), ("B", "C")], &["A", "B", "C"]);
		assert!(find_circular_dependencies(&graph).is_empty());
	}

	#[test]
	fn three_mod_cycle() {
		let graph = graph_of(&[("A", "B"), ("B", "C"), ("C", "A")], &["A", "B", "C"]);
		let cycles = find_circular_dependencies(&graph);
		assert_eq!(cycles, vec![CircularDependency::new(vec!["A".into(), "B".into(), "C".into()])]);
		assert_eq!(cycles[0].length, 3);
		assert_eq!(cycles[0].to_string(), "A -> B -> C -> A");
	}

	#[test]
	fn cycle_starts_at_reentered_mod() {
		/* The search enters at `a` but the cycle only covers `b` and `c` */
		let graph = graph_of(&[("a", "b"), ("b", "c"), ("c", "b")], &["a", "b", "c"]);
		let cycles = find_circular_dependencies(&graph);
		assert_eq!(cycles.len(), 1);
		assert_eq!(cycles[0].cycle, vec!["b", "c"]);
	}

	#[test]
	fn self_dependency_is_a_cycle() {
		let graph = graph_of(&[("a", "a")], &["a"]);
		let cycles = find_circular_dependencies(&graph);
		assert_eq!(cycles, vec![CircularDependency::new(vec!["a".into()])]);
		assert_eq!(cycles[0].length, 1);
	}

	#[test]
	fn independent_cycles_are_all_found() {
		let graph = graph_of(
			&[("a", "b"), ("b", "a"), ("x", "y"), ("y", "z"), ("z", "x"), ("m", "a")],
			&["a", "b", "m", "x", "y", "z"],
		);
		let cycles = find_circular_dependencies(&graph);
		assert_eq!(cycles.len(), 2);
		assert_eq!(cycles[0].cycle, vec!["a", "b"]);
		assert_eq!(cycles[1].cycle, vec!["x", "y", "z"]);
	}

	#[test]
	fn diamond_is_not_a_cycle() {
		let graph = graph_of(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")], &["a", "b", "c", "d"]);
		assert!(find_circular_dependencies(&graph).is_empty());
	}

	#[test]
	fn result_is_independent_of_insertion_order() {
		let forward = graph_of(&[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D"), ("D", "C")], &["A", "B", "C", "D"]);
		let backward = graph_of(&[("D", "C"), ("C", "D"), ("C", "A"), ("B", "C"), ("A", "B")], &["D", "C", "B", "A"]);
		assert_eq!(find_circular_dependencies(&forward), find_circular_dependencies(&backward));
	}
}
