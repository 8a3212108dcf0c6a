use std::collections::BTreeSet;

use petgraph::prelude::*;

use crate::dependency_graph::DependencyGraph;

/// Order in which mods should be processed, dependencies first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOrder {
	/// Every mod in the graph exactly once.
	pub order: Vec<String>,
	/// How many mods at the start of `order` were placed after all of their dependencies.
	/// The rest are blocked by a cycle and only appended in id order.
	pub resolved: usize,
}

impl LoadOrder {
	/// Mods whose position could not be determined because of a cycle.
	pub fn best_effort_tail(&self) -> &[String] {
		&self.order[self.resolved..]
	}

	pub fn is_complete(&self) -> bool {
		self.resolved == self.order.len()
	}
}

/// Sorts the graph so every mod comes after what it depends on.
///
/// Uses Kahn's algorithm where a mod becomes ready once it has no unplaced dependencies left.
/// Ready mods are always taken in id order so the result is the same for the same graph.
/// When a cycle stops progress the unplaced mods are appended in id order,
/// making the order complete but only best effort for those mods.
pub fn plan_load_order(graph: &DependencyGraph) -> LoadOrder {
	let mut remaining = vec![0usize; graph.node_bound()];
	let mut placed = vec![false; graph.node_bound()];
	let mut ready = BTreeSet::<(&str, NodeIndex)>::new();

	for i in graph.mod_indices() {
		remaining[i.index()] = graph.mod_neighbors(i, Outgoing).len();
		if remaining[i.index()] == 0 {
			ready.insert((graph.id_of(i), i));
		}
	}

	let mut order = Vec::<String>::with_capacity(graph.mod_count());
	while let Some((id, i)) = ready.pop_first() {
		order.push(id.to_string());
		placed[i.index()] = true;

		for dependent in graph.mod_neighbors(i, Incoming) {
			let r = &mut remaining[dependent.index()];
			*r = r.saturating_sub(1);
			if *r == 0 && !placed[dependent.index()] {
				ready.insert((graph.id_of(dependent), dependent));
			}
		}
	}

	let resolved = order.len();
	for i in graph.mod_indices() {
		if !placed[i.index()] {
			order.push(graph.id_of(i).to_string());
		}
	}

	if resolved < order.len() {
		log::warn!("{} mods are blocked by circular dependencies, their load order is best effort", order.len() - resolved);
	}

	LoadOrder { order, resolved }
}
