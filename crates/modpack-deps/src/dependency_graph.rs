//! The graph of mods and the "depends on" relationships between them.
//!
//! Mod ids are interned once into petgraph node indices, `mod_index` maps them back.
//! Every ordering query sorts by the original id and never by index so results don't depend on insertion order.

use std::collections::BTreeMap;

use petgraph::prelude::*;
use serde::{Serialize, Deserialize};

use crate::record::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeData {
	/// Node contains a mod from the manifest.
	Mod(ModRecord),
	/// Node only refers to an identifier with no additional information.
	///
	/// Created when a dependency is added before its target, or when the target was never added at all.
	Stub(String),
}

impl NodeData {
	pub fn id(&self) -> &str {
		match self {
			NodeData::Mod(record) => &record.mod_id,
			NodeData::Stub(id) => id,
		}
	}

	pub fn as_mod(&self) -> Option<&ModRecord> {
		if let NodeData::Mod(record) = self { Some(record) } else { None }
	}
}

/// Edges point from a mod to what it depends on.
/// Incoming edges are the reverse relation, so the two can never disagree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
	graph: DiGraph<NodeData, ()>,
	mod_index: BTreeMap<String, NodeIndex>,
}

impl DependencyGraph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds the graph for a list of records.
	///
	/// Only `Required` and `Optional` dependencies whose target is one of `records` become edges.
	pub fn from_records(records: impl IntoIterator<Item = ModRecord>) -> Self {
		let mut graph = Self::new();
		for record in records {
			graph.add_mod(record);
		}

		let edges: Vec<(String, String)> = graph.mods()
			.flat_map(|record| {
				record.dependencies.iter()
					.filter(|d| d.kind.is_ordering())
					.map(move |d| (record.mod_id.clone(), d.target_mod_id.clone()))
			})
			.filter(|(_, to)| graph.contains_mod(to))
			.collect();

		for (from, to) in edges {
			graph.add_dependency(&from, &to);
		}

		log::debug!("Built dependency graph with {} mods and {} edges", graph.mod_count(), graph.edge_count());
		graph
	}

	/// Inserts `record`, replacing any mod with the same id. Edges are left untouched.
	pub fn add_mod(&mut self, record: ModRecord) {
		if let Some(&i) = self.mod_index.get(&record.mod_id) {
			if let NodeData::Mod(existing) = &self.graph[i] {
				log::warn!("Mod id {} appears more than once, replacing `{}` with `{}`", record.mod_id, existing, record);
			}
			self.graph[i] = NodeData::Mod(record);
		} else {
			let id = record.mod_id.clone();
			let i = self.graph.add_node(NodeData::Mod(record));
			self.mod_index.insert(id, i);
		}
	}

	/// Records that `from_id` depends on `to_id`. Adding the same pair twice does nothing.
	///
	/// Either id may be unknown, a `Stub` node stands in for it until [`add_mod()`](Self::add_mod()) is called.
	pub fn add_dependency(&mut self, from_id: &str, to_id: &str) {
		let from = self.get_or_add_node_index(from_id);
		let to = self.get_or_add_node_index(to_id);
		self.graph.update_edge(from, to, ());
	}

	/// Returns the index of the existing node or a `Stub` node with `id`
	fn get_or_add_node_index(&mut self, id: &str) -> NodeIndex {
		if let Some(&i) = self.mod_index.get(id) {
			i
		} else {
			let i = self.graph.add_node(NodeData::Stub(id.to_string()));
			self.mod_index.insert(id.to_string(), i);
			i
		}
	}

	/* Queries */

	pub fn get_mod(&self, id: &str) -> Option<&ModRecord> {
		self.mod_index.get(id).and_then(|&i| self.graph[i].as_mod())
	}

	pub fn contains_mod(&self, id: &str) -> bool {
		self.get_mod(id).is_some()
	}

	/// All mods ordered by id.
	pub fn mods(&self) -> impl Iterator<Item = &ModRecord> {
		self.mod_index.values().filter_map(move |&i| self.graph[i].as_mod())
	}

	/// All mod ids in lexicographic order. Stubs are not included.
	pub fn mod_ids(&self) -> impl Iterator<Item = &str> {
		self.mods().map(|m| m.mod_id.as_str())
	}

	pub fn mod_count(&self) -> usize {
		self.mods().count()
	}

	pub fn edge_count(&self) -> usize {
		self.graph.edge_count()
	}

	pub fn is_empty(&self) -> bool {
		self.mod_count() == 0
	}

	/// What `id` depends on, sorted by id. Includes ids that were never added as a mod.
	pub fn dependencies_of(&self, id: &str) -> Vec<&str> {
		self.neighbor_ids(id, Outgoing)
	}

	/// What depends on `id`, sorted by id.
	pub fn dependents_of(&self, id: &str) -> Vec<&str> {
		self.neighbor_ids(id, Incoming)
	}

	fn neighbor_ids(&self, id: &str, direction: petgraph::Direction) -> Vec<&str> {
		let Some(&i) = self.mod_index.get(id) else { return Vec::new() };
		let mut ids: Vec<&str> = self.graph.neighbors_directed(i, direction).map(|n| self.graph[n].id()).collect();
		ids.sort_unstable();
		ids
	}

	/* Index level access for the analysis passes */

	/// Upper bound of node indices, for sizing per-node tables.
	pub(crate) fn node_bound(&self) -> usize {
		self.graph.node_count()
	}

	pub(crate) fn id_of(&self, i: NodeIndex) -> &str {
		self.graph[i].id()
	}

	/// Mod nodes in id order.
	pub(crate) fn mod_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
		self.mod_index.values().copied().filter(move |&i| self.graph[i].as_mod().is_some())
	}

	/// Neighbouring mod nodes in id order, stubs are skipped.
	pub(crate) fn mod_neighbors(&self, i: NodeIndex, direction: petgraph::Direction) -> Vec<NodeIndex> {
		let mut v: Vec<NodeIndex> = self.graph.neighbors_directed(i, direction)
			.filter(|&n| self.graph[n].as_mod().is_some())
			.collect();
		v.sort_unstable_by(|a, b| self.id_of(*a).cmp(self.id_of(*b)));
		v
	}
}
