use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Deserialize};

use crate::dependency_graph::DependencyGraph;
use crate::record::ModRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictingEntry {
	pub mod_id: String,
	pub version: String,
}

/// Several mods sharing a name but not a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConflict {
	/// The shared name, lowercased and trimmed.
	pub mod_key: String,
	/// Ordered by mod id.
	pub conflicting_entries: Vec<ConflictingEntry>,
}

impl VersionConflict {
	pub fn mod_ids(&self) -> impl Iterator<Item = &str> {
		self.conflicting_entries.iter().map(|e| e.mod_id.as_str())
	}
}

impl std::fmt::Display for VersionConflict {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let entries: Vec<String> = self.conflicting_entries.iter()
			.map(|e| format!("{} ({})", e.mod_id, e.version))
			.collect();
		write!(f, "{}: {}", self.mod_key, entries.join(", "))
	}
}

/// Groups mods by [`mod_key()`](ModRecord::mod_key()) and reports every group holding more than one distinct version string.
///
/// Versions are compared as raw strings, `"1.0"` and `"1.0.0"` conflict.
/// A group where every mod has the same version is the same mod listed twice and is not reported.
pub fn find_version_conflicts(graph: &DependencyGraph) -> Vec<VersionConflict> {
	let mut groups = BTreeMap::<String, Vec<&ModRecord>>::new();
	for record in graph.mods() {
		groups.entry(record.mod_key()).or_default().push(record);
	}

	let conflicts: Vec<VersionConflict> = groups.into_iter()
		.filter(|(_, records)| {
			records.iter().map(|r| r.version.as_str()).collect::<BTreeSet<_>>().len() > 1
		})
		.map(|(mod_key, records)| VersionConflict {
			mod_key,
			conflicting_entries: records.into_iter()
				.map(|r| ConflictingEntry { mod_id: r.mod_id.clone(), version: r.version.clone() })
				.collect(),
		})
		.collect();

	log::debug!("Found {} version conflicts", conflicts.len());
	conflicts
}
