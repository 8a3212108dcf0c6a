use serde::{Serialize, Deserialize};

use crate::dependency_graph::DependencyGraph;
use crate::record::DependencyKind;

/// A required dependency that is not in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDependency {
	pub requiring_mod_id: String,
	/// Name as declared by the requiring mod, the real mod was never found.
	pub mod_name: String,
	pub mod_id_referenced: String,
}

/// Lists every `Required` dependency whose target is not a mod in `graph`.
///
/// Optional and embedded dependencies are allowed to be absent.
/// Incompatible ones are never checked, being absent is the point.
pub fn find_missing_dependencies(graph: &DependencyGraph) -> Vec<MissingDependency> {
	let missing: Vec<MissingDependency> = graph.mods()
		.flat_map(|record| {
			record.dependencies_of_kind(DependencyKind::Required)
				.filter(move |d| !graph.contains_mod(&d.target_mod_id))
				.map(move |d| MissingDependency {
					requiring_mod_id: record.mod_id.clone(),
					mod_name: d.target_name.clone(),
					mod_id_referenced: d.target_mod_id.clone(),
				})
		})
		.collect();

	log::debug!("Found {} missing dependencies", missing.len());
	missing
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::*;

	#[test]
	fn missing_required_dependency_uses_declared_name() {
		let graph = DependencyGraph::from_records([
			ModRecord::new("1", "Needy", "1.0").with_dependency("999", "MissingMod", DependencyKind::Required),
		]);

		assert_eq!(find_missing_dependencies(&graph), vec![MissingDependency {
			requiring_mod_id: "1".into(),
			mod_name: "MissingMod".into(),
			mod_id_referenced: "999".into(),
		}]);
	}

	#[test]
	fn other_kinds_are_not_missing() {
		let graph = DependencyGraph::from_records([
			ModRecord::new("1", "A", "1.0")
				.with_dependency("2", "Opt", DependencyKind::Optional)
				.with_dependency("3", "Emb", DependencyKind::Embedded)
				.with_dependency("4", "Inc", DependencyKind::Incompatible),
		]);
		assert!(find_missing_dependencies(&graph).is_empty());
	}

	#[test]
	fn present_dependency_is_not_missing() {
		let graph = DependencyGraph::from_records([
			ModRecord::new("1", "A", "1.0").with_dependency("2", "B", DependencyKind::Required),
			ModRecord::new("2", "B", "1.0"),
		]);
		assert!(find_missing_dependencies(&graph).is_empty());
	}

	#[test]
	fn every_requiring_mod_is_reported() {
		let graph = DependencyGraph::from_records([
			ModRecord::new("b", "B", "1.0").with_dependency("x", "X", DependencyKind::Required),
			ModRecord::new("a", "A", "1.0")
				.with_dependency("y", "Y", DependencyKind::Required)
				.with_dependency("x", "X", DependencyKind::Required),
		]);
		let missing: Vec<(String, String)> = find_missing_dependencies(&graph).into_iter()
			.map(|m| (m.requiring_mod_id, m.mod_id_referenced))
			.collect();
		assert_eq!(missing, vec![
			("a".to_string(), "y".to_string()),
			("a".to_string(), "x".to_string()),
			("b".to_string(), "x".to_string()),
		]);
	}
}
