use serde::{Serialize, Deserialize};

use crate::dependency_graph::DependencyGraph;
use crate::record::DependencyKind;

/// Two mods in the manifest where one declares it can't be installed with the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incompatibility {
	pub mod_id: String,
	pub incompatible_with: String,
	pub incompatible_name: String,
}

/// Lists `Incompatible` dependencies whose target is present in `graph`.
///
/// These never affect the load order or cycle detection.
pub fn find_incompatibilities(graph: &DependencyGraph) -> Vec<Incompatibility> {
	let mut found: Vec<Incompatibility> = graph.mods()
		.flat_map(|record| {
			record.dependencies_of_kind(DependencyKind::Incompatible)
				.filter(move |d| d.target_mod_id != record.mod_id)
				.filter_map(move |d| {
					let target = graph.get_mod(&d.target_mod_id)?;
					Some(Incompatibility {
						mod_id: record.mod_id.clone(),
						incompatible_with: target.mod_id.clone(),
						incompatible_name: target.name.clone(),
					})
				})
		})
		.collect();

	found.sort_by(|a, b| (&a.mod_id, &a.incompatible_with).cmp(&(&b.mod_id, &b.incompatible_with)));
	log::debug!("Found {} incompatible pairs", found.len());
	found
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::*;

	#[test]
	fn only_present_targets_are_reported() {
		let graph = DependencyGraph::from_records([
			ModRecord::new("opti", "OptiFine", "1.0")
				.with_dependency("sodium", "sodium-declared", DependencyKind::Incompatible)
				.with_dependency("absent", "Absent", DependencyKind::Incompatible),
			ModRecord::new("sodium", "Sodium", "0.5"),
		]);

		assert_eq!(find_incompatibilities(&graph), vec![Incompatibility {
			mod_id: "opti".into(),
			incompatible_with: "sodium".into(),
			incompatible_name: "Sodium".into(),
		}]);
	}

	#[test]
	fn sorted_by_pair() {
		let graph = DependencyGraph::from_records([
			ModRecord::new("b", "B", "1.0")
				.with_dependency("c", "C", DependencyKind::Incompatible)
				.with_dependency("a", "A", DependencyKind::Incompatible),
			ModRecord::new("a", "A", "1.0").with_dependency("b", "B", DependencyKind::Incompatible),
			ModRecord::new("c", "C", "1.0"),
		]);

		let pairs: Vec<(String, String)> = find_incompatibilities(&graph).into_iter()
			.map(|i| (i.mod_id, i.incompatible_with))
			.collect();
		assert_eq!(pairs, vec![
			("a".to_string(), "b".to_string()),
			("b".to_string(), "a".to_string()),
			("b".to_string(), "c".to_string()),
		]);
	}
}
