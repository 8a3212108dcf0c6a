//! Various helper functions for building manifests in tests
//!
//! functions in this module should not panic to avoid confusion in callers

use serde_json::{json, Value};

/// A manifest dependency entry in the `project_id` / `dependencyType` form.
pub fn dependency(project_id: u64, name: &str, dependency_type: &str) -> Value {
	json!({ "project_id": project_id, "name": name, "dependencyType": dependency_type })
}

pub fn required(project_id: u64, name: &str) -> Value {
	dependency(project_id, name, "required")
}

pub fn optional(project_id: u64, name: &str) -> Value {
	dependency(project_id, name, "optional")
}

/// A manifest mod entry.
pub fn mod_entry(project_id: u64, name: &str, version: &str, dependencies: Vec<Value>) -> Value {
	json!({ "project_id": project_id, "name": name, "version": version, "dependencies": dependencies })
}

/// Wraps entries into a manifest object.
pub fn manifest(entries: Vec<Value>) -> Value {
	json!({ "mods": entries })
}

/// `A -> B -> C`, all required. Ids are 1, 2 and 3.
pub fn chain_manifest() -> Value {
	manifest(vec![
		mod_entry(1, "A", "1.0.0", vec![required(2, "B")]),
		mod_entry(2, "B", "1.0.0", vec![required(3, "C")]),
		mod_entry(3, "C", "1.0.0", vec![]),
	])
}

/// `A -> B -> C -> A`, all required. Ids are 1, 2 and 3.
pub fn cycle_manifest() -> Value {
	manifest(vec![
		mod_entry(1, "A", "1.0.0", vec![required(2, "B")]),
		mod_entry(2, "B", "1.0.0", vec![required(3, "C")]),
		mod_entry(3, "C", "1.0.0", vec![required(1, "A")]),
	])
}

/// A larger pack mixing every kind of problem.
///
/// - 10..=14 form a clean tree.
/// - 20, 21 and 22 form a cycle, 23 depends on the cycle.
/// - 30 and 31 are the same mod at different versions, 32 is the same mod again at 30's version.
/// - 40 requires the absent 999 and optionally the absent 998.
/// - 50 is incompatible with 10.
pub fn mixed_manifest() -> Value {
	manifest(vec![
		mod_entry(14, "Shaders", "1.2", vec![required(12, "Core Lib"), optional(13, "Config Lib")]),
		mod_entry(10, "Fabric API", "0.92.0", vec![]),
		mod_entry(11, "Kotlin", "1.10", vec![required(10, "Fabric API")]),
		mod_entry(12, "Core Lib", "3.0", vec![required(11, "Kotlin"), required(10, "Fabric API")]),
		mod_entry(13, "Config Lib", "2.0", vec![dependency(10, "Fabric API", "embedded")]),

		mod_entry(20, "Tech A", "1.0", vec![required(21, "Tech B")]),
		mod_entry(21, "Tech B", "1.0", vec![required(22, "Tech C")]),
		mod_entry(22, "Tech C", "1.0", vec![optional(20, "Tech A")]),
		mod_entry(23, "Tech Addon", "1.0", vec![required(20, "Tech A"), required(10, "Fabric API")]),

		mod_entry(30, "JEI", "15.2.0", vec![]),
		mod_entry(31, "jei ", "15.3.0-beta", vec![]),
		mod_entry(32, "JEI", "15.2.0", vec![]),

		mod_entry(40, "Needy", "1.0", vec![required(999, "MissingMod"), optional(998, "OptionalMissing")]),

		mod_entry(50, "Rival", "1.0", vec![dependency(10, "Fabric API", "incompatible")]),
	])
}
