//! Normalized mod entries and the relationships between them.

use serde::*;

mod dependency;
pub use dependency::DependencyRef;
pub use dependency::DependencyKind;

mod version_key;
pub use version_key::VersionKey;
pub use version_key::version_sort_key;

/// A single mod entry taken from a manifest.
///
/// Created once during normalization and only read after that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModRecord {
	/// Unique within one analysis, taken from the manifest's project or file identifier.
	pub mod_id: String,
	/// Display name. Not unique, several records can share one.
	pub name: String,
	/// Can be *any* string, there is no enforced schema.
	pub version: String,
	/// In the order they were declared, at most one per target.
	pub dependencies: Vec<DependencyRef>,
}

impl ModRecord {
	pub fn new(mod_id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
		Self {
			mod_id: mod_id.into(),
			name: name.into(),
			version: version.into(),
			dependencies: Default::default(),
		}
	}

	/// Adds a dependency unless one with the same target already exists.
	///
	/// Returns `false` if the dependency was ignored.
	pub fn add_dependency(&mut self, dependency: DependencyRef) -> bool {
		if self.dependencies.iter().any(|d| d.target_mod_id == dependency.target_mod_id) {
			false
		} else {
			self.dependencies.push(dependency);
			true
		}
	}

	/// Builder form of [`add_dependency()`](Self::add_dependency())
	pub fn with_dependency(mut self, target_mod_id: impl Into<String>, target_name: impl Into<String>, kind: DependencyKind) -> Self {
		self.add_dependency(DependencyRef::new(target_mod_id, target_name, kind));
		self
	}

	/// Key used to group records of the same mod, case and surrounding whitespace are ignored.
	pub fn mod_key(&self) -> String {
		normalize_name(&self.name)
	}

	pub fn dependencies_of_kind(&self, kind: DependencyKind) -> impl Iterator<Item = &DependencyRef> {
		self.dependencies.iter().filter(move |d| d.kind == kind)
	}
}

impl std::fmt::Display for ModRecord {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} ({}) {}", self.name, self.mod_id, self.version)
	}
}

pub fn normalize_name(name: &str) -> String {
	name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn duplicate_dependency_targets_keep_the_first() {
		let record = ModRecord::new("1", "A", "1.0")
			.with_dependency("2", "B", DependencyKind::Required)
			.with_dependency("3", "C", DependencyKind::Optional)
			.with_dependency("2", "B again", DependencyKind::Incompatible);

		assert_eq!(record.dependencies.len(), 2);
		assert_eq!(record.dependencies[0].target_name, "B");
		assert_eq!(record.dependencies[0].kind, DependencyKind::Required);
		assert_eq!(record.dependencies[1].target_mod_id, "3");
	}

	#[test]
	fn mod_key_ignores_case_and_whitespace() {
		assert_eq!(ModRecord::new("1", "  Same Mod ", "1.0").mod_key(), "same mod");
		assert_eq!(ModRecord::new("2", "SAME MOD", "1.0").mod_key(), "same mod");
	}
}
