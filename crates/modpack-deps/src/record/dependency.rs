use serde::*;

/// How a mod relates to one of its dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
	/// Must be present and loaded first.
	Required,
	/// Loaded first when present, fine when absent.
	Optional,
	/// Shipped inside the depending mod.
	Embedded,
	/// Must not be installed alongside the depending mod.
	Incompatible,
}

impl DependencyKind {
	/// Whether this relationship places the target before the source in a load order.
	///
	/// `Embedded` and `Incompatible` never produce an edge.
	pub fn is_ordering(&self) -> bool {
		matches!(self, DependencyKind::Required | DependencyKind::Optional)
	}

	/// Reads a kind from its name, case insensitive.
	///
	/// Accepts the plain names as well as CurseForge's relation names.
	pub fn from_name(name: &str) -> Option<Self> {
		match name.trim().to_lowercase().as_str() {
			"required" | "requireddependency" => Some(DependencyKind::Required),
			"optional" | "optionaldependency" | "tool" => Some(DependencyKind::Optional),
			"embedded" | "embeddedlibrary" | "include" => Some(DependencyKind::Embedded),
			"incompatible" => Some(DependencyKind::Incompatible),
			_ => None,
		}
	}

	/// Reads a kind from a CurseForge `relationType` code.
	pub fn from_relation_code(code: u64) -> Option<Self> {
		match code {
			1 | 6 => Some(DependencyKind::Embedded),
			2 | 4 => Some(DependencyKind::Optional),
			3 => Some(DependencyKind::Required),
			5 => Some(DependencyKind::Incompatible),
			_ => None,
		}
	}
}

impl std::fmt::Display for DependencyKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			DependencyKind::Required => "required",
			DependencyKind::Optional => "optional",
			DependencyKind::Embedded => "embedded",
			DependencyKind::Incompatible => "incompatible",
		};
		f.write_str(s)
	}
}

/// A relationship declared by a mod towards another mod, which may not be in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRef {
	pub target_mod_id: String,
	/// Only source of a name when the target is missing from the manifest.
	pub target_name: String,
	pub kind: DependencyKind,
}

impl DependencyRef {
	pub fn new(target_mod_id: impl Into<String>, target_name: impl Into<String>, kind: DependencyKind) -> Self {
		Self {
			target_mod_id: target_mod_id.into(),
			target_name: target_name.into(),
			kind,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test] fn kind_names_are_case_insensitive() { assert_eq!(DependencyKind::from_name(" Required "), Some(DependencyKind::Required)) }
	#[test] fn curseforge_relation_names() { assert_eq!(DependencyKind::from_name("EmbeddedLibrary"), Some(DependencyKind::Embedded)) }
	#[test] fn unknown_kind_name() { assert_eq!(DependencyKind::from_name("recommends"), None) }
	#[test] fn curseforge_relation_codes() {
		assert_eq!(DependencyKind::from_relation_code(3), Some(DependencyKind::Required));
		assert_eq!(DependencyKind::from_relation_code(5), Some(DependencyKind::Incompatible));
		assert_eq!(DependencyKind::from_relation_code(7), None);
	}
	#[test] fn only_required_and_optional_order() {
		assert!(DependencyKind::Required.is_ordering());
		assert!(DependencyKind::Optional.is_ordering());
		assert!(!DependencyKind::Embedded.is_ordering());
		assert!(!DependencyKind::Incompatible.is_ordering());
	}
}
