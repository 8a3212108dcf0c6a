use serde::{Serialize, Deserialize};

use super::DependencyAnalysisResult;

/// Flat summary of a [`DependencyAnalysisResult`] for dashboards and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
	pub success: bool,
	pub total_mods: usize,
	pub load_order: Vec<String>,
	pub circular_dependency_count: usize,
	pub version_conflict_count: usize,
	pub missing_dependency_count: usize,
	pub incompatibility_count: usize,
	pub warnings: Vec<String>,
}

impl Report {
	pub fn to_json(&self) -> crate::Result<String> {
		Ok(serde_json::to_string(self)?)
	}
}

impl From<&DependencyAnalysisResult> for Report {
	fn from(result: &DependencyAnalysisResult) -> Self {
		Self {
			success: result.success,
			total_mods: result.graph.mod_count(),
			load_order: result.recommended_load_order.clone(),
			circular_dependency_count: result.circular_dependencies.len(),
			version_conflict_count: result.version_conflicts.len(),
			missing_dependency_count: result.missing_dependencies.len(),
			incompatibility_count: result.incompatibilities.len(),
			warnings: result.warnings.clone(),
		}
	}
}

pub fn generate_report(result: &DependencyAnalysisResult) -> Report {
	Report::from(result)
}
