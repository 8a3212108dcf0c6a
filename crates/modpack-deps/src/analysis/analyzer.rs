use serde::{Serialize, Deserialize};

use super::*;
use crate::manifest::SourceFormat;
use crate::record::ModRecord;
use crate::AnalyzerOptions;

/// Everything found while analysing one manifest.
///
/// `success` is only `false` when the manifest could not be read, in which case the graph is empty
/// and `warnings` says why. Cycles, conflicts and missing mods are findings and leave it `true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyAnalysisResult {
	pub graph: DependencyGraph,
	pub success: bool,
	pub source_format: SourceFormat,
	pub circular_dependencies: Vec<CircularDependency>,
	pub version_conflicts: Vec<VersionConflict>,
	/// Every mod exactly once. Mods caught in a cycle are placed last on a best effort basis.
	pub recommended_load_order: Vec<String>,
	pub missing_dependencies: Vec<MissingDependency>,
	pub incompatibilities: Vec<Incompatibility>,
	pub warnings: Vec<String>,
}

impl DependencyAnalysisResult {
	fn failed(source_format: SourceFormat, reason: String) -> Self {
		Self {
			graph: DependencyGraph::new(),
			success: false,
			source_format,
			circular_dependencies: Default::default(),
			version_conflicts: Default::default(),
			recommended_load_order: Default::default(),
			missing_dependencies: Default::default(),
			incompatibilities: Default::default(),
			warnings: vec![reason],
		}
	}

	pub fn has_findings(&self) -> bool {
		!self.circular_dependencies.is_empty()
			|| !self.version_conflicts.is_empty()
			|| !self.missing_dependencies.is_empty()
			|| !self.incompatibilities.is_empty()
	}
}

/// Output of the passes that only read the graph.
struct Findings {
	circular_dependencies: Vec<CircularDependency>,
	version_conflicts: Vec<VersionConflict>,
	missing_dependencies: Vec<MissingDependency>,
	incompatibilities: Vec<Incompatibility>,
	load_order: LoadOrder,
}

fn run_passes_sequential(graph: &DependencyGraph) -> Findings {
	Findings {
		circular_dependencies: find_circular_dependencies(graph),
		version_conflicts: find_version_conflicts(graph),
		missing_dependencies: find_missing_dependencies(graph),
		incompatibilities: find_incompatibilities(graph),
		load_order: plan_load_order(graph),
	}
}

/// The passes share the graph read only and write separate outputs, so they can run side by side.
#[cfg(feature = "parallel")]
fn run_passes(graph: &DependencyGraph, parallel: bool) -> Findings {
	if !parallel {
		return run_passes_sequential(graph);
	}

	let ((circular_dependencies, version_conflicts), (missing_dependencies, (incompatibilities, load_order))) = rayon::join(
		|| rayon::join(|| find_circular_dependencies(graph), || find_version_conflicts(graph)),
		|| rayon::join(|| find_missing_dependencies(graph), || rayon::join(|| find_incompatibilities(graph), || plan_load_order(graph))),
	);

	Findings { circular_dependencies, version_conflicts, missing_dependencies, incompatibilities, load_order }
}

#[cfg(not(feature = "parallel"))]
fn run_passes(graph: &DependencyGraph, _parallel: bool) -> Findings {
	run_passes_sequential(graph)
}

/// Analyses manifests. Holds no state between calls, each analysis is independent.
#[derive(Debug, Clone, Default)]
pub struct ModDependencyAnalyzer {
	options: AnalyzerOptions,
}

impl ModDependencyAnalyzer {
	pub fn new(options: AnalyzerOptions) -> Self {
		Self { options }
	}

	pub fn options(&self) -> &AnalyzerOptions {
		&self.options
	}

	/// Reads `manifest` and analyses the mods in it.
	///
	/// See [`normalize()`](crate::manifest::normalize()) for the accepted format.
	/// A manifest that can't be read gives a result with `success == false`, this never returns an error.
	pub fn analyze_from_manifest(&self, manifest: &serde_json::Value, source_format: &str) -> DependencyAnalysisResult {
		let source_format = SourceFormat::new(source_format);
		log::info!("Analysing {} manifest", source_format);

		if self.options.validate_schema() {
			if let Err(e) = crate::manifest::validate_against_schema(manifest) {
				log::warn!("Manifest failed schema validation: {}", e);
				return DependencyAnalysisResult::failed(source_format, format!("Failed to parse manifest: {}", e));
			}
		}

		match crate::manifest::normalize(manifest, &source_format, self.options.strict_dependency_types()) {
			Ok(records) => self.analyze_records(records, source_format),
			Err(e) => {
				log::warn!("Failed to read manifest: {}", e);
				DependencyAnalysisResult::failed(source_format, format!("Failed to parse manifest: {}", e))
			},
		}
	}

	/// Analyses records that are already normalized.
	pub fn analyze_records(&self, records: Vec<ModRecord>, source_format: SourceFormat) -> DependencyAnalysisResult {
		let graph = DependencyGraph::from_records(records);
		let findings = run_passes(&graph, self.options.parallel());

		for cycle in &findings.circular_dependencies {
			log::debug!("Circular dependency: {}", cycle);
		}
		if !findings.load_order.is_complete() {
			log::info!("Load order is best effort from position {} onwards", findings.load_order.resolved);
		}

		let warnings = build_warnings(&findings);
		log::info!(
			"Analysed {} mods: {} circular dependencies, {} version conflicts, {} missing dependencies, {} incompatibilities",
			graph.mod_count(),
			findings.circular_dependencies.len(),
			findings.version_conflicts.len(),
			findings.missing_dependencies.len(),
			findings.incompatibilities.len(),
		);

		DependencyAnalysisResult {
			graph,
			success: true,
			source_format,
			circular_dependencies: findings.circular_dependencies,
			version_conflicts: findings.version_conflicts,
			recommended_load_order: findings.load_order.order,
			missing_dependencies: findings.missing_dependencies,
			incompatibilities: findings.incompatibilities,
			warnings,
		}
	}

	/// Runs [`analyze_from_manifest()`](Self::analyze_from_manifest()) on tokio's blocking pool.
	///
	/// For hosts that can't afford to run a large analysis on an async worker.
	/// # Errors
	/// - [`Background`](crate::Error::Background) if the analysis task panicked.
	pub async fn analyze_in_background(&self, manifest: serde_json::Value, source_format: String) -> crate::Result<DependencyAnalysisResult> {
		let analyzer = self.clone();
		tokio::task::spawn_blocking(move || analyzer.analyze_from_manifest(&manifest, &source_format))
			.await
			.map_err(|e| crate::Error::Background(e.to_string()))
	}

	/// Gets the mod ids to exclude to settle the version conflicts of `result`. `result` is not changed.
	///
	/// # Errors
	/// - [`EmptyGraph`](crate::Error::EmptyGraph) when `result` has no mods, usually because the analysis failed.
	/// An empty list is a normal outcome and means there was nothing to resolve.
	pub fn resolve_conflicts(&self, result: &DependencyAnalysisResult, strategy: &ResolutionStrategy) -> crate::Result<Vec<String>> {
		if result.graph.is_empty() {
			return Err(crate::Error::EmptyGraph);
		}
		Ok(conflict_resolver::resolve_conflicts(&result.version_conflicts, strategy))
	}

	pub fn generate_report(&self, result: &DependencyAnalysisResult) -> Report {
		generate_report(result)
	}
}

fn build_warnings(findings: &Findings) -> Vec<String> {
	let mut warnings = Vec::<String>::new();
	for m in &findings.missing_dependencies {
		warnings.push(format!("Missing dependency: {} required by {}", m.mod_name, m.requiring_mod_id));
	}
	for c in &findings.circular_dependencies {
		warnings.push(format!("Circular dependency: {}", c));
	}
	for c in &findings.version_conflicts {
		warnings.push(format!("Version conflict for {}", c));
	}
	for i in &findings.incompatibilities {
		warnings.push(format!("Incompatible mods: {} is incompatible with {}", i.mod_id, i.incompatible_with));
	}
	warnings
}
