/// Options controlling how a [`ModDependencyAnalyzer`](crate::ModDependencyAnalyzer) reads manifests.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
	validate_schema: bool,
	strict_dependency_types: bool,
	parallel: bool,
}

impl Default for AnalyzerOptions {
	fn default() -> Self {
		Self {
			validate_schema: false,
			strict_dependency_types: false,
			parallel: true,
		}
	}
}

impl AnalyzerOptions {
	/// Validate the raw manifest against the bundled JSON schema before reading it.
	///
	/// Usually only needed when the manifest adapter can't be trusted, it is slower.
	pub fn validate_schema(&self) -> bool {
		self.validate_schema
	}
	pub fn set_validate_schema(&mut self, validate_schema: bool) {
		self.validate_schema = validate_schema;
	}

	/// When set an unknown dependency type makes the whole manifest malformed,
	/// otherwise the dependency is skipped.
	pub fn strict_dependency_types(&self) -> bool {
		self.strict_dependency_types
	}
	pub fn set_strict_dependency_types(&mut self, strict_dependency_types: bool) {
		self.strict_dependency_types = strict_dependency_types;
	}

	/// Run the detectors on the rayon pool. Ignored without the `parallel` feature.
	pub fn parallel(&self) -> bool {
		self.parallel
	}
	pub fn set_parallel(&mut self, parallel: bool) {
		self.parallel = parallel;
	}
}
