//! Finding problems in a modpack's dependencies and the order to load it in.
//!
//! # Usage
//! 1. Create a [`ModDependencyAnalyzer`], optionally with [`AnalyzerOptions`](crate::AnalyzerOptions).
//! 1. [`ModDependencyAnalyzer::analyze_from_manifest()`] to get a [`DependencyAnalysisResult`].
//! Check `success` first, a manifest that could not be read has nothing else in it.
//! 1. Read the findings and `recommended_load_order` from the result,
//! or [`ModDependencyAnalyzer::generate_report()`] for a condensed [`Report`].
//! 1. [`ModDependencyAnalyzer::resolve_conflicts()`] with a [`ResolutionStrategy`] to get the mods to leave out.
//!
//! The individual passes are also available as free functions taking a [`DependencyGraph`].

use crate::dependency_graph::DependencyGraph;

mod cycles;
pub use cycles::CircularDependency;
pub use cycles::find_circular_dependencies;

mod version_conflicts;
pub use version_conflicts::VersionConflict;
pub use version_conflicts::ConflictingEntry;
pub use version_conflicts::find_version_conflicts;

mod missing;
pub use missing::MissingDependency;
pub use missing::find_missing_dependencies;

mod incompatible;
pub use incompatible::Incompatibility;
pub use incompatible::find_incompatibilities;

mod load_order;
pub use load_order::LoadOrder;
pub use load_order::plan_load_order;

mod conflict_resolver;
pub use conflict_resolver::ResolutionStrategy;
pub use conflict_resolver::resolve_conflicts;

mod report;
pub use report::Report;
pub use report::generate_report;

mod analyzer;
pub use analyzer::ModDependencyAnalyzer;
pub use analyzer::DependencyAnalysisResult;
