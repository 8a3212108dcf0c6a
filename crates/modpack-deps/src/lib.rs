//! Dependency analysis for modpack manifests.
//!
//! Takes the mod entries of a manifest, builds a [`DependencyGraph`] out of their declared
//! relationships and reports the structural problems found in it (cycles, version conflicts,
//! missing and incompatible mods) along with a deterministic load order.
//!
//! See [`analysis`] for the usage.

pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::AnalyzerOptions;

pub mod record;
pub use record::ModRecord;
pub use record::DependencyRef;
pub use record::DependencyKind;

pub mod manifest;
pub use manifest::SourceFormat;

pub mod dependency_graph;
pub use dependency_graph::DependencyGraph;

pub mod analysis;
pub use analysis::ModDependencyAnalyzer;
pub use analysis::DependencyAnalysisResult;
pub use analysis::ResolutionStrategy;
pub use analysis::Report;
