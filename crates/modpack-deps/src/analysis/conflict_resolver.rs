//! Picking which side of a version conflict to keep.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Deserialize};

use super::version_conflicts::{VersionConflict, ConflictingEntry};
use crate::record::{normalize_name, version_sort_key};

/// How [`resolve_conflicts()`] settles each [`VersionConflict`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStrategy {
	/// Keep the entry with the highest version.
	UseNewest,
	/// Keep the entry with the lowest version.
	UseOldest,
	/// Keep the mod id given for each mod key.
	///
	/// Keys are matched case insensitively. Conflicts without a usable preference fall back to `UseNewest`.
	UseSpecified(BTreeMap<String, String>),
	/// Keep nothing, every conflicting mod is excluded.
	ExcludeConflicting,
}

/// Gets the mod ids to exclude so that each conflict is left with at most one entry.
///
/// Versions are ranked with [`version_sort_key()`], entries with equal keys keep their id order
/// so the first one by id wins a tie. The returned ids hold no duplicates.
pub fn resolve_conflicts(conflicts: &[VersionConflict], strategy: &ResolutionStrategy) -> Vec<String> {
	let preferences: BTreeMap<String, &str> = match strategy {
		ResolutionStrategy::UseSpecified(map) => map.iter().map(|(k, v)| (normalize_name(k), v.as_str())).collect(),
		_ => Default::default(),
	};

	let mut seen = BTreeSet::<&str>::new();
	let mut excluded = Vec::<String>::new();

	for conflict in conflicts {
		let keep = match strategy {
			ResolutionStrategy::UseNewest => newest(&conflict.conflicting_entries),
			ResolutionStrategy::UseOldest => oldest(&conflict.conflicting_entries),
			ResolutionStrategy::ExcludeConflicting => None,
			ResolutionStrategy::UseSpecified(_) => {
				let specified = preferences.get(&conflict.mod_key)
					.and_then(|wanted| conflict.conflicting_entries.iter().find(|e| e.mod_id == *wanted));

				if specified.is_none() {
					if let Some(wanted) = preferences.get(&conflict.mod_key) {
						log::warn!("Preferred mod {} is not part of the conflict for {}, using the newest", wanted, conflict.mod_key);
					}
				}
				specified.or_else(|| newest(&conflict.conflicting_entries))
			},
		};

		if let Some(keep) = keep {
			log::debug!("Keeping {} ({}) for {}", keep.mod_id, keep.version, conflict.mod_key);
		}

		for entry in &conflict.conflicting_entries {
			if keep.map_or(false, |k| k.mod_id == entry.mod_id) {
				continue;
			}
			if seen.insert(entry.mod_id.as_str()) {
				excluded.push(entry.mod_id.clone());
			}
		}
	}

	excluded
}

fn newest(entries: &[ConflictingEntry]) -> Option<&ConflictingEntry> {
	let mut ranked: Vec<&ConflictingEntry> = entries.iter().collect();
	/* Stable, so equal versions stay in id order */
	ranked.sort_by(|a, b| version_sort_key(&b.version).cmp(&version_sort_key(&a.version)));
	ranked.first().copied()
}

fn oldest(entries: &[ConflictingEntry]) -> Option<&ConflictingEntry> {
	let mut ranked: Vec<&ConflictingEntry> = entries.iter().collect();
	ranked.sort_by_key(|e| version_sort_key(&e.version));
	ranked.first().copied()
}
