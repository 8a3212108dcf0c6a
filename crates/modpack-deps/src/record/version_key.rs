use serde::*;

/// Sortable form of a version string.
///
/// # Format
/// Only the leading run of dot separated numbers is kept, `"1.0.0-beta"` becomes `[1, 0, 0]`.
/// Anything after the run (`-SNAPSHOT`, `+build`, `b`, ...) is ignored.
/// Keys of different lengths compare as if the shorter one was padded with zeros,
/// so `[1, 2]` is equal to `[1, 2, 0]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionKey(Vec<u64>);

impl VersionKey {
	pub fn components(&self) -> &[u64] {
		&self.0
	}
}

impl From<Vec<u64>> for VersionKey {
	fn from(value: Vec<u64>) -> Self {
		Self(value)
	}
}

impl Ord for VersionKey {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		let len = std::cmp::max(self.0.len(), other.0.len());
		for i in 0..len {
			let lhs = self.0.get(i).copied().unwrap_or(0);
			let rhs = other.0.get(i).copied().unwrap_or(0);
			match lhs.cmp(&rhs) {
				std::cmp::Ordering::Equal => {},
				ord => return ord,
			}
		}
		std::cmp::Ordering::Equal
	}
}

impl PartialOrd for VersionKey {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for VersionKey {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == std::cmp::Ordering::Equal
	}
}

impl Eq for VersionKey {}

impl std::fmt::Display for VersionKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
		write!(f, "{}", parts.join("."))
	}
}

fn leading_numeric_run() -> &'static regex::Regex {
	static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
	RE.get_or_init(|| regex::Regex::new(r"^[0-9]+(?:\.[0-9]+)*").expect("version pattern is valid"))
}

/// Gets the [`VersionKey`] of `version`.
///
/// A single leading `v` is skipped so `"v1.2"` ranks the same as `"1.2"`.
/// Strings without a leading number get an empty key, which ranks lowest.
pub fn version_sort_key(version: &str) -> VersionKey {
	let version = version.trim();
	let version = version.strip_prefix(['v', 'V']).unwrap_or(version);

	let Some(run) = leading_numeric_run().find(version) else {
		return VersionKey::default();
	};

	VersionKey(
		run.as_str()
			.split('.')
			/* Only overflows on absurdly long components, rank those highest */
			.map(|c| c.parse::<u64>().unwrap_or(u64::MAX))
			.collect()
	)
}
