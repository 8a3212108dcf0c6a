//! Functions for reading normalized manifest entries into [`ModRecord`]s.
//!
//! Manifest adapters produce slightly different key names depending on where the pack came from,
//! the aliases accepted for each field are listed on [`normalize()`].

use serde::*;
use serde_json::{Map, Value};

use crate::record::*;
use crate::Error::Parse;

const ID_KEYS: &[&str] = &["mod_id", "project_id", "projectID", "id"];
const NAME_KEYS: &[&str] = &["name", "title"];
const VERSION_KEYS: &[&str] = &["version", "version_number", "fileVersion"];
const DEPENDENCY_ID_KEYS: &[&str] = &["project_id", "projectID", "mod_id", "id"];
const DEPENDENCY_KIND_KEYS: &[&str] = &["dependencyType", "dependency_type", "relationType", "type"];

/// Where a manifest originally came from.
///
/// Only kept for provenance, the analysis does not change based on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceFormat {
	CurseForge,
	Modrinth,
	Generic,
	Other(String),
}

impl SourceFormat {
	pub fn new(tag: &str) -> Self {
		match tag.trim().to_lowercase().as_str() {
			"curseforge" => SourceFormat::CurseForge,
			"modrinth" => SourceFormat::Modrinth,
			"" | "generic" => SourceFormat::Generic,
			_ => SourceFormat::Other(tag.trim().to_string()),
		}
	}
}

impl From<&str> for SourceFormat {
	fn from(value: &str) -> Self { Self::new(value) }
}

impl std::fmt::Display for SourceFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			SourceFormat::CurseForge => f.write_str("curseforge"),
			SourceFormat::Modrinth => f.write_str("modrinth"),
			SourceFormat::Generic => f.write_str("generic"),
			SourceFormat::Other(s) => f.write_str(s),
		}
	}
}

/// Reads every mod entry of `manifest`.
///
/// # Format
/// `manifest` is either an array of entries or an object holding them in `mods` (or `files` for CurseForge exports).
/// Each entry needs
/// - an id: `mod_id`, `project_id`, `projectID` or `id`, either a string or an integer.
/// - a name: `name` or `title`.
///
/// and may have
/// - a version: `version`, `version_number` or `fileVersion`. Defaults to an empty string.
/// - `dependencies`: an array of objects with an id (`project_id`, `projectID`, `mod_id` or `id`),
/// an optional `name` and an optional kind (`dependencyType`, `dependency_type`, `relationType` or `type`)
/// given as a name or a CurseForge relation code. A missing kind means `required`.
///
/// # Errors
/// - [`Parse`](crate::Error::Parse) when the structure is wrong or a required field is missing.
/// Unknown dependency kinds are only an error when `strict_dependency_types` is set, otherwise they are skipped.
pub fn normalize(manifest: &Value, source_format: &SourceFormat, strict_dependency_types: bool) -> crate::Result<Vec<ModRecord>> {
	let entries = entries_of(manifest)?;
	log::debug!("Normalizing {} {} manifest entries", entries.len(), source_format);

	let mut records = Vec::<ModRecord>::with_capacity(entries.len());
	for (i, entry) in entries.iter().enumerate() {
		let obj = entry.as_object().ok_or_else(|| Parse(format!("entry {} is not an object", i)))?;
		records.push(record_from_json(obj, strict_dependency_types).map_err(|e| match e {
			Parse(msg) => Parse(format!("entry {}: {}", i, msg)),
			e => e,
		})?);
	}

	Ok(records)
}

fn entries_of(manifest: &Value) -> crate::Result<&Vec<Value>> {
	match manifest {
		Value::Array(arr) => Ok(arr),
		Value::Object(obj) => {
			let list = obj.get("mods")
				.or_else(|| obj.get("files"))
				.ok_or_else(|| Parse("manifest has no mods or files field".to_string()))?;
			list.as_array().ok_or_else(|| Parse("manifest mod list must be an array".to_string()))
		},
		_ => Err(Parse("manifest must be an object or an array".to_string())),
	}
}

fn first_of<'v>(obj: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v Value> {
	keys.iter()
		.filter_map(|k| obj.get(*k))
		.find(|v| !v.is_null())
}

/// Ids come as strings from some sources and integers from others, we always use strings.
fn id_from_json(v: &Value) -> crate::Result<String> {
	match v {
		Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
		Value::String(_) => Err(Parse("id must not be empty".to_string())),
		Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
		_ => Err(Parse("id must be a string or an integer".to_string())),
	}
}

fn record_from_json(obj: &Map<String, Value>, strict_dependency_types: bool) -> crate::Result<ModRecord> {
	let mod_id = id_from_json(first_of(obj, ID_KEYS).ok_or_else(|| Parse("entry has no id field".to_string()))?)?;

	let name = first_of(obj, NAME_KEYS)
		.ok_or_else(|| Parse(format!("mod {} has no name field", mod_id)))?
		.as_str().ok_or_else(|| Parse(format!("name of mod {} must be a string", mod_id)))?
		.to_string();

	let version = match first_of(obj, VERSION_KEYS) {
		None => String::new(),
		Some(Value::String(s)) => s.clone(),
		Some(Value::Number(n)) => n.to_string(),
		Some(_) => return Err(Parse(format!("version of mod {} must be a string", mod_id))),
	};

	let mut record = ModRecord::new(mod_id, name, version);

	if let Some(deps) = obj.get("dependencies").filter(|v| !v.is_null()) {
		let arr = deps.as_array().ok_or_else(|| Parse(format!("dependencies of mod {} must be an array", record.mod_id)))?;
		for dep in arr {
			let dep = dep.as_object().ok_or_else(|| Parse(format!("dependencies of mod {} must be objects", record.mod_id)))?;
			if let Some(d) = dependency_from_json(&record.mod_id, dep, strict_dependency_types)? {
				if !record.add_dependency(d) {
					log::debug!("Mod {} declares the same dependency more than once, keeping the first", record.mod_id);
				}
			}
		}
	}

	Ok(record)
}

/// `Ok(None)` when the dependency kind is unknown and not strict.
fn dependency_from_json(mod_id: &str, obj: &Map<String, Value>, strict_dependency_types: bool) -> crate::Result<Option<DependencyRef>> {
	let target_mod_id = id_from_json(
		first_of(obj, DEPENDENCY_ID_KEYS).ok_or_else(|| Parse(format!("a dependency of mod {} has no id field", mod_id)))?
	)?;

	let target_name = match obj.get("name") {
		Some(Value::String(s)) => s.clone(),
		None | Some(Value::Null) => target_mod_id.clone(),
		Some(_) => return Err(Parse(format!("dependency name of mod {} must be a string", mod_id))),
	};

	let kind = match first_of(obj, DEPENDENCY_KIND_KEYS) {
		None => Some(DependencyKind::Required),
		Some(Value::String(s)) => DependencyKind::from_name(s),
		Some(Value::Number(n)) => n.as_u64().and_then(DependencyKind::from_relation_code),
		Some(_) => None,
	};

	match kind {
		Some(kind) => Ok(Some(DependencyRef::new(target_mod_id, target_name, kind))),
		None if strict_dependency_types => Err(Parse(format!("unknown dependency type for {} in mod {}", target_mod_id, mod_id))),
		None => {
			log::warn!("Skipping dependency {} of mod {}, unknown dependency type", target_mod_id, mod_id);
			Ok(None)
		},
	}
}

/// Checks the raw manifest against the bundled schema.
///
/// # Errors
/// - [`Validation`](crate::Error::Validation) listing every violation found.
pub fn validate_against_schema(manifest: &Value) -> crate::Result<()> {
	let schema: Value = serde_json::from_str(include_str!("manifest/manifest.schema.json"))?;
	let compiled = jsonschema::JSONSchema::compile(&schema)
		.map_err(|e| crate::Error::Validation(format!("manifest schema is invalid: {}", e)))?;

	let result = compiled.validate(manifest);
	if let Err(errors) = result {
		let messages: Vec<String> = errors.map(|e| e.to_string()).collect();
		return Err(crate::Error::Validation(messages.join("; ")));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn reads_object_with_mods() {
		let manifest = json!({ "mods": [
			{ "project_id": 10, "name": "Core", "version": "1.0.0" },
			{ "project_id": "11", "name": "Addon", "version": "0.2", "dependencies": [
				{ "project_id": 10, "name": "Core", "dependencyType": "required" },
				{ "project_id": 12, "name": "Extra", "dependencyType": "optional" },
			] },
		] });

		let records = normalize(&manifest, &SourceFormat::Generic, false).expect("manifest is well formed");
		assert_eq!(records.len(), 2);
		assert_eq!(records[0].mod_id, "10");
		assert_eq!(records[1].dependencies, vec![
			DependencyRef::new("10", "Core", DependencyKind::Required),
			DependencyRef::new("12", "Extra", DependencyKind::Optional),
		]);
	}

	#[test]
	fn reads_curseforge_files() {
		let manifest = json!({ "files": [
			{ "projectID": 238222, "title": "JEI", "fileVersion": "15.2.0", "dependencies": [
				{ "projectID": 1, "relationType": 3 },
				{ "projectID": 2, "relationType": 5 },
			] },
		] });

		let records = normalize(&manifest, &SourceFormat::CurseForge, false).expect("manifest is well formed");
		assert_eq!(records[0].mod_id, "238222");
		assert_eq!(records[0].name, "JEI");
		assert_eq!(records[0].version, "15.2.0");
		assert_eq!(records[0].dependencies[0], DependencyRef::new("1", "1", DependencyKind::Required));
		assert_eq!(records[0].dependencies[1].kind, DependencyKind::Incompatible);
	}

	#[test]
	fn missing_kind_is_required() {
		let manifest = json!([{ "mod_id": "a", "name": "A", "dependencies": [{ "mod_id": "b" }] }]);
		let records = normalize(&manifest, &SourceFormat::Generic, false).expect("manifest is well formed");
		assert_eq!(records[0].version, "");
		assert_eq!(records[0].dependencies[0].kind, DependencyKind::Required);
	}

	#[test]
	fn missing_id_is_malformed() {
		let manifest = json!({ "mods": [{ "name": "NoId", "version": "1.0" }] });
		let e = normalize(&manifest, &SourceFormat::Generic, false).expect_err("entry has no id");
		assert!(matches!(e, crate::Error::Parse(msg) if msg.starts_with("entry 0")));
	}

	#[test]
	fn missing_name_is_malformed() {
		let manifest = json!({ "mods": [{ "project_id": 1 }] });
		assert!(normalize(&manifest, &SourceFormat::Generic, false).is_err());
	}

	#[test]
	fn manifest_without_mod_list_is_malformed() {
		assert!(normalize(&json!({ "name": "pack" }), &SourceFormat::Generic, false).is_err());
		assert!(normalize(&json!("pack"), &SourceFormat::Generic, false).is_err());
	}

	#[test]
	fn unknown_kind_is_skipped_unless_strict() {
		let manifest = json!([{ "mod_id": "a", "name": "A", "dependencies": [
			{ "mod_id": "b", "dependencyType": "recommends" },
			{ "mod_id": "c", "dependencyType": "required" },
		] }]);

		let records = normalize(&manifest, &SourceFormat::Generic, false).expect("unknown kinds are skipped");
		assert_eq!(records[0].dependencies.len(), 1);
		assert_eq!(records[0].dependencies[0].target_mod_id, "c");

		assert!(normalize(&manifest, &SourceFormat::Generic, true).is_err());
	}

	#[test]
	fn source_format_tags() {
		assert_eq!(SourceFormat::new("CurseForge"), SourceFormat::CurseForge);
		assert_eq!(SourceFormat::new("modrinth"), SourceFormat::Modrinth);
		assert_eq!(SourceFormat::new("ftb"), SourceFormat::Other("ftb".to_string()));
		assert_eq!(SourceFormat::new("ftb").to_string(), "ftb");
	}

	#[test]
	fn manifest_schema_compiles() {
		let schema: Value = serde_json::from_str(include_str!("manifest/manifest.schema.json")).expect("schema isn't valid json");
		jsonschema::JSONSchema::compile(&schema).expect("schema isn't valid");
	}

	#[test]
	fn schema_rejects_non_object_entries() {
		assert!(validate_against_schema(&json!({ "mods": [1, 2] })).is_err());
		assert!(validate_against_schema(&json!({ "mods": [{ "project_id": 1, "name": "A" }] })).is_ok());
	}
}
