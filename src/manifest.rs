//! JSON manifests declaring plugins by data.
//!
//! A manifest lists plugin descriptors together with the extension key each
//! one should be registered under. Loading is strict: the file must match the
//! embedded schema, carry a known `schema_version`, and list each
//! `(extension_key, name)` pair once, also across every manifest loaded
//! together. Whether a listed plugin satisfies its
//! kind's contract is left to the validator.

use crate::extension::{ExplainerType, ExplanationName, ExtensionKey, PluginDescriptor, PluginKind};
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const MANIFEST_SCHEMA_VERSION: &str = "interpret_ext_manifest_v1";

const MANIFEST_SCHEMA: &str = include_str!("../schema/plugin_manifest.schema.json");

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PluginManifest {
    pub schema_version: String,
    pub plugins: Vec<ManifestEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub extension_key: ExtensionKey,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explainer_type: Option<ExplainerType>,
    #[serde(default)]
    pub available_explanations: Vec<ExplanationName>,
    #[serde(default)]
    pub operations: BTreeSet<String>,
}

impl ManifestEntry {
    pub fn kind(&self) -> Option<PluginKind> {
        PluginKind::from_extension_key(self.extension_key.as_str())
    }

    fn known_kind(&self) -> Result<PluginKind> {
        self.kind().ok_or_else(|| {
            anyhow!(
                "plugin {} uses unknown extension key {}",
                self.name,
                self.extension_key.as_str()
            )
        })
    }

    pub fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor {
            name: self.name.clone(),
            explainer_type: self.explainer_type.clone(),
            available_explanations: self.available_explanations.clone(),
            operations: self.operations.clone(),
        }
    }
}

impl PluginManifest {
    /// Read, schema-check and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening manifest {}", path.display()))?;
        let value: Value = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing manifest {}", path.display()))?;
        Self::from_value(value).with_context(|| format!("loading manifest {}", path.display()))
    }

    /// Validate and parse an already-decoded manifest document.
    pub fn from_value(value: Value) -> Result<Self> {
        let version = value
            .get("schema_version")
            .and_then(Value::as_str)
            .unwrap_or_default();
        validate_schema_version(version)?;
        validate_against_schema(&value)?;

        let manifest: PluginManifest = serde_json::from_value(value)?;
        manifest.validate_entries()?;
        Ok(manifest)
    }

    /// Entries paired with the plugin kind their key names.
    ///
    /// Loaded manifests always resolve; an unknown key can only come from a
    /// manifest assembled by hand.
    pub fn entries(&self) -> Result<Vec<(PluginKind, PluginDescriptor)>> {
        self.plugins
            .iter()
            .map(|entry| Ok((entry.known_kind()?, entry.descriptor())))
            .collect()
    }

    fn validate_entries(&self) -> Result<()> {
        let mut seen: BTreeMap<&ExtensionKey, BTreeSet<&str>> = BTreeMap::new();
        for entry in &self.plugins {
            if entry.name.trim().is_empty() {
                bail!("encountered plugin with no name");
            }
            entry.known_kind()?;
            if !seen
                .entry(&entry.extension_key)
                .or_default()
                .insert(entry.name.as_str())
            {
                bail!(
                    "duplicate plugin {} under {}",
                    entry.name,
                    entry.extension_key.as_str()
                );
            }
        }
        Ok(())
    }
}

/// Load every manifest named by `paths`; directories are searched
/// recursively for `.json` files. A plugin listed under the same key in two
/// manifests is a load error.
pub fn load_manifests(paths: &[PathBuf]) -> Result<Vec<(PathBuf, PluginManifest)>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_json(path, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files.dedup();

    let loaded = files
        .into_iter()
        .map(|file| PluginManifest::load(&file).map(|manifest| (file, manifest)))
        .collect::<Result<Vec<_>>>()?;
    reject_duplicates_across(&loaded)?;
    Ok(loaded)
}

fn reject_duplicates_across(loaded: &[(PathBuf, PluginManifest)]) -> Result<()> {
    let mut seen: BTreeMap<(&ExtensionKey, &str), &Path> = BTreeMap::new();
    for (path, manifest) in loaded {
        for entry in &manifest.plugins {
            let key = (&entry.extension_key, entry.name.as_str());
            if let Some(first) = seen.insert(key, path.as_path()) {
                bail!(
                    "duplicate plugin {} under {} (listed in {} and {})",
                    entry.name,
                    entry.extension_key.as_str(),
                    first.display(),
                    path.display()
                );
            }
        }
    }
    Ok(())
}

fn collect_json(dir: &Path, acc: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_json(&path, acc)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            acc.push(path);
        }
    }
    Ok(())
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }
    if schema_version != MANIFEST_SCHEMA_VERSION {
        bail!(
            "schema_version '{}' not supported (expected {})",
            schema_version,
            MANIFEST_SCHEMA_VERSION
        );
    }
    Ok(())
}

fn validate_against_schema(value: &Value) -> Result<()> {
    let schema: Value =
        serde_json::from_str(MANIFEST_SCHEMA).context("parsing embedded manifest schema")?;
    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling embedded manifest schema: {err}"))?;

    if let Err(errors) = compiled.validate(value) {
        let details = errors
            .map(|err| format!("{}: {err}", err.instance_path))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("manifest failed schema validation:\n{details}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample() -> Value {
        json!({
            "schema_version": "interpret_ext_manifest_v1",
            "plugins": [
                {
                    "extension_key": "interpret_ext_blackbox",
                    "name": "lime",
                    "explainer_type": "blackbox",
                    "available_explanations": ["local"],
                    "operations": ["explain_local"]
                },
                {
                    "extension_key": "interpret_ext_provider",
                    "name": "inline",
                    "operations": ["render"]
                }
            ]
        })
    }

    #[test]
    fn parses_entries_with_their_kinds() {
        let manifest = PluginManifest::from_value(sample()).expect("valid manifest");
        let entries = manifest.entries().expect("known keys");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, PluginKind::Blackbox);
        assert_eq!(entries[0].1.explainer_type, Some(ExplainerType::Blackbox));
        assert_eq!(entries[1].0, PluginKind::Provider);
        assert!(entries[1].1.operations.contains("render"));
    }

    #[test]
    fn rejects_unknown_schema_version() {
        let mut value = sample();
        value["schema_version"] = json!("interpret_ext_manifest_v0");
        let err = PluginManifest::from_value(value).expect_err("old version");
        assert!(err.to_string().contains("interpret_ext_manifest_v0"));
    }

    #[test]
    fn rejects_schema_violations() {
        let mut value = sample();
        value["plugins"][0]["extension_key"] = json!("interpret_ext_unknown");
        value["plugins"][1]["surprise"] = json!(true);
        let err = PluginManifest::from_value(value).expect_err("schema violation");
        let text = err.to_string();
        assert!(text.contains("schema validation"), "{text}");
        assert!(text.contains("/plugins/0/extension_key"), "{text}");
    }

    #[test]
    fn rejects_duplicate_names_within_a_key() {
        let mut value = sample();
        let duplicate = value["plugins"][0].clone();
        value["plugins"].as_array_mut().unwrap().push(duplicate);
        let err = PluginManifest::from_value(value).expect_err("duplicate");
        assert!(err.to_string().contains("duplicate plugin lime"));
    }

    #[test]
    fn same_name_under_different_keys_is_allowed() {
        let mut value = sample();
        value["plugins"][1]["name"] = json!("lime");
        assert!(PluginManifest::from_value(value).is_ok());
    }

    #[test]
    fn load_manifests_walks_directories() {
        let temp = TempDir::new().expect("temp dir");
        let nested = temp.path().join("nested");
        fs::create_dir_all(&nested).unwrap();
        let mut other = sample();
        other["plugins"][0]["name"] = json!("kernel-shap");
        other["plugins"][1]["name"] = json!("notebook");
        fs::write(temp.path().join("a.json"), sample().to_string()).unwrap();
        fs::write(nested.join("b.json"), other.to_string()).unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let loaded = load_manifests(&[temp.path().to_path_buf()]).expect("load");
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|(_, manifest)| manifest.plugins.len() == 2));
    }

    #[test]
    fn duplicates_split_across_manifests_are_rejected() {
        let temp = TempDir::new().expect("temp dir");
        let mut second = sample();
        second["plugins"][0]["name"] = json!("kernel-shap");
        fs::write(temp.path().join("a.json"), sample().to_string()).unwrap();
        fs::write(temp.path().join("b.json"), second.to_string()).unwrap();

        let err = load_manifests(&[temp.path().to_path_buf()]).expect_err("inline twice");
        let text = err.to_string();
        assert!(text.contains("duplicate plugin inline under interpret_ext_provider"), "{text}");
        assert!(text.contains("a.json") && text.contains("b.json"), "{text}");
    }

    #[test]
    fn same_file_named_twice_loads_once() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("a.json");
        fs::write(&path, sample().to_string()).unwrap();

        let loaded = load_manifests(&[path.clone(), temp.path().to_path_buf()]).expect("load");
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn entries_of_a_hand_built_manifest_reject_unknown_keys() {
        let mut manifest = PluginManifest::from_value(sample()).expect("valid manifest");
        manifest.plugins[1].extension_key = ExtensionKey("interpret_ext_widgets".to_string());
        let err = manifest.entries().expect_err("unknown key");
        assert!(err.to_string().contains("unknown extension key interpret_ext_widgets"));
    }

    #[test]
    fn load_reports_the_failing_path() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let err = PluginManifest::load(&path).expect_err("invalid json");
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
