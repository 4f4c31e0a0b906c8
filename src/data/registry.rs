//! Data registry: provenance for each compiled table.
//! Written by the compiler beside the tables; read by `validate` and the server's version endpoint.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::data::model::CompiledTables;
use crate::data::store::{CREATURES_FILE, MOVES_FILE, TRAITS_FILE};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSetEntry {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Relative to the registry's directory.
    pub path: String,
    #[serde(default)]
    pub records: usize,
}

pub type Registry = BTreeMap<String, DataSetEntry>;

pub const REGISTRY_FILE: &str = "registry.json";

pub fn build_registry(
    source: &str,
    data_version: &str,
    tables: &CompiledTables,
    now: DateTime<Utc>,
) -> Registry {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    let entry = |file: &str, records: usize| DataSetEntry {
        source: source.to_string(),
        data_version: Some(data_version.to_string()),
        last_updated: Some(stamp.clone()),
        path: file.to_string(),
        records,
    };
    Registry::from([
        ("creatures".to_string(), entry(CREATURES_FILE, tables.creatures.len())),
        ("moves".to_string(), entry(MOVES_FILE, tables.moves.len())),
        ("traits".to_string(), entry(TRAITS_FILE, tables.traits.len())),
    ])
}

pub fn write_registry(dir: &Path, registry: &Registry) -> Result<()> {
    fs::create_dir_all(dir)?;
    let mut payload = serde_json::to_string_pretty(registry)?;
    payload.push('\n');
    fs::write(dir.join(REGISTRY_FILE), payload)?;
    Ok(())
}

pub fn load_registry(dir: &Path) -> Result<Registry> {
    let path = dir.join(REGISTRY_FILE);
    if !path.is_file() {
        return Err(Error::MissingSourceFile(path));
    }
    let raw = fs::read_to_string(&path)?;
    serde_json::from_str(&raw).map_err(|source| Error::MalformedSourceDocument { path, source })
}

/// One registered dataset that failed its check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryProblem {
    pub dataset: String,
    pub message: String,
}

/// Check that each registered path exists and parses as JSON.
/// Returns the number of healthy datasets and the problems found.
pub fn check_registry(dir: &Path, registry: &Registry) -> (usize, Vec<RegistryProblem>) {
    let mut ok = 0;
    let mut problems = Vec::new();
    for (name, entry) in registry {
        let path = dir.join(&entry.path);
        let outcome = fs::read_to_string(&path)
            .map_err(|err| format!("read failed: {} - {err}", path.display()))
            .and_then(|content| {
                serde_json::from_str::<serde_json::Value>(&content)
                    .map_err(|err| format!("invalid JSON: {} - {err}", path.display()))
            });
        match outcome {
            Ok(_) => ok += 1,
            Err(message) => problems.push(RegistryProblem {
                dataset: name.clone(),
                message,
            }),
        }
    }
    (ok, problems)
}
