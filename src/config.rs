//! Compile settings: defaults, then an optional YAML file, then environment,
//! then command-line overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::model::CreatureId;
use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = "retrodex.yaml";
pub const DEFAULT_DATA_DIR: &str = "data/api/v2";
pub const DEFAULT_OUT_DIR: &str = "data/compiled";
/// Highest national dex id of the third generation.
pub const DEFAULT_SCAN_LIMIT: CreatureId = 386;
pub const DEFAULT_DATA_VERSION: &str = "pokeapi-snapshot";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

pub const ENV_DATA_DIR: &str = "RETRODEX_DATA_DIR";
pub const ENV_OUT_DIR: &str = "RETRODEX_OUT_DIR";
pub const ENV_DATA_VERSION: &str = "RETRODEX_DATA_VERSION";
pub const ENV_BIND: &str = "RETRODEX_BIND";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileConfig {
    /// Root of the PokeAPI `api/v2` snapshot.
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    /// Explicit creature ids; `None` scans `1..=scan_limit`.
    pub creature_ids: Option<Vec<CreatureId>>,
    pub scan_limit: CreatureId,
    /// Label recorded in the data registry.
    pub data_version: String,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            creature_ids: None,
            scan_limit: DEFAULT_SCAN_LIMIT,
            data_version: DEFAULT_DATA_VERSION.to_string(),
        }
    }
}

/// Shape of `retrodex.yaml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    creature_ids: Option<Vec<CreatureId>>,
    scan_limit: Option<CreatureId>,
    data_version: Option<String>,
}

fn parse_config_file(raw: &str) -> std::result::Result<ConfigFile, serde_yaml::Error> {
    if raw.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(raw)
}

impl CompileConfig {
    /// Defaults, then `path` if given (else `retrodex.yaml` when present), then
    /// the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        match path {
            Some(path) => config.merge_yaml_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                config.merge_yaml_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => {}
        }
        config.merge_env(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn merge_yaml_file(&mut self, path: &Path) -> Result<()> {
        let raw = fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("unable to read '{}': {err}", path.display())))?;
        let file = parse_config_file(&raw)
            .map_err(|err| Error::Config(format!("{}: {err}", path.display())))?;
        self.apply(file);
        Ok(())
    }

    pub fn merge_yaml(&mut self, raw: &str) -> Result<()> {
        let file = parse_config_file(raw).map_err(|err| Error::Config(err.to_string()))?;
        self.apply(file);
        Ok(())
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(data_dir) = file.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(out_dir) = file.out_dir {
            self.out_dir = out_dir;
        }
        if file.creature_ids.is_some() {
            self.creature_ids = file.creature_ids;
        }
        if let Some(scan_limit) = file.scan_limit {
            self.scan_limit = scan_limit;
        }
        if let Some(data_version) = file.data_version {
            self.data_version = data_version;
        }
    }

    /// Apply `RETRODEX_*` variables through `lookup`. Empty values are ignored.
    pub fn merge_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(value) = get(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(value);
        }
        if let Some(value) = get(ENV_OUT_DIR) {
            self.out_dir = PathBuf::from(value);
        }
        if let Some(value) = get(ENV_DATA_VERSION) {
            self.data_version = value;
        }
    }
}

/// Parse a comma-separated id list such as `1,4,7`.
pub fn parse_id_list(raw: &str) -> Result<Vec<CreatureId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<CreatureId>()
                .map_err(|_| Error::Config(format!("invalid creature id '{part}'")))
        })
        .collect()
}

pub fn bind_address() -> String {
    env::var(ENV_BIND).unwrap_or_else(|_| DEFAULT_BIND.to_string())
}
