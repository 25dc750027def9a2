use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tokenbridge_primitives::Address;
use toml::Value;

use crate::errors::ConfigError;

/// Default value for `datadir` in [`ClientConfig`].
const DEFAULT_DATADIR: &str = "tokenbridge-data";

/// Default DB retry count.
const DEFAULT_DB_RETRY_COUNT: u16 = 5;

/// Default DB retry delay in ms.
const DEFAULT_DB_RETRY_DELAY: u64 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// The data directory where database contents reside.
    #[serde(default = "default_datadir")]
    pub datadir: PathBuf,

    /// For optimistic transactions, how many times to retry if a write fails.
    #[serde(default = "default_db_retry_count")]
    pub db_retry_count: u16,

    /// Db retry delay in ms.
    #[serde(default = "default_db_retry_delay")]
    pub db_retry_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            datadir: default_datadir(),
            db_retry_count: DEFAULT_DB_RETRY_COUNT,
            db_retry_delay_ms: DEFAULT_DB_RETRY_DELAY,
        }
    }
}

fn default_datadir() -> PathBuf {
    DEFAULT_DATADIR.into()
}

fn default_db_retry_count() -> u16 {
    DEFAULT_DB_RETRY_COUNT
}

fn default_db_retry_delay() -> u64 {
    DEFAULT_DB_RETRY_DELAY
}

/// Initial state written when a fresh database is bootstrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    pub guardians: Vec<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for rotated log files. File logging is off when unset.
    pub log_dir: Option<PathBuf>,

    #[serde(default)]
    pub json_format: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    pub genesis: GenesisConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_file_with_overrides(path, &[])
    }

    /// Loads the config file, then applies `overrides` of the form
    /// `section.key=value` on top.
    pub fn from_file_with_overrides(
        path: &Path,
        overrides: &[String],
    ) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let mut value: Value = toml::from_str(&raw)?;
        for o in overrides {
            let (path, val) = parse_override(o)?;
            apply_override(&mut value, &path, val)?;
        }
        Self::from_value(value)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Self::from_value(toml::from_str(s)?)
    }

    fn from_value(value: Value) -> Result<Self, ConfigError> {
        let config: Config = value.try_into()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.genesis.guardians.is_empty() {
            return Err(ConfigError::NoGenesisGuardians);
        }
        Ok(())
    }
}

/// Splits `a.b=value` into its key path and value. Values that are not
/// valid TOML are taken as plain strings.
fn parse_override(s: &str) -> Result<(Vec<String>, Value), ConfigError> {
    let (path, raw) = s
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidOverride(s.to_owned()))?;
    let path: Vec<String> = path.trim().split('.').map(str::to_owned).collect();
    if path.iter().any(String::is_empty) {
        return Err(ConfigError::InvalidOverride(s.to_owned()));
    }

    let raw = raw.trim();
    let value = toml::from_str::<Value>(&format!("v = {raw}"))
        .ok()
        .and_then(|mut v| v.as_table_mut().and_then(|t| t.remove("v")))
        .unwrap_or_else(|| Value::String(raw.to_owned()));
    Ok((path, value))
}

fn apply_override(root: &mut Value, path: &[String], value: Value) -> Result<(), ConfigError> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(());
    };

    let mut cur = root;
    for (i, key) in parents.iter().enumerate() {
        let table = cur
            .as_table_mut()
            .ok_or_else(|| ConfigError::TraverseNonTableAt {
                key: key.clone(),
                path: path[..i].join("."),
            })?;
        cur = table
            .entry(key.clone())
            .or_insert_with(|| Value::Table(Default::default()));
    }

    let table = cur
        .as_table_mut()
        .ok_or_else(|| ConfigError::TraverseNonTableAt {
            key: last.clone(),
            path: parents.join("."),
        })?;
    table.insert(last.clone(), value);
    Ok(())
}
