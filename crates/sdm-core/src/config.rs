//! Configuration types and parsing for sdm.yml

use crate::encoding::ScriptEncoding;
use crate::error::{CoreError, CoreResult};
use crate::table_name::TableName;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Special database path selecting an in-memory DuckDB database.
pub const MEMORY_DB_PATH: &str = ":memory:";

/// Database file used when `database.path` is not set, relative to the
/// project directory.
pub const DEFAULT_DB_PATH: &str = "sdm.duckdb";

const DEFAULT_VERSION_TABLE: &str = "__db_version__";

const DEFAULT_SCRIPT_ENCODING: &str = "utf-8";

/// Config file names searched by [`Config::load_from_dir`], in order.
const CONFIG_FILE_NAMES: [&str; 2] = ["sdm.yml", "sdm.yaml"];

/// Main configuration from sdm.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Name of the migration history table
    #[serde(default = "default_version_table")]
    pub version_table: TableName,

    /// Encoding label used for stored `sql_up` / `sql_down` payloads
    #[serde(default = "default_script_encoding")]
    pub script_encoding: String,

    /// Delete the database before opening it
    #[serde(default)]
    pub drop_db_first: bool,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or `:memory:`)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            version_table: default_version_table(),
            script_encoding: default_script_encoding(),
            drop_db_first: false,
        }
    }
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_version_table() -> TableName {
    TableName::from_static(DEFAULT_VERSION_TABLE)
}

fn default_script_encoding() -> String {
    DEFAULT_SCRIPT_ENCODING.to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn parse(content: &str) -> CoreResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for sdm.yml or sdm.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Err(CoreError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }
        self.script_encoding()?;
        Ok(())
    }

    /// Resolve the configured script encoding
    pub fn script_encoding(&self) -> CoreResult<ScriptEncoding> {
        ScriptEncoding::for_label(&self.script_encoding)
    }

    /// True when the database lives in memory only
    pub fn is_memory_db(&self) -> bool {
        self.database.path == MEMORY_DB_PATH
    }

    /// Resolve the database path against a root directory.
    ///
    /// Returns `None` for in-memory databases.
    pub fn database_path_absolute(&self, root: &Path) -> Option<std::path::PathBuf> {
        if self.is_memory_db() {
            None
        } else {
            Some(root.join(&self.database.path))
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
