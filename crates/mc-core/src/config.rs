//! Configuration types and parsing for migcheck.yml

use crate::error::{CoreError, CoreResult};
use crate::suite::Suite;
use crate::suite_name::SuiteName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Config file names searched in a project directory, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["migcheck.yml", "migcheck.yaml"];

/// Main project configuration from migcheck.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directory holding migration files, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Schema used for facts that do not name one
    #[serde(default = "default_schema")]
    pub default_schema: String,

    /// Remote management API settings for `mc apply`
    #[serde(default)]
    pub api: ApiConfig,

    /// Named check suites
    #[serde(default)]
    pub suites: BTreeMap<SuiteName, Suite>,
}

/// Management API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// API origin, without a trailing path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hosted project reference
    #[serde(default)]
    pub project_ref: Option<String>,

    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            project_ref: None,
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_schema() -> String {
    "public".to_string()
}

const DEFAULT_BASE_URL: &str = "https://api.supabase.com";

/// Default environment variable for the management API token
pub const DEFAULT_TOKEN_ENV: &str = "SUPABASE_ACCESS_TOKEN";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Create an empty configuration with defaults for everything but the name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            migrations_dir: default_migrations_dir(),
            default_schema: default_schema(),
            api: ApiConfig::default(),
            suites: BTreeMap::new(),
        }
    }

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
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for migcheck.yml or migcheck.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => Err(CoreError::ConfigNotFound {
                path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
            }),
        }
    }

    /// Locate the config file in a directory, if any
    pub fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.exists())
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.default_schema.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "default_schema cannot be empty".to_string(),
            });
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "api.base_url must start with http:// or https://, got '{}'",
                    self.api.base_url
                ),
            });
        }

        if self.api.token_env.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "api.token_env cannot be empty".to_string(),
            });
        }

        for (name, suite) in &self.suites {
            suite.validate(name.as_str())?;
        }

        Ok(())
    }

    /// Get absolute migrations directory relative to a project root
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Look up a suite by name
    pub fn suite(&self, name: &str) -> CoreResult<&Suite> {
        self.suites.get(name).ok_or_else(|| CoreError::UnknownSuite {
            name: name.to_string(),
            available: self.suite_names().join(", "),
        })
    }

    /// All suite names in lexical order
    pub fn suite_names(&self) -> Vec<&str> {
        self.suites.keys().map(|k| k.as_str()).collect()
    }

    /// Resolve a suite's migration path against the project root
    pub fn migration_path(&self, root: &Path, suite: &Suite) -> PathBuf {
        let migration = Path::new(&suite.migration);
        if migration.is_absolute() {
            migration.to_path_buf()
        } else {
            self.migrations_dir_absolute(root).join(migration)
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
