//! Project discovery: a root directory plus its loaded configuration

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::suite::Suite;
use std::path::{Path, PathBuf};

/// A loaded migcheck project
#[derive(Debug, Clone)]
pub struct Project {
    /// Project root directory
    pub root: PathBuf,

    /// Parsed configuration
    pub config: Config,
}

impl Project {
    /// Load a project from a directory, reading `migcheck.yml` from it
    pub fn load(root: &Path) -> CoreResult<Self> {
        let config = Config::load_from_dir(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    /// Load a project whose config lives at an explicit path
    pub fn load_with_config(root: &Path, config_path: &Path) -> CoreResult<Self> {
        let config = Config::load(config_path)?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    /// Absolute path of a suite's migration file
    pub fn migration_path(&self, suite: &Suite) -> PathBuf {
        self.config.migration_path(&self.root, suite)
    }
}

/// Read a migration file as UTF-8 text.
///
/// A missing file is reported as [`CoreError::MigrationNotFound`] so callers
/// can distinguish it from other IO failures.
pub fn read_migration(path: &Path) -> CoreResult<String> {
    if !path.is_file() {
        return Err(CoreError::MigrationNotFound {
            path: path.display().to_string(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    log::debug!("Read migration {} ({} bytes)", path.display(), text.len());
    Ok(text)
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
