//! CLI configuration

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Profile minimized when no file is given
pub const DEFAULT_PROFILE_FILE: &str = "profileToMerge.profile";

/// Folder merged when none is given
pub const DEFAULT_PROFILE_FOLDER: &str = "profilesToMerge";

/// Output file of a merge
pub const DEFAULT_MERGE_OUTPUT: &str = "PermissionSet.xml";

/// File-name suffix of profile documents
pub const DEFAULT_PROFILE_EXTENSION: &str = ".profile";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Profile rewritten by `minimize` when no argument is given
    pub profile_file: Option<PathBuf>,

    /// Folder read by `merge` when no argument is given
    pub profile_folder: Option<PathBuf>,

    /// Permission set written by `merge`
    pub merge_output: Option<PathBuf>,

    /// File-name suffixes recognized as profiles
    pub profile_extensions: Option<Vec<String>>,
}

impl CliConfig {
    /// Load configuration from file
    ///
    /// Without a path, or when the file does not exist, defaults apply.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(config_path) = path else {
            return Ok(CliConfig::default());
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))?;
            Ok(config)
        } else {
            tracing::warn!(path = %config_path.display(), "config file not found, using defaults");
            Ok(CliConfig::default())
        }
    }

    pub fn profile_file(&self) -> PathBuf {
        self.profile_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_FILE))
    }

    pub fn profile_folder(&self) -> PathBuf {
        self.profile_folder
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_FOLDER))
    }

    pub fn merge_output(&self) -> PathBuf {
        self.merge_output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MERGE_OUTPUT))
    }

    pub fn profile_extensions(&self) -> Vec<String> {
        match &self.profile_extensions {
            Some(extensions) if !extensions.is_empty() => extensions.clone(),
            _ => vec![DEFAULT_PROFILE_EXTENSION.to_string()],
        }
    }
}
