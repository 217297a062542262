//! Optional per-project configuration (`pagelift.yaml`)
//!
//! Everything in the file can also be supplied as a flag or environment
//! variable; precedence is flag > environment > file > built-in default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::buildenv::DEFAULT_MEMORY_LIMIT_MB;
use crate::error::{PageliftError, Result};

pub const CONFIG_FILE: &str = "pagelift.yaml";

/// Default location of the client bundle, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "build/client";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Cloudflare Pages project name
    pub project: Option<String>,
    /// Cloudflare account identifier
    pub account_id: Option<String>,
    /// Build output directory uploaded on deploy
    pub output_dir: Option<String>,
    /// Node.js heap ceiling in megabytes
    pub memory: Option<u32>,
}

impl ProjectConfig {
    /// Load `pagelift.yaml` from `project_dir`. A missing file is not an
    /// error; every field has a usable default.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&path).map_err(|e| PageliftError::ConfigReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        serde_yaml::from_str(&contents).map_err(|e| PageliftError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Memory ceiling after applying the flag override.
    pub fn memory_limit(&self, flag: Option<u32>) -> u32 {
        flag.or(self.memory).unwrap_or(DEFAULT_MEMORY_LIMIT_MB)
    }

    /// Absolute path of the upload directory.
    pub fn output_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR))
    }
}
