//! Command helper utilities

use crate::error::{PageliftError, Result};

/// Resolve project directory from optional argument
///
/// If a project directory is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_project_dir(
    project_dir: Option<std::path::PathBuf>,
) -> Result<std::path::PathBuf> {
    match project_dir {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| PageliftError::IoError {
            message: format!("Failed to get current directory: {}", e),
        }),
    }
}
