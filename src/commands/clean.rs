//! Clean command implementation
//!
//! Same directory list and best-effort semantics as the pre-build cleanup,
//! exposed on its own for recovering from corrupted cache state without
//! running a build.

use std::path::PathBuf;

use crate::clean;
use crate::commands::helpers;
use crate::error::Result;

pub fn run(project_dir: Option<PathBuf>, verbose: bool, quiet: bool) -> Result<()> {
    let project_dir = helpers::resolve_project_dir(project_dir)?;

    if !quiet {
        println!("Cleaning build caches and output...");
    }
    let removed = clean::clean_project(&project_dir, verbose);

    if quiet {
        return Ok(());
    }

    if removed.is_empty() {
        println!("Nothing to clean.");
    } else {
        println!(
            "Removed {} director{}.",
            removed.len(),
            if removed.len() == 1 { "y" } else { "ies" }
        );
    }

    Ok(())
}
