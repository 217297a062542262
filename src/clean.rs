//! Best-effort removal of build caches and output directories
//!
//! Stale Vite/Remix caches both waste heap during the build and can poison
//! incremental state after a dependency bump, so every build starts from a
//! clean slate unless --keep-caches is passed.

use std::path::Path;

use console::Style;

/// Directories removed before a build, relative to the project root.
pub const CLEAN_DIRS: &[&str] = &[
    "node_modules/.cache",
    "node_modules/.vite",
    "build",
    ".wrangler",
    "dist",
];

/// Remove every directory in [`CLEAN_DIRS`] that exists under `project_dir`.
///
/// Removal failures are warnings, never errors: a locked or half-deleted
/// cache directory should not block the build that is about to overwrite it.
/// Returns the directories that were actually removed.
pub fn clean_project(project_dir: &Path, verbose: bool) -> Vec<String> {
    let mut removed = Vec::new();

    for rel in CLEAN_DIRS {
        let dir = project_dir.join(rel);
        if !dir.exists() {
            if verbose {
                println!("  {rel} (not present)");
            }
            continue;
        }

        match std::fs::remove_dir_all(&dir) {
            Ok(()) => {
                if verbose {
                    println!("  removed {rel}");
                }
                removed.push((*rel).to_string());
            }
            Err(e) => {
                let warn = Style::new().yellow().bold();
                eprintln!("{} failed to remove {rel}: {e}", warn.apply_to("Warning:"));
            }
        }
    }

    removed
}
