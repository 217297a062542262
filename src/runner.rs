//! Subprocess invocation of the framework build CLI
//!
//! Every build goes through `npx` so the locally pinned Remix/Vite versions
//! are used rather than whatever is on PATH. Output streams straight through
//! to the user's terminal; Pagelift only cares about the exit status.

use std::path::Path;
use std::process::Command;

use crate::buildenv::BuildEnv;
use crate::error::{PageliftError, Result};

#[cfg(windows)]
const NPX: &str = "npx.cmd";
#[cfg(not(windows))]
const NPX: &str = "npx";

/// Run `npx <args>` in `project_dir` with the build environment injected.
///
/// `phase` names the invocation in errors and verbose output ("framework",
/// "client", "server"). A non-zero exit becomes [`PageliftError::BuildFailed`].
pub fn run_build(project_dir: &Path, phase: &str, args: &[&str], env: &BuildEnv, verbose: bool) -> Result<()> {
    let mut cmd = Command::new(NPX);
    cmd.args(args).current_dir(project_dir);
    for (key, value) in env.vars() {
        cmd.env(key, value);
    }

    if verbose {
        println!("  [{phase}] {NPX} {}", args.join(" "));
    }

    let status = cmd
        .status()
        .map_err(|e| PageliftError::BuildToolLaunchFailed {
            program: NPX.to_string(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(PageliftError::BuildFailed {
            phase: phase.to_string(),
            status: status.to_string(),
        });
    }

    Ok(())
}
