//! Build command implementation
//!
//! Two modes share the same cleanup and environment setup:
//! - default: one `remix vite:build` pass building client and server together
//! - `--split`: two `vite build` passes against generated configs, halving
//!   the peak heap at the cost of a second cold start
//!
//! The split order is fixed: client first, then server. A client failure
//! aborts before the server pass starts; generated config cleanup happens
//! once, best-effort, after whichever pass ended the build.

use std::path::{Path, PathBuf};

use console::Style;

use crate::buildenv::BuildEnv;
use crate::clean;
use crate::cli::BuildArgs;
use crate::commands::helpers;
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::runner;
use crate::vite;

pub fn run(project_dir: Option<PathBuf>, args: BuildArgs, verbose: bool, quiet: bool) -> Result<()> {
    let project_dir = helpers::resolve_project_dir(project_dir)?;
    let config = ProjectConfig::load(&project_dir)?;

    let memory = config.memory_limit(args.memory);
    let env = BuildEnv::new(memory)
        .with_sourcemaps(args.sourcemaps)
        .with_split(args.split);

    if args.keep_caches {
        if verbose {
            println!("Keeping build caches (--keep-caches)");
        }
    } else {
        if !quiet {
            println!("Cleaning build caches...");
        }
        clean::clean_project(&project_dir, verbose);
    }

    if args.split {
        run_split(&project_dir, &env, args.sourcemaps, verbose, quiet)?;
    } else {
        run_full(&project_dir, &env, verbose, quiet)?;
    }

    if !quiet {
        let ok = Style::new().green().bold();
        println!(
            "{} build finished (heap ceiling {memory} MB)",
            ok.apply_to("Success:")
        );
    }
    Ok(())
}

fn run_full(project_dir: &Path, env: &BuildEnv, verbose: bool, quiet: bool) -> Result<()> {
    if !quiet {
        println!("Building client and server bundles...");
    }
    runner::run_build(project_dir, "framework", &["remix", "vite:build"], env, verbose)
}

fn run_split(
    project_dir: &Path,
    env: &BuildEnv,
    sourcemaps: bool,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let configs = vite::write_split_configs(project_dir, sourcemaps)?;

    let result = (|| {
        if !quiet {
            println!("Building client bundle...");
        }
        runner::run_build(
            project_dir,
            "client",
            &["vite", "build", "--config", vite::CLIENT_CONFIG_NAME],
            env,
            verbose,
        )?;

        if !quiet {
            println!("Building server bundle...");
        }
        runner::run_build(
            project_dir,
            "server",
            &["vite", "build", "--config", vite::SERVER_CONFIG_NAME],
            env,
            verbose,
        )
    })();

    // Single final cleanup step, success or not
    configs.cleanup();
    result
}
