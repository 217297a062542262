//! Deploy command implementation
//!
//! Direct upload to Cloudflare Pages, bypassing the Pages build pipeline:
//! 1. Read credentials from the environment (fail before any network call)
//! 2. Resolve the Pages project name (flag > env > pagelift.yaml)
//! 3. Ensure build output exists (optionally building it with --build)
//! 4. Create deployment, upload every file sequentially, complete, fetch URL
//!
//! A failure partway through leaves the remote deployment incomplete;
//! Cloudflare garbage-collects unfinished deployments, so there is no
//! client-side rollback.

use std::path::PathBuf;

use console::Style;

use crate::api::{Credentials, PagesClient};
use crate::cli::{BuildArgs, DeployArgs};
use crate::commands::{build, helpers};
use crate::config::ProjectConfig;
use crate::error::{PageliftError, Result};
use crate::upload;

pub fn run(project_dir: Option<PathBuf>, args: DeployArgs, verbose: bool, quiet: bool) -> Result<()> {
    let project_dir = helpers::resolve_project_dir(project_dir)?;
    let config = ProjectConfig::load(&project_dir)?;

    let credentials = Credentials::from_env()?;
    let project = args
        .project
        .clone()
        .or_else(|| config.project.clone())
        .ok_or(PageliftError::MissingProject)?;

    let output_dir = config.output_dir(&project_dir);
    if !output_dir.exists() {
        if !args.build {
            return Err(PageliftError::BuildOutputMissing {
                path: output_dir.display().to_string(),
            });
        }
        build::run(Some(project_dir.clone()), default_build_args(), verbose, quiet)?;
        if !output_dir.exists() {
            return Err(PageliftError::BuildOutputMissing {
                path: output_dir.display().to_string(),
            });
        }
    }

    let files = upload::enumerate_files(&output_dir)?;
    if !quiet {
        println!(
            "Deploying {} file{} to Pages project '{project}'...",
            files.len(),
            if files.len() == 1 { "" } else { "s" }
        );
    }

    let client = PagesClient::new(&credentials, &project, args.api_base.as_deref());

    let deployment = client.create_deployment(&args.branch)?;
    if verbose {
        println!("  deployment id: {}", deployment.id);
    }

    upload::upload_all(&client, &deployment.id, &files, verbose, quiet)?;

    client.complete_deployment(&deployment.id)?;
    let finished = client.get_deployment(&deployment.id)?;

    // Quiet mode still prints the URL; it is the command's output
    if quiet {
        if let Some(url) = finished.url {
            println!("{url}");
        }
        return Ok(());
    }

    let ok = Style::new().green().bold();
    match finished.url {
        Some(url) => println!("{} deployed to {url}", ok.apply_to("Success:")),
        None => println!(
            "{} deployment {} complete (no URL reported yet)",
            ok.apply_to("Success:"),
            finished.id
        ),
    }

    Ok(())
}

fn default_build_args() -> BuildArgs {
    BuildArgs {
        split: false,
        memory: None,
        keep_caches: false,
        sourcemaps: false,
    }
}
