//! Pagelift - Cloudflare Pages build and deployment orchestrator
//!
//! Builds a Remix + Vite front-end under a bounded memory ceiling (optionally
//! splitting the client and server bundles into separate build passes) and
//! deploys the static output to Cloudflare Pages through the direct-upload
//! REST API, bypassing the Pages build pipeline.

use clap::Parser;

mod api;
mod buildenv;
mod clean;
mod cli;
mod commands;
mod config;
mod error;
mod mime;
mod progress;
mod runner;
mod upload;
mod vite;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build(args) => {
            commands::build::run(cli.project_dir, args, cli.verbose, cli.quiet)
        }
        Commands::Deploy(args) => {
            commands::deploy::run(cli.project_dir, args, cli.verbose, cli.quiet)
        }
        Commands::Clean => commands::clean::run(cli.project_dir, cli.verbose, cli.quiet),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
