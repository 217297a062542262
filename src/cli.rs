//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pagelift - Cloudflare Pages build and deployment orchestrator
#[derive(Parser, Debug)]
#[command(
    name = "pagelift",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Build orchestrator and direct-upload deployer for Cloudflare Pages",
    long_about = "Pagelift builds a Remix + Vite front-end under a bounded memory ceiling \
                  (optionally splitting the client and server bundles into separate build \
                  passes) and deploys the static output to Cloudflare Pages through the \
                  direct-upload REST API, bypassing the Pages build pipeline.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  pagelift build\n    \
                  pagelift build --split --memory 3072\n    \
                  pagelift deploy --project my-site\n    \
                  pagelift deploy --build\n    \
                  pagelift clean\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/pagelift/pagelift"
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'p', global = true)]
    pub project_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress status output and progress bars (errors still print)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean caches and run the framework build
    Build(BuildArgs),

    /// Deploy built output to Cloudflare Pages via direct upload
    Deploy(DeployArgs),

    /// Remove build caches and output directories
    Clean,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Optimized single-pass build:\n    pagelift build\n\n\
                  Split client/server build (lower peak memory):\n    pagelift build --split\n\n\
                  Raise the memory ceiling to 6 GB:\n    pagelift build --memory 6144\n\n\
                  Keep caches from the previous build:\n    pagelift build --keep-caches")]
pub struct BuildArgs {
    /// Build client and server bundles in separate passes
    #[arg(long)]
    pub split: bool,

    /// Node.js heap ceiling in megabytes (sets --max-old-space-size)
    #[arg(long, value_name = "MB")]
    pub memory: Option<u32>,

    /// Skip cache cleanup before building
    #[arg(long)]
    pub keep_caches: bool,

    /// Emit source maps (suppressed by default to save memory)
    #[arg(long)]
    pub sourcemaps: bool,
}

/// Arguments for the deploy command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Deploy existing build output:\n    pagelift deploy --project my-site\n\n\
                  Build first if output is missing:\n    pagelift deploy --build\n\n\
                  Project from environment:\n    CLOUDFLARE_PROJECT_NAME=my-site pagelift deploy\n\n\
                  Credentials are always read from CLOUDFLARE_API_TOKEN and\n  CLOUDFLARE_ACCOUNT_ID.")]
pub struct DeployArgs {
    /// Pages project name
    #[arg(long, env = "CLOUDFLARE_PROJECT_NAME")]
    pub project: Option<String>,

    /// Run the optimized build first if the output directory is missing
    #[arg(long)]
    pub build: bool,

    /// Branch name recorded on the deployment
    #[arg(long, default_value = "main")]
    pub branch: String,

    /// Override the Cloudflare API base URL (testing)
    #[arg(long, env = "PAGELIFT_API_BASE", hide = true)]
    pub api_base: Option<String>,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    pagelift completions --shell bash > ~/.bash_completion.d/pagelift\n\n\
                  Generate zsh completions:\n    pagelift completions --shell zsh > ~/.zfunc/_pagelift\n\n\
                  Generate fish completions:\n    pagelift completions --shell fish > ~/.config/fish/completions/pagelift.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
