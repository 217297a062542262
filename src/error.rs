//! Error types and handling for Pagelift
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Pagelift operations
#[derive(Error, Diagnostic, Debug)]
pub enum PageliftError {
    // Credential errors
    #[error("Missing required environment variable: {name}")]
    #[diagnostic(
        code(pagelift::deploy::missing_credential),
        help(
            "Direct upload needs CLOUDFLARE_API_TOKEN and CLOUDFLARE_ACCOUNT_ID. Create a token with the 'Cloudflare Pages: Edit' permission"
        )
    )]
    MissingCredential { name: String },

    #[error("No Pages project configured")]
    #[diagnostic(
        code(pagelift::deploy::missing_project),
        help(
            "Pass --project, set CLOUDFLARE_PROJECT_NAME, or add 'project: <name>' to pagelift.yaml"
        )
    )]
    MissingProject,

    // Build errors
    #[error("{phase} build failed with {status}")]
    #[diagnostic(
        code(pagelift::build::failed),
        help("Re-run with --verbose to see the full build command and environment")
    )]
    BuildFailed { phase: String, status: String },

    #[error("Failed to launch build tool '{program}': {reason}")]
    #[diagnostic(
        code(pagelift::build::tool_not_found),
        help("Ensure Node.js is installed and npx is on PATH")
    )]
    BuildToolLaunchFailed { program: String, reason: String },

    #[error("Build output not found at: {path}")]
    #[diagnostic(
        code(pagelift::deploy::output_missing),
        help("Run 'pagelift build' first, or pass --build to build before deploying")
    )]
    BuildOutputMissing { path: String },

    // Deployment API errors
    #[error("Request to {endpoint} failed: {reason}")]
    #[diagnostic(
        code(pagelift::api::request_failed),
        help("Check network connectivity and the API base URL")
    )]
    ApiRequestFailed { endpoint: String, reason: String },

    #[error("API rejected {endpoint} (HTTP {status}): {detail}")]
    #[diagnostic(
        code(pagelift::api::rejected),
        help("Verify the API token is valid and the Pages project exists")
    )]
    ApiRejected {
        endpoint: String,
        status: u16,
        detail: String,
    },

    #[error("Unexpected API response: {reason}")]
    #[diagnostic(code(pagelift::api::invalid_response))]
    ApiInvalidResponse { reason: String },

    #[error("Failed to upload {path}: {reason}")]
    #[diagnostic(code(pagelift::api::upload_failed))]
    UploadFailed { path: String, reason: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(pagelift::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(pagelift::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(pagelift::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(pagelift::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(pagelift::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for PageliftError {
    fn from(err: std::io::Error) -> Self {
        PageliftError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PageliftError {
    fn from(err: serde_yaml::Error) -> Self {
        PageliftError::ConfigParseFailed {
            path: "pagelift.yaml".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PageliftError {
    fn from(err: serde_json::Error) -> Self {
        PageliftError::ApiInvalidResponse {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PageliftError>;
