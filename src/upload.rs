//! Build-output enumeration and sequential upload
//!
//! Uploads are strictly sequential, one API call per file. Cloudflare
//! rate-limits per-file uploads and the payload is a few hundred small
//! assets at most, so there is nothing to win by parallelizing here.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::api::PagesClient;
use crate::error::{PageliftError, Result};
use crate::mime;
use crate::progress::UploadProgress;

/// One file queued for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Forward-slash relative path the file is served under
    pub destination: String,
    /// Content-Type sent with the upload
    pub content_type: &'static str,
}

/// Recursively enumerate every file under `output_dir`, sorted by
/// destination so upload order is stable across platforms.
pub fn enumerate_files(output_dir: &Path) -> Result<Vec<UploadFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(output_dir).follow_links(false) {
        let entry = entry.map_err(|e| PageliftError::IoError {
            message: format!("failed to walk {}: {e}", output_dir.display()),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(output_dir)
            .map_err(|e| PageliftError::IoError {
                message: format!("failed to relativize {}: {e}", entry.path().display()),
            })?;
        let destination = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        files.push(UploadFile {
            path: entry.path().to_path_buf(),
            content_type: mime::from_path(entry.path()),
            destination,
        });
    }

    files.sort_by(|a, b| a.destination.cmp(&b.destination));
    Ok(files)
}

/// Upload every file in order. Aborts on the first failure; already
/// uploaded files stay attached to the (never completed) deployment.
pub fn upload_all(
    client: &PagesClient,
    deployment_id: &str,
    files: &[UploadFile],
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let progress = UploadProgress::new(files.len() as u64, quiet);

    for file in files {
        let body = std::fs::read(&file.path).map_err(|e| PageliftError::FileReadFailed {
            path: file.path.display().to_string(),
            reason: e.to_string(),
        })?;

        if verbose {
            println!("  {} ({}, {} bytes)", file.destination, file.content_type, body.len());
        }

        if let Err(e) = client.upload_file(deployment_id, &file.destination, file.content_type, &body)
        {
            progress.abandon();
            return Err(e);
        }
        progress.update_file(&file.destination);
    }

    progress.finish();
    Ok(())
}
