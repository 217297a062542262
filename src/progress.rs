//! Progress bar display for uploads

use indicatif::{ProgressBar, ProgressStyle};

/// Longest destination shown untruncated in the bar message.
const MAX_MESSAGE_CHARS: usize = 50;

/// Progress display for the per-file upload loop
pub struct UploadProgress {
    file_pb: ProgressBar,
}

impl UploadProgress {
    /// Create a new progress display with total file count. A quiet display
    /// draws nothing but keeps the same call surface.
    pub fn new(total_files: u64, quiet: bool) -> Self {
        if quiet {
            return Self {
                file_pb: ProgressBar::hidden(),
            };
        }

        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let file_pb = ProgressBar::new(total_files);
        file_pb.set_style(style);

        Self { file_pb }
    }

    /// Update to show the file just uploaded
    pub fn update_file(&self, file_path: &str) {
        self.file_pb.set_message(truncate_path(file_path));
        self.file_pb.inc(1);
    }

    /// Finish the bar after the last upload
    pub fn finish(&self) {
        self.file_pb.finish_with_message("done");
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.file_pb.abandon();
    }
}

/// Keep the tail of long paths for display. Upload destinations are real
/// file names and may be multi-byte, so the cut lands on a char boundary,
/// never a byte offset.
fn truncate_path(file_path: &str) -> String {
    if file_path.chars().count() <= MAX_MESSAGE_CHARS {
        return file_path.to_string();
    }
    let start = file_path
        .char_indices()
        .nth_back(MAX_MESSAGE_CHARS - 4)
        .map(|(i, _)| i)
        .unwrap_or(0);
    format!("...{}", &file_path[start..])
}
