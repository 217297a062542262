//! Common test utilities for Pagelift integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway project directory for integration tests
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new test project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the project, creating parent directories
    pub fn write_file(&self, rel: &str, content: &str) {
        let file_path = self.path.join(rel);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Create a directory in the project
    pub fn create_dir(&self, rel: &str) -> PathBuf {
        let dir = self.path.join(rel);
        std::fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Check if a path exists in the project
    pub fn exists(&self, rel: &str) -> bool {
        self.path.join(rel).exists()
    }

    /// Install a fake `npx` into the project and return the PATH value to
    /// run commands with. The fake logs each invocation (one line of args)
    /// to `npx-invocations.log` and exits with `exit_code`.
    #[cfg(unix)]
    pub fn install_fake_npx(&self, exit_code: i32) -> String {
        self.install_fake_npx_with(&format!("exit {exit_code}"))
    }

    /// Like [`install_fake_npx`], with extra shell commands run on every
    /// invocation after logging (e.g. to fabricate build output).
    #[cfg(unix)]
    pub fn install_fake_npx_with(&self, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let bin_dir = self.create_dir("fake-bin");
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> \"{}\"\nenv | grep -E '^(NODE_OPTIONS|VITE_)' >> \"{}\"\n{}\n",
            self.path.join("npx-invocations.log").display(),
            self.path.join("npx-env.log").display(),
            body
        );
        let npx = bin_dir.join("npx");
        std::fs::write(&npx, script).expect("Failed to write fake npx");
        let mut perms = std::fs::metadata(&npx).expect("stat fake npx").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&npx, perms).expect("chmod fake npx");

        let orig = std::env::var("PATH").unwrap_or_default();
        format!("{}:{}", bin_dir.display(), orig)
    }

    /// Lines logged by the fake npx, one per invocation
    #[cfg(unix)]
    pub fn npx_invocations(&self) -> Vec<String> {
        match std::fs::read_to_string(self.path.join("npx-invocations.log")) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}
