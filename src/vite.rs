//! Generated Vite configurations for the split build
//!
//! A single `remix vite:build` holds the client and server module graphs in
//! memory at once. The split build sidesteps that by writing two throwaway
//! Vite configs and running `vite build` twice, one target per pass. The
//! generated files live in the project directory because Vite resolves
//! plugins relative to the config file, and are removed best-effort after
//! both passes.

use std::path::{Path, PathBuf};

use console::Style;

use crate::error::{PageliftError, Result};

pub const CLIENT_CONFIG_NAME: &str = ".pagelift.vite.client.mjs";
pub const SERVER_CONFIG_NAME: &str = ".pagelift.vite.server.mjs";

/// Paths of the generated config pair.
#[derive(Debug)]
pub struct SplitConfigs {
    pub client: PathBuf,
    pub server: PathBuf,
}

impl SplitConfigs {
    /// Best-effort removal of both generated files. Failures are warnings;
    /// a leftover dotfile must never fail an otherwise successful build.
    pub fn cleanup(&self) {
        for path in [&self.client, &self.server] {
            if !path.exists() {
                continue;
            }
            if let Err(e) = std::fs::remove_file(path) {
                let warn = Style::new().yellow().bold();
                eprintln!(
                    "{} failed to remove {}: {e}",
                    warn.apply_to("Warning:"),
                    path.display()
                );
            }
        }
    }
}

/// Write the client and server config files into `project_dir`.
pub fn write_split_configs(project_dir: &Path, sourcemaps: bool) -> Result<SplitConfigs> {
    let client = project_dir.join(CLIENT_CONFIG_NAME);
    let server = project_dir.join(SERVER_CONFIG_NAME);

    write_config(&client, &client_config(sourcemaps))?;
    write_config(&server, &server_config(sourcemaps))?;

    Ok(SplitConfigs { client, server })
}

fn write_config(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| PageliftError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Client-target config: browser bundle with vendor chunking and esbuild
/// minification.
pub fn client_config(sourcemaps: bool) -> String {
    format!(
        r#"// Generated by pagelift for the split client build. Removed after the build.
import {{ vitePlugin as remix }} from "@remix-run/dev";
import {{ defineConfig }} from "vite";

export default defineConfig({{
  plugins: [remix()],
  build: {{
    outDir: "build/client",
    sourcemap: {sourcemaps},
    minify: "esbuild",
    cssMinify: true,
    rollupOptions: {{
      treeshake: "recommended",
      output: {{
        manualChunks(id) {{
          if (id.includes("node_modules")) {{
            return "vendor";
          }}
        }},
      }},
    }},
  }},
}});
"#
    )
}

/// Server-target config: SSR bundle, no chunk splitting (a single server
/// entry is what the Pages Functions runtime expects).
pub fn server_config(sourcemaps: bool) -> String {
    format!(
        r#"// Generated by pagelift for the split server build. Removed after the build.
import {{ vitePlugin as remix }} from "@remix-run/dev";
import {{ defineConfig }} from "vite";

export default defineConfig({{
  plugins: [remix()],
  build: {{
    ssr: true,
    outDir: "build/server",
    sourcemap: {sourcemaps},
    minify: "esbuild",
    rollupOptions: {{
      treeshake: "recommended",
    }},
  }},
}});
"#
    )
}
