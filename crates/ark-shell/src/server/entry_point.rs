//! Locating the standalone server script on disk.

use crate::{ShellError, ShellResult};

use std::path::{Path, PathBuf};

use tracing::{debug, info};

const STANDALONE_DIR: [&str; 2] = [".next", "standalone"];
const SERVER_SCRIPT: &str = "server.js";
const UNPACKED_RESOURCES_DIR: &str = "app.asar.unpacked";

/// Ordered list of candidate entry points. The first one that exists wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointResolver {
    candidates: Vec<PathBuf>,
}

impl EntryPointResolver {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// The two conventional locations of a Next.js standalone build.
    ///
    /// Search order:
    /// 1. `<app_root>/.next/standalone/server.js`
    /// 2. `<resource_dir>/app.asar.unpacked/.next/standalone/server.js`
    pub fn standalone(app_root: &Path, resource_dir: &Path) -> Self {
        Self::new(vec![
            standalone_script(app_root),
            standalone_script(&resource_dir.join(UNPACKED_RESOURCES_DIR)),
        ])
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Return the first candidate that exists as a file.
    pub fn resolve(&self) -> ShellResult<PathBuf> {
        for candidate in &self.candidates {
            if candidate.is_file() {
                info!("Using standalone server: {}", candidate.display());
                return Ok(candidate.clone());
            }
            debug!("No standalone server at {}", candidate.display());
        }

        Err(ShellError::entry_point_not_found(self.candidates.clone()))
    }
}

fn standalone_script(root: &Path) -> PathBuf {
    let mut path = root.to_path_buf();
    path.extend(STANDALONE_DIR);
    path.join(SERVER_SCRIPT)
}
