//! Writing and deleting files, optionally with elevated privileges.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::SitesError;

use super::runner::{CommandRunner, Invocation, EXIT_FAILURE, EXIT_SUCCESS};

/// Writes and deletes files, reporting an exit status.
///
/// As with [`CommandRunner`], a failed write or delete is a non-zero
/// status; only failures to run the privileged helper are errors.
pub trait FileStore: Send + Sync {
    /// Write `content` to `path`, replacing any existing file.
    fn write(&self, path: &Path, content: &str, sudo: bool) -> Result<i32, SitesError>;

    /// Delete the file or symlink at `path`. A missing path succeeds.
    fn delete(&self, path: &Path, sudo: bool) -> Result<i32, SitesError>;
}

/// Host filesystem implementation.
///
/// Unprivileged writes go through a uniquely named temp file renamed into
/// place. Privileged operations stage content in the temp directory and run
/// `cp` / `rm -f` through the runner with elevation.
#[derive(Clone)]
pub struct SystemFiles {
    runner: Arc<dyn CommandRunner>,
}

impl SystemFiles {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn temp_name(path: &Path) -> String {
        format!(
            ".{}.{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy(),
            Uuid::new_v4().simple()
        )
    }

    /// Write through a temp file next to `path`, then rename.
    fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
        let temp_path = path.with_file_name(Self::temp_name(path));
        let written =
            Self::write_new(&temp_path, content).and_then(|_| fs::rename(&temp_path, path));
        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written
    }

    /// Create `path` exclusively and write `content` to it.
    fn write_new(path: &Path, content: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()
    }

    fn write_privileged(&self, path: &Path, content: &str) -> Result<i32, SitesError> {
        let staged: PathBuf = std::env::temp_dir().join(Self::temp_name(path));
        if let Err(e) = Self::write_new(&staged, content) {
            warn!(path = %staged.display(), error = %e, "Failed to stage file content");
            return Ok(EXIT_FAILURE);
        }

        let status = self.runner.run(
            &Invocation::new("cp")
                .args([staged.to_string_lossy().to_string(), path.to_string_lossy().to_string()])
                .sudo(true),
        );

        if let Err(e) = fs::remove_file(&staged) {
            debug!(path = %staged.display(), error = %e, "Failed to remove staged file");
        }
        status
    }
}

impl FileStore for SystemFiles {
    fn write(&self, path: &Path, content: &str, sudo: bool) -> Result<i32, SitesError> {
        debug!(path = %path.display(), bytes = content.len(), sudo, "Writing file");

        if sudo {
            return self.write_privileged(path, content);
        }

        match Self::write_atomic(path, content) {
            Ok(()) => {
                info!(path = %path.display(), bytes = content.len(), "File written");
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to write file");
                Ok(EXIT_FAILURE)
            }
        }
    }

    fn delete(&self, path: &Path, sudo: bool) -> Result<i32, SitesError> {
        debug!(path = %path.display(), sudo, "Deleting file");

        if sudo {
            return self.runner.run(
                &Invocation::new("rm")
                    .args(["-f".to_string(), path.to_string_lossy().to_string()])
                    .sudo(true),
            );
        }

        match fs::remove_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "File deleted");
                Ok(EXIT_SUCCESS)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "File already absent");
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to delete file");
                Ok(EXIT_FAILURE)
            }
        }
    }
}
