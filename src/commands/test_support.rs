//! In-process collaborators for command tests.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use crate::error::SitesError;
use crate::executor::{CommandRunner, FileStore, Invocation};
use crate::options::NginxOptions;
use crate::services::ServiceManager;
use crate::sites::SiteManager;

use super::types::ExecutionContext;

/// Records invocations and returns a fixed status; `ln -s` is performed
/// in-process when the status is zero.
pub struct FakeRunner {
    pub calls: Mutex<Vec<Invocation>>,
    pub status: i32,
}

impl FakeRunner {
    pub fn new(status: i32) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            status,
        })
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32, SitesError> {
        self.calls.lock().unwrap().push(invocation.clone());
        if self.status == 0 && invocation.program == "ln" {
            std::os::unix::fs::symlink(&invocation.args[1], &invocation.args[2])?;
        }
        Ok(self.status)
    }
}

/// Writes and deletes without elevation.
pub struct LocalFiles;

impl FileStore for LocalFiles {
    fn write(&self, path: &Path, content: &str, _sudo: bool) -> Result<i32, SitesError> {
        fs::write(path, content)?;
        Ok(0)
    }

    fn delete(&self, path: &Path, _sudo: bool) -> Result<i32, SitesError> {
        fs::remove_file(path)?;
        Ok(0)
    }
}

/// A temporary nginx directory with `sites-available` and `sites-enabled`.
pub fn nginx_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sites-available")).unwrap();
    fs::create_dir(dir.path().join("sites-enabled")).unwrap();
    dir
}

pub fn manager(dir: &Path, runner: Arc<FakeRunner>) -> Arc<SiteManager> {
    Arc::new(
        SiteManager::new(runner, Arc::new(LocalFiles))
            .with_service_manager(ServiceManager::Systemd)
            .with_options(NginxOptions {
                dir: Some(dir.to_path_buf()),
                ..NginxOptions::default()
            }),
    )
}

pub fn context(command: &str) -> ExecutionContext {
    ExecutionContext::for_command(command)
}
