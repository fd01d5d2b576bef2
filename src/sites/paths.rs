//! Site configuration paths.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SitesError;
use crate::options::NginxOptions;
use crate::validation::validate_site_name;

/// The locations of one site's configuration, with the options they were
/// resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    /// `<dir>/sites-available`.
    pub available_dir: PathBuf,
    /// `<dir>/sites-enabled`.
    pub enabled_dir: PathBuf,
    /// `<dir>/sites-available/<file>`: the configuration file.
    pub available_file: PathBuf,
    /// `<dir>/sites-enabled/<file>`: the activation symlink.
    pub enabled_file: PathBuf,
    /// The resolved options.
    pub options: NginxOptions,
}

impl SitePaths {
    /// Compute the paths of `file_name` under the directories of `options`.
    ///
    /// `file_name` must be a plain file name, so the result stays inside
    /// both directories. Both `sites-available` and `sites-enabled` must
    /// already exist; they are never created here.
    pub fn resolve(options: NginxOptions, file_name: &str) -> Result<Self, SitesError> {
        validate_site_name(file_name)?;

        let available_dir = options.site_available_directory();
        assert_directory(&available_dir)?;

        let enabled_dir = options.site_enabled_directory();
        assert_directory(&enabled_dir)?;

        Ok(Self {
            available_file: available_dir.join(file_name),
            enabled_file: enabled_dir.join(file_name),
            available_dir,
            enabled_dir,
            options,
        })
    }
}

/// Fail with [`SitesError::DirectoryNotFound`] unless `path` is an existing
/// directory.
pub fn assert_directory(path: &Path) -> Result<(), SitesError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(SitesError::DirectoryNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Whether `path` itself is a symlink (dangling or not).
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|metadata| metadata.file_type().is_symlink())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nginx_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sites-available")).unwrap();
        fs::create_dir(dir.path().join("sites-enabled")).unwrap();
        dir
    }

    fn options_for(dir: &Path) -> NginxOptions {
        NginxOptions {
            dir: Some(dir.to_path_buf()),
            ..NginxOptions::default()
        }
    }

    #[test]
    fn test_resolve_paths() {
        let dir = nginx_dir();
        let paths = SitePaths::resolve(options_for(dir.path()), "example.com").unwrap();

        assert_eq!(paths.available_dir, dir.path().join("sites-available"));
        assert_eq!(paths.enabled_dir, dir.path().join("sites-enabled"));
        assert_eq!(
            paths.available_file,
            dir.path().join("sites-available/example.com")
        );
        assert_eq!(
            paths.enabled_file,
            dir.path().join("sites-enabled/example.com")
        );
        assert_eq!(paths.options.dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_missing_available_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sites-enabled")).unwrap();

        let result = SitePaths::resolve(options_for(dir.path()), "example.com");
        let expected = dir.path().join("sites-available");
        assert!(matches!(
            result,
            Err(SitesError::DirectoryNotFound { path }) if path == expected
        ));
        assert!(!dir.path().join("sites-available").exists());
    }

    #[test]
    fn test_missing_enabled_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sites-available")).unwrap();

        let result = SitePaths::resolve(options_for(dir.path()), "example.com");
        assert!(matches!(
            result,
            Err(SitesError::DirectoryNotFound { path }) if path == dir.path().join("sites-enabled")
        ));
    }

    #[test]
    fn test_file_name_must_stay_inside_site_directories() {
        let dir = nginx_dir();

        for name in ["/etc/passwd", "../../x", "nested/site", "..", ""] {
            let result = SitePaths::resolve(options_for(dir.path()), name);
            assert!(
                matches!(result, Err(SitesError::Validation { .. })),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_assert_directory_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "").unwrap();
        assert!(assert_directory(dir.path()).is_ok());
        assert!(assert_directory(&file).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_is_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target");
        let link = dir.path().join("link");
        fs::write(&target, "").unwrap();

        assert!(!is_symlink(&link));
        std::os::unix::fs::symlink(&target, &link).unwrap();
        assert!(is_symlink(&link));
        assert!(!is_symlink(&target));

        // Dangling links still count
        fs::remove_file(&target).unwrap();
        assert!(is_symlink(&link));
    }
}
