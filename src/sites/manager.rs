//! Site lifecycle manager.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::SitesResult;
use crate::executor::{
    CommandRunner, FileStore, Invocation, SystemFiles, SystemRunner, EXIT_SUCCESS,
};
use crate::options::{NginxOptions, NginxOptionsPatch};
use crate::services::{NginxService, ServiceDefinition, ServiceManager, ServiceVerb};

use super::notify::{Notifier, TracingNotifier};
use super::paths::{is_symlink, SitePaths};

/// Creates, activates and removes nginx site configurations, and drives the
/// nginx service.
///
/// Holds optional instance options; every operation also takes a per-call
/// override layered on top of them. Operations return the exit status of
/// their last step (0 on success). Errors are reserved for missing
/// directories and commands that could not be run at all.
///
/// # Example
///
/// ```no_run
/// use nginx_sites::executor::SystemRunner;
/// use nginx_sites::options::NginxOptions;
/// use nginx_sites::sites::SiteManager;
///
/// let manager = SiteManager::system(SystemRunner::new()).with_options(NginxOptions {
///     dir: Some("/etc/nginx".into()),
///     ..NginxOptions::default()
/// });
///
/// let status = manager.config_create("example.com", "server {}", None, true, false)?;
/// if status == 0 {
///     manager.test(None, true, false)?;
///     manager.reload(None, true, false)?;
/// }
/// # Ok::<(), nginx_sites::error::SitesError>(())
/// ```
pub struct SiteManager {
    options: Option<NginxOptions>,
    runner: Arc<dyn CommandRunner>,
    files: Arc<dyn FileStore>,
    notifier: Arc<dyn Notifier>,
    service_manager: ServiceManager,
}

impl SiteManager {
    /// A manager using the given collaborators, notifying through `tracing`
    /// and controlling the service with the host's service manager.
    pub fn new(runner: Arc<dyn CommandRunner>, files: Arc<dyn FileStore>) -> Self {
        Self {
            options: None,
            runner,
            files,
            notifier: Arc::new(TracingNotifier),
            service_manager: ServiceManager::detect(),
        }
    }

    /// A manager operating on the host through `runner`.
    pub fn system(runner: SystemRunner) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(runner);
        let files = Arc::new(SystemFiles::new(Arc::clone(&runner)));
        Self::new(runner, files)
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_service_manager(mut self, service_manager: ServiceManager) -> Self {
        self.service_manager = service_manager;
        self
    }

    pub fn with_options(mut self, options: NginxOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Replace the instance options from raw configuration, nested under
    /// `nginx` or flat.
    pub fn initialize_options(&mut self, init: &serde_json::Value) -> SitesResult<&mut Self> {
        self.options = Some(NginxOptions::from_init(init)?);
        Ok(self)
    }

    /// The instance options, if any.
    pub fn options(&self) -> Option<&NginxOptions> {
        self.options.as_ref()
    }

    pub fn service_manager(&self) -> ServiceManager {
        self.service_manager
    }

    /// Instance options with `patches` layered on top.
    pub fn resolve_options(&self, patches: &[Option<&NginxOptionsPatch>]) -> NginxOptions {
        NginxOptions::resolve(self.options.as_ref(), patches.iter().flatten().copied())
    }

    /// Resolve the paths of `file_name`, asserting both site directories.
    pub fn resolve_paths(
        &self,
        file_name: &str,
        overrides: Option<&NginxOptionsPatch>,
    ) -> SitesResult<SitePaths> {
        SitePaths::resolve(self.resolve_options(&[overrides]), file_name)
    }

    /// Write a site configuration to `sites-available` and link it from
    /// `sites-enabled`.
    ///
    /// The link is only created when the write succeeded and no symlink is
    /// present yet. Returns the status of the last step attempted.
    pub fn config_create(
        &self,
        file_name: &str,
        content: &str,
        overrides: Option<&NginxOptionsPatch>,
        verbose: bool,
        silent: bool,
    ) -> SitesResult<i32> {
        let options = self.resolve_options(&[overrides]);
        if self.skip_disabled(&options, "config_create") {
            return Ok(EXIT_SUCCESS);
        }
        let paths = SitePaths::resolve(options, file_name)?;

        debug!(
            file_name,
            available = %paths.available_file.display(),
            enabled = %paths.enabled_file.display(),
            "Creating nginx site configuration"
        );

        let status = self.files.write(&paths.available_file, content, true)?;
        self.report(
            verbose,
            status,
            format!(
                "[✓] Nginx configuration \"{}\" written.",
                paths.available_file.display()
            ),
            format!(
                "[!] Could not write nginx configuration: {}",
                paths.available_file.display()
            ),
        );
        if status != EXIT_SUCCESS {
            return Ok(status);
        }

        if is_symlink(&paths.enabled_file) {
            if verbose {
                self.notifier.info(&format!(
                    "[✓] Nginx symlink \"{}\" already present.",
                    paths.enabled_file.display()
                ));
            }
            return Ok(status);
        }

        let status = self.runner.run(
            &Invocation::new("ln")
                .args([
                    "-s".to_string(),
                    path_arg(&paths.available_file),
                    path_arg(&paths.enabled_file),
                ])
                .sudo(true)
                .mode(verbose, silent),
        )?;
        self.report(
            verbose,
            status,
            format!(
                "[✓] Nginx symlink \"{}\" created.",
                paths.enabled_file.display()
            ),
            format!(
                "[!] Could not create nginx symlink: {}",
                paths.enabled_file.display()
            ),
        );

        if status == EXIT_SUCCESS {
            info!(file_name, "Nginx site created and enabled");
        }
        Ok(status)
    }

    /// Whether the site's configuration file exists and, if `check_symlink`,
    /// is linked from `sites-enabled`.
    pub fn config_exists(
        &self,
        file_name: &str,
        overrides: Option<&NginxOptionsPatch>,
        check_symlink: bool,
    ) -> SitesResult<bool> {
        let paths = self.resolve_paths(file_name, overrides)?;

        if !paths.available_file.is_file() {
            return Ok(false);
        }
        if check_symlink && !is_symlink(&paths.enabled_file) {
            return Ok(false);
        }
        Ok(true)
    }

    /// Delete the site's configuration file and, if present, its symlink.
    ///
    /// Returns the status of the last deletion attempted.
    pub fn config_delete(
        &self,
        file_name: &str,
        overrides: Option<&NginxOptionsPatch>,
        verbose: bool,
    ) -> SitesResult<i32> {
        let options = self.resolve_options(&[overrides]);
        if self.skip_disabled(&options, "config_delete") {
            return Ok(EXIT_SUCCESS);
        }
        let paths = SitePaths::resolve(options, file_name)?;

        debug!(
            file_name,
            available = %paths.available_file.display(),
            "Deleting nginx site configuration"
        );

        let mut status = self.files.delete(&paths.available_file, true)?;
        self.report(
            verbose,
            status,
            format!(
                "[✓] Nginx configuration \"{}\" removed.",
                paths.available_file.display()
            ),
            format!(
                "[!] Could not remove nginx configuration: {}",
                paths.available_file.display()
            ),
        );

        if is_symlink(&paths.enabled_file) {
            status = self.files.delete(&paths.enabled_file, true)?;
            self.report(
                verbose,
                status,
                format!(
                    "[✓] Nginx symlink \"{}\" removed.",
                    paths.enabled_file.display()
                ),
                format!(
                    "[!] Could not remove nginx symlink: {}",
                    paths.enabled_file.display()
                ),
            );
        }

        Ok(status)
    }

    /// Run `nginx -t` with the resolved command-line options.
    pub fn test(
        &self,
        overrides: Option<&NginxOptionsPatch>,
        verbose: bool,
        silent: bool,
    ) -> SitesResult<i32> {
        let force_test = NginxOptionsPatch {
            test: Some(true),
            ..NginxOptionsPatch::default()
        };
        let options = self.resolve_options(&[overrides, Some(&force_test)]);
        if self.skip_disabled(&options, "test") {
            return Ok(EXIT_SUCCESS);
        }

        if verbose {
            self.notifier.info("[?] Testing the nginx configuration");
        }

        let status = self.runner.run(
            &Invocation::new(NginxService::BINARY)
                .args(options.command_args())
                .sudo(true)
                .mode(verbose, silent),
        )?;
        self.report(
            verbose,
            status,
            "[✓] Nginx configuration is valid.".to_string(),
            "[!] Nginx configuration test failed.".to_string(),
        );
        Ok(status)
    }

    /// Reload nginx through the host service manager.
    pub fn reload(
        &self,
        overrides: Option<&NginxOptionsPatch>,
        verbose: bool,
        silent: bool,
    ) -> SitesResult<i32> {
        self.control(ServiceVerb::Reload, overrides, verbose, silent)
    }

    /// Restart nginx through the host service manager.
    pub fn restart(
        &self,
        overrides: Option<&NginxOptionsPatch>,
        verbose: bool,
        silent: bool,
    ) -> SitesResult<i32> {
        self.control(ServiceVerb::Restart, overrides, verbose, silent)
    }

    /// Start nginx through the host service manager.
    pub fn start(
        &self,
        overrides: Option<&NginxOptionsPatch>,
        verbose: bool,
        silent: bool,
    ) -> SitesResult<i32> {
        self.control(ServiceVerb::Start, overrides, verbose, silent)
    }

    /// Stop nginx through the host service manager.
    pub fn stop(
        &self,
        overrides: Option<&NginxOptionsPatch>,
        verbose: bool,
        silent: bool,
    ) -> SitesResult<i32> {
        self.control(ServiceVerb::Stop, overrides, verbose, silent)
    }

    /// Run a service verb; elevation follows the resolved `sudo` option.
    pub fn control(
        &self,
        verb: ServiceVerb,
        overrides: Option<&NginxOptionsPatch>,
        verbose: bool,
        silent: bool,
    ) -> SitesResult<i32> {
        let options = self.resolve_options(&[overrides]);
        if self.skip_disabled(&options, verb.as_str()) {
            return Ok(EXIT_SUCCESS);
        }

        let invocation = self
            .service_manager
            .command(verb, &NginxService)
            .sudo(options.sudo)
            .mode(verbose, silent);

        debug!(
            command = %invocation,
            service = NginxService.display_name(),
            "Controlling service"
        );

        let status = self.runner.run(&invocation)?;
        if status == EXIT_SUCCESS {
            info!(action = %verb, "Nginx service command succeeded");
        } else {
            warn!(action = %verb, status, "Nginx service command failed");
        }
        self.report(
            verbose,
            status,
            format!("[✓] Nginx {} succeeded.", verb),
            format!("[!] Nginx {} failed with status {}.", verb, status),
        );
        Ok(status)
    }

    fn skip_disabled(&self, options: &NginxOptions, operation: &str) -> bool {
        if !options.enabled {
            debug!(operation, "Nginx commands disabled, skipping");
        }
        !options.enabled
    }

    fn report(&self, verbose: bool, status: i32, success: String, failure: String) {
        if !verbose {
            return;
        }
        if status == EXIT_SUCCESS {
            self.notifier.info(&success);
        } else {
            self.notifier.warning(&failure);
        }
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
