//! Site lifecycle management.
//!
//! Resolves `sites-available` / `sites-enabled` paths, materializes and
//! removes site configurations, and drives the nginx process.

mod manager;
mod notify;
mod paths;

pub use manager::SiteManager;
pub use notify::{Notifier, TracingNotifier};
pub use paths::{assert_directory, is_symlink, SitePaths};
