//! Console notifications for verbose operations.

use tracing::{info, warn};

/// Receives one message per lifecycle step when running verbosely.
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
}

/// Forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        info!(target: "nginx_sites::notify", "{}", message);
    }

    fn warning(&self, message: &str) {
        warn!(target: "nginx_sites::notify", "{}", message);
    }
}
