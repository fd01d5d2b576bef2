//! Service management.
//!
//! Service definitions and the host service managers that control them.

mod manager;
mod nginx;
mod traits;

pub use manager::{is_mac_host, ServiceManager, ServiceVerb};
pub use nginx::NginxService;
pub use traits::ServiceDefinition;
