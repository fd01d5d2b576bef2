//! Nginx service definition.

use super::traits::ServiceDefinition;

/// Nginx web server service.
pub struct NginxService;

impl NginxService {
    /// The nginx binary.
    pub const BINARY: &'static str = "nginx";
}

impl ServiceDefinition for NginxService {
    fn name(&self) -> &'static str {
        "nginx"
    }

    fn display_name(&self) -> &'static str {
        "Nginx Web Server"
    }
}
