//! Service definition traits.

/// Describes a service the host service manager controls.
///
/// # Example
///
/// ```ignore
/// pub struct NginxService;
///
/// impl ServiceDefinition for NginxService {
///     fn name(&self) -> &'static str { "nginx" }
///     fn display_name(&self) -> &'static str { "Nginx Web Server" }
/// }
/// ```
pub trait ServiceDefinition: Send + Sync {
    /// Service identifier (e.g., "nginx").
    fn name(&self) -> &'static str;

    /// Human-readable display name.
    fn display_name(&self) -> &'static str;

    /// Unit name used with `systemctl`.
    fn systemd_unit(&self) -> &'static str {
        self.name()
    }

    /// Formula name used with `brew services`.
    fn homebrew_formula(&self) -> &'static str {
        self.name()
    }
}
