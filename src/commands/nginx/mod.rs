//! Nginx process commands.
//!
//! Configuration testing and service control.

mod control;
mod test_config;

pub use control::NginxControlCommand;
pub use test_config::TestNginxConfigCommand;
