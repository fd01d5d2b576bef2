//! Nginx option model.
//!
//! Maps named settings onto the `nginx` command line and merges option
//! sources (instance defaults, call-site overrides) into one record.

mod option;
#[allow(clippy::module_inception)]
mod options;

pub use option::{get_command_option, NginxOption};
pub use options::{NginxOptions, NginxOptionsPatch, NGINX_KEY};
