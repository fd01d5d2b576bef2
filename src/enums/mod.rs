//! Enumerated constants.
//!
//! Closed sets of tokens used by the option model, the lifecycle manager and
//! the redirect generator.

mod constants;
mod direction;
mod path;
mod signal;

pub use constants::Constants;
pub use direction::RedirectDirection;
pub use path::NginxPath;
pub use signal::NginxSignal;
