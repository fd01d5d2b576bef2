//! Command executor module.
//!
//! Handles subprocess spawning, privilege elevation, timeouts and file
//! writes on behalf of the site manager.

mod files;
mod output;
mod runner;
mod subprocess;

pub use files::{FileStore, SystemFiles};
pub use output::sanitize_output;
pub use runner::{
    CommandRunner, Invocation, SystemRunner, DEFAULT_ELEVATE_WITH, EXIT_FAILURE, EXIT_SUCCESS,
};
pub use subprocess::{SubprocessBuilder, SubprocessResult, DEFAULT_TIMEOUT};
