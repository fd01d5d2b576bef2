//! Error types for nginx-sites.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
