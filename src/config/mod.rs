//! Configuration module for nginx-sites.
//!
//! Handles loading and validating settings from TOML files.

mod settings;

pub use settings::*;
