//! nginx-sites Library
//!
//! Manages nginx site configurations (`sites-available` / `sites-enabled`),
//! builds `nginx` command lines from a typed option record, controls the
//! nginx service, and generates redirect blocks.

pub mod commands;
pub mod config;
pub mod enums;
pub mod error;
pub mod executor;
pub mod options;
pub mod redirect;
pub mod services;
pub mod sites;
pub mod validation;
