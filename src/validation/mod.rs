//! Input validation module.
//!
//! Validates command parameters before they reach the filesystem or a
//! process: site file names and redirect host names.

mod domain;
mod site;

pub use domain::{validate_domain, validate_domains};
pub use site::validate_site_name;

use crate::error::{SitesError, ValidationErrorKind};

fn invalid(param: &str, message: impl Into<String>) -> SitesError {
    SitesError::Validation {
        kind: ValidationErrorKind::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        },
    }
}
