//! Site file name validation.

use crate::error::SitesError;

use super::invalid;

/// Maximum length for a site file name.
const MAX_SITE_NAME_LENGTH: usize = 64;

const PARAM: &str = "site_name";

/// Validates a site configuration file name.
///
/// The name is joined onto `sites-available` and `sites-enabled`, so it
/// must be a plain file name: 1-64 characters of ASCII letters, digits,
/// `.`, `-` or `_`, starting with a letter or digit, without `..`.
pub fn validate_site_name(site_name: &str) -> Result<&str, SitesError> {
    let Some(first) = site_name.chars().next() else {
        return Err(invalid(PARAM, "Site name cannot be empty"));
    };

    if site_name.len() > MAX_SITE_NAME_LENGTH {
        return Err(invalid(
            PARAM,
            format!(
                "Site name exceeds maximum length of {} characters",
                MAX_SITE_NAME_LENGTH
            ),
        ));
    }
    if !first.is_ascii_alphanumeric() {
        return Err(invalid(PARAM, "Site name must start with a letter or number"));
    }
    if let Some(c) = site_name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '.' | '-' | '_'))
    {
        return Err(invalid(
            PARAM,
            format!("Site name contains invalid character '{}'", c),
        ));
    }
    if site_name.contains("..") {
        return Err(invalid(PARAM, "Site name contains path traversal sequence"));
    }

    Ok(site_name)
}
