//! Host name validation for redirect blocks.

use crate::error::SitesError;

use super::invalid;

/// Maximum length for a domain name.
const MAX_DOMAIN_LENGTH: usize = 253;

/// Maximum length for a domain label (part between dots).
const MAX_LABEL_LENGTH: usize = 63;

const PARAM: &str = "domain";

/// Validates a host name used in a redirect block.
///
/// # Rules
///
/// - Must be 1-253 characters
/// - At least two labels (`example.com`, not `localhost`)
/// - Labels are 1-63 ASCII letters, digits or hyphens, not starting or
///   ending with a hyphen
/// - No wildcards
///
/// Returns the domain without a trailing dot.
pub fn validate_domain(domain: &str) -> Result<&str, SitesError> {
    if domain.is_empty() {
        return Err(invalid(PARAM, "Domain name cannot be empty"));
    }
    if domain.len() > MAX_DOMAIN_LENGTH {
        return Err(invalid(
            PARAM,
            format!(
                "Domain name exceeds maximum length of {} characters",
                MAX_DOMAIN_LENGTH
            ),
        ));
    }
    if domain.contains('*') {
        return Err(invalid(PARAM, "Wildcard domains are not allowed"));
    }

    let domain = domain.trim_end_matches('.');
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(invalid(
            PARAM,
            format!("Domain '{}' must have at least two parts", domain),
        ));
    }

    labels.iter().try_for_each(|label| validate_label(label))?;

    Ok(domain)
}

/// Validates every entry of a domain list, ignoring blank entries.
pub fn validate_domains<S: AsRef<str>>(domains: &[S]) -> Result<(), SitesError> {
    domains
        .iter()
        .map(|domain| domain.as_ref().trim())
        .filter(|domain| !domain.is_empty())
        .try_for_each(|domain| validate_domain(domain).map(|_| ()))
}

fn validate_label(label: &str) -> Result<(), SitesError> {
    if label.is_empty() {
        return Err(invalid(
            PARAM,
            "Domain contains empty label (consecutive dots)",
        ));
    }
    if label.len() > MAX_LABEL_LENGTH {
        return Err(invalid(
            PARAM,
            format!(
                "Domain label '{}' exceeds maximum length of {} characters",
                label, MAX_LABEL_LENGTH
            ),
        ));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(invalid(
            PARAM,
            format!("Domain label '{}' cannot start or end with a hyphen", label),
        ));
    }
    if let Some(c) = label
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-')
    {
        return Err(invalid(
            PARAM,
            format!("Domain label '{}' contains invalid character '{}'", label, c),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_domains() {
        assert!(validate_domain("example.com").is_ok());
        assert!(validate_domain("www.example.com").is_ok());
        assert!(validate_domain("my-site.example.org").is_ok());
        assert_eq!(validate_domain("example.com.").unwrap(), "example.com");
    }

    #[test]
    fn test_invalid_domains() {
        assert!(validate_domain("").is_err());
        assert!(validate_domain("localhost").is_err());
        assert!(validate_domain("*.example.com").is_err());
        assert!(validate_domain("example_site.com").is_err());
        assert!(validate_domain("example.com'; return 200").is_err());
        assert!(validate_domain("-example.com").is_err());
        assert!(validate_domain("example-.com").is_err());
        assert!(validate_domain("example..com").is_err());
    }

    #[test]
    fn test_validate_domain_list_skips_blanks() {
        assert!(validate_domains(&["example.com", "  ", "example.org"]).is_ok());
        assert!(validate_domains(&["example.com", "bad host"]).is_err());
        assert!(validate_domains::<&str>(&[]).is_ok());
    }
}
