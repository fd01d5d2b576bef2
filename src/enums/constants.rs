//! Closed sets of string tokens.

use crate::error::SitesError;

/// A closed enumeration of string tokens.
///
/// Implementors list every member in [`Constants::ALL`] and map each one to
/// its token and symbolic constant name. Lookup, membership and validation
/// are derived from that table.
///
/// # Example
///
/// ```
/// use nginx_sites::enums::{Constants, NginxSignal};
///
/// assert!(NginxSignal::includes("reload"));
/// assert_eq!(NginxSignal::get("bogus", "stop"), "stop");
/// assert_eq!(NginxSignal::name_of("reopen"), Some("REOPEN"));
/// assert!(NginxSignal::validate("bogus").is_err());
/// ```
pub trait Constants: Copy + Sized + 'static {
    /// Human-readable name of the enumeration, used in error messages.
    const ENUMERATION: &'static str;

    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// The string token of this member.
    fn value(self) -> &'static str;

    /// The symbolic constant name of this member (e.g. `SITES_AVAILABLE`).
    fn constant_name(self) -> &'static str;

    /// All valid tokens, in declaration order.
    fn values() -> Vec<&'static str> {
        Self::ALL.iter().map(|member| member.value()).collect()
    }

    /// Find the member for a token.
    fn find(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.value() == token)
    }

    /// Returns `token` if it is a member, `fallback` otherwise.
    fn get<'a>(token: &'a str, fallback: &'a str) -> &'a str {
        if Self::includes(token) {
            token
        } else {
            fallback
        }
    }

    /// Whether `token` is a member.
    fn includes(token: &str) -> bool {
        Self::find(token).is_some()
    }

    /// The symbolic constant name for a token, if it is a member.
    fn name_of(token: &str) -> Option<&'static str> {
        Self::find(token).map(Constants::constant_name)
    }

    /// Parse `token`, failing with [`SitesError::InvalidEnumValue`] if it is
    /// not a member.
    fn validate(token: &str) -> Result<Self, SitesError> {
        Self::find(token).ok_or_else(|| SitesError::InvalidEnumValue {
            enumeration: Self::ENUMERATION,
            value: token.to_string(),
            expected: Self::values().join(", "),
        })
    }
}
