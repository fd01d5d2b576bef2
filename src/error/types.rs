//! Error types for nginx-sites.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for site and service management.
#[derive(Error, Debug)]
pub enum SitesError {
    /// Configuration-related errors.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A token is not a member of a closed enumeration.
    #[error("Invalid {enumeration} value: '{value}' (expected one of: {expected})")]
    InvalidEnumValue {
        enumeration: &'static str,
        value: String,
        expected: String,
    },

    /// A redirect direction other than inbound/outbound.
    #[error("Invalid redirection direction: {direction}")]
    InvalidDirection { direction: String },

    /// A required nginx directory does not exist.
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// No command-line flag exists for this option name.
    #[error("Unknown nginx command option: {name}")]
    UnknownOption { name: String },

    /// Validation errors.
    #[error("Validation error: {kind}")]
    Validation { kind: ValidationErrorKind },

    /// Command execution errors.
    #[error("Command error: {kind}")]
    Command { kind: CommandErrorKind },

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Validation error kinds.
#[derive(Error, Debug)]
pub enum ValidationErrorKind {
    #[error("Invalid domain: {domain}")]
    InvalidDomain { domain: String },

    #[error("Missing required parameter: {param}")]
    MissingParameter { param: String },

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },
}

/// Command error kinds.
#[derive(Error, Debug)]
pub enum CommandErrorKind {
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    #[error("Command execution failed: {message}")]
    ExecutionFailed { message: String },

    #[error("Command timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },
}

impl SitesError {
    /// Stable error code reported in command results.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "CONFIG_ERROR",
            Self::InvalidEnumValue { .. }
            | Self::InvalidDirection { .. }
            | Self::UnknownOption { .. }
            | Self::Validation { .. } => "VALIDATION_ERROR",
            Self::DirectoryNotFound { .. } => "DIRECTORY_NOT_FOUND",
            Self::Command {
                kind: CommandErrorKind::UnknownCommand { .. },
            } => "UNKNOWN_COMMAND",
            Self::Command {
                kind: CommandErrorKind::Timeout { .. },
            } => "TIMEOUT",
            Self::Command { .. } => "EXECUTION_ERROR",
            Self::Io(_) | Self::Serialization(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type alias for site operations.
pub type SitesResult<T> = Result<T, SitesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SitesError::DirectoryNotFound {
            path: PathBuf::from("/etc/nginx/sites-available"),
        };
        assert_eq!(
            err.to_string(),
            "Directory not found: /etc/nginx/sites-available"
        );

        let err = SitesError::InvalidDirection {
            direction: "sideways".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid redirection direction: sideways");
    }

    #[test]
    fn test_error_codes() {
        let err = SitesError::DirectoryNotFound {
            path: PathBuf::from("/missing"),
        };
        assert_eq!(err.code(), "DIRECTORY_NOT_FOUND");

        let err = SitesError::Validation {
            kind: ValidationErrorKind::MissingParameter {
                param: "site_name".to_string(),
            },
        };
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err = SitesError::Command {
            kind: CommandErrorKind::UnknownCommand {
                name: "site.rename".to_string(),
            },
        };
        assert_eq!(err.code(), "UNKNOWN_COMMAND");
    }

    #[test]
    fn test_nested_kind_display() {
        let err = SitesError::Command {
            kind: CommandErrorKind::Timeout { timeout_secs: 30 },
        };
        assert_eq!(
            err.to_string(),
            "Command error: Command timed out after 30 seconds"
        );
    }
}
