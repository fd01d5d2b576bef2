//! Command types: parameters, results, and execution context.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{SitesError, ValidationErrorKind};
use crate::options::NginxOptionsPatch;

/// Wrapper around command parameters with helper methods.
#[derive(Debug, Clone)]
pub struct CommandParams {
    inner: serde_json::Value,
}

impl CommandParams {
    /// Create new command parameters from a JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        Self { inner: value }
    }

    /// Get the underlying JSON value.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.inner
    }

    /// Get a required string parameter.
    pub fn get_string(&self, key: &str) -> Result<String, SitesError> {
        self.get_optional_string(key)
            .ok_or_else(|| missing(key))
    }

    /// Get an optional string parameter.
    pub fn get_optional_string(&self, key: &str) -> Option<String> {
        self.inner.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
    }

    /// Get an optional boolean parameter with a default.
    pub fn get_optional_bool(&self, key: &str, default: bool) -> bool {
        self.inner
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    /// Get an optional array of strings.
    ///
    /// A single string is accepted as a one-element array.
    pub fn get_optional_string_array(&self, key: &str) -> Option<Vec<String>> {
        match self.inner.get(key)? {
            serde_json::Value::String(s) => Some(vec![s.clone()]),
            serde_json::Value::Array(arr) => Some(
                arr.iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Get a required array of strings.
    pub fn get_string_array(&self, key: &str) -> Result<Vec<String>, SitesError> {
        self.get_optional_string_array(key)
            .ok_or_else(|| missing(key))
    }

    /// Per-call option overrides under the `options` key.
    pub fn get_options_patch(&self) -> Result<Option<NginxOptionsPatch>, SitesError> {
        match self.inner.get("options") {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => NginxOptionsPatch::from_value(value)
                .map(Some)
                .map_err(|e| SitesError::Validation {
                    kind: ValidationErrorKind::InvalidParameter {
                        param: "options".to_string(),
                        message: e.to_string(),
                    },
                }),
        }
    }
}

fn missing(key: &str) -> SitesError {
    SitesError::Validation {
        kind: ValidationErrorKind::MissingParameter {
            param: key.to_string(),
        },
    }
}

impl From<serde_json::Value> for CommandParams {
    fn from(value: serde_json::Value) -> Self {
        Self::new(value)
    }
}

/// Result of command execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,
    /// Result data, also present on a non-zero exit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Error code on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Error message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Error code of a result whose external command exited non-zero.
pub const NONZERO_EXIT: &str = "NONZERO_EXIT";

impl CommandResult {
    /// Create a success result with data.
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error_code: None,
            error_message: None,
        }
    }

    /// Create a failure result.
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error_code: Some(code.into()),
            error_message: Some(message.into()),
        }
    }

    /// Success when `status` is zero, a [`NONZERO_EXIT`] failure otherwise.
    /// `data` is kept either way.
    pub fn from_status(status: i32, operation: &str, data: serde_json::Value) -> Self {
        if status == 0 {
            Self::success(data)
        } else {
            Self {
                data: Some(data),
                ..Self::failure(
                    NONZERO_EXIT,
                    format!("{} exited with status {}", operation, status),
                )
            }
        }
    }

    /// Failure result for an error raised while dispatching.
    pub fn from_error(error: &SitesError) -> Self {
        Self::failure(error.code(), error.to_string())
    }
}

/// Execution context for a command.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Unique identifier for this request.
    pub request_id: Uuid,
    /// Unix timestamp when the request was received.
    pub timestamp: u64,
    /// The command being executed.
    pub command: String,
}

impl ExecutionContext {
    /// Create a new execution context.
    pub fn new(request_id: Uuid, timestamp: u64, command: String) -> Self {
        Self {
            request_id,
            timestamp,
            command,
        }
    }

    /// A context for `command` with a fresh request id, stamped now.
    pub fn for_command(command: impl Into<String>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::new(Uuid::new_v4(), timestamp, command.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_params_get_string() {
        let params = CommandParams::new(serde_json::json!({
            "site_name": "example.com",
            "count": 42
        }));

        assert_eq!(params.get_string("site_name").unwrap(), "example.com");
        assert!(params.get_string("count").is_err());
        assert!(params.get_string("missing").is_err());
    }

    #[test]
    fn test_command_params_string_array() {
        let params = CommandParams::new(serde_json::json!({
            "domains": ["example.com", "example.org"],
            "subdomains": "www"
        }));

        assert_eq!(
            params.get_string_array("domains").unwrap(),
            vec!["example.com", "example.org"]
        );
        assert_eq!(
            params.get_optional_string_array("subdomains"),
            Some(vec!["www".to_string()])
        );
        assert!(params.get_string_array("missing").is_err());
    }

    #[test]
    fn test_options_patch() {
        let params = CommandParams::new(serde_json::json!({
            "options": { "dir": "/etc/nginx", "sudo": false }
        }));
        let patch = params.get_options_patch().unwrap().unwrap();
        assert_eq!(patch.sudo, Some(false));
        assert_eq!(patch.enabled, None);

        let params = CommandParams::new(serde_json::json!({}));
        assert!(params.get_options_patch().unwrap().is_none());

        let params = CommandParams::new(serde_json::json!({ "options": { "sudo": "yes" } }));
        assert!(params.get_options_patch().is_err());
    }

    #[test]
    fn test_command_result_from_status() {
        let ok = CommandResult::from_status(0, "nginx -t", serde_json::json!({"status": 0}));
        assert!(ok.success);
        assert!(ok.error_code.is_none());

        let failed = CommandResult::from_status(1, "nginx -t", serde_json::json!({"status": 1}));
        assert!(!failed.success);
        assert_eq!(failed.error_code.as_deref(), Some(NONZERO_EXIT));
        assert_eq!(failed.data, Some(serde_json::json!({"status": 1})));
    }

    #[test]
    fn test_command_result_failure() {
        let result = CommandResult::failure("ERR_CODE", "Something failed");
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.error_code, Some("ERR_CODE".to_string()));
    }

    #[test]
    fn test_execution_context_for_command() {
        let a = ExecutionContext::for_command("site.create");
        let b = ExecutionContext::for_command("site.create");
        assert_eq!(a.command, "site.create");
        assert_ne!(a.request_id, b.request_id);
    }
}
