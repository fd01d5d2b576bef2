//! Generate redirect block command.

use tracing::debug;

use crate::error::{SitesError, ValidationErrorKind};
use crate::redirect::{Indent, RedirectBlock, DEFAULT_SUBDOMAIN};
use crate::validation::validate_domains;

use super::super::traits::Command;
use super::super::types::{CommandParams, CommandResult, ExecutionContext};

/// Largest accepted indent, in spaces.
const MAX_INDENT: usize = 64;

/// Render nginx redirect blocks between bare domains and subdomains.
///
/// # Parameters
///
/// - `domains` (required): A domain or list of domains
/// - `subdomains` (optional, default `["www"]`)
/// - `direction` (optional, default `outbound`): `outbound` sends the bare
///   domain to the subdomain, `inbound` the reverse
/// - `indent` (optional): A number of spaces or a literal prefix
/// - `comment` (optional, default true)
pub struct GenerateRedirectCommand;

impl GenerateRedirectCommand {
    fn indent(params: &CommandParams) -> Result<Indent, SitesError> {
        let count = match params.as_value().get("indent") {
            None | Some(serde_json::Value::Null) => return Ok(Indent::None),
            Some(serde_json::Value::String(text)) => return Ok(Indent::from(text.as_str())),
            Some(value) => value
                .as_u64()
                .ok_or_else(|| invalid_indent("Expected a number of spaces or a string"))?,
        };

        usize::try_from(count)
            .ok()
            .filter(|count| *count <= MAX_INDENT)
            .map(Indent::Spaces)
            .ok_or_else(|| {
                invalid_indent(format!("Indent cannot exceed {} spaces", MAX_INDENT))
            })
    }

    fn subdomains(params: &CommandParams) -> Vec<String> {
        params
            .get_optional_string_array("subdomains")
            .unwrap_or_else(|| vec![DEFAULT_SUBDOMAIN.to_string()])
    }
}

fn invalid_indent(message: impl Into<String>) -> SitesError {
    SitesError::Validation {
        kind: ValidationErrorKind::InvalidParameter {
            param: "indent".to_string(),
            message: message.into(),
        },
    }
}

impl Command for GenerateRedirectCommand {
    fn name(&self) -> &'static str {
        "redirect.generate"
    }

    fn validate(&self, params: &CommandParams) -> Result<(), SitesError> {
        let domains = params.get_string_array("domains")?;
        validate_domains(&domains)?;

        let hosts: Vec<String> = Self::subdomains(params)
            .iter()
            .map(|subdomain| subdomain.trim())
            .filter(|subdomain| !subdomain.is_empty())
            .flat_map(|subdomain| {
                domains
                    .iter()
                    .map(move |domain| format!("{}.{}", subdomain, domain.trim()))
            })
            .collect();
        validate_domains(&hosts)?;

        Self::indent(params)?;
        Ok(())
    }

    fn execute(
        &self,
        ctx: &ExecutionContext,
        params: CommandParams,
    ) -> Result<CommandResult, SitesError> {
        let domains = params.get_string_array("domains")?;
        let direction = params
            .get_optional_string("direction")
            .unwrap_or_else(|| "outbound".to_string());

        let block = RedirectBlock::new(&domains)
            .subdomains(Self::subdomains(&params))
            .direction(&direction)
            .indent(Self::indent(&params)?)
            .comment(params.get_optional_bool("comment", true))
            .render()?;

        debug!(
            request_id = %ctx.request_id,
            domains = domains.len(),
            direction = %direction,
            "Generated redirect block"
        );

        Ok(CommandResult::success(serde_json::json!({ "block": block })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(params: serde_json::Value) -> Result<CommandResult, SitesError> {
        let params = CommandParams::new(params);
        GenerateRedirectCommand.validate(&params)?;
        let ctx = ExecutionContext::for_command("redirect.generate");
        GenerateRedirectCommand.execute(&ctx, params)
    }

    #[test]
    fn test_outbound_defaults() {
        let result = generate(serde_json::json!({ "domains": "example.com" })).unwrap();
        assert_eq!(
            result.data.unwrap()["block"],
            "### Redirect example.com to www.example.com ###\n\
             if ($host = 'example.com') {\n    \
             return 301 https://www.example.com$request_uri;\n\
             }"
        );
    }

    #[test]
    fn test_inbound_indented_without_comment() {
        let result = generate(serde_json::json!({
            "domains": ["example.com"],
            "direction": "inbound",
            "indent": 2,
            "comment": false
        }))
        .unwrap();
        assert_eq!(
            result.data.unwrap()["block"],
            "  if ($host = 'www.example.com') {\n      \
             return 301 https://example.com$request_uri;\n  \
             }"
        );
    }

    #[test]
    fn test_invalid_direction() {
        let result = generate(serde_json::json!({
            "domains": ["example.com"],
            "direction": "sideways"
        }));
        assert!(matches!(result, Err(SitesError::InvalidDirection { .. })));
    }

    #[test]
    fn test_invalid_domain_rejected() {
        assert!(generate(serde_json::json!({ "domains": ["bad host"] })).is_err());
        assert!(generate(serde_json::json!({
            "domains": ["example.com"],
            "subdomains": ["a b"]
        }))
        .is_err());
        assert!(generate(serde_json::json!({})).is_err());
    }

    #[test]
    fn test_invalid_indent_rejected() {
        let result = generate(serde_json::json!({ "domains": ["example.com"], "indent": true }));
        assert!(result.is_err());
    }

    #[test]
    fn test_oversized_indent_rejected_before_execute() {
        let params = CommandParams::new(serde_json::json!({
            "domains": ["example.com"],
            "indent": 4611686018427387904u64
        }));
        assert!(matches!(
            GenerateRedirectCommand.validate(&params),
            Err(SitesError::Validation {
                kind: ValidationErrorKind::InvalidParameter { ref param, .. }
            }) if param == "indent"
        ));

        assert!(generate(serde_json::json!({ "domains": ["example.com"], "indent": 65 })).is_err());
        let result = generate(serde_json::json!({ "domains": ["example.com"], "indent": 64 }));
        assert!(result.is_ok());
    }
}
