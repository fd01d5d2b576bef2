//! Nginx redirect block generation.

use crate::enums::RedirectDirection;
use crate::error::SitesError;

/// Subdomain used when none is given.
pub const DEFAULT_SUBDOMAIN: &str = "www";

/// Indentation prefixed to every generated line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Indent {
    /// No indentation.
    #[default]
    None,
    /// A number of spaces.
    Spaces(usize),
    /// A literal prefix, used verbatim.
    Text(String),
}

impl Indent {
    /// The prefix string.
    pub fn prefix(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Spaces(count) => " ".repeat(*count),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<usize> for Indent {
    fn from(count: usize) -> Self {
        Self::Spaces(count)
    }
}

impl From<&str> for Indent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Indent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Generates redirect blocks for every (domain, subdomain) pair.
///
/// # Example
///
/// ```
/// use nginx_sites::redirect::RedirectBlock;
///
/// let block = RedirectBlock::new(["example.com"])
///     .spaces(4)
///     .render()
///     .unwrap();
///
/// assert!(block.contains("if ($host = 'example.com') {"));
/// assert!(block.contains("return 301 https://www.example.com$request_uri;"));
/// ```
#[derive(Debug, Clone)]
pub struct RedirectBlock {
    domains: Vec<String>,
    subdomains: Vec<String>,
    direction: String,
    indent: Indent,
    comment: bool,
}

impl RedirectBlock {
    /// Redirect blocks for `domains`, with the `www` subdomain, outbound,
    /// unindented and commented.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: normalize(domains),
            subdomains: vec![DEFAULT_SUBDOMAIN.to_string()],
            direction: RedirectDirection::Outbound.to_string(),
            indent: Indent::None,
            comment: true,
        }
    }

    /// Replace the subdomains.
    pub fn subdomains<I, S>(mut self, subdomains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.subdomains = normalize(subdomains);
        self
    }

    /// Set the direction token. Unknown tokens fail at [`render`](Self::render).
    pub fn direction(mut self, direction: impl ToString) -> Self {
        self.direction = direction.to_string();
        self
    }

    /// Set the indentation.
    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Indent every line by `count` spaces.
    pub fn spaces(self, count: usize) -> Self {
        self.indent(Indent::Spaces(count))
    }

    /// Toggle the `### Redirect ... ###` comment line.
    pub fn comment(mut self, comment: bool) -> Self {
        self.comment = comment;
        self
    }

    /// Render every block, separated by a blank line.
    ///
    /// Returns an empty string when there is no domain or no subdomain.
    pub fn render(&self) -> Result<String, SitesError> {
        if self.domains.is_empty() || self.subdomains.is_empty() {
            return Ok(String::new());
        }

        let direction = RedirectDirection::parse(&self.direction)?;
        let indent = self.indent.prefix();

        let mut blocks = Vec::with_capacity(self.domains.len() * self.subdomains.len());
        for domain in &self.domains {
            for subdomain in &self.subdomains {
                let full = format!("{}.{}", subdomain, domain);
                let (from, to) = match direction {
                    RedirectDirection::Outbound => (domain.as_str(), full.as_str()),
                    RedirectDirection::Inbound => (full.as_str(), domain.as_str()),
                };
                blocks.push(rule(from, to, &indent, self.comment));
            }
        }

        Ok(blocks.join("\n\n"))
    }
}

/// Generate redirect blocks in one call.
///
/// See [`RedirectBlock`] for the builder form.
pub fn redirect_block<D, S, T>(
    domains: D,
    subdomains: S,
    direction: &str,
    indent: Indent,
    comment: bool,
) -> Result<String, SitesError>
where
    D: IntoIterator<Item = T>,
    S: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    RedirectBlock::new(domains)
        .subdomains(subdomains)
        .direction(direction)
        .indent(indent)
        .comment(comment)
        .render()
}

/// A single redirect rule, every line prefixed with `indent`.
fn rule(from: &str, to: &str, indent: &str, comment: bool) -> String {
    let mut lines = Vec::with_capacity(4);
    if comment {
        lines.push(format!("### Redirect {} to {} ###", from, to));
    }
    lines.push(format!("if ($host = '{}') {{", from));
    lines.push(format!("    return 301 https://{}$request_uri;", to));
    lines.push("}".to_string());

    lines
        .iter()
        .map(|line| format!("{}{}", indent, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trim, drop blanks and duplicates, keep first-seen order.
fn normalize<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for value in values {
        let value = value.as_ref().trim();
        if !value.is_empty() && !normalized.iter().any(|seen| seen == value) {
            normalized.push(value.to_string());
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_empty_domains() {
        assert_eq!(redirect_block(NONE, ["www"], "outbound", Indent::None, true).unwrap(), "");
        assert_eq!(
            redirect_block(Option::<&str>::None, ["www"], "outbound", Indent::None, true).unwrap(),
            ""
        );
        assert_eq!(redirect_block([""], ["www"], "outbound", Indent::None, true).unwrap(), "");
        assert_eq!(
            redirect_block(["  ", "\t"], ["www"], "outbound", Indent::None, true).unwrap(),
            ""
        );
    }

    #[test]
    fn test_empty_subdomains() {
        assert_eq!(
            redirect_block(["example.com"], NONE, "outbound", Indent::None, true).unwrap(),
            ""
        );
        assert_eq!(
            redirect_block(["example.com"], [""], "outbound", Indent::None, true).unwrap(),
            ""
        );
    }

    #[test]
    fn test_empty_input_skips_direction_check() {
        assert_eq!(redirect_block(NONE, ["www"], "bogus", Indent::None, true).unwrap(), "");
    }

    #[test]
    fn test_outbound_single() {
        let output =
            redirect_block(["example.com"], ["www"], "outbound", Indent::Spaces(4), true).unwrap();
        let expected = "    ### Redirect example.com to www.example.com ###\n    \
                        if ($host = 'example.com') {\n        \
                        return 301 https://www.example.com$request_uri;\n    \
                        }";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_inbound_single() {
        let output =
            redirect_block(["example.com"], ["www"], "inbound", Indent::Spaces(4), true).unwrap();
        let expected = "    ### Redirect www.example.com to example.com ###\n    \
                        if ($host = 'www.example.com') {\n        \
                        return 301 https://example.com$request_uri;\n    \
                        }";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_multiple_pairs_in_nested_order() {
        let output = redirect_block(
            ["example.com", "test.org"],
            ["www", "m"],
            "outbound",
            Indent::Spaces(2),
            true,
        )
        .unwrap();

        let blocks: Vec<&str> = output.split("\n\n").collect();
        assert_eq!(blocks.len(), 4);
        assert!(blocks[0].contains("### Redirect example.com to www.example.com ###"));
        assert!(blocks[1].contains("### Redirect example.com to m.example.com ###"));
        assert!(blocks[2].contains("### Redirect test.org to www.test.org ###"));
        assert!(blocks[3].contains("### Redirect test.org to m.test.org ###"));
        assert!(blocks[3].contains("  if ($host = 'test.org') {"));
        assert!(blocks[3].contains("      return 301 https://m.test.org$request_uri;"));
    }

    #[test]
    fn test_without_comment() {
        let output =
            redirect_block(["example.com"], ["www"], "outbound", Indent::Spaces(0), false).unwrap();
        assert!(!output.contains("### Redirect"));
        assert!(output.starts_with("if ($host = 'example.com') {"));
    }

    #[test]
    fn test_text_indent_verbatim() {
        let output =
            redirect_block(["example.com"], ["www"], "outbound", Indent::from("\t"), false)
                .unwrap();
        assert!(output.lines().all(|line| line.starts_with('\t')));
    }

    #[test]
    fn test_invalid_direction() {
        let result = redirect_block(
            ["example.com"],
            ["www"],
            "INVALID_DIRECTION",
            Indent::None,
            true,
        );
        assert!(matches!(result, Err(SitesError::InvalidDirection { .. })));
    }

    #[test]
    fn test_normalization_trims_and_dedupes() {
        let output = RedirectBlock::new([" example.com ", "example.com"])
            .subdomains(["www", " www"])
            .render()
            .unwrap();
        assert_eq!(output.matches("### Redirect").count(), 1);
        assert!(output.contains("www.example.com"));
    }

    #[test]
    fn test_builder_defaults() {
        let output = RedirectBlock::new(["example.com"]).render().unwrap();
        assert!(output.starts_with("### Redirect example.com to www.example.com ###"));
    }

    #[test]
    fn test_typed_direction() {
        let output = RedirectBlock::new(["example.com"])
            .direction(RedirectDirection::Inbound)
            .render()
            .unwrap();
        assert!(output.contains("if ($host = 'www.example.com') {"));
    }
}
