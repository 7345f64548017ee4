//! PAC script templates.

use crate::{Error, Result};

/// Placeholder for the JSON-encoded proxy directive.
pub const PROXY_PLACEHOLDER: &str = "__PROXY__";

/// Placeholder for the JSON domain map in the fast template.
pub const DOMAINS_PLACEHOLDER: &str = "__DOMAINS__";

/// Placeholder for the JSON rule array in the precise template.
pub const RULES_PLACEHOLDER: &str = "__RULES__";

/// Static script text with placeholder tokens.
#[derive(Debug, Clone)]
pub struct PacTemplate {
    text: String,
}

impl PacTemplate {
    /// Create a template from its text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Get the raw template text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Check if the template contains a placeholder.
    pub fn has_placeholder(&self, placeholder: &str) -> bool {
        self.text.contains(placeholder)
    }

    /// Substitute each placeholder once.
    ///
    /// Positions are resolved against the template text, so substituted
    /// values are never scanned for placeholders. Fails if a placeholder is
    /// absent from the template.
    pub fn render(&self, substitutions: &[(&str, &str)]) -> Result<String> {
        let mut spans = Vec::with_capacity(substitutions.len());
        for (placeholder, value) in substitutions {
            let pos = self.text.find(placeholder).ok_or_else(|| {
                Error::Template(format!("placeholder {} not found", placeholder))
            })?;
            spans.push((pos, pos + placeholder.len(), *value));
        }
        spans.sort_by_key(|(start, _, _)| *start);

        let extra: usize = spans.iter().map(|(_, _, value)| value.len()).sum();
        let mut rendered = String::with_capacity(self.text.len() + extra);
        let mut cursor = 0;
        for (start, end, value) in spans {
            if start < cursor {
                return Err(Error::Template("overlapping placeholders".to_string()));
            }
            rendered.push_str(&self.text[cursor..start]);
            rendered.push_str(value);
            cursor = end;
        }
        rendered.push_str(&self.text[cursor..]);

        Ok(rendered)
    }
}
