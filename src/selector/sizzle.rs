use super::{escape_pattern, require_pattern};
use crate::error::Result;

/// Selector evaluated with the standalone Sizzle engine
///
/// Sizzle takes a single context element, so a context selector contributes
/// only its first match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SizzleSelector {
    raw_pattern: String,
    context: Option<Box<SizzleSelector>>,
    expression: String,
}

impl SizzleSelector {
    pub fn new(selector: &str) -> Result<Self> {
        Self::build(selector, None)
    }

    pub fn with_context(selector: &str, context: SizzleSelector) -> Result<Self> {
        Self::build(selector, Some(context))
    }

    fn build(selector: &str, context: Option<SizzleSelector>) -> Result<Self> {
        require_pattern(selector, "selector")?;
        let escaped = escape_pattern(selector);
        let expression = match &context {
            Some(context) => format!("Sizzle('{}', {}[0])", escaped, context.expression),
            None => format!("Sizzle('{}')", escaped),
        };
        Ok(Self {
            raw_pattern: selector.to_string(),
            context: context.map(Box::new),
            expression,
        })
    }

    pub fn raw_pattern(&self) -> &str {
        &self.raw_pattern
    }

    pub fn context(&self) -> Option<&SizzleSelector> {
        self.context.as_deref()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub(crate) fn nested_under_path(&self, path: &str) -> Result<Self> {
        Self::build(&self.raw_pattern, Some(Self::new(path)?))
    }
}
