use super::{js_string, require_pattern};
use super::query::eq_to_nth_of_type;
use crate::error::Result;

/// Selects `:link` elements by their text content
///
/// Exact matching yields at most the first link; partial matching yields every
/// link whose text contains the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkTextSelector {
    text: String,
    partial: bool,
    root_path: Option<String>,
    expression: String,
}

impl LinkTextSelector {
    pub fn new(text: &str) -> Result<Self> {
        Self::build(text, false, None)
    }

    pub fn partial(text: &str) -> Result<Self> {
        Self::build(text, true, None)
    }

    fn build(text: &str, partial: bool, root_path: Option<String>) -> Result<Self> {
        require_pattern(text, "text")?;
        let expression = Self::build_expression(text, partial, root_path.as_deref());
        Ok(Self {
            text: text.to_string(),
            partial,
            root_path,
            expression,
        })
    }

    fn build_expression(text: &str, partial: bool, root_path: Option<&str>) -> String {
        let base = match root_path {
            Some(path) => format!("document.querySelector({})", js_string(path)),
            None => "document".to_string(),
        };
        let test = if partial {
            "text.indexOf(expected) !== -1) { matches.push(links[i]); }"
        } else {
            "text === expected) { matches.push(links[i]); break; }"
        };
        format!(
            "(function(base, expected) {{ var links = base ? base.querySelectorAll(':link') : []; \
             var matches = []; for (var i = 0; i < links.length; i++) {{ \
             var text = (links[i].textContent || '').trim(); if ({test} }} \
             return matches; }})({base}, {expected})",
            test = test,
            base = base,
            expected = js_string(text)
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    /// CSS path of the element the search is scoped to, if any
    pub fn root_path(&self) -> Option<&str> {
        self.root_path.as_deref()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub(crate) fn nested_under_path(&self, path: &str) -> Result<Self> {
        Self::build(&self.text, self.partial, Some(eq_to_nth_of_type(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectorError;

    #[test]
    fn test_exact_expression() {
        let selector = LinkTextSelector::new("Sign in").unwrap();
        let expression = selector.expression();

        assert!(expression.starts_with("(function(base, expected) {"));
        assert!(expression.contains("querySelectorAll(':link')"));
        assert!(expression.contains("text === expected) { matches.push(links[i]); break; }"));
        assert!(expression.ends_with("})(document, \"Sign in\")"));
        assert!(!selector.is_partial());
    }

    #[test]
    fn test_partial_expression_collects_all() {
        let selector = LinkTextSelector::partial("Sign").unwrap();
        let expression = selector.expression();

        assert!(expression.contains("text.indexOf(expected) !== -1) { matches.push(links[i]); }"));
        assert!(!expression.contains("break;"));
        // every loop variable is declared
        assert!(expression.contains("var links"));
        assert!(selector.is_partial());
    }

    #[test]
    fn test_text_with_quotes_is_preserved() {
        let selector = LinkTextSelector::new("Don't \"click\"").unwrap();
        assert!(selector.expression().contains(r#""Don't \"click\"""#));
        assert_eq!(selector.text(), "Don't \"click\"");
    }

    #[test]
    fn test_blank_text_rejected() {
        match LinkTextSelector::new(" ") {
            Err(SelectorError::InvalidArgument { parameter, .. }) => assert_eq!(parameter, "text"),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
        assert!(LinkTextSelector::partial("").is_err());
    }

    #[test]
    fn test_nested_under_path() {
        let selector = LinkTextSelector::partial("more").unwrap();
        let nested = selector.nested_under_path("body > div:eq(2)").unwrap();

        assert_eq!(nested.root_path(), Some("body > div:nth-of-type(3)"));
        assert!(nested.expression().ends_with("})(document.querySelector(\"body > div:nth-of-type(3)\"), \"more\")"));
        assert_ne!(nested, selector);
        assert_eq!(nested.text(), selector.text());
    }

    #[test]
    fn test_exact_and_partial_differ() {
        assert_ne!(LinkTextSelector::new("Home").unwrap(), LinkTextSelector::partial("Home").unwrap());
        assert_eq!(LinkTextSelector::new("Home").unwrap(), LinkTextSelector::new("Home").unwrap());
    }
}
