use super::{js_string, require_pattern};
use crate::error::Result;

/// Selector evaluated with `document.evaluate`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XPathSelector {
    xpath: String,
    expression: String,
}

impl XPathSelector {
    pub fn new(xpath: &str) -> Result<Self> {
        require_pattern(xpath, "xpath")?;
        let expression = format!(
            "(function() {{ var result = document.evaluate({}, document, null, XPathResult.ANY_TYPE, null); \
             var nodes = []; var node; while ((node = result.iterateNext())) {{ nodes.push(node); }} \
             return nodes; }})()",
            js_string(xpath)
        );
        Ok(Self {
            xpath: xpath.to_string(),
            expression,
        })
    }

    pub fn xpath(&self) -> &str {
        &self.xpath
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Same selector, relative to the element at `root_xpath`
    pub(crate) fn nested_under_xpath(&self, root_xpath: &str) -> Result<Self> {
        Self::new(&join_xpath(root_xpath, &self.xpath))
    }
}

/// Join two XPath fragments with exactly one `/`
///
/// A child starting with `//` keeps it, so descendant searches stay descendant
/// searches.
pub(crate) fn join_xpath(root: &str, child: &str) -> String {
    if child.starts_with('/') {
        format!("{}{}", root.trim_end_matches('/'), child)
    } else if root.ends_with('/') {
        format!("{}{}", root, child)
    } else {
        format!("{}/{}", root, child)
    }
}
