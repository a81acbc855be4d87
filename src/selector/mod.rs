//! Selector value objects
//!
//! A [`Selector`] describes how to find elements, not the elements
//! themselves. Each dialect turns its pattern into a JavaScript expression that
//! evaluates to a collection of nodes; the [`finder`](crate::finder) runs that
//! expression through a driver.
//!
//! Patterns for the query, jQuery and Sizzle dialects are embedded in single
//! quoted JavaScript strings, and every `'` in them is replaced by `"`. This is
//! lossy: a selector that needs a literal single quote cannot be expressed.
//! XPath and link text are embedded as JSON string literals and survive
//! unchanged.
//!
//! An element's XPath prefers `@id`, then `@class`, over a position step, so
//! it is not always unique: two sibling `<ul class="menu">` both have the
//! path `.../ul[@class="menu"]`. An XPath search nested under either of them
//! searches under both.

pub mod by;
pub mod jquery;
pub mod link;
pub mod query;
pub mod sizzle;
pub mod xpath;

pub use by::By;
pub use jquery::{DEFAULT_JQUERY_VARIABLE, JQuerySelector};
pub use link::LinkTextSelector;
pub use query::{QueryKind, QuerySelector};
pub use sizzle::SizzleSelector;
pub use xpath::XPathSelector;

use crate::element::LocatedElement;
use crate::error::{Result, SelectorError};
use crate::loader::{ExternalLibraryLoader, JQueryLoader, SizzleLoader};
use serde_json::Value;

/// Any selector dialect
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Query(QuerySelector),
    LinkText(LinkTextSelector),
    XPath(XPathSelector),
    JQuery(JQuerySelector),
    Sizzle(SizzleSelector),
}

impl Selector {
    /// The pattern as the caller wrote it
    pub fn raw_pattern(&self) -> &str {
        match self {
            Self::Query(s) => s.raw_pattern(),
            Self::LinkText(s) => s.text(),
            Self::XPath(s) => s.xpath(),
            Self::JQuery(s) => s.raw_pattern(),
            Self::Sizzle(s) => s.raw_pattern(),
        }
    }

    /// JavaScript expression evaluating to the matched nodes
    pub fn expression(&self) -> &str {
        match self {
            Self::Query(s) => s.expression(),
            Self::LinkText(s) => s.expression(),
            Self::XPath(s) => s.expression(),
            Self::JQuery(s) => s.expression(),
            Self::Sizzle(s) => s.expression(),
        }
    }

    /// Appended to the expression to turn its value into a plain array
    pub fn result_suffix(&self) -> &'static str {
        match self {
            Self::JQuery(_) => ".get()",
            _ => "",
        }
    }

    /// Library that must be present in the page before the expression runs
    pub fn loader(&self) -> Option<Box<dyn ExternalLibraryLoader>> {
        match self {
            Self::JQuery(s) => Some(Box::new(JQueryLoader::new(s.variable()))),
            Self::Sizzle(_) => Some(Box::new(SizzleLoader)),
            _ => None,
        }
    }

    /// Script returning every match as an array
    pub fn script(&self) -> String {
        format!("return {}{};", self.expression(), self.result_suffix())
    }

    /// Expression addressing the match at `index`
    pub fn element_lookup(&self, index: usize) -> String {
        format!("({}{})[{}]", self.expression(), self.result_suffix(), index)
    }

    /// Scope this selector to the subtree of `root`
    ///
    /// The root's DOM path (or XPath, for XPath selectors) is resolved once and
    /// memoized on the element.
    pub fn create_nested_under(&self, root: &LocatedElement<'_>) -> Result<Selector> {
        let nested = match self {
            Self::XPath(s) => Self::XPath(s.nested_under_xpath(root.xpath()?)?),
            Self::Query(s) => Self::Query(s.nested_under_path(root.path()?)?),
            Self::LinkText(s) => Self::LinkText(s.nested_under_path(root.path()?)?),
            Self::JQuery(s) => Self::JQuery(s.nested_under_path(root.path()?)?),
            Self::Sizzle(s) => Self::Sizzle(s.nested_under_path(root.path()?)?),
        };
        log::debug!("Nested selector '{}' under element {}", self.raw_pattern(), root.handle().id());
        Ok(nested)
    }
}

impl From<QuerySelector> for Selector {
    fn from(selector: QuerySelector) -> Self {
        Self::Query(selector)
    }
}

impl From<LinkTextSelector> for Selector {
    fn from(selector: LinkTextSelector) -> Self {
        Self::LinkText(selector)
    }
}

impl From<XPathSelector> for Selector {
    fn from(selector: XPathSelector) -> Self {
        Self::XPath(selector)
    }
}

impl From<JQuerySelector> for Selector {
    fn from(selector: JQuerySelector) -> Self {
        Self::JQuery(selector)
    }
}

impl From<SizzleSelector> for Selector {
    fn from(selector: SizzleSelector) -> Self {
        Self::Sizzle(selector)
    }
}

impl From<&Selector> for Selector {
    fn from(selector: &Selector) -> Self {
        selector.clone()
    }
}

pub(crate) fn escape_pattern(pattern: &str) -> String {
    pattern.replace('\'', "\"")
}

/// JSON string literal, which is also a valid JavaScript string literal
pub(crate) fn js_string(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

pub(crate) fn require_pattern(value: &str, parameter: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SelectorError::invalid_argument(
            parameter,
            "must not be empty or whitespace",
        ));
    }
    Ok(())
}

/// `None` means "no filter"; a blank filter is almost certainly a mistake
pub(crate) fn optional_filter<'a>(value: Option<&'a str>, parameter: &'static str) -> Result<Option<&'a str>> {
    match value {
        Some(value) => require_pattern(value, parameter).map(|_| Some(value)),
        None => Ok(None),
    }
}
