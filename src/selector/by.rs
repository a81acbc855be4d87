use super::{JQuerySelector, LinkTextSelector, QuerySelector, Selector, SizzleSelector, XPathSelector};
use crate::error::Result;

/// Factory functions for every selector dialect
///
/// Each factory validates its argument immediately and fails with
/// [`InvalidArgument`](crate::SelectorError::InvalidArgument) on a blank
/// pattern, before anything is sent to a browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct By;

impl By {
    /// Native `document.querySelectorAll`
    pub fn query_selector(selector: &str) -> Result<Selector> {
        QuerySelector::new(selector).map(Selector::Query)
    }

    /// Native query evaluated under the first match of `context`
    pub fn query_selector_in(selector: &str, context: QuerySelector) -> Result<Selector> {
        QuerySelector::with_context(selector, context).map(Selector::Query)
    }

    pub fn class_name(class_name: &str) -> Result<Selector> {
        QuerySelector::class_name(class_name).map(Selector::Query)
    }

    pub fn id(id: &str) -> Result<Selector> {
        QuerySelector::id(id).map(Selector::Query)
    }

    pub fn name(name: &str) -> Result<Selector> {
        QuerySelector::name(name).map(Selector::Query)
    }

    pub fn tag_name(tag_name: &str) -> Result<Selector> {
        QuerySelector::tag_name(tag_name).map(Selector::Query)
    }

    pub fn link_text(text: &str) -> Result<Selector> {
        LinkTextSelector::new(text).map(Selector::LinkText)
    }

    pub fn partial_link_text(text: &str) -> Result<Selector> {
        LinkTextSelector::partial(text).map(Selector::LinkText)
    }

    pub fn xpath(xpath: &str) -> Result<Selector> {
        XPathSelector::new(xpath).map(Selector::XPath)
    }

    pub fn jquery(selector: &str) -> Result<Selector> {
        JQuerySelector::new(selector).map(Selector::JQuery)
    }

    pub fn jquery_in(selector: &str, context: JQuerySelector) -> Result<Selector> {
        JQuerySelector::with_context(selector, context).map(Selector::JQuery)
    }

    /// jQuery bound to another global, e.g. `$`
    pub fn jquery_with_variable(selector: &str, variable: &str) -> Result<Selector> {
        JQuerySelector::with_variable(selector, None, variable).map(Selector::JQuery)
    }

    pub fn sizzle(selector: &str) -> Result<Selector> {
        SizzleSelector::new(selector).map(Selector::Sizzle)
    }

    pub fn sizzle_in(selector: &str, context: SizzleSelector) -> Result<Selector> {
        SizzleSelector::with_context(selector, context).map(Selector::Sizzle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectorError;

    fn parameter_of(result: Result<Selector>) -> &'static str {
        match result {
            Err(SelectorError::InvalidArgument { parameter, .. }) => parameter,
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_patterns_name_their_parameter() {
        assert_eq!(parameter_of(By::query_selector("")), "selector");
        assert_eq!(parameter_of(By::class_name(" ")), "selector");
        assert_eq!(parameter_of(By::id("")), "selector");
        assert_eq!(parameter_of(By::name(" ")), "selector");
        assert_eq!(parameter_of(By::tag_name("")), "selector");
        assert_eq!(parameter_of(By::jquery(" ")), "selector");
        assert_eq!(parameter_of(By::sizzle("")), "selector");
        assert_eq!(parameter_of(By::link_text("")), "text");
        assert_eq!(parameter_of(By::partial_link_text(" ")), "text");
        assert_eq!(parameter_of(By::xpath("")), "xpath");
        assert_eq!(parameter_of(By::jquery_with_variable("div", "")), "variable");
    }

    #[test]
    fn test_factories_pick_the_dialect() {
        assert!(matches!(By::query_selector("div").unwrap(), Selector::Query(_)));
        assert!(matches!(By::link_text("Home").unwrap(), Selector::LinkText(_)));
        assert!(matches!(By::xpath("//div").unwrap(), Selector::XPath(_)));
        assert!(matches!(By::jquery("div").unwrap(), Selector::JQuery(_)));
        assert!(matches!(By::sizzle("div").unwrap(), Selector::Sizzle(_)));
    }

    #[test]
    fn test_context_factories() {
        let query = By::query_selector_in("span", QuerySelector::new("div").unwrap()).unwrap();
        assert!(query.expression().starts_with("document.querySelectorAll('div').length === 0"));

        let sizzle = By::sizzle_in("span", SizzleSelector::new("div").unwrap()).unwrap();
        assert_eq!(sizzle.expression(), "Sizzle('span', Sizzle('div')[0])");

        let dollar = By::jquery_with_variable("div", "$").unwrap();
        assert_eq!(dollar.expression(), "$('div')");
    }
}
