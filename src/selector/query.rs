use super::{escape_pattern, require_pattern};
use crate::error::Result;

/// Which classic locator a [`QuerySelector`] was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Css,
    ClassName,
    Id,
    Name,
    TagName,
}

impl QueryKind {
    /// Turn the user's pattern into a CSS selector
    fn to_css(self, pattern: &str) -> String {
        match self {
            Self::Css | Self::TagName => pattern.to_string(),
            Self::ClassName => format!(".{}", pattern),
            Self::Id => format!("#{}", pattern),
            Self::Name => format!("[name='{}']", pattern),
        }
    }
}

/// Selector resolved with the browser's own `querySelectorAll`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuerySelector {
    kind: QueryKind,
    raw_pattern: String,
    context: Option<Box<QuerySelector>>,
    expression: String,
}

impl QuerySelector {
    /// CSS selector evaluated against `document`
    pub fn new(selector: &str) -> Result<Self> {
        Self::build(QueryKind::Css, selector, None)
    }

    /// CSS selector evaluated against the first match of `context`
    pub fn with_context(selector: &str, context: QuerySelector) -> Result<Self> {
        Self::build(QueryKind::Css, selector, Some(context))
    }

    pub fn class_name(class_name: &str) -> Result<Self> {
        Self::build(QueryKind::ClassName, class_name, None)
    }

    pub fn id(id: &str) -> Result<Self> {
        Self::build(QueryKind::Id, id, None)
    }

    pub fn name(name: &str) -> Result<Self> {
        Self::build(QueryKind::Name, name, None)
    }

    pub fn tag_name(tag_name: &str) -> Result<Self> {
        Self::build(QueryKind::TagName, tag_name, None)
    }

    fn build(kind: QueryKind, pattern: &str, context: Option<QuerySelector>) -> Result<Self> {
        require_pattern(pattern, "selector")?;
        let expression = Self::build_expression(&kind.to_css(pattern), context.as_ref());
        Ok(Self {
            kind,
            raw_pattern: pattern.to_string(),
            context: context.map(Box::new),
            expression,
        })
    }

    fn build_expression(css: &str, context: Option<&QuerySelector>) -> String {
        let escaped = escape_pattern(css);
        match context {
            None => format!("document.querySelectorAll('{}')", escaped),
            Some(base) => {
                // a nested base is a conditional and must not swallow the indexing
                let base = if base.context.is_some() {
                    format!("({})", base.expression)
                } else {
                    base.expression.clone()
                };
                format!(
                    "{base}.length === 0 ? [] : {base}[0].querySelectorAll('{escaped}')",
                    base = base,
                    escaped = escaped
                )
            }
        }
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn raw_pattern(&self) -> &str {
        &self.raw_pattern
    }

    /// The CSS handed to `querySelectorAll`, before quote escaping
    pub fn css_selector(&self) -> String {
        self.kind.to_css(&self.raw_pattern)
    }

    pub fn context(&self) -> Option<&QuerySelector> {
        self.context.as_deref()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Same selector, rooted at the node addressed by a DOM path
    pub(crate) fn nested_under_path(&self, path: &str) -> Result<Self> {
        let root = Self::new(&eq_to_nth_of_type(path))?;
        Self::build(self.kind, &self.raw_pattern, Some(root))
    }
}

/// Rewrite jQuery's `:eq(N)` into the standard `:nth-of-type(N+1)`
///
/// DOM paths index among same-tag siblings, so the two are equivalent there.
pub(crate) fn eq_to_nth_of_type(path: &str) -> String {
    const EQ: &str = ":eq(";

    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(start) = rest.find(EQ) {
        out.push_str(&rest[..start]);
        let after = &rest[start + EQ.len()..];
        let index = after
            .find(')')
            .and_then(|end| after[..end].trim().parse::<usize>().ok().map(|n| (end, n)));
        match index {
            Some((end, n)) => {
                out.push_str(&format!(":nth-of-type({})", n + 1));
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(EQ);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectorError;

    #[test]
    fn test_plain_expression() {
        let selector = QuerySelector::new("div.item").unwrap();
        assert_eq!(selector.expression(), "document.querySelectorAll('div.item')");
        assert_eq!(selector.raw_pattern(), "div.item");
        assert_eq!(selector.kind(), QueryKind::Css);
    }

    #[test]
    fn test_context_expression_guards_empty_base() {
        let selector = QuerySelector::with_context("span", QuerySelector::new("div").unwrap()).unwrap();
        assert_eq!(
            selector.expression(),
            "document.querySelectorAll('div').length === 0 ? [] : document.querySelectorAll('div')[0].querySelectorAll('span')"
        );
    }

    #[test]
    fn test_nested_context_is_parenthesized() {
        let middle = QuerySelector::with_context("ul", QuerySelector::new("div").unwrap()).unwrap();
        let selector = QuerySelector::with_context("li", middle.clone()).unwrap();

        let base = format!("({})", middle.expression());
        assert_eq!(
            selector.expression(),
            format!("{base}.length === 0 ? [] : {base}[0].querySelectorAll('li')", base = base)
        );
    }

    #[test]
    fn test_single_quotes_become_double_quotes() {
        let selector = QuerySelector::new("input[value='a']").unwrap();
        assert_eq!(selector.expression(), "document.querySelectorAll('input[value=\"a\"]')");
        assert!(!selector.expression().contains("'a'"));
    }

    #[test]
    fn test_locator_kinds() {
        assert_eq!(
            QuerySelector::class_name("active").unwrap().expression(),
            "document.querySelectorAll('.active')"
        );
        assert_eq!(QuerySelector::id("main").unwrap().expression(), "document.querySelectorAll('#main')");
        assert_eq!(
            QuerySelector::name("email").unwrap().expression(),
            "document.querySelectorAll('[name=\"email\"]')"
        );
        assert_eq!(QuerySelector::tag_name("p").unwrap().expression(), "document.querySelectorAll('p')");

        let id = QuerySelector::id("main").unwrap();
        assert_eq!(id.raw_pattern(), "main");
        assert_eq!(id.css_selector(), "#main");
    }

    #[test]
    fn test_blank_pattern_rejected() {
        for pattern in ["", " ", "\t\n"] {
            match QuerySelector::new(pattern) {
                Err(SelectorError::InvalidArgument { parameter, .. }) => assert_eq!(parameter, "selector"),
                other => panic!("Expected InvalidArgument, got {:?}", other),
            }
        }
        assert!(QuerySelector::class_name("").is_err());
        assert!(QuerySelector::id(" ").is_err());
        assert!(QuerySelector::name("").is_err());
        assert!(QuerySelector::tag_name("  ").is_err());
    }

    #[test]
    fn test_equality_by_kind_pattern_and_context() {
        let a = QuerySelector::with_context("span", QuerySelector::new("div").unwrap()).unwrap();
        let b = QuerySelector::with_context("span", QuerySelector::new("div").unwrap()).unwrap();
        let c = QuerySelector::with_context("span", QuerySelector::new("p").unwrap()).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, QuerySelector::new("span").unwrap());
        // same css text, different locator kind
        assert_ne!(QuerySelector::tag_name("main").unwrap(), QuerySelector::new("main").unwrap());
    }

    #[test]
    fn test_eq_to_nth_of_type() {
        assert_eq!(eq_to_nth_of_type("body > div:eq(1) > span"), "body > div:nth-of-type(2) > span");
        assert_eq!(eq_to_nth_of_type("body > ul:eq(0) > li:eq(3)"), "body > ul:nth-of-type(1) > li:nth-of-type(4)");
        assert_eq!(eq_to_nth_of_type("body > div#main"), "body > div#main");
        assert_eq!(eq_to_nth_of_type("div:eq(x)"), "div:eq(x)");
    }

    #[test]
    fn test_nested_under_path() {
        let selector = QuerySelector::class_name("item").unwrap();
        let nested = selector.nested_under_path("body > div:eq(1)").unwrap();

        assert_eq!(nested.kind(), QueryKind::ClassName);
        assert_eq!(nested.raw_pattern(), "item");
        assert_eq!(nested.context().unwrap().raw_pattern(), "body > div:nth-of-type(2)");
        assert_eq!(
            nested.expression(),
            "document.querySelectorAll('body > div:nth-of-type(2)').length === 0 ? [] : \
             document.querySelectorAll('body > div:nth-of-type(2)')[0].querySelectorAll('.item')"
        );
    }
}
