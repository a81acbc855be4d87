//! jQuery selectors and the traversal chain built on top of them
//!
//! Every chain method returns a new selector with one more `.method(args)`
//! call appended, so a selector can be shared as the prefix of several chains.
//!
//! ```
//! use browser_selectors::JQuerySelector;
//!
//! # fn main() -> browser_selectors::Result<()> {
//! let rows = JQuerySelector::new("table.results")?.find("tr")?;
//! let odd = rows.filter(":odd")?;
//! let first = rows.first();
//!
//! assert_eq!(odd.expression(), "jQuery('table.results').find('tr').filter(':odd')");
//! assert_eq!(first.expression(), "jQuery('table.results').find('tr').first()");
//! # Ok(())
//! # }
//! ```

use super::{escape_pattern, optional_filter, require_pattern};
use crate::error::Result;

/// Global the jQuery function is looked up under unless told otherwise
pub const DEFAULT_JQUERY_VARIABLE: &str = "jQuery";

/// Selector evaluated with `jQuery(selector, context)`
///
/// Equality is structural: two selectors are equal when they start from the
/// same pattern, context and variable and carry the same chain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JQuerySelector {
    raw_pattern: String,
    context: Option<Box<JQuerySelector>>,
    variable: String,
    chain: String,
    expression: String,
}

fn quoted(value: &str) -> String {
    format!("'{}'", escape_pattern(value))
}

fn optional_argument(filter: Option<&str>, parameter: &'static str) -> Result<String> {
    Ok(optional_filter(filter, parameter)?.map(quoted).unwrap_or_default())
}

fn until_arguments(selector: Option<&str>, filter: Option<&str>) -> Result<String> {
    let selector = optional_filter(selector, "selector")?;
    let filter = optional_filter(filter, "filter")?;
    Ok(match (selector, filter) {
        (Some(selector), Some(filter)) => format!("{}, {}", quoted(selector), quoted(filter)),
        (Some(selector), None) => quoted(selector),
        (None, Some(filter)) => format!("'', {}", quoted(filter)),
        (None, None) => String::new(),
    })
}

impl JQuerySelector {
    pub fn new(selector: &str) -> Result<Self> {
        Self::with_variable(selector, None, DEFAULT_JQUERY_VARIABLE)
    }

    /// Selector evaluated relative to the matches of `context`
    pub fn with_context(selector: &str, context: JQuerySelector) -> Result<Self> {
        let variable = context.variable.clone();
        Self::with_variable(selector, Some(context), &variable)
    }

    /// Selector using a different global for the jQuery function (e.g. `$`)
    pub fn with_variable(selector: &str, context: Option<JQuerySelector>, variable: &str) -> Result<Self> {
        require_pattern(selector, "selector")?;
        require_pattern(variable, "variable")?;
        Ok(Self::assemble(
            selector.to_string(),
            context.map(Box::new),
            variable.to_string(),
            String::new(),
        ))
    }

    fn assemble(raw_pattern: String, context: Option<Box<JQuerySelector>>, variable: String, chain: String) -> Self {
        let mut expression = match &context {
            Some(context) => format!("{}('{}', {})", variable, escape_pattern(&raw_pattern), context.expression),
            None => format!("{}('{}')", variable, escape_pattern(&raw_pattern)),
        };
        expression.push_str(&chain);
        Self {
            raw_pattern,
            context,
            variable,
            chain,
            expression,
        }
    }

    pub fn raw_pattern(&self) -> &str {
        &self.raw_pattern
    }

    pub fn context(&self) -> Option<&JQuerySelector> {
        self.context.as_deref()
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Calls appended after the initial `jQuery(...)`, e.g. `.find('a').first()`
    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Same selector and chain, rooted at the node addressed by a DOM path
    pub(crate) fn nested_under_path(&self, path: &str) -> Result<Self> {
        let root = Self::with_variable(path, None, &self.variable)?;
        Ok(Self::assemble(
            self.raw_pattern.clone(),
            Some(Box::new(root)),
            self.variable.clone(),
            self.chain.clone(),
        ))
    }

    fn call(&self, method: &str, arguments: &str) -> Self {
        let mut next = self.clone();
        let call = format!(".{}({})", method, arguments);
        next.chain.push_str(&call);
        next.expression.push_str(&call);
        next
    }

    pub fn add(&self, selector: &str) -> Result<Self> {
        require_pattern(selector, "selector")?;
        Ok(self.call("add", &quoted(selector)))
    }

    pub fn add_with_context(&self, selector: &str, context: &JQuerySelector) -> Result<Self> {
        require_pattern(selector, "selector")?;
        Ok(self.call("add", &format!("{}, {}", quoted(selector), context.expression)))
    }

    pub fn add_back(&self, selector: Option<&str>) -> Result<Self> {
        Ok(self.call("addBack", &optional_argument(selector, "selector")?))
    }

    pub fn children(&self, selector: Option<&str>) -> Result<Self> {
        Ok(self.call("children", &optional_argument(selector, "selector")?))
    }

    pub fn closest(&self, selector: &str) -> Result<Self> {
        require_pattern(selector, "selector")?;
        Ok(self.call("closest", &quoted(selector)))
    }

    pub fn closest_with_context(&self, selector: &str, context: &JQuerySelector) -> Result<Self> {
        require_pattern(selector, "selector")?;
        Ok(self.call("closest", &format!("{}, {}", quoted(selector), context.expression)))
    }

    pub fn contents(&self) -> Self {
        self.call("contents", "")
    }

    pub fn end(&self) -> Self {
        self.call("end", "")
    }

    /// Element at `index`; negative values count from the end
    pub fn eq(&self, index: i32) -> Self {
        self.call("eq", &index.to_string())
    }

    pub fn filter(&self, selector: &str) -> Result<Self> {
        require_pattern(selector, "selector")?;
        Ok(self.call("filter", &quoted(selector)))
    }

    pub fn find(&self, selector: &str) -> Result<Self> {
        require_pattern(selector, "selector")?;
        Ok(self.call("find", &quoted(selector)))
    }

    pub fn first(&self) -> Self {
        self.call("first", "")
    }

    pub fn has(&self, selector: &str) -> Result<Self> {
        require_pattern(selector, "selector")?;
        Ok(self.call("has", &quoted(selector)))
    }

    pub fn is(&self, selector: &str) -> Result<Self> {
        require_pattern(selector, "selector")?;
        Ok(self.call("is", &quoted(selector)))
    }

    pub fn last(&self) -> Self {
        self.call("last", "")
    }

    pub fn next(&self, selector: Option<&str>) -> Result<Self> {
        Ok(self.call("next", &optional_argument(selector, "selector")?))
    }

    pub fn next_all(&self, selector: Option<&str>) -> Result<Self> {
        Ok(self.call("nextAll", &optional_argument(selector, "selector")?))
    }

    pub fn next_until(&self, selector: Option<&str>, filter: Option<&str>) -> Result<Self> {
        Ok(self.call("nextUntil", &until_arguments(selector, filter)?))
    }

    pub fn not(&self, selector: &str) -> Result<Self> {
        require_pattern(selector, "selector")?;
        Ok(self.call("not", &quoted(selector)))
    }

    pub fn offset_parent(&self) -> Self {
        self.call("offsetParent", "")
    }

    pub fn parent(&self, selector: Option<&str>) -> Result<Self> {
        Ok(self.call("parent", &optional_argument(selector, "selector")?))
    }

    pub fn parents(&self, selector: Option<&str>) -> Result<Self> {
        Ok(self.call("parents", &optional_argument(selector, "selector")?))
    }

    pub fn parents_until(&self, selector: Option<&str>, filter: Option<&str>) -> Result<Self> {
        Ok(self.call("parentsUntil", &until_arguments(selector, filter)?))
    }

    pub fn prev(&self, selector: Option<&str>) -> Result<Self> {
        Ok(self.call("prev", &optional_argument(selector, "selector")?))
    }

    pub fn prev_all(&self, selector: Option<&str>) -> Result<Self> {
        Ok(self.call("prevAll", &optional_argument(selector, "selector")?))
    }

    pub fn prev_until(&self, selector: Option<&str>, filter: Option<&str>) -> Result<Self> {
        Ok(self.call("prevUntil", &until_arguments(selector, filter)?))
    }

    pub fn siblings(&self, selector: Option<&str>) -> Result<Self> {
        Ok(self.call("siblings", &optional_argument(selector, "selector")?))
    }

    /// Subset from `start` up to, not including, `end`
    pub fn slice(&self, start: i32, end: Option<i32>) -> Self {
        let arguments = match end {
            Some(end) => format!("{}, {}", start, end),
            None => start.to_string(),
        };
        self.call("slice", &arguments)
    }
}
