//! Elements located through a selector
//!
//! A [`LocatedElement`] remembers the selector and match position it came
//! from, which lets it work out its own DOM path on demand. The path is what
//! makes nesting possible: a selector run "inside" an element is rewritten to
//! use the element's path as its context.

pub mod path;

pub use path::PathKind;

use crate::error::{Result, SelectorError};
use crate::finder;
use crate::jquery::JQueryHelper;
use crate::loader::LoadOptions;
use crate::script::{ElementHandle, ScriptExecutor, SearchContext, parse};
use crate::selector::{JQuerySelector, Selector};
use std::cell::OnceCell;
use std::fmt;

/// A single element matched by a selector
pub struct LocatedElement<'d> {
    driver: &'d dyn ScriptExecutor,
    handle: ElementHandle,
    selector: Selector,
    match_index: usize,
    options: LoadOptions,
    path: OnceCell<String>,
    xpath: OnceCell<String>,
}

impl<'d> LocatedElement<'d> {
    pub(crate) fn new(
        driver: &'d dyn ScriptExecutor,
        handle: ElementHandle,
        selector: Selector,
        match_index: usize,
        options: LoadOptions,
    ) -> Self {
        Self {
            driver,
            handle,
            selector,
            match_index,
            options,
            path: OnceCell::new(),
            xpath: OnceCell::new(),
        }
    }

    pub fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    /// Selector this element was found with
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Position among the selector's matches
    pub fn match_index(&self) -> usize {
        self.match_index
    }

    /// Driver the element was found through
    pub fn driver(&self) -> &'d dyn ScriptExecutor {
        self.driver
    }

    /// Library load options inherited by searches started from this element
    pub fn load_options(&self) -> &LoadOptions {
        &self.options
    }

    /// CSS-like path from `body` down to this element, e.g. `body > div:eq(1) > p`
    ///
    /// Computed once, on first access.
    pub fn path(&self) -> Result<&str> {
        self.memoized(&self.path, PathKind::Css)
    }

    /// Absolute XPath of this element, computed once on first access
    pub fn xpath(&self) -> Result<&str> {
        self.memoized(&self.xpath, PathKind::XPath)
    }

    fn memoized<'s>(&'s self, cell: &'s OnceCell<String>, kind: PathKind) -> Result<&'s str> {
        if let Some(value) = cell.get() {
            return Ok(value);
        }

        let script = path::path_script(kind, &self.selector, self.match_index);
        // a detached node walks to nothing
        let value = parse::<Option<String>>(self.driver.execute_script(&script, &[])?)?
            .filter(|value| !value.is_empty())
            .ok_or_else(|| SelectorError::NotFound(self.selector.raw_pattern().to_string()))?;
        log::debug!("Resolved {:?} path of element {}: {}", kind, self.handle.id(), value);

        Ok(cell.get_or_init(|| value))
    }

    /// First match of `selector` inside this element
    pub fn find_element(&self, selector: impl Into<Selector>) -> Result<LocatedElement<'d>> {
        let nested = selector.into().create_nested_under(self)?;
        finder::resolve_first(self.driver, nested, &self.options)
    }

    /// Every match of `selector` inside this element
    pub fn find_elements(&self, selector: impl Into<Selector>) -> Result<Vec<LocatedElement<'d>>> {
        let nested = selector.into().create_nested_under(self)?;
        finder::resolve(self.driver, nested, &self.options)
    }

    /// jQuery operations on this element, addressed by its path
    pub fn jquery(&self) -> Result<JQueryHelper<'d>> {
        let selector = JQuerySelector::new(self.path()?)?;
        Ok(JQueryHelper::new(self.driver, selector).with_options(self.options.clone()))
    }
}

impl SearchContext for LocatedElement<'_> {
    fn script_executor(&self) -> Option<&dyn ScriptExecutor> {
        Some(self.driver)
    }

    fn search_root(&self) -> Option<&LocatedElement<'_>> {
        Some(self)
    }
}

impl fmt::Debug for LocatedElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocatedElement")
            .field("handle", &self.handle)
            .field("selector", &self.selector)
            .field("match_index", &self.match_index)
            .field("path", &self.path.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Library;
    use crate::script::ScriptResult;
    use crate::selector::By;
    use serde_json::Value;
    use std::cell::RefCell;

    struct PathDriver {
        scripts: RefCell<Vec<String>>,
        path: Option<&'static str>,
    }

    impl ScriptExecutor for PathDriver {
        fn execute_script(&self, script: &str, _args: &[Value]) -> Result<ScriptResult> {
            self.scripts.borrow_mut().push(script.to_string());
            Ok(match self.path {
                Some(path) if script.contains("segments.join(' > ')") => ScriptResult::String(path.to_string()),
                Some(_) => ScriptResult::String("/html[1]/body[1]/ul[2]".to_string()),
                None => ScriptResult::Null,
            })
        }
    }

    fn element(driver: &PathDriver) -> LocatedElement<'_> {
        LocatedElement::new(driver, ElementHandle::new("4"), By::jquery("ul").unwrap(), 1, LoadOptions::default())
    }

    #[test]
    fn test_path_is_memoized() {
        let driver = PathDriver {
            scripts: RefCell::new(Vec::new()),
            path: Some("body > ul:eq(1)"),
        };
        let element = element(&driver);

        assert_eq!(element.path().unwrap(), "body > ul:eq(1)");
        assert_eq!(element.path().unwrap(), "body > ul:eq(1)");
        assert_eq!(driver.scripts.borrow().len(), 1);
        assert!(driver.scripts.borrow()[0].contains("(jQuery('ul').get())[1]"));

        assert_eq!(element.xpath().unwrap(), "/html[1]/body[1]/ul[2]");
        assert_eq!(element.xpath().unwrap(), "/html[1]/body[1]/ul[2]");
        assert_eq!(driver.scripts.borrow().len(), 2);
    }

    #[test]
    fn test_missing_node_is_not_found() {
        let driver = PathDriver {
            scripts: RefCell::new(Vec::new()),
            path: None,
        };
        let element = element(&driver);

        assert!(matches!(element.path(), Err(SelectorError::NotFound(pattern)) if pattern == "ul"));
        // a failed lookup is not cached
        assert!(element.path().is_err());
        assert_eq!(driver.scripts.borrow().len(), 2);
    }

    #[test]
    fn test_empty_path_is_not_found() {
        let driver = PathDriver {
            scripts: RefCell::new(Vec::new()),
            path: Some(""),
        };
        let element = element(&driver);

        assert!(matches!(element.path(), Err(SelectorError::NotFound(pattern)) if pattern == "ul"));
        assert!(matches!(
            element.find_elements(By::tag_name("li").unwrap()),
            Err(SelectorError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_options_are_inherited() {
        let driver = PathDriver {
            scripts: RefCell::new(Vec::new()),
            path: Some("body > ul:eq(1)"),
        };
        let options = LoadOptions::new().library_uri(Library::JQuery, "http://intranet/jq.js");
        let element = LocatedElement::new(&driver, ElementHandle::new("4"), By::jquery("ul").unwrap(), 1, options);

        assert_eq!(element.load_options().uri_for(Library::JQuery), "http://intranet/jq.js");
        let helper = element.jquery().unwrap();
        assert_eq!(helper.options().uri_for(Library::JQuery), "http://intranet/jq.js");
    }

    #[test]
    fn test_accessors_and_context() {
        let driver = PathDriver {
            scripts: RefCell::new(Vec::new()),
            path: Some("body > ul:eq(1)"),
        };
        let element = element(&driver);

        assert_eq!(element.handle().id(), "4");
        assert_eq!(element.match_index(), 1);
        assert_eq!(element.selector(), &By::jquery("ul").unwrap());
        assert!(element.script_executor().is_some());
        assert!(element.search_root().is_some());

        let helper = element.jquery().unwrap();
        assert_eq!(helper.selector().expression(), "jQuery('body > ul:eq(1)')");
    }
}
