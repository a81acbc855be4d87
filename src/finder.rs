//! Turning a selector and a search context into located elements
//!
//! ```no_run
//! use browser_selectors::{BrowserSession, By, LaunchOptions, find_element, find_elements};
//!
//! # fn main() -> browser_selectors::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::new().headless(true))?;
//! session.navigate("https://example.com")?;
//!
//! let list = find_element(&session, By::jquery("ul.menu")?)?;
//! let items = list.find_elements(By::tag_name("li")?)?;
//! let links = find_elements(&session, By::partial_link_text("More")?)?;
//! println!("{} items, {} links", items.len(), links.len());
//! # Ok(())
//! # }
//! ```

use crate::element::LocatedElement;
use crate::error::{Result, SelectorError};
use crate::loader::{LoadOptions, ensure_loaded};
use crate::script::{ElementHandle, ScriptExecutor, SearchContext, parse};
use crate::selector::Selector;

/// Resolves selectors, loading jQuery or Sizzle into the page as needed
#[derive(Debug, Clone, Default)]
pub struct ElementFinder {
    options: LoadOptions,
}

impl ElementFinder {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// First element matching `selector`
    ///
    /// Fails with [`SelectorError::NotFound`] when nothing matches.
    pub fn find_element<'c, C>(&self, context: &'c C, selector: impl Into<Selector>) -> Result<LocatedElement<'c>>
    where
        C: SearchContext + ?Sized,
    {
        let (driver, selector) = prepare(context, selector.into())?;
        resolve_first(driver, selector, &self.options)
    }

    /// Every element matching `selector`, possibly none
    pub fn find_elements<'c, C>(&self, context: &'c C, selector: impl Into<Selector>) -> Result<Vec<LocatedElement<'c>>>
    where
        C: SearchContext + ?Sized,
    {
        let (driver, selector) = prepare(context, selector.into())?;
        resolve(driver, selector, &self.options)
    }
}

/// [`ElementFinder::find_element`] with default load options
pub fn find_element<'c, C>(context: &'c C, selector: impl Into<Selector>) -> Result<LocatedElement<'c>>
where
    C: SearchContext + ?Sized,
{
    ElementFinder::default().find_element(context, selector)
}

/// [`ElementFinder::find_elements`] with default load options
pub fn find_elements<'c, C>(context: &'c C, selector: impl Into<Selector>) -> Result<Vec<LocatedElement<'c>>>
where
    C: SearchContext + ?Sized,
{
    ElementFinder::default().find_elements(context, selector)
}

/// Find the driver behind `context` and scope `selector` to its root element
fn prepare<'c, C>(context: &'c C, selector: Selector) -> Result<(&'c dyn ScriptExecutor, Selector)>
where
    C: SearchContext + ?Sized,
{
    let driver = context.script_executor().ok_or(SelectorError::UnsupportedContext)?;
    let selector = match context.search_root() {
        Some(root) => selector.create_nested_under(root)?,
        None => selector,
    };
    Ok((driver, selector))
}

pub(crate) fn resolve<'d>(driver: &'d dyn ScriptExecutor, selector: Selector, options: &LoadOptions) -> Result<Vec<LocatedElement<'d>>> {
    if let Some(loader) = selector.loader() {
        ensure_loaded(driver, loader.as_ref(), options)?;
    }

    let script = selector.script();
    log::debug!("Executing selector script: {}", script);
    let handles = parse::<Vec<ElementHandle>>(driver.execute_script(&script, &[])?)?;
    log::debug!("Selector '{}' matched {} element(s)", selector.raw_pattern(), handles.len());

    Ok(handles
        .into_iter()
        .enumerate()
        .map(|(index, handle)| LocatedElement::new(driver, handle, selector.clone(), index, options.clone()))
        .collect())
}

pub(crate) fn resolve_first<'d>(driver: &'d dyn ScriptExecutor, selector: Selector, options: &LoadOptions) -> Result<LocatedElement<'d>> {
    let pattern = selector.raw_pattern().to_string();
    resolve(driver, selector, options)?
        .into_iter()
        .next()
        .ok_or(SelectorError::NotFound(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptResult;
    use crate::selector::By;
    use serde_json::Value;
    use std::cell::RefCell;

    struct ListDriver {
        matches: usize,
        scripts: RefCell<Vec<String>>,
    }

    impl ListDriver {
        fn new(matches: usize) -> Self {
            Self {
                matches,
                scripts: RefCell::new(Vec::new()),
            }
        }
    }

    impl ScriptExecutor for ListDriver {
        fn execute_script(&self, script: &str, _args: &[Value]) -> Result<ScriptResult> {
            self.scripts.borrow_mut().push(script.to_string());
            if script.starts_with("return typeof") {
                return Ok(ScriptResult::Bool(true));
            }
            Ok(ScriptResult::List(
                (0..self.matches)
                    .map(|i| ScriptResult::Element(ElementHandle::new(format!("e{}", i))))
                    .collect(),
            ))
        }
    }

    impl SearchContext for ListDriver {
        fn script_executor(&self) -> Option<&dyn ScriptExecutor> {
            Some(self)
        }
    }

    struct Detached;

    impl SearchContext for Detached {
        fn script_executor(&self) -> Option<&dyn ScriptExecutor> {
            None
        }
    }

    #[test]
    fn test_find_element_returns_first() {
        let driver = ListDriver::new(3);
        let element = find_element(&driver, By::query_selector("p").unwrap()).unwrap();

        assert_eq!(element.handle().id(), "e0");
        assert_eq!(element.match_index(), 0);
        let scripts = driver.scripts.borrow();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0], "return document.querySelectorAll('p');");
    }

    #[test]
    fn test_find_elements_sets_match_index() {
        let driver = ListDriver::new(3);
        let elements = find_elements(&driver, By::jquery("p").unwrap()).unwrap();

        let indices: Vec<_> = elements.iter().map(|e| e.match_index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        // library check, then the query itself
        assert_eq!(driver.scripts.borrow().len(), 2);
        assert_eq!(driver.scripts.borrow()[1], "return jQuery('p').get();");
    }

    #[test]
    fn test_empty_result() {
        let driver = ListDriver::new(0);

        match find_element(&driver, By::sizzle("p.missing").unwrap()) {
            Err(SelectorError::NotFound(pattern)) => assert_eq!(pattern, "p.missing"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
        assert!(find_elements(&driver, By::sizzle("p.missing").unwrap()).unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_context() {
        let result = find_elements(&Detached, By::id("x").unwrap());
        assert!(matches!(result, Err(SelectorError::UnsupportedContext)));
    }

    #[test]
    fn test_finder_keeps_options() {
        let options = LoadOptions::new().timeout(std::time::Duration::from_millis(10));
        let finder = ElementFinder::new(options);
        assert_eq!(finder.options().timeout, std::time::Duration::from_millis(10));
    }
}
