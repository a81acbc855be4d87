//! jQuery operations on a selection
//!
//! [`JQueryHelper`] evaluates jQuery getters (`text()`, `attr()`, `width()`,
//! ...) and triggers events on everything a [`JQuerySelector`] matches. jQuery
//! is injected into the page first if it is missing.

use crate::error::{Result, SelectorError};
use crate::loader::{JQueryLoader, LoadOptions, ensure_loaded};
use crate::script::{FromScriptResult, ScriptExecutor, ScriptResult, SearchContext, parse};
use crate::selector::{JQuerySelector, escape_pattern, require_pattern};

/// jQuery calls bound to one selection
pub struct JQueryHelper<'d> {
    driver: &'d dyn ScriptExecutor,
    selector: JQuerySelector,
    options: LoadOptions,
}

impl<'d> JQueryHelper<'d> {
    pub fn new(driver: &'d dyn ScriptExecutor, selector: JQuerySelector) -> Self {
        Self {
            driver,
            selector,
            options: LoadOptions::default(),
        }
    }

    /// Helper for any search context that can reach a driver
    pub fn for_context<C>(context: &'d C, selector: JQuerySelector) -> Result<Self>
    where
        C: SearchContext + ?Sized,
    {
        let driver = context.script_executor().ok_or(SelectorError::UnsupportedContext)?;
        Ok(Self::new(driver, selector))
    }

    /// Builder method: set library load options
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn selector(&self) -> &JQuerySelector {
        &self.selector
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    fn run(&self, member: &str) -> Result<ScriptResult> {
        ensure_loaded(self.driver, &JQueryLoader::new(self.selector.variable()), &self.options)?;
        let script = format!("return {}.{};", self.selector.expression(), member);
        log::debug!("Executing jQuery call: {}", script);
        self.driver.execute_script(&script, &[])
    }

    fn get<T: FromScriptResult>(&self, member: &str) -> Result<T> {
        parse(self.run(member)?)
    }

    /// Number of matched elements
    pub fn length(&self) -> Result<usize> {
        self.get("length")
    }

    /// Combined text of all matched elements
    pub fn text(&self) -> Result<String> {
        self.get("text()")
    }

    /// Inner HTML of the first match
    pub fn html(&self) -> Result<Option<String>> {
        self.get("html()")
    }

    /// Value of the first matched form element
    pub fn val(&self) -> Result<Option<String>> {
        self.get("val()")
    }

    pub fn attr(&self, name: &str) -> Result<Option<String>> {
        require_pattern(name, "name")?;
        self.get(&format!("attr('{}')", escape_pattern(name)))
    }

    /// DOM property of the first match; properties may be of any type
    pub fn prop(&self, name: &str) -> Result<ScriptResult> {
        require_pattern(name, "name")?;
        self.run(&format!("prop('{}')", escape_pattern(name)))
    }

    /// Computed style property of the first match
    pub fn css(&self, property: &str) -> Result<Option<String>> {
        require_pattern(property, "property")?;
        self.get(&format!("css('{}')", escape_pattern(property)))
    }

    pub fn has_class(&self, class_name: &str) -> Result<bool> {
        require_pattern(class_name, "className")?;
        self.get(&format!("hasClass('{}')", escape_pattern(class_name)))
    }

    /// Whether any match satisfies `selector`
    pub fn is(&self, selector: &str) -> Result<bool> {
        require_pattern(selector, "selector")?;
        self.get(&format!("is('{}')", escape_pattern(selector)))
    }

    pub fn width(&self) -> Result<Option<f64>> {
        self.get("width()")
    }

    pub fn height(&self) -> Result<Option<f64>> {
        self.get("height()")
    }

    pub fn inner_width(&self) -> Result<Option<f64>> {
        self.get("innerWidth()")
    }

    pub fn inner_height(&self) -> Result<Option<f64>> {
        self.get("innerHeight()")
    }

    pub fn outer_width(&self, include_margin: bool) -> Result<Option<f64>> {
        self.get(&format!("outerWidth({})", include_margin))
    }

    pub fn outer_height(&self, include_margin: bool) -> Result<Option<f64>> {
        self.get(&format!("outerHeight({})", include_margin))
    }

    pub fn scroll_top(&self) -> Result<Option<i64>> {
        self.get("scrollTop()")
    }

    pub fn scroll_left(&self) -> Result<Option<i64>> {
        self.get("scrollLeft()")
    }

    /// Fire `event` (e.g. `click`, `change`) on every match
    pub fn trigger(&self, event: &str) -> Result<()> {
        require_pattern(event, "eventName")?;
        // the jQuery object itself is not a useful result
        self.run(&format!("trigger('{}').length", escape_pattern(event)))?;
        Ok(())
    }
}
