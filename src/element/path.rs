//! Scripts that walk from a live node up to the document root

use crate::selector::Selector;

const ELEMENT_PLACEHOLDER: &str = "__ELEMENT__";

/// Which kind of path to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// `body > div:eq(1) > span#name`, jQuery-compatible
    Css,
    /// `/html[1]/body[1]/div[@class="row"]` or `id("main")/ul[1]`
    XPath,
}

/// Script returning the path of match `index` of `selector`, or `null`
pub(crate) fn path_script(kind: PathKind, selector: &Selector, index: usize) -> String {
    let template = match kind {
        PathKind::Css => include_str!("css_path.js"),
        PathKind::XPath => include_str!("xpath.js"),
    };
    template.replace(ELEMENT_PLACEHOLDER, &selector.element_lookup(index))
}
