//! # browser-selectors
//!
//! Element selectors for browser automation. One [`Selector`] type covers five
//! dialects, each compiled to a JavaScript expression and run in the page
//! through a [`ScriptExecutor`]:
//!
//! - **Query**: native `querySelectorAll` (CSS, class name, id, name, tag name)
//! - **Link text**: exact or partial anchor text
//! - **XPath**: `document.evaluate`
//! - **jQuery**: any jQuery selector plus traversal chains (`find`, `closest`, `next`, ...)
//! - **Sizzle**: the standalone Sizzle engine
//!
//! jQuery and Sizzle are injected into the page on demand.
//!
//! ## Finding Elements
//!
//! ```rust,no_run
//! use browser_selectors::{BrowserSession, By, LaunchOptions, find_element};
//!
//! # fn main() -> browser_selectors::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com")?;
//!
//! let heading = find_element(&session, By::xpath("//h1")?)?;
//! println!("Heading lives at {}", heading.path()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Nesting
//!
//! Located elements are search contexts themselves. A selector resolved from
//! an element is rewritten to run inside that element's DOM path:
//!
//! ```rust,no_run
//! use browser_selectors::{BrowserSession, By, JQuerySelector, LaunchOptions, find_element};
//!
//! # fn main() -> browser_selectors::Result<()> {
//! # let session = BrowserSession::launch(LaunchOptions::default())?;
//! let table = find_element(&session, By::id("results")?)?;
//! let rows = table.find_elements(By::tag_name("tr")?)?;
//!
//! let odd = JQuerySelector::new("tr:odd")?.filter(":visible")?;
//! let highlighted = table.find_elements(odd)?;
//! println!("{} rows, {} highlighted", rows.len(), highlighted.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`selector`]: Selector dialects and the [`By`] factory
//! - [`finder`]: Resolving selectors against a search context
//! - [`element`]: Located elements and their DOM paths
//! - [`jquery`]: jQuery getters and events on a selection
//! - [`loader`]: On-demand injection of jQuery and Sizzle
//! - [`script`]: The script execution boundary and result parsing
//! - [`browser`]: Chrome DevTools driver
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod element;
pub mod error;
pub mod finder;
pub mod jquery;
pub mod loader;
pub mod script;
pub mod selector;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use element::LocatedElement;
pub use error::{Result, SelectorError};
pub use finder::{ElementFinder, find_element, find_elements};
pub use jquery::JQueryHelper;
pub use loader::{ExternalLibraryLoader, JQueryLoader, Library, LoadOptions, SizzleLoader};
pub use script::{ElementHandle, FromScriptResult, ScriptExecutor, ScriptResult, SearchContext};
pub use selector::{By, JQuerySelector, LinkTextSelector, QueryKind, QuerySelector, Selector, SizzleSelector, XPathSelector};
