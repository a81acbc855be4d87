//! Chrome DevTools driver
//!
//! [`BrowserSession`] launches or attaches to Chrome through `headless_chrome`
//! and implements [`ScriptExecutor`](crate::script::ScriptExecutor), so every
//! selector dialect can be resolved against a real page.

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
