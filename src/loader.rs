//! External library bootstrap
//!
//! jQuery and Sizzle selectors need their library in the page. Before such a
//! selector runs, [`ensure_loaded`] checks for the library, injects a
//! `<script>` tag if it is missing and polls until the library answers or the
//! timeout elapses.

use crate::error::{Result, SelectorError};
use crate::script::{ScriptExecutor, parse};
use crate::selector::js_string;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default time to wait for an injected library (3 seconds)
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 3_000;

/// Default interval between readiness checks (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Libraries that can be injected into a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Library {
    JQuery,
    Sizzle,
}

impl Library {
    pub fn name(&self) -> &'static str {
        match self {
            Self::JQuery => "jQuery",
            Self::Sizzle => "Sizzle",
        }
    }

    /// CDN location used when no URI is configured
    pub fn default_uri(&self) -> &'static str {
        match self {
            Self::JQuery => "https://code.jquery.com/jquery-latest.min.js",
            Self::Sizzle => "https://cdnjs.cloudflare.com/ajax/libs/sizzle/2.3.3/sizzle.min.js",
        }
    }
}

/// Options for library loading
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// How long to wait for an injected library
    pub timeout: Duration,

    /// Pause between readiness checks
    pub poll_interval: Duration,

    /// Per-library script locations overriding [`Library::default_uri`]
    pub library_uris: HashMap<Library, String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_LOAD_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            library_uris: HashMap::new(),
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the load timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder method: set the poll interval
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Builder method: load `library` from `uri`
    pub fn library_uri(mut self, library: Library, uri: impl Into<String>) -> Self {
        self.library_uris.insert(library, uri.into());
        self
    }

    /// URI to inject for `library`
    pub fn uri_for(&self, library: Library) -> &str {
        self.library_uris
            .get(&library)
            .map(String::as_str)
            .unwrap_or_else(|| library.default_uri())
    }
}

/// Knows how to detect and inject one library
pub trait ExternalLibraryLoader {
    fn library(&self) -> Library;

    fn name(&self) -> &'static str {
        self.library().name()
    }

    /// Script returning `true` once the library is usable
    fn check_script(&self) -> String;

    /// Script injecting the library from the URI in `arguments[0]`
    fn load_script(&self) -> String;

    fn default_uri(&self) -> &str {
        self.library().default_uri()
    }
}

fn inject_script(on_load: &str) -> String {
    format!(
        "var script = document.createElement('script'); script.type = 'text/javascript'; \
         script.src = arguments[0];{} \
         (document.head || document.getElementsByTagName('head')[0] || document.documentElement).appendChild(script);",
        on_load
    )
}

/// Loads jQuery, optionally exposing it under another global
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JQueryLoader {
    variable: String,
}

impl JQueryLoader {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }
}

impl Default for JQueryLoader {
    fn default() -> Self {
        Self::new(crate::selector::DEFAULT_JQUERY_VARIABLE)
    }
}

impl ExternalLibraryLoader for JQueryLoader {
    fn library(&self) -> Library {
        Library::JQuery
    }

    fn check_script(&self) -> String {
        format!("return typeof window[{}] === 'function';", js_string(&self.variable))
    }

    fn load_script(&self) -> String {
        if self.variable == crate::selector::DEFAULT_JQUERY_VARIABLE {
            inject_script("")
        } else {
            inject_script(&format!(
                " script.onload = function() {{ window[{}] = window.jQuery; }};",
                js_string(&self.variable)
            ))
        }
    }
}

/// Loads the standalone Sizzle engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizzleLoader;

impl ExternalLibraryLoader for SizzleLoader {
    fn library(&self) -> Library {
        Library::Sizzle
    }

    fn check_script(&self) -> String {
        "return typeof window.Sizzle === 'function';".to_string()
    }

    fn load_script(&self) -> String {
        inject_script("")
    }
}

fn is_loaded(driver: &dyn ScriptExecutor, check_script: &str) -> Result<bool> {
    parse::<bool>(driver.execute_script(check_script, &[])?)
}

/// Make sure the loader's library is usable in the page
///
/// Returns immediately when it already is. Otherwise injects it and polls the
/// check script until it succeeds or `options.timeout` elapses.
pub fn ensure_loaded(driver: &dyn ScriptExecutor, loader: &dyn ExternalLibraryLoader, options: &LoadOptions) -> Result<()> {
    let check_script = loader.check_script();
    if is_loaded(driver, &check_script)? {
        return Ok(());
    }

    let library = loader.library();
    let uri = options
        .library_uris
        .get(&library)
        .map(String::as_str)
        .unwrap_or_else(|| loader.default_uri());
    log::debug!("{} not present, injecting from {}", loader.name(), uri);
    driver.execute_script(&loader.load_script(), &[Value::String(uri.to_string())])?;

    let start = Instant::now();
    loop {
        if is_loaded(driver, &check_script)? {
            log::debug!("{} ready after {:?}", loader.name(), start.elapsed());
            return Ok(());
        }

        let waited = start.elapsed();
        if waited >= options.timeout {
            log::warn!("{} did not load within {:?}", loader.name(), options.timeout);
            return Err(SelectorError::Timeout {
                library: loader.name().to_string(),
                waited,
            });
        }

        std::thread::sleep(options.poll_interval.min(options.timeout - waited));
    }
}
