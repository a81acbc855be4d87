use crate::browser::config::{ConnectionOptions, LaunchOptions};
use crate::error::{Result, SelectorError};
use crate::script::{ScriptExecutor, ScriptResult, SearchContext};
use headless_chrome::{Browser, Tab};
use serde_json::Value;
use std::{ffi::OsStr, sync::Arc, time::Duration};

const ARGUMENTS_PLACEHOLDER: &str = "__ARGUMENTS__";
const SCRIPT_PLACEHOLDER: &str = "__SCRIPT__";
const RELEASE_HANDLES_SCRIPT: &str = "window.__browserSelectorsHandles = []; true";

/// Browser session that manages a Chrome/Chromium instance
///
/// The session is a driver: selectors can be resolved against it directly and
/// it runs scripts in whichever tab is currently active.
///
/// Every node a script returns is kept in a page-side registry so its
/// [`ElementHandle`](crate::script::ElementHandle) stays valid. The registry
/// only grows until the page navigates or
/// [`release_element_handles`](Self::release_element_handles) is called.
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Keep the browser alive for an hour of inactivity (default is 30 seconds)
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| SelectorError::LaunchFailed(e.to_string()))?;

        browser
            .new_tab()
            .map_err(|e| SelectorError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let idle_timeout = options.idle_timeout();
        let browser = Browser::connect_with_timeout(options.ws_url, idle_timeout)
            .map_err(|e| SelectorError::ConnectionFailed(e.to_string()))?;

        Ok(Self { browser })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Get the active tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        self.get_active_tab()
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| SelectorError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking the document visibility and focus state
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        // First pass: visible and focused (strongest signal)
        for tab in &tabs {
            if Self::tab_reports(tab, "document.visibilityState === 'visible' && document.hasFocus()") {
                return Ok(tab.clone());
            }
        }

        // Second pass: visible only
        for tab in &tabs {
            if Self::tab_reports(tab, "document.visibilityState === 'visible'") {
                return Ok(tab.clone());
            }
        }

        // Headless tabs may report neither; fall back to the first one
        tabs.first()
            .cloned()
            .ok_or_else(|| SelectorError::TabOperationFailed("No active tab found".to_string()))
    }

    fn tab_reports(tab: &Arc<Tab>, condition: &str) -> bool {
        match tab.evaluate(condition, false) {
            Ok(remote_object) => remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false),
            Err(e) => {
                log::debug!("Failed to check tab status: {}", e);
                false
            }
        }
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate to a URL using the active tab
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| SelectorError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| SelectorError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Close the browser
    pub fn close(&self) -> Result<()> {
        // headless_chrome closes the browser when `Browser` is dropped; closing
        // every tab shuts it down early
        let tabs = self.get_tabs()?;
        for tab in tabs {
            if let Err(e) = tab.close(false) {
                log::debug!("Failed to close tab: {}", e);
            }
        }
        Ok(())
    }

    /// Forget every element handed out in the active tab
    ///
    /// Handles returned before this call no longer resolve to their nodes.
    pub fn release_element_handles(&self) -> Result<()> {
        self.tab()?
            .evaluate(RELEASE_HANDLES_SCRIPT, false)
            .map_err(SelectorError::driver)?;
        Ok(())
    }
}

/// Wrap a script body so DevTools evaluation behaves like WebDriver's executeScript
///
/// Element references in `args` are swapped for live nodes, and nodes in the
/// result are swapped for references before everything is returned as JSON text.
pub(crate) fn bridge_expression(script: &str, args: &[Value]) -> String {
    let arguments = Value::Array(args.to_vec()).to_string();
    include_str!("bridge.js")
        .replace(ARGUMENTS_PLACEHOLDER, &arguments)
        .replace(SCRIPT_PLACEHOLDER, script)
}

/// Convert the bridge's JSON text into a script result
pub(crate) fn parse_bridge_value(value: Option<Value>) -> Result<ScriptResult> {
    let json = match value {
        Some(Value::String(json)) => json,
        other => {
            return Err(SelectorError::UnexpectedResult {
                expected: "JSON text from the script bridge",
                actual: format!("{:?}", other),
            });
        }
    };

    let value: Value = serde_json::from_str(&json).map_err(|e| SelectorError::UnexpectedResult {
        expected: "JSON text from the script bridge",
        actual: e.to_string(),
    })?;
    ScriptResult::try_from(value)
}

impl ScriptExecutor for BrowserSession {
    fn execute_script(&self, script: &str, args: &[Value]) -> Result<ScriptResult> {
        log::debug!("Executing script with {} argument(s): {}", args.len(), script);
        let remote_object = self
            .tab()?
            .evaluate(&bridge_expression(script, args), false)
            .map_err(SelectorError::driver)?;

        parse_bridge_value(remote_object.value)
    }
}

impl SearchContext for BrowserSession {
    fn script_executor(&self) -> Option<&dyn ScriptExecutor> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{ELEMENT_KEY, ElementHandle};
    use serde_json::json;

    #[test]
    fn test_bridge_expression() {
        let handle = ElementHandle::new("2");
        let expression = bridge_expression("return arguments[0];", &[handle.to_argument(), json!(5)]);

        assert!(expression.starts_with("(function () {"));
        assert!(expression.contains(&format!("var args = decode([{{\"{}\":\"2\"}},5]);", ELEMENT_KEY)));
        assert!(expression.contains("return arguments[0];"));
        assert!(!expression.contains(ARGUMENTS_PLACEHOLDER));
        assert!(!expression.contains(SCRIPT_PLACEHOLDER));
        assert!(expression.trim_end().ends_with("})()"));
    }

    #[test]
    fn test_parse_bridge_value() {
        let text = json!([{ ELEMENT_KEY: "0" }, { ELEMENT_KEY: "1" }]).to_string();
        let result = parse_bridge_value(Some(Value::String(text))).unwrap();

        assert_eq!(
            result,
            ScriptResult::List(vec![
                ScriptResult::Element(ElementHandle::new("0")),
                ScriptResult::Element(ElementHandle::new("1")),
            ])
        );
        assert_eq!(
            parse_bridge_value(Some(Value::String("null".to_string()))).unwrap(),
            ScriptResult::Null
        );
    }

    #[test]
    fn test_parse_bridge_value_rejects_raw_values() {
        assert!(parse_bridge_value(None).is_err());
        assert!(parse_bridge_value(Some(json!(3))).is_err());
        assert!(parse_bridge_value(Some(Value::String("{not json".to_string()))).is_err());
    }

    // Integration tests (require Chrome to be installed)
    #[test]
    #[ignore] // Ignore by default, run with: cargo test -- --ignored
    fn test_launch_browser() {
        let result = BrowserSession::launch(LaunchOptions::new().headless(true));
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_release_element_handles() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let body = session.execute_script("return document.body;", &[]).unwrap();
        let ScriptResult::Element(handle) = body else {
            panic!("Expected an element, got {:?}", body);
        };
        let count = "return window.__browserSelectorsHandles.length;";
        assert_eq!(session.execute_script(count, &[]).unwrap(), ScriptResult::Number(1.0));

        session.release_element_handles().unwrap();
        assert_eq!(session.execute_script(count, &[]).unwrap(), ScriptResult::Number(0.0));
        assert_eq!(
            session.execute_script("return arguments[0];", &[handle.to_argument()]).unwrap(),
            ScriptResult::Null
        );
    }

    #[test]
    #[ignore]
    fn test_close() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
        assert!(session.close().is_ok());
    }

    #[test]
    #[ignore]
    fn test_execute_script() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let result = session.execute_script("return arguments[0] + 1;", &[json!(41)]).unwrap();
        assert_eq!(result, ScriptResult::Number(42.0));
    }
}
