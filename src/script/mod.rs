//! Script execution boundary
//!
//! Everything the crate knows about a browser goes through [`ScriptExecutor`]:
//! JavaScript source text goes in, a [`ScriptResult`] comes back. Element
//! handles travel in both directions as W3C element reference objects.

pub mod parser;

pub use parser::{FromScriptResult, parse};

use crate::element::LocatedElement;
use crate::error::{Result, SelectorError};
use serde_json::{Map, Value};

/// Key of the W3C WebDriver element reference object
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Something that can run JavaScript in a page and return its result
///
/// The script is a function body: it reads its arguments from `arguments`
/// and hands a value back with `return`.
pub trait ScriptExecutor {
    fn execute_script(&self, script: &str, args: &[Value]) -> Result<ScriptResult>;
}

/// A root that selectors can be resolved from
///
/// Drivers return themselves; elements return the driver they were found
/// through. Contexts with no reachable driver return `None`.
pub trait SearchContext {
    fn script_executor(&self) -> Option<&dyn ScriptExecutor>;

    /// Element that searches from this context are scoped to
    fn search_root(&self) -> Option<&LocatedElement<'_>> {
        None
    }
}

/// Opaque reference to an element living in the page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle(String);

impl ElementHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Driver-assigned element id
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Encode as a script argument (`arguments[n]` is the element itself)
    pub fn to_argument(&self) -> Value {
        let mut reference = Map::new();
        reference.insert(ELEMENT_KEY.to_string(), Value::String(self.0.clone()));
        Value::Object(reference)
    }
}

/// Value returned by a script
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptResult {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Element(ElementHandle),
    List(Vec<ScriptResult>),
}

impl ScriptResult {
    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Element(_) => "element",
            Self::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn from_scalar(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Number(n) => n.as_f64().map(Self::Number).ok_or_else(|| SelectorError::UnexpectedResult {
                expected: "finite number",
                actual: n.to_string(),
            }),
            Value::String(s) => Ok(Self::String(s)),
            Value::Object(mut map) => match map.remove(ELEMENT_KEY) {
                Some(Value::String(id)) => Ok(Self::Element(ElementHandle(id))),
                _ => Err(SelectorError::UnexpectedResult {
                    expected: "element reference",
                    actual: Value::Object(map).to_string(),
                }),
            },
            Value::Array(_) => Err(SelectorError::UnexpectedResult {
                expected: "scalar or element",
                actual: "nested list".to_string(),
            }),
        }
    }
}

impl TryFrom<Value> for ScriptResult {
    type Error = SelectorError;

    /// Convert wire JSON; lists may hold scalars and elements but not other lists
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(Self::from_scalar)
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            other => Self::from_scalar(other),
        }
    }
}
