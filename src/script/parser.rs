//! Typed views over [`ScriptResult`]
//!
//! Browsers hand every number back as a double and every collection back as a
//! loosely typed list. [`parse`] narrows a raw result into the type the caller
//! asked for: `null` becomes the type's empty value, doubles are truncated into
//! integer targets and lists are reinterpreted item by item.

use super::{ElementHandle, ScriptResult};
use crate::error::{Result, SelectorError};

/// Conversion from a raw script result
pub trait FromScriptResult: Sized {
    /// Human readable name of the target, used in mismatch errors
    const EXPECTED: &'static str;

    fn from_script_result(raw: ScriptResult) -> Result<Self>;
}

/// Parse a raw result into `T`
pub fn parse<T: FromScriptResult>(raw: ScriptResult) -> Result<T> {
    T::from_script_result(raw)
}

fn mismatch<T: FromScriptResult>(raw: &ScriptResult) -> SelectorError {
    SelectorError::UnexpectedResult {
        expected: T::EXPECTED,
        actual: raw.kind().to_string(),
    }
}

impl FromScriptResult for ScriptResult {
    const EXPECTED: &'static str = "any value";

    fn from_script_result(raw: ScriptResult) -> Result<Self> {
        Ok(raw)
    }
}

impl FromScriptResult for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_script_result(raw: ScriptResult) -> Result<Self> {
        match raw {
            ScriptResult::Null => Ok(false),
            ScriptResult::Bool(b) => Ok(b),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromScriptResult for f64 {
    const EXPECTED: &'static str = "number";

    fn from_script_result(raw: ScriptResult) -> Result<Self> {
        match raw {
            ScriptResult::Null => Ok(0.0),
            ScriptResult::Number(n) => Ok(n),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

macro_rules! integer_from_script_result {
    ($($ty:ty),*) => {
        $(
            impl FromScriptResult for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_script_result(raw: ScriptResult) -> Result<Self> {
                    match raw {
                        ScriptResult::Null => Ok(0),
                        // `as` truncates toward zero and saturates at the bounds
                        ScriptResult::Number(n) => Ok(n as $ty),
                        other => Err(mismatch::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

integer_from_script_result!(i32, i64, u32, u64, usize);

impl FromScriptResult for String {
    const EXPECTED: &'static str = "string";

    fn from_script_result(raw: ScriptResult) -> Result<Self> {
        match raw {
            ScriptResult::Null => Ok(String::new()),
            ScriptResult::String(s) => Ok(s),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromScriptResult for ElementHandle {
    const EXPECTED: &'static str = "element";

    fn from_script_result(raw: ScriptResult) -> Result<Self> {
        match raw {
            ScriptResult::Element(handle) => Ok(handle),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FromScriptResult> FromScriptResult for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_script_result(raw: ScriptResult) -> Result<Self> {
        match raw {
            ScriptResult::Null => Ok(None),
            other => T::from_script_result(other).map(Some),
        }
    }
}

impl<T: FromScriptResult> FromScriptResult for Vec<T> {
    const EXPECTED: &'static str = "list";

    fn from_script_result(raw: ScriptResult) -> Result<Self> {
        match raw {
            ScriptResult::Null => Ok(Vec::new()),
            ScriptResult::List(items) => items
                .into_iter()
                .filter(|item| !item.is_null())
                .map(T::from_script_result)
                .collect(),
            // a lone value is a one-item collection
            other => T::from_script_result(other).map(|item| vec![item]),
        }
    }
}
