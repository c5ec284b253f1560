//! Function extensions (RFC 9535 section 2.4) and their type system.
//!
//! Every filter sub-expression has exactly one of three static types:
//! a single JSON value or nothing ([`ExpressionType::Value`]), a boolean
//! ([`ExpressionType::Logical`]), or a nodelist ([`ExpressionType::Nodes`]).
//! The parser checks function signatures against these tags; the evaluator
//! dispatches on the AST shape alone.

use std::fmt;

use serde_json::{Number, Value};
use thiserror::Error;

/// Static type of a filter sub-expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionType {
    /// A single JSON value, or nothing.
    Value,
    /// True or false.
    Logical,
    /// A nodelist.
    Nodes,
}

impl fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionType::Value => write!(f, "Value"),
            ExpressionType::Logical => write!(f, "Logical"),
            ExpressionType::Nodes => write!(f, "Nodes"),
        }
    }
}

/// Declared parameter and result types of a function extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSignature {
    pub params: &'static [ExpressionType],
    pub returns: ExpressionType,
}

/// Look up the signature of a standard function extension.
pub fn signature(name: &str) -> Option<FunctionSignature> {
    use ExpressionType::{Logical, Nodes, Value};
    match name {
        "length" => Some(FunctionSignature {
            params: &[Value],
            returns: Value,
        }),
        "count" => Some(FunctionSignature {
            params: &[Nodes],
            returns: Value,
        }),
        "match" => Some(FunctionSignature {
            params: &[Value, Value],
            returns: Logical,
        }),
        "search" => Some(FunctionSignature {
            params: &[Value, Value],
            returns: Logical,
        }),
        "value" => Some(FunctionSignature {
            params: &[Nodes],
            returns: Value,
        }),
        _ => None,
    }
}

/// A single JSON value or the distinguished absent value. Distinct from
/// JSON `null` and from an empty nodelist.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PathValue<'a> {
    Nothing,
    Borrowed(&'a Value),
    Owned(Value),
}

impl PathValue<'_> {
    pub(crate) fn as_value(&self) -> Option<&Value> {
        match self {
            PathValue::Nothing => None,
            PathValue::Borrowed(value) => Some(value),
            PathValue::Owned(value) => Some(value),
        }
    }
}

/// What a function call produced, tagged by its declared result type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FunctionResult<'a> {
    Value(PathValue<'a>),
    Logical(bool),
    Nodes(Vec<&'a Value>),
}

/// `length()`: code points of a string, elements of an array, members of an
/// object; nothing otherwise.
pub(crate) fn length<'a>(value: &PathValue<'a>) -> PathValue<'a> {
    let length = match value.as_value() {
        Some(Value::String(s)) => s.chars().count(),
        Some(Value::Array(arr)) => arr.len(),
        Some(Value::Object(map)) => map.len(),
        _ => return PathValue::Nothing,
    };
    PathValue::Owned(Value::Number(Number::from(length)))
}

/// `count()`: the number of nodes in a nodelist.
pub(crate) fn count<'a>(nodes: &[&'a Value]) -> PathValue<'a> {
    PathValue::Owned(Value::Number(Number::from(nodes.len())))
}

/// `value()`: the value of a singleton nodelist; nothing otherwise.
pub(crate) fn value_of<'a>(mut nodes: Vec<&'a Value>) -> PathValue<'a> {
    if nodes.len() == 1 {
        PathValue::Borrowed(nodes.remove(0))
    } else {
        PathValue::Nothing
    }
}

/// `match()` / `search()`: both operands must be strings; the pattern is
/// handed to the regex engine verbatim.
pub(crate) fn regex_test(
    engine: &dyn RegexEngine,
    text: &PathValue<'_>,
    pattern: &PathValue<'_>,
    anchored: bool,
) -> Result<bool, RegexError> {
    match (text.as_value(), pattern.as_value()) {
        (Some(Value::String(text)), Some(Value::String(pattern))) => {
            engine.test(pattern, text, anchored)
        }
        _ => Ok(false),
    }
}

/// Error raised by a [`RegexEngine`] for an unsupported or malformed
/// pattern.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{0}")]
pub struct RegexError(pub String);

/// Regular-expression oracle behind `match()` and `search()`.
///
/// Patterns are I-Regexp (RFC 9485) as written in the query; adapting them
/// to the host regex facility is the engine's concern. `anchored` requests
/// a whole-string match.
pub trait RegexEngine {
    fn test(&self, pattern: &str, text: &str, anchored: bool) -> Result<bool, RegexError>;
}

/// Default engine backed by the `regex` crate. Anchoring wraps the pattern
/// as `^(?:pattern)$`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRegexEngine;

impl RegexEngine for DefaultRegexEngine {
    fn test(&self, pattern: &str, text: &str, anchored: bool) -> Result<bool, RegexError> {
        let pattern = if anchored {
            format!("^(?:{pattern})$")
        } else {
            pattern.to_string()
        };
        let regex = regex::Regex::new(&pattern).map_err(|e| RegexError(e.to_string()))?;
        Ok(regex.is_match(text))
    }
}
