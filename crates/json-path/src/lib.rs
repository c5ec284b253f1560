//! JSONPath (RFC 9535) query engine.
//!
//! This crate compiles JSONPath query strings into an immutable AST and
//! evaluates them against [`serde_json::Value`] documents, producing a
//! [`NodeList`] of (normalized path, value) pairs in document order as
//! specified in [RFC 9535](https://www.rfc-editor.org/rfc/rfc9535.html).
//!
//! # Example
//!
//! ```
//! use json_path::JsonPath;
//! use serde_json::json;
//!
//! let query = JsonPath::compile("$.store.book[?@.price < 10].title").unwrap();
//!
//! let doc = json!({
//!     "store": {
//!         "book": [
//!             {"title": "Sayings of the Century", "price": 8.95},
//!             {"title": "Sword of Honour", "price": 12.99}
//!         ]
//!     }
//! });
//!
//! let nodes = query.evaluate(&doc).unwrap();
//! assert_eq!(nodes.values(), vec![&json!("Sayings of the Century")]);
//! assert_eq!(nodes.paths(), vec!["$['store']['book'][0]['title']"]);
//! ```
//!
//! # Whitespace
//!
//! The parser is whitespace-lenient: space, tab, LF, and CR may appear
//! between any two tokens outside string literals, which is a superset of
//! the whitespace RFC 9535 permits.

use serde_json::Value;
use thiserror::Error;

mod token;
pub use token::{Span, Token, TokenKind};

mod lexer;
pub use lexer::{lex, LexError};

mod ast;
pub use ast::*;

mod parser;
pub use parser::{JsonPathParser, ParseError, ValidateError};

pub mod functions;
pub use functions::{DefaultRegexEngine, ExpressionType, FunctionSignature, RegexEngine, RegexError};

mod eval;
pub use eval::{EvalError, JsonPathEval, Node, NodeList};

mod path;
pub use path::{NormalizedPath, PathStep};

/// Compile-time error: the query failed lexing, parsing, or validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("validation error: {0}")]
    Validate(#[from] ValidateError),
}

impl Error {
    /// Byte range of the offending source text.
    pub fn span(&self) -> Span {
        match self {
            Error::Lex(e) => e.span(),
            Error::Parse(e) => e.span(),
            Error::Validate(e) => e.span(),
        }
    }
}

/// Compile a JSONPath query string.
pub fn compile(query: &str) -> Result<JsonPath, Error> {
    JsonPathParser::parse(query)
}

impl JsonPath {
    /// Compile a JSONPath query string.
    pub fn compile(query: &str) -> Result<Self, Error> {
        JsonPathParser::parse(query)
    }

    /// Evaluate this query against a document with the default regex
    /// engine. The returned nodelist borrows from the document.
    pub fn evaluate<'a>(&self, doc: &'a Value) -> Result<NodeList<'a>, EvalError> {
        JsonPathEval::eval(self, doc)
    }

    /// Evaluate with a caller-supplied regex engine.
    pub fn evaluate_with<'a>(
        &self,
        doc: &'a Value,
        engine: &dyn RegexEngine,
    ) -> Result<NodeList<'a>, EvalError> {
        JsonPathEval::eval_with(self, doc, engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval_values(query: &str, doc: &Value) -> Vec<Value> {
        let path = JsonPath::compile(query)
            .unwrap_or_else(|e| panic!("compile failed for '{query}': {e}"));
        path.evaluate(doc)
            .unwrap_or_else(|e| panic!("eval failed for '{query}': {e}"))
            .values()
            .into_iter()
            .cloned()
            .collect()
    }

    #[test]
    fn test_eval_root() {
        let doc = json!({"a": 1});
        assert_eq!(eval_values("$", &doc), vec![doc.clone()]);
    }

    #[test]
    fn test_eval_dot_notation() {
        let doc = json!({"a": {"b": 42}});
        assert_eq!(eval_values("$.a.b", &doc), vec![json!(42)]);
    }

    #[test]
    fn test_eval_bracket_notation() {
        let doc = json!({"store name": {"x": 1}});
        assert_eq!(eval_values("$['store name'].x", &doc), vec![json!(1)]);
    }

    #[test]
    fn test_eval_wildcard_object_order() {
        let doc = json!({"b": 1, "a": 2, "c": 3});
        assert_eq!(
            eval_values("$.*", &doc),
            vec![json!(1), json!(2), json!(3)]
        );
    }

    #[test]
    fn test_eval_array_index() {
        let doc = json!([1, 2, 3, 4, 5]);
        assert_eq!(eval_values("$[2]", &doc), vec![json!(3)]);
        assert_eq!(eval_values("$[-1]", &doc), vec![json!(5)]);
        assert!(eval_values("$[10]", &doc).is_empty());
    }

    #[test]
    fn test_eval_missing_member() {
        let doc = json!({"a": 1});
        assert!(eval_values("$.missing", &doc).is_empty());
    }

    #[test]
    fn test_eval_filter() {
        let doc = json!([
            {"name": "Alice", "age": 30},
            {"name": "Bob", "age": 25}
        ]);
        assert_eq!(
            eval_values("$[?@.age > 28].name", &doc),
            vec![json!("Alice")]
        );
    }

    #[test]
    fn test_compile_error_kinds_and_spans() {
        match JsonPath::compile("$['abc") {
            Err(err @ Error::Lex(LexError::UnterminatedString { .. })) => {
                assert_eq!(err.span(), (2, 6));
            }
            other => panic!("expected lex error, got {other:?}"),
        }
        match JsonPath::compile("@.a") {
            Err(err @ Error::Parse(ParseError::Unexpected { .. })) => {
                assert_eq!(err.span(), (0, 1));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        match JsonPath::compile("$[?@.* == 1]") {
            Err(err @ Error::Validate(ValidateError::NonSingularQuery { .. })) => {
                assert_eq!(err.span(), (3, 6));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_messages() {
        let err = JsonPath::compile("$.a]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error: unexpected trailing tokens after query"
        );
        let err = JsonPath::compile("$[?length(@.a)]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: result of length() must be compared"
        );
    }

    #[test]
    fn test_shared_ast_across_documents() {
        let query = JsonPath::compile("$.a").unwrap();
        let first = json!({"a": 1});
        let second = json!({"a": 2});
        assert_eq!(query.evaluate(&first).unwrap().values(), vec![&json!(1)]);
        assert_eq!(query.evaluate(&second).unwrap().values(), vec![&json!(2)]);
        // repeated evaluation is deterministic
        assert_eq!(
            query.evaluate(&first).unwrap(),
            query.evaluate(&first).unwrap()
        );
    }

    #[test]
    fn test_nodelist_accessors() {
        let doc = json!({"a": [10, 20]});
        let query = JsonPath::compile("$.a[*]").unwrap();
        let nodes = query.evaluate(&doc).unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(!nodes.is_empty());
        assert_eq!(nodes[0].value, &json!(10));
        assert_eq!(nodes.get(1).map(|n| n.value), Some(&json!(20)));
        assert_eq!(nodes.first().map(|n| n.path.to_string()).as_deref(), Some("$['a'][0]"));
        assert_eq!(nodes.iter().count(), 2);
        let collected: Vec<_> = (&nodes).into_iter().map(|n| n.value).collect();
        assert_eq!(collected, nodes.values());
    }
}
