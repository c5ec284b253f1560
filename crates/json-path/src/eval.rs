//! JSONPath evaluator.
//!
//! Walks a compiled query against a JSON document, producing a [`NodeList`]
//! of (normalized path, value) pairs in document order. Evaluation never
//! mutates the document and borrows all emitted values from it.
//!
//! The only runtime failure is a regex engine rejecting a `match()` or
//! `search()` pattern. Absent keys, out-of-range indices, and type
//! mismatches in comparisons yield empty results or `false`, not errors.

use std::rc::Rc;

use serde_json::{Number, Value};
use thiserror::Error;

use crate::ast::*;
use crate::functions::{
    self, DefaultRegexEngine, FunctionResult, PathValue, RegexEngine, RegexError,
};
use crate::path::{NormalizedPath, PathChain, PathStep};

/// Evaluation-time error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("{function}(): {source}")]
    Regex {
        function: &'static str,
        source: RegexError,
    },
}

/// One selected location: a normalized path and the value it references.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'a> {
    pub path: NormalizedPath,
    pub value: &'a Value,
}

/// An ordered sequence of nodes in document order. Duplicates are
/// permitted and preserved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeList<'a>(Vec<Node<'a>>);

impl<'a> NodeList<'a> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node<'a>> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Node<'a>> {
        self.0.get(index)
    }

    pub fn first(&self) -> Option<&Node<'a>> {
        self.0.first()
    }

    /// The selected values, in document order.
    pub fn values(&self) -> Vec<&'a Value> {
        self.0.iter().map(|node| node.value).collect()
    }

    /// The canonical normalized-path strings, in document order.
    pub fn paths(&self) -> Vec<String> {
        self.0.iter().map(|node| node.path.to_string()).collect()
    }
}

impl<'a> IntoIterator for NodeList<'a> {
    type Item = Node<'a>;
    type IntoIter = std::vec::IntoIter<Node<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, 'b> IntoIterator for &'b NodeList<'a> {
    type Item = &'b Node<'a>;
    type IntoIter = std::slice::Iter<'b, Node<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> std::ops::Index<usize> for NodeList<'a> {
    type Output = Node<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// JSONPath evaluator.
pub struct JsonPathEval;

impl JsonPathEval {
    /// Evaluate a compiled query against a document with the default regex
    /// engine.
    pub fn eval<'a>(path: &JsonPath, doc: &'a Value) -> Result<NodeList<'a>, EvalError> {
        Self::eval_with(path, doc, &DefaultRegexEngine)
    }

    /// Evaluate with a caller-supplied regex engine.
    pub fn eval_with<'a>(
        path: &JsonPath,
        doc: &'a Value,
        engine: &dyn RegexEngine,
    ) -> Result<NodeList<'a>, EvalError> {
        let evaluator = Evaluator { root: doc, engine };
        let frames = evaluator.walk(&path.segments, doc)?;
        Ok(NodeList(
            frames
                .into_iter()
                .map(|(chain, value)| Node {
                    path: PathChain::flatten(&chain),
                    value,
                })
                .collect(),
        ))
    }
}

/// A propagating node: its path so far and the value it references.
type Frame<'a> = (Option<Rc<PathChain>>, &'a Value);

struct Evaluator<'a, 'e> {
    root: &'a Value,
    engine: &'e dyn RegexEngine,
}

impl<'a> Evaluator<'a, '_> {
    fn walk(&self, segments: &[Segment], start: &'a Value) -> Result<Vec<Frame<'a>>, EvalError> {
        let mut frames: Vec<Frame<'a>> = vec![(None, start)];
        for segment in segments {
            let mut next = Vec::new();
            for frame in &frames {
                self.apply_segment(segment, frame, &mut next)?;
            }
            frames = next;
        }
        Ok(frames)
    }

    fn apply_segment(
        &self,
        segment: &Segment,
        frame: &Frame<'a>,
        out: &mut Vec<Frame<'a>>,
    ) -> Result<(), EvalError> {
        match segment {
            Segment::Child(selectors) => {
                for selector in selectors {
                    self.apply_selector(selector, frame, out)?;
                }
            }
            Segment::Descendant(selectors) => self.descend(selectors, frame, out)?,
        }
        Ok(())
    }

    /// Pre-order, depth-first, left-to-right: apply the selectors at each
    /// visited node, then recurse into its children.
    fn descend(
        &self,
        selectors: &[Selector],
        frame: &Frame<'a>,
        out: &mut Vec<Frame<'a>>,
    ) -> Result<(), EvalError> {
        for selector in selectors {
            self.apply_selector(selector, frame, out)?;
        }
        match frame.1 {
            Value::Object(map) => {
                for (key, child) in map {
                    let chain = PathChain::extend(&frame.0, PathStep::Name(key.clone()));
                    self.descend(selectors, &(chain, child), out)?;
                }
            }
            Value::Array(arr) => {
                for (index, child) in arr.iter().enumerate() {
                    let chain = PathChain::extend(&frame.0, PathStep::Index(index));
                    self.descend(selectors, &(chain, child), out)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn apply_selector(
        &self,
        selector: &Selector,
        frame: &Frame<'a>,
        out: &mut Vec<Frame<'a>>,
    ) -> Result<(), EvalError> {
        let chain = &frame.0;
        let value = frame.1;
        match selector {
            Selector::Name(name) => {
                if let Value::Object(map) = value {
                    if let Some(child) = map.get(name) {
                        out.push((
                            PathChain::extend(chain, PathStep::Name(name.clone())),
                            child,
                        ));
                    }
                }
            }
            Selector::Wildcard => match value {
                Value::Object(map) => {
                    for (key, child) in map.iter() {
                        out.push((PathChain::extend(chain, PathStep::Name(key.clone())), child));
                    }
                }
                Value::Array(arr) => {
                    for (index, child) in arr.iter().enumerate() {
                        out.push((PathChain::extend(chain, PathStep::Index(index)), child));
                    }
                }
                _ => {}
            },
            Selector::Index(index) => {
                if let Value::Array(arr) = value {
                    if let Some(normalized) = normalize_index(*index, arr.len()) {
                        out.push((
                            PathChain::extend(chain, PathStep::Index(normalized)),
                            &arr[normalized],
                        ));
                    }
                }
            }
            Selector::Slice { start, end, step } => {
                if let Value::Array(arr) = value {
                    for index in slice_indices(*start, *end, *step, arr.len()) {
                        out.push((PathChain::extend(chain, PathStep::Index(index)), &arr[index]));
                    }
                }
            }
            Selector::Filter(expr) => match value {
                Value::Object(map) => {
                    for (key, child) in map.iter() {
                        if self.test_logical(expr, child)? {
                            out.push((
                                PathChain::extend(chain, PathStep::Name(key.clone())),
                                child,
                            ));
                        }
                    }
                }
                Value::Array(arr) => {
                    for (index, child) in arr.iter().enumerate() {
                        if self.test_logical(expr, child)? {
                            out.push((PathChain::extend(chain, PathStep::Index(index)), child));
                        }
                    }
                }
                _ => {}
            },
        }
        Ok(())
    }

    // ---- filter expressions ----

    fn test_logical(&self, expr: &LogicalOrExpr, current: &'a Value) -> Result<bool, EvalError> {
        for conjunction in &expr.0 {
            if self.test_logical_and(conjunction, current)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn test_logical_and(
        &self,
        expr: &LogicalAndExpr,
        current: &'a Value,
    ) -> Result<bool, EvalError> {
        for basic in &expr.0 {
            if !self.test_basic(basic, current)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn test_basic(&self, expr: &BasicExpr, current: &'a Value) -> Result<bool, EvalError> {
        match expr {
            BasicExpr::Paren { negated, expr } => {
                Ok(self.test_logical(expr, current)? != *negated)
            }
            BasicExpr::Comparison(cmp) => {
                let left = self.eval_comparable(&cmp.left, current)?;
                let right = self.eval_comparable(&cmp.right, current)?;
                Ok(compare(cmp.op, &left, &right))
            }
            BasicExpr::Test { negated, expr } => {
                let result = match expr {
                    TestExpr::Query(query) => !self.eval_filter_query(query, current)?.is_empty(),
                    TestExpr::Function(call) => match self.eval_function(call, current)? {
                        FunctionResult::Logical(b) => b,
                        FunctionResult::Nodes(nodes) => !nodes.is_empty(),
                        // value-typed calls are rejected in test position at
                        // parse time
                        FunctionResult::Value(_) => false,
                    },
                };
                Ok(result != *negated)
            }
        }
    }

    fn eval_filter_query(
        &self,
        query: &FilterQuery,
        current: &'a Value,
    ) -> Result<Vec<&'a Value>, EvalError> {
        let start = match query.anchor {
            Anchor::Root => self.root,
            Anchor::Current => current,
        };
        Ok(self
            .walk(&query.segments, start)?
            .into_iter()
            .map(|(_, value)| value)
            .collect())
    }

    fn eval_singular(&self, query: &SingularQuery, current: &'a Value) -> PathValue<'a> {
        let mut node = match query.anchor {
            Anchor::Root => self.root,
            Anchor::Current => current,
        };
        for segment in &query.segments {
            node = match segment {
                SingularSegment::Name(name) => match node {
                    Value::Object(map) => match map.get(name) {
                        Some(child) => child,
                        None => return PathValue::Nothing,
                    },
                    _ => return PathValue::Nothing,
                },
                SingularSegment::Index(index) => match node {
                    Value::Array(arr) => match normalize_index(*index, arr.len()) {
                        Some(normalized) => &arr[normalized],
                        None => return PathValue::Nothing,
                    },
                    _ => return PathValue::Nothing,
                },
            };
        }
        PathValue::Borrowed(node)
    }

    fn eval_comparable(
        &self,
        comparable: &Comparable,
        current: &'a Value,
    ) -> Result<PathValue<'a>, EvalError> {
        match comparable {
            Comparable::Literal(value) => Ok(PathValue::Owned(value.clone())),
            Comparable::Singular(query) => Ok(self.eval_singular(query, current)),
            Comparable::Function(call) => match self.eval_function(call, current)? {
                FunctionResult::Value(value) => Ok(value),
                // comparable calls are value-typed by construction
                _ => Ok(PathValue::Nothing),
            },
        }
    }

    fn eval_function(
        &self,
        call: &FunctionCall,
        current: &'a Value,
    ) -> Result<FunctionResult<'a>, EvalError> {
        match call.name.as_str() {
            "length" => {
                let value = self.arg_value(call, 0, current)?;
                Ok(FunctionResult::Value(functions::length(&value)))
            }
            "count" => {
                let nodes = self.arg_nodes(call, 0, current)?;
                Ok(FunctionResult::Value(functions::count(&nodes)))
            }
            "value" => {
                let nodes = self.arg_nodes(call, 0, current)?;
                Ok(FunctionResult::Value(functions::value_of(nodes)))
            }
            "match" | "search" => {
                let anchored = call.name == "match";
                let text = self.arg_value(call, 0, current)?;
                let pattern = self.arg_value(call, 1, current)?;
                let matched = functions::regex_test(self.engine, &text, &pattern, anchored)
                    .map_err(|source| EvalError::Regex {
                        function: if anchored { "match" } else { "search" },
                        source,
                    })?;
                Ok(FunctionResult::Logical(matched))
            }
            // unknown names are rejected at parse time
            _ => Ok(FunctionResult::Value(PathValue::Nothing)),
        }
    }

    fn arg_value(
        &self,
        call: &FunctionCall,
        index: usize,
        current: &'a Value,
    ) -> Result<PathValue<'a>, EvalError> {
        let arg = match call.args.get(index) {
            Some(arg) => arg,
            None => return Ok(PathValue::Nothing),
        };
        match arg {
            FunctionArg::Literal(value) => Ok(PathValue::Owned(value.clone())),
            FunctionArg::Singular(query) => Ok(self.eval_singular(query, current)),
            FunctionArg::Function(call) => match self.eval_function(call, current)? {
                FunctionResult::Value(value) => Ok(value),
                _ => Ok(PathValue::Nothing),
            },
            FunctionArg::Query(_) | FunctionArg::Logical(_) => Ok(PathValue::Nothing),
        }
    }

    fn arg_nodes(
        &self,
        call: &FunctionCall,
        index: usize,
        current: &'a Value,
    ) -> Result<Vec<&'a Value>, EvalError> {
        let arg = match call.args.get(index) {
            Some(arg) => arg,
            None => return Ok(Vec::new()),
        };
        match arg {
            FunctionArg::Query(query) => self.eval_filter_query(query, current),
            FunctionArg::Singular(query) => {
                Ok(match self.eval_singular(query, current) {
                    PathValue::Borrowed(value) => vec![value],
                    _ => Vec::new(),
                })
            }
            FunctionArg::Function(call) => match self.eval_function(call, current)? {
                FunctionResult::Nodes(nodes) => Ok(nodes),
                _ => Ok(Vec::new()),
            },
            FunctionArg::Literal(_) | FunctionArg::Logical(_) => Ok(Vec::new()),
        }
    }
}

/// Resolve a possibly negative index against an array length.
fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let normalized = if index < 0 { len + index } else { index };
    if (0..len).contains(&normalized) {
        Some(normalized as usize)
    } else {
        None
    }
}

/// Slice bounds per RFC 9535 section 2.3.4.2, including negative steps.
fn slice_indices(
    start: Option<i64>,
    end: Option<i64>,
    step: Option<i64>,
    len: usize,
) -> Vec<usize> {
    let len = len as i64;
    let step = step.unwrap_or(1);
    // step 0 is rejected at parse time
    if step == 0 || len == 0 {
        return Vec::new();
    }

    let normalize = |i: i64| if i < 0 { len + i } else { i };
    let mut indices = Vec::new();
    if step > 0 {
        let lower = normalize(start.unwrap_or(0)).clamp(0, len);
        let upper = normalize(end.unwrap_or(len)).clamp(0, len);
        let mut i = lower;
        while i < upper {
            indices.push(i as usize);
            i += step;
        }
    } else {
        let upper = normalize(start.unwrap_or(len - 1)).clamp(-1, len - 1);
        let lower = normalize(end.unwrap_or(-len - 1)).clamp(-1, len - 1);
        let mut i = upper;
        while i > lower {
            indices.push(i as usize);
            i += step;
        }
    }
    indices
}

fn compare(op: CompOp, left: &PathValue<'_>, right: &PathValue<'_>) -> bool {
    match op {
        CompOp::Eq => equal_to(left, right),
        CompOp::Ne => !equal_to(left, right),
        CompOp::Lt => less_than(left, right),
        CompOp::Le => less_than(left, right) || equal_to(left, right),
        CompOp::Gt => less_than(right, left),
        CompOp::Ge => less_than(right, left) || equal_to(left, right),
    }
}

/// `==` is true when both sides are nothing, or both are present and
/// deeply equal.
fn equal_to(left: &PathValue<'_>, right: &PathValue<'_>) -> bool {
    match (left.as_value(), right.as_value()) {
        (None, None) => true,
        (Some(left), Some(right)) => value_equal(left, right),
        _ => false,
    }
}

/// `<` is defined only for two numbers or two strings; everything else is
/// false, including anything involving nothing.
fn less_than(left: &PathValue<'_>, right: &PathValue<'_>) -> bool {
    match (left.as_value(), right.as_value()) {
        (Some(Value::Number(left)), Some(Value::Number(right))) => {
            match (left.as_f64(), right.as_f64()) {
                (Some(left), Some(right)) => left < right,
                _ => false,
            }
        }
        (Some(Value::String(left)), Some(Value::String(right))) => left < right,
        _ => false,
    }
}

/// Deep JSON equality with numeric cross-representation comparison, so
/// `1 == 1.0` holds at any depth.
fn value_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => number_equal(left, right),
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left.iter().zip(right).all(|(l, r)| value_equal(l, r))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .all(|(key, l)| right.get(key).map_or(false, |r| value_equal(l, r)))
        }
        _ => left == right,
    }
}

fn number_equal(left: &Number, right: &Number) -> bool {
    if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
        left == right
    } else if let (Some(left), Some(right)) = (left.as_u64(), right.as_u64()) {
        left == right
    } else if let (Some(left), Some(right)) = (left.as_f64(), right.as_f64()) {
        left == right
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_index() {
        assert_eq!(normalize_index(0, 3), Some(0));
        assert_eq!(normalize_index(2, 3), Some(2));
        assert_eq!(normalize_index(3, 3), None);
        assert_eq!(normalize_index(-1, 3), Some(2));
        assert_eq!(normalize_index(-3, 3), Some(0));
        assert_eq!(normalize_index(-4, 3), None);
        assert_eq!(normalize_index(0, 0), None);
    }

    #[test]
    fn test_slice_indices_positive_step() {
        assert_eq!(slice_indices(Some(1), Some(3), None, 7), vec![1, 2]);
        assert_eq!(slice_indices(Some(5), None, None, 7), vec![5, 6]);
        assert_eq!(slice_indices(Some(1), Some(5), Some(2), 7), vec![1, 3]);
        assert_eq!(slice_indices(None, None, None, 3), vec![0, 1, 2]);
        // degenerate ranges
        assert_eq!(slice_indices(Some(5), Some(1), None, 7), Vec::<usize>::new());
        assert_eq!(slice_indices(Some(10), Some(20), None, 3), Vec::<usize>::new());
        assert_eq!(slice_indices(None, None, None, 0), Vec::<usize>::new());
    }

    #[test]
    fn test_slice_indices_negative_step() {
        assert_eq!(slice_indices(Some(5), Some(1), Some(-2), 7), vec![5, 3]);
        assert_eq!(
            slice_indices(None, None, Some(-1), 5),
            vec![4, 3, 2, 1, 0]
        );
        assert_eq!(slice_indices(Some(1), Some(5), Some(-1), 7), Vec::<usize>::new());
        // negative bounds normalize from the end
        assert_eq!(slice_indices(Some(-1), Some(-4), Some(-1), 5), vec![4, 3, 2]);
    }

    #[test]
    fn test_slice_step_zero_selects_nothing() {
        assert_eq!(slice_indices(Some(0), Some(5), Some(0), 5), Vec::<usize>::new());
    }

    #[test]
    fn test_number_equality_across_representations() {
        let left = PathValue::Owned(json!(1));
        let right = PathValue::Owned(json!(1.0));
        assert!(compare(CompOp::Eq, &left, &right));
        assert!(compare(CompOp::Le, &left, &right));
        assert!(!compare(CompOp::Ne, &left, &right));
    }

    #[test]
    fn test_nested_number_equality() {
        let left = PathValue::Owned(json!([1, {"a": 2}]));
        let right = PathValue::Owned(json!([1.0, {"a": 2.0}]));
        assert!(compare(CompOp::Eq, &left, &right));
    }

    #[test]
    fn test_nothing_comparisons() {
        let nothing = PathValue::Nothing;
        let null = PathValue::Owned(json!(null));
        assert!(compare(CompOp::Eq, &nothing, &PathValue::Nothing));
        assert!(!compare(CompOp::Eq, &nothing, &null));
        assert!(compare(CompOp::Ne, &nothing, &null));
        assert!(!compare(CompOp::Lt, &nothing, &null));
        assert!(!compare(CompOp::Le, &nothing, &null));
        // nothing <= nothing holds through equality
        assert!(compare(CompOp::Le, &nothing, &PathValue::Nothing));
    }

    #[test]
    fn test_mixed_type_ordering_is_false() {
        let number = PathValue::Owned(json!(1));
        let string = PathValue::Owned(json!("1"));
        assert!(!compare(CompOp::Lt, &number, &string));
        assert!(!compare(CompOp::Gt, &number, &string));
        assert!(!compare(CompOp::Eq, &number, &string));
        assert!(compare(CompOp::Ne, &number, &string));
    }

    #[test]
    fn test_string_ordering_by_code_point() {
        let a = PathValue::Owned(json!("a"));
        let b = PathValue::Owned(json!("b"));
        assert!(compare(CompOp::Lt, &a, &b));
        assert!(compare(CompOp::Ge, &b, &a));
        assert!(compare(CompOp::Le, &a, &PathValue::Owned(json!("a"))));
    }

    #[test]
    fn test_object_equality_is_unordered() {
        let left = PathValue::Owned(json!({"a": 1, "b": 2}));
        let right = PathValue::Owned(json!({"b": 2, "a": 1}));
        assert!(compare(CompOp::Eq, &left, &right));
    }
}
