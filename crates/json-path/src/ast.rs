//! JSONPath abstract syntax tree (RFC 9535).
//!
//! The tree is immutable after parsing. Positions that only admit a
//! singular query hold [`SingularQuery`] rather than a general
//! [`FilterQuery`], so non-singular queries cannot appear there by
//! construction.

use std::fmt;

use serde_json::Value;

use crate::path::escape_name;

/// A compiled JSONPath query, anchored at `$`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    pub segments: Vec<Segment>,
}

impl JsonPath {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// True iff this query provably yields at most one node.
    pub fn is_singular(&self) -> bool {
        self.segments.iter().all(|segment| match segment {
            Segment::Child(selectors) => matches!(
                selectors.as_slice(),
                [Selector::Name(_)] | [Selector::Index(_)]
            ),
            Segment::Descendant(_) => false,
        })
    }
}

/// A path segment: one application of selectors to a nodelist.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Applies its selectors to each node.
    Child(Vec<Selector>),
    /// Applies its selectors to each node and all of its descendants (`..`).
    Descendant(Vec<Selector>),
}

impl Segment {
    pub fn selectors(&self) -> &[Selector] {
        match self {
            Segment::Child(selectors) | Segment::Descendant(selectors) => selectors,
        }
    }
}

/// Selector kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Member access by name: `.name`, `['key']`
    Name(String),
    /// All members or elements: `.*`, `[*]`
    Wildcard,
    /// Array element access: `[0]`, `[-1]`
    Index(i64),
    /// Array slice: `[start:end:step]`
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
    /// Filter selection: `[?expr]`
    Filter(LogicalOrExpr),
}

/// Disjunction of conjunctions: `a || b || ...`
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalOrExpr(pub Vec<LogicalAndExpr>);

/// Conjunction of basic expressions: `a && b && ...`
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalAndExpr(pub Vec<BasicExpr>);

/// The atoms of a filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum BasicExpr {
    /// A parenthesized sub-expression, optionally negated.
    Paren {
        negated: bool,
        expr: LogicalOrExpr,
    },
    /// A comparison of two comparables.
    Comparison(ComparisonExpr),
    /// An existence or function test, optionally negated.
    Test { negated: bool, expr: TestExpr },
}

/// Body of a test expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TestExpr {
    /// Non-empty test of a filter query.
    Query(FilterQuery),
    /// A function call of logical or nodes type.
    Function(FunctionCall),
}

/// Where a query embedded in a filter starts its walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `$` - the document root.
    Root,
    /// `@` - the current node under test.
    Current,
}

/// A general query embedded in a filter expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub anchor: Anchor,
    pub segments: Vec<Segment>,
}

impl FilterQuery {
    /// Structurally convert to a singular query, if only name and index
    /// child selectors occur.
    pub fn as_singular(&self) -> Option<SingularQuery> {
        let mut segments = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            let selectors = match segment {
                Segment::Child(selectors) => selectors,
                Segment::Descendant(_) => return None,
            };
            match selectors.as_slice() {
                [Selector::Name(name)] => segments.push(SingularSegment::Name(name.clone())),
                [Selector::Index(index)] => segments.push(SingularSegment::Index(*index)),
                _ => return None,
            }
        }
        Some(SingularQuery {
            anchor: self.anchor,
            segments,
        })
    }
}

/// A query guaranteed to select at most one node.
#[derive(Debug, Clone, PartialEq)]
pub struct SingularQuery {
    pub anchor: Anchor,
    pub segments: Vec<SingularSegment>,
}

/// Steps of a singular query.
#[derive(Debug, Clone, PartialEq)]
pub enum SingularSegment {
    Name(String),
    Index(i64),
}

/// A comparison between two comparables.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonExpr {
    pub left: Comparable,
    pub op: CompOp,
    pub right: Comparable,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Operands of a comparison. All are of value type.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparable {
    Literal(Value),
    Singular(SingularQuery),
    Function(FunctionCall),
}

/// A call to a registered function extension.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<FunctionArg>,
}

/// A function argument after type checking. A singular query passed into a
/// value-typed parameter is stored as [`FunctionArg::Singular`].
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArg {
    Literal(Value),
    Singular(SingularQuery),
    Query(FilterQuery),
    Logical(LogicalOrExpr),
    Function(FunctionCall),
}

// ---- Display: canonical, re-parseable rendering ----

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Child(selectors) => match selectors.as_slice() {
                [Selector::Name(name)] if is_shorthand_name(name) => write!(f, ".{name}"),
                [Selector::Wildcard] => write!(f, ".*"),
                selectors => write_bracketed(f, selectors),
            },
            Segment::Descendant(selectors) => match selectors.as_slice() {
                [Selector::Name(name)] if is_shorthand_name(name) => write!(f, "..{name}"),
                [Selector::Wildcard] => write!(f, "..*"),
                selectors => {
                    write!(f, "..")?;
                    write_bracketed(f, selectors)
                }
            },
        }
    }
}

fn write_bracketed(f: &mut fmt::Formatter<'_>, selectors: &[Selector]) -> fmt::Result {
    write!(f, "[")?;
    for (i, selector) in selectors.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{selector}")?;
    }
    write!(f, "]")
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Name(name) => write!(f, "'{}'", escape_name(name)),
            Selector::Wildcard => write!(f, "*"),
            Selector::Index(index) => write!(f, "{index}"),
            Selector::Slice { start, end, step } => {
                if let Some(start) = start {
                    write!(f, "{start}")?;
                }
                write!(f, ":")?;
                if let Some(end) = end {
                    write!(f, "{end}")?;
                }
                if let Some(step) = step {
                    write!(f, ":{step}")?;
                }
                Ok(())
            }
            Selector::Filter(expr) => write!(f, "?{expr}"),
        }
    }
}

impl fmt::Display for LogicalOrExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, expr) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " || ")?;
            }
            write!(f, "{expr}")?;
        }
        Ok(())
    }
}

impl fmt::Display for LogicalAndExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, expr) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " && ")?;
            }
            write!(f, "{expr}")?;
        }
        Ok(())
    }
}

impl fmt::Display for BasicExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasicExpr::Paren { negated, expr } => {
                if *negated {
                    write!(f, "!({expr})")
                } else {
                    write!(f, "({expr})")
                }
            }
            BasicExpr::Comparison(cmp) => write!(f, "{cmp}"),
            BasicExpr::Test { negated, expr } => {
                if *negated {
                    write!(f, "!{expr}")
                } else {
                    write!(f, "{expr}")
                }
            }
        }
    }
}

impl fmt::Display for TestExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestExpr::Query(query) => write!(f, "{query}"),
            TestExpr::Function(call) => write!(f, "{call}"),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Root => write!(f, "$"),
            Anchor::Current => write!(f, "@"),
        }
    }
}

impl fmt::Display for FilterQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.anchor)?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SingularQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.anchor)?;
        for segment in &self.segments {
            match segment {
                SingularSegment::Name(name) => write!(f, "['{}']", escape_name(name))?,
                SingularSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for ComparisonExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

impl fmt::Display for CompOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompOp::Eq => write!(f, "=="),
            CompOp::Ne => write!(f, "!="),
            CompOp::Lt => write!(f, "<"),
            CompOp::Le => write!(f, "<="),
            CompOp::Gt => write!(f, ">"),
            CompOp::Ge => write!(f, ">="),
        }
    }
}

impl fmt::Display for Comparable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparable::Literal(value) => write!(f, "{value}"),
            Comparable::Singular(query) => write!(f, "{query}"),
            Comparable::Function(call) => write!(f, "{call}"),
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for FunctionArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionArg::Literal(value) => write!(f, "{value}"),
            FunctionArg::Singular(query) => write!(f, "{query}"),
            FunctionArg::Query(query) => write!(f, "{query}"),
            FunctionArg::Logical(expr) => write!(f, "{expr}"),
            FunctionArg::Function(call) => write!(f, "{call}"),
        }
    }
}

/// True iff the name can be rendered in dotted shorthand form.
fn is_shorthand_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || !c.is_ascii() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii())
}
