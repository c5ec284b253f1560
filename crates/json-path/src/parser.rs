//! JSONPath parser (RFC 9535).
//!
//! Predictive recursive descent over the token stream with one-token
//! lookahead. Well-formedness violations surface as [`ParseError`];
//! grammar-accepted but rule-violating queries surface as
//! [`ValidateError`], raised during the same descent so every error carries
//! a source span.

use serde_json::{Number, Value};
use thiserror::Error as ThisError;

use crate::ast::*;
use crate::functions::{self, ExpressionType};
use crate::lexer::lex;
use crate::token::{Span, Token, TokenKind};
use crate::Error;

/// Largest array index and slice bound, per the I-JSON interoperability
/// range of RFC 9535.
const INTEROP_MAX: i64 = 9_007_199_254_740_991;

/// The token stream violates the grammar.
#[derive(Debug, ThisError, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    Unexpected {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("unexpected trailing tokens after query")]
    TrailingTokens { span: Span },
    #[error("empty bracketed selection")]
    EmptySelection { span: Span },
    #[error("comparison operators are non-associative")]
    NonAssociativeComparison { span: Span },
    #[error("filter expression literals must be compared")]
    UncomparedLiteral { span: Span },
}

impl ParseError {
    /// Byte range of the offending source text.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Unexpected { span, .. }
            | ParseError::TrailingTokens { span }
            | ParseError::EmptySelection { span }
            | ParseError::NonAssociativeComparison { span }
            | ParseError::UncomparedLiteral { span } => *span,
        }
    }
}

/// The query is well-formed but violates a validity rule.
#[derive(Debug, ThisError, Clone, PartialEq)]
pub enum ValidateError {
    #[error("non-singular query in a comparable position")]
    NonSingularQuery { span: Span },
    #[error("unknown function `{name}`")]
    UnknownFunction { name: String, span: Span },
    #[error("{name}() takes {expected} argument(s) but {found} were given")]
    FunctionArity {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },
    #[error("argument {index} of {name}() must be of {expected} type")]
    FunctionArgType {
        name: String,
        index: usize,
        expected: ExpressionType,
        span: Span,
    },
    #[error("result of {name}() is not comparable")]
    NotComparableFunction { name: String, span: Span },
    #[error("result of {name}() must be compared")]
    UncomparedFunction { name: String, span: Span },
    #[error("slice step of zero selects nothing")]
    SliceStepZero { span: Span },
    #[error("index {value} is outside the interoperable range")]
    IndexOutOfRange { value: i64, span: Span },
}

impl ValidateError {
    /// Byte range of the offending source text.
    pub fn span(&self) -> Span {
        match self {
            ValidateError::NonSingularQuery { span }
            | ValidateError::UnknownFunction { span, .. }
            | ValidateError::FunctionArity { span, .. }
            | ValidateError::FunctionArgType { span, .. }
            | ValidateError::NotComparableFunction { span, .. }
            | ValidateError::UncomparedFunction { span, .. }
            | ValidateError::SliceStepZero { span }
            | ValidateError::IndexOutOfRange { span, .. } => *span,
        }
    }
}

/// Token cursor with whitespace already discarded.
struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    fn new(tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .collect();
        TokenStream { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        // the lexer guarantees a trailing EndOfInput token
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// End offset of the most recently consumed token.
    fn prev_end(&self) -> usize {
        if self.pos == 0 {
            0
        } else {
            self.tokens[self.pos - 1].span.1
        }
    }
}

/// JSONPath parser.
pub struct JsonPathParser {
    stream: TokenStream,
}

impl JsonPathParser {
    /// Tokenize, parse, and validate a JSONPath query string.
    pub fn parse(input: &str) -> Result<JsonPath, Error> {
        let tokens = lex(input)?;
        let mut parser = JsonPathParser {
            stream: TokenStream::new(tokens),
        };
        parser.parse_query()
    }

    fn parse_query(&mut self) -> Result<JsonPath, Error> {
        match self.stream.peek().kind {
            TokenKind::RootIdentifier => {
                self.stream.next();
            }
            _ => return Err(self.unexpected("'$'")),
        }

        let segments = self.parse_segments()?;
        let token = self.stream.peek();
        match token.kind {
            TokenKind::EndOfInput => Ok(JsonPath::new(segments)),
            _ => Err(ParseError::TrailingTokens { span: token.span }.into()),
        }
    }

    fn parse_segments(&mut self) -> Result<Vec<Segment>, Error> {
        let mut segments = Vec::new();
        loop {
            match &self.stream.peek().kind {
                TokenKind::Dot => {
                    self.stream.next();
                    match self.stream.peek().kind.clone() {
                        TokenKind::Star => {
                            self.stream.next();
                            segments.push(Segment::Child(vec![Selector::Wildcard]));
                        }
                        kind => match shorthand_name(&kind) {
                            Some(name) => {
                                self.stream.next();
                                segments.push(Segment::Child(vec![Selector::Name(name)]));
                            }
                            None => return Err(self.unexpected("a member name or '*'")),
                        },
                    }
                }
                TokenKind::DoubleDot => {
                    self.stream.next();
                    match self.stream.peek().kind.clone() {
                        TokenKind::Star => {
                            self.stream.next();
                            segments.push(Segment::Descendant(vec![Selector::Wildcard]));
                        }
                        TokenKind::LBracket => {
                            segments.push(Segment::Descendant(self.parse_bracketed()?));
                        }
                        kind => match shorthand_name(&kind) {
                            Some(name) => {
                                self.stream.next();
                                segments.push(Segment::Descendant(vec![Selector::Name(name)]));
                            }
                            None => {
                                return Err(self.unexpected("a member name, '*', or '['"))
                            }
                        },
                    }
                }
                TokenKind::LBracket => {
                    segments.push(Segment::Child(self.parse_bracketed()?));
                }
                _ => break,
            }
        }
        Ok(segments)
    }

    fn parse_bracketed(&mut self) -> Result<Vec<Selector>, Error> {
        let open = self.stream.next();
        debug_assert_eq!(open.kind, TokenKind::LBracket);

        if self.stream.peek().kind == TokenKind::RBracket {
            let close = self.stream.next();
            return Err(ParseError::EmptySelection {
                span: (open.span.0, close.span.1),
            }
            .into());
        }

        let mut selectors = Vec::new();
        loop {
            selectors.push(self.parse_selector()?);
            let token = self.stream.peek();
            match token.kind {
                TokenKind::Comma => {
                    self.stream.next();
                }
                TokenKind::RBracket => {
                    self.stream.next();
                    break;
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }
        Ok(selectors)
    }

    fn parse_selector(&mut self) -> Result<Selector, Error> {
        let token = self.stream.peek().clone();
        match token.kind {
            TokenKind::StringLiteral(name) => {
                self.stream.next();
                Ok(Selector::Name(name))
            }
            TokenKind::Star => {
                self.stream.next();
                Ok(Selector::Wildcard)
            }
            TokenKind::IntLiteral(_) => {
                let index = self.take_index()?;
                if self.stream.peek().kind == TokenKind::Colon {
                    self.parse_slice(Some(index))
                } else {
                    Ok(Selector::Index(index))
                }
            }
            TokenKind::Colon => self.parse_slice(None),
            TokenKind::QuestionMark => {
                self.stream.next();
                Ok(Selector::Filter(self.parse_logical_or()?))
            }
            TokenKind::NumberLiteral(_) => Err(self.unexpected("an integer index")),
            _ => Err(self.unexpected("a selector")),
        }
    }

    fn parse_slice(&mut self, start: Option<i64>) -> Result<Selector, Error> {
        let colon = self.stream.next();
        debug_assert_eq!(colon.kind, TokenKind::Colon);

        let end = match self.stream.peek().kind {
            TokenKind::IntLiteral(_) => Some(self.take_index()?),
            _ => None,
        };

        let step = if self.stream.peek().kind == TokenKind::Colon {
            self.stream.next();
            match self.stream.peek().kind {
                TokenKind::IntLiteral(_) => {
                    let span = self.stream.peek().span;
                    let step = self.take_index()?;
                    if step == 0 {
                        return Err(ValidateError::SliceStepZero { span }.into());
                    }
                    Some(step)
                }
                _ => None,
            }
        } else {
            None
        };

        Ok(Selector::Slice { start, end, step })
    }

    /// Consume an integer token, enforcing the interoperable index range.
    fn take_index(&mut self) -> Result<i64, Error> {
        let token = self.stream.next();
        match token.kind {
            TokenKind::IntLiteral(value) => {
                if !(-INTEROP_MAX..=INTEROP_MAX).contains(&value) {
                    return Err(ValidateError::IndexOutOfRange {
                        value,
                        span: token.span,
                    }
                    .into());
                }
                Ok(value)
            }
            kind => Err(ParseError::Unexpected {
                expected: "an integer".to_string(),
                found: kind.to_string(),
                span: token.span,
            }
            .into()),
        }
    }

    // ---- filter expressions ----

    fn parse_logical_or(&mut self) -> Result<LogicalOrExpr, Error> {
        let first = self.parse_basic_expr()?;
        self.finish_logical_or(first)
    }

    /// Continue a disjunction whose first basic expression is already
    /// parsed. Used both by `parse_logical_or` and by function-argument
    /// parsing, which discovers only after one expression whether the
    /// argument is a lone query or a larger logical expression.
    fn finish_logical_or(&mut self, first: BasicExpr) -> Result<LogicalOrExpr, Error> {
        let mut conjuncts = vec![first];
        while self.stream.peek().kind == TokenKind::LogicalAnd {
            self.stream.next();
            conjuncts.push(self.parse_basic_expr()?);
        }

        let mut disjuncts = vec![LogicalAndExpr(conjuncts)];
        while self.stream.peek().kind == TokenKind::LogicalOr {
            self.stream.next();
            disjuncts.push(self.parse_logical_and()?);
        }
        Ok(LogicalOrExpr(disjuncts))
    }

    fn parse_logical_and(&mut self) -> Result<LogicalAndExpr, Error> {
        let mut conjuncts = vec![self.parse_basic_expr()?];
        while self.stream.peek().kind == TokenKind::LogicalAnd {
            self.stream.next();
            conjuncts.push(self.parse_basic_expr()?);
        }
        Ok(LogicalAndExpr(conjuncts))
    }

    fn parse_basic_expr(&mut self) -> Result<BasicExpr, Error> {
        let token = self.stream.peek().clone();
        match token.kind {
            TokenKind::Bang => {
                self.stream.next();
                if self.stream.peek().kind == TokenKind::LParen {
                    self.stream.next();
                    let expr = self.parse_logical_or()?;
                    self.expect(TokenKind::RParen, "')'")?;
                    Ok(BasicExpr::Paren {
                        negated: true,
                        expr,
                    })
                } else {
                    let expr = self.parse_test_expr()?;
                    Ok(BasicExpr::Test {
                        negated: true,
                        expr,
                    })
                }
            }
            TokenKind::LParen => {
                self.stream.next();
                let expr = self.parse_logical_or()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(BasicExpr::Paren {
                    negated: false,
                    expr,
                })
            }
            TokenKind::CurrentNodeIdentifier | TokenKind::RootIdentifier => {
                let start = token.span.0;
                let query = self.parse_filter_query()?;
                let span = (start, self.stream.prev_end());
                match self.peek_comparison_op() {
                    Some(op) => {
                        self.stream.next();
                        let left = self.comparable_query(query, span)?;
                        let right = self.parse_comparable()?;
                        self.reject_chained_comparison()?;
                        Ok(BasicExpr::Comparison(ComparisonExpr { left, op, right }))
                    }
                    None => Ok(BasicExpr::Test {
                        negated: false,
                        expr: TestExpr::Query(query),
                    }),
                }
            }
            TokenKind::FunctionName(_) => {
                let (call, span) = self.parse_function_call()?;
                match self.peek_comparison_op() {
                    Some(op) => {
                        self.stream.next();
                        self.ensure_comparable_result(&call, span)?;
                        let right = self.parse_comparable()?;
                        self.reject_chained_comparison()?;
                        Ok(BasicExpr::Comparison(ComparisonExpr {
                            left: Comparable::Function(call),
                            op,
                            right,
                        }))
                    }
                    None => {
                        self.ensure_test_result(&call, span)?;
                        Ok(BasicExpr::Test {
                            negated: false,
                            expr: TestExpr::Function(call),
                        })
                    }
                }
            }
            kind if is_literal(&kind) => {
                let span = token.span;
                let value = self.take_literal()?;
                match self.peek_comparison_op() {
                    Some(op) => {
                        self.stream.next();
                        let right = self.parse_comparable()?;
                        self.reject_chained_comparison()?;
                        Ok(BasicExpr::Comparison(ComparisonExpr {
                            left: Comparable::Literal(value),
                            op,
                            right,
                        }))
                    }
                    None => Err(ParseError::UncomparedLiteral { span }.into()),
                }
            }
            _ => Err(self.unexpected("a filter expression")),
        }
    }

    /// The operand of `!` when it is not a parenthesized group.
    fn parse_test_expr(&mut self) -> Result<TestExpr, Error> {
        match self.stream.peek().kind {
            TokenKind::CurrentNodeIdentifier | TokenKind::RootIdentifier => {
                Ok(TestExpr::Query(self.parse_filter_query()?))
            }
            TokenKind::FunctionName(_) => {
                let (call, span) = self.parse_function_call()?;
                self.ensure_test_result(&call, span)?;
                Ok(TestExpr::Function(call))
            }
            _ => Err(self.unexpected("a filter query or function call")),
        }
    }

    fn parse_filter_query(&mut self) -> Result<FilterQuery, Error> {
        let token = self.stream.next();
        let anchor = match token.kind {
            TokenKind::CurrentNodeIdentifier => Anchor::Current,
            TokenKind::RootIdentifier => Anchor::Root,
            kind => {
                return Err(ParseError::Unexpected {
                    expected: "'@' or '$'".to_string(),
                    found: kind.to_string(),
                    span: token.span,
                }
                .into())
            }
        };
        let segments = self.parse_segments()?;
        Ok(FilterQuery { anchor, segments })
    }

    fn parse_comparable(&mut self) -> Result<Comparable, Error> {
        let token = self.stream.peek().clone();
        match token.kind {
            kind if is_literal(&kind) => Ok(Comparable::Literal(self.take_literal()?)),
            TokenKind::CurrentNodeIdentifier | TokenKind::RootIdentifier => {
                let start = token.span.0;
                let query = self.parse_filter_query()?;
                let span = (start, self.stream.prev_end());
                self.comparable_query(query, span)
            }
            TokenKind::FunctionName(_) => {
                let (call, span) = self.parse_function_call()?;
                self.ensure_comparable_result(&call, span)?;
                Ok(Comparable::Function(call))
            }
            _ => Err(self.unexpected("a comparable expression")),
        }
    }

    /// Admit a query into a comparable position: it must be singular.
    fn comparable_query(&self, query: FilterQuery, span: Span) -> Result<Comparable, Error> {
        match query.as_singular() {
            Some(singular) => Ok(Comparable::Singular(singular)),
            None => Err(ValidateError::NonSingularQuery { span }.into()),
        }
    }

    fn parse_function_call(&mut self) -> Result<(FunctionCall, Span), Error> {
        let token = self.stream.next();
        let (name, start) = match token.kind {
            TokenKind::FunctionName(name) => (name, token.span.0),
            kind => {
                return Err(ParseError::Unexpected {
                    expected: "a function name".to_string(),
                    found: kind.to_string(),
                    span: token.span,
                }
                .into())
            }
        };
        self.expect(TokenKind::LParen, "'('")?;

        let mut args = Vec::new();
        if self.stream.peek().kind != TokenKind::RParen {
            loop {
                args.push(self.parse_function_arg()?);
                match self.stream.peek().kind {
                    TokenKind::Comma => {
                        self.stream.next();
                    }
                    TokenKind::RParen => break,
                    _ => return Err(self.unexpected("',' or ')'")),
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        let span = (start, self.stream.prev_end());

        let signature = match functions::signature(&name) {
            Some(signature) => signature,
            None => return Err(ValidateError::UnknownFunction { name, span }.into()),
        };
        if args.len() != signature.params.len() {
            return Err(ValidateError::FunctionArity {
                name,
                expected: signature.params.len(),
                found: args.len(),
                span,
            }
            .into());
        }
        let args = check_function_args(&name, signature.params, args, span)?;
        Ok((FunctionCall { name, args }, span))
    }

    /// One function argument in its productive form: a literal, a query, a
    /// nested function call, or a full logical expression.
    fn parse_function_arg(&mut self) -> Result<FunctionArg, Error> {
        let token = self.stream.peek().clone();
        match token.kind {
            kind if is_literal(&kind) => {
                let value = self.take_literal()?;
                match self.peek_comparison_op() {
                    Some(op) => {
                        self.stream.next();
                        let right = self.parse_comparable()?;
                        self.reject_chained_comparison()?;
                        let first = BasicExpr::Comparison(ComparisonExpr {
                            left: Comparable::Literal(value),
                            op,
                            right,
                        });
                        Ok(FunctionArg::Logical(self.finish_logical_or(first)?))
                    }
                    None => Ok(FunctionArg::Literal(value)),
                }
            }
            TokenKind::CurrentNodeIdentifier | TokenKind::RootIdentifier => {
                let start = token.span.0;
                let query = self.parse_filter_query()?;
                let span = (start, self.stream.prev_end());
                if let Some(op) = self.peek_comparison_op() {
                    self.stream.next();
                    let left = self.comparable_query(query, span)?;
                    let right = self.parse_comparable()?;
                    self.reject_chained_comparison()?;
                    let first = BasicExpr::Comparison(ComparisonExpr { left, op, right });
                    return Ok(FunctionArg::Logical(self.finish_logical_or(first)?));
                }
                if matches!(
                    self.stream.peek().kind,
                    TokenKind::LogicalAnd | TokenKind::LogicalOr
                ) {
                    let first = BasicExpr::Test {
                        negated: false,
                        expr: TestExpr::Query(query),
                    };
                    return Ok(FunctionArg::Logical(self.finish_logical_or(first)?));
                }
                Ok(FunctionArg::Query(query))
            }
            TokenKind::FunctionName(_) => {
                let (call, span) = self.parse_function_call()?;
                if let Some(op) = self.peek_comparison_op() {
                    self.stream.next();
                    self.ensure_comparable_result(&call, span)?;
                    let right = self.parse_comparable()?;
                    self.reject_chained_comparison()?;
                    let first = BasicExpr::Comparison(ComparisonExpr {
                        left: Comparable::Function(call),
                        op,
                        right,
                    });
                    return Ok(FunctionArg::Logical(self.finish_logical_or(first)?));
                }
                if matches!(
                    self.stream.peek().kind,
                    TokenKind::LogicalAnd | TokenKind::LogicalOr
                ) {
                    self.ensure_test_result(&call, span)?;
                    let first = BasicExpr::Test {
                        negated: false,
                        expr: TestExpr::Function(call),
                    };
                    return Ok(FunctionArg::Logical(self.finish_logical_or(first)?));
                }
                Ok(FunctionArg::Function(call))
            }
            TokenKind::Bang | TokenKind::LParen => {
                Ok(FunctionArg::Logical(self.parse_logical_or()?))
            }
            _ => Err(self.unexpected("a function argument")),
        }
    }

    // ---- helpers ----

    fn take_literal(&mut self) -> Result<Value, Error> {
        let token = self.stream.next();
        match token.kind {
            TokenKind::StringLiteral(s) => Ok(Value::String(s)),
            TokenKind::IntLiteral(i) => Ok(Value::Number(Number::from(i))),
            TokenKind::NumberLiteral(n) => Ok(Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null)),
            TokenKind::TrueLiteral => Ok(Value::Bool(true)),
            TokenKind::FalseLiteral => Ok(Value::Bool(false)),
            TokenKind::NullLiteral => Ok(Value::Null),
            kind => Err(ParseError::Unexpected {
                expected: "a literal".to_string(),
                found: kind.to_string(),
                span: token.span,
            }
            .into()),
        }
    }

    fn peek_comparison_op(&self) -> Option<CompOp> {
        match self.stream.peek().kind {
            TokenKind::Eq => Some(CompOp::Eq),
            TokenKind::Neq => Some(CompOp::Ne),
            TokenKind::Lt => Some(CompOp::Lt),
            TokenKind::Le => Some(CompOp::Le),
            TokenKind::Gt => Some(CompOp::Gt),
            TokenKind::Ge => Some(CompOp::Ge),
            _ => None,
        }
    }

    /// `a == b == c` is a parse error.
    fn reject_chained_comparison(&self) -> Result<(), Error> {
        match self.peek_comparison_op() {
            Some(_) => Err(ParseError::NonAssociativeComparison {
                span: self.stream.peek().span,
            }
            .into()),
            None => Ok(()),
        }
    }

    fn ensure_comparable_result(&self, call: &FunctionCall, span: Span) -> Result<(), Error> {
        match functions::signature(&call.name) {
            Some(signature) if signature.returns == ExpressionType::Value => Ok(()),
            _ => Err(ValidateError::NotComparableFunction {
                name: call.name.clone(),
                span,
            }
            .into()),
        }
    }

    fn ensure_test_result(&self, call: &FunctionCall, span: Span) -> Result<(), Error> {
        match functions::signature(&call.name) {
            Some(signature) if signature.returns != ExpressionType::Value => Ok(()),
            _ => Err(ValidateError::UncomparedFunction {
                name: call.name.clone(),
                span,
            }
            .into()),
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<(), Error> {
        if self.stream.peek().kind == kind {
            self.stream.next();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        let token = self.stream.peek();
        ParseError::Unexpected {
            expected: expected.to_string(),
            found: token.kind.to_string(),
            span: token.span,
        }
        .into()
    }
}

/// Check each argument against the declared parameter type, applying the
/// one permitted implicit conversion: a singular query in a value-typed
/// slot becomes its value.
fn check_function_args(
    name: &str,
    params: &'static [ExpressionType],
    args: Vec<FunctionArg>,
    span: Span,
) -> Result<Vec<FunctionArg>, Error> {
    let mut checked = Vec::with_capacity(args.len());
    for (index, (param, arg)) in params.iter().copied().zip(args).enumerate() {
        let mismatch = || -> Error {
            ValidateError::FunctionArgType {
                name: name.to_string(),
                index: index + 1,
                expected: param,
                span,
            }
            .into()
        };
        let arg = match (param, arg) {
            (ExpressionType::Value, FunctionArg::Literal(value)) => FunctionArg::Literal(value),
            (ExpressionType::Value, FunctionArg::Singular(query)) => FunctionArg::Singular(query),
            (ExpressionType::Value, FunctionArg::Query(query)) => match query.as_singular() {
                Some(singular) => FunctionArg::Singular(singular),
                None => return Err(mismatch()),
            },
            (ExpressionType::Value, FunctionArg::Function(call))
                if returns(&call) == Some(ExpressionType::Value) =>
            {
                FunctionArg::Function(call)
            }
            (ExpressionType::Logical, FunctionArg::Query(query)) => FunctionArg::Query(query),
            (ExpressionType::Logical, FunctionArg::Logical(expr)) => FunctionArg::Logical(expr),
            (ExpressionType::Logical, FunctionArg::Function(call))
                if returns(&call) == Some(ExpressionType::Logical) =>
            {
                FunctionArg::Function(call)
            }
            (ExpressionType::Nodes, FunctionArg::Query(query)) => FunctionArg::Query(query),
            (ExpressionType::Nodes, FunctionArg::Function(call))
                if returns(&call) == Some(ExpressionType::Nodes) =>
            {
                FunctionArg::Function(call)
            }
            _ => return Err(mismatch()),
        };
        checked.push(arg);
    }
    Ok(checked)
}

fn returns(call: &FunctionCall) -> Option<ExpressionType> {
    functions::signature(&call.name).map(|signature| signature.returns)
}

/// Keywords are valid member-name shorthands.
fn shorthand_name(kind: &TokenKind) -> Option<String> {
    match kind {
        TokenKind::MemberNameShorthand(name) => Some(name.clone()),
        TokenKind::TrueLiteral => Some("true".to_string()),
        TokenKind::FalseLiteral => Some("false".to_string()),
        TokenKind::NullLiteral => Some("null".to_string()),
        _ => None,
    }
}

fn is_literal(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::StringLiteral(_)
            | TokenKind::IntLiteral(_)
            | TokenKind::NumberLiteral(_)
            | TokenKind::TrueLiteral
            | TokenKind::FalseLiteral
            | TokenKind::NullLiteral
    )
}
