//! Lexical tokens of the JSONPath surface syntax.

use std::fmt;

/// Byte range `(start, end)` into the query source.
pub type Span = (usize, usize);

/// A single token with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Token kinds of the JSONPath surface syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `$`
    RootIdentifier,
    /// `@`
    CurrentNodeIdentifier,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Colon,
    Dot,
    DoubleDot,
    Star,
    Bang,
    QuestionMark,
    LogicalAnd,
    LogicalOr,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    IntLiteral(i64),
    NumberLiteral(f64),
    /// A string literal with escapes already resolved.
    StringLiteral(String),
    TrueLiteral,
    FalseLiteral,
    NullLiteral,
    /// An identifier used as a member name after `.` or `..`.
    MemberNameShorthand(String),
    /// An identifier whose next significant character is `(`.
    FunctionName(String),
    Whitespace,
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::RootIdentifier => write!(f, "'$'"),
            TokenKind::CurrentNodeIdentifier => write!(f, "'@'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::DoubleDot => write!(f, "'..'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::QuestionMark => write!(f, "'?'"),
            TokenKind::LogicalAnd => write!(f, "'&&'"),
            TokenKind::LogicalOr => write!(f, "'||'"),
            TokenKind::Eq => write!(f, "'=='"),
            TokenKind::Neq => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::IntLiteral(value) => write!(f, "integer `{value}`"),
            TokenKind::NumberLiteral(value) => write!(f, "number `{value}`"),
            TokenKind::StringLiteral(value) => write!(f, "string {value:?}"),
            TokenKind::TrueLiteral => write!(f, "'true'"),
            TokenKind::FalseLiteral => write!(f, "'false'"),
            TokenKind::NullLiteral => write!(f, "'null'"),
            TokenKind::MemberNameShorthand(name) => write!(f, "member name `{name}`"),
            TokenKind::FunctionName(name) => write!(f, "function name `{name}`"),
            TokenKind::Whitespace => write!(f, "whitespace"),
            TokenKind::EndOfInput => write!(f, "end of query"),
        }
    }
}
