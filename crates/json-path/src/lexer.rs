//! Tokenizer for JSONPath query strings.
//!
//! Whitespace is lenient: runs of space, tab, LF, and CR between tokens are
//! collapsed into single [`TokenKind::Whitespace`] tokens, which the parser
//! discards. Whitespace is significant only inside string literals.

use thiserror::Error;

use crate::token::{Span, Token, TokenKind};

/// Lexical error, carrying a byte span into the query source.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
    #[error("invalid escape sequence")]
    BadEscape { span: Span },
    #[error("malformed number")]
    BadNumber { span: Span },
    #[error("unexpected character {ch:?}")]
    UnexpectedChar { ch: char, span: Span },
}

impl LexError {
    /// Byte range of the offending source text.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::BadEscape { span }
            | LexError::BadNumber { span }
            | LexError::UnexpectedChar { span, .. } => *span,
        }
    }
}

/// Tokenize a query string.
///
/// The returned sequence always ends with [`TokenKind::EndOfInput`].
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer { input, pos: 0 }.run()
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek() {
            let start = self.pos;
            let kind = match c {
                ' ' | '\t' | '\n' | '\r' => {
                    self.skip_whitespace();
                    TokenKind::Whitespace
                }
                '$' => self.single(TokenKind::RootIdentifier),
                '@' => self.single(TokenKind::CurrentNodeIdentifier),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                ',' => self.single(TokenKind::Comma),
                ':' => self.single(TokenKind::Colon),
                '*' => self.single(TokenKind::Star),
                '?' => self.single(TokenKind::QuestionMark),
                '.' => {
                    self.advance();
                    if self.peek() == Some('.') {
                        self.advance();
                        TokenKind::DoubleDot
                    } else {
                        TokenKind::Dot
                    }
                }
                '!' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        TokenKind::Neq
                    } else {
                        TokenKind::Bang
                    }
                }
                '<' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        TokenKind::Le
                    } else {
                        TokenKind::Lt
                    }
                }
                '>' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        TokenKind::Ge
                    } else {
                        TokenKind::Gt
                    }
                }
                '=' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        TokenKind::Eq
                    } else {
                        return Err(LexError::UnexpectedChar {
                            ch: '=',
                            span: (start, self.pos),
                        });
                    }
                }
                '&' => {
                    self.advance();
                    if self.peek() == Some('&') {
                        self.advance();
                        TokenKind::LogicalAnd
                    } else {
                        return Err(LexError::UnexpectedChar {
                            ch: '&',
                            span: (start, self.pos),
                        });
                    }
                }
                '|' => {
                    self.advance();
                    if self.peek() == Some('|') {
                        self.advance();
                        TokenKind::LogicalOr
                    } else {
                        return Err(LexError::UnexpectedChar {
                            ch: '|',
                            span: (start, self.pos),
                        });
                    }
                }
                '"' | '\'' => self.lex_string(c)?,
                '-' | '0'..='9' => self.lex_number()?,
                c if is_name_first(c) => self.lex_identifier(),
                other => {
                    self.advance();
                    return Err(LexError::UnexpectedChar {
                        ch: other,
                        span: (start, self.pos),
                    });
                }
            };
            tokens.push(Token {
                kind,
                span: (start, self.pos),
            });
        }

        tokens.push(Token {
            kind: TokenKind::EndOfInput,
            span: (self.pos, self.pos),
        });
        Ok(tokens)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn lex_string(&mut self, quote: char) -> Result<TokenKind, LexError> {
        let start = self.pos;
        self.advance();

        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(LexError::UnterminatedString {
                        span: (start, self.pos),
                    })
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let esc_start = self.pos;
                    self.advance();
                    value.push(self.lex_escape(quote, esc_start)?);
                }
                Some(c) if (c as u32) < 0x20 => {
                    let at = self.pos;
                    self.advance();
                    // raw control characters must be escaped
                    return Err(LexError::UnexpectedChar {
                        ch: c,
                        span: (at, self.pos),
                    });
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        Ok(TokenKind::StringLiteral(value))
    }

    fn lex_escape(&mut self, quote: char, esc_start: usize) -> Result<char, LexError> {
        let c = match self.peek() {
            Some(c) => c,
            None => {
                return Err(LexError::UnterminatedString {
                    span: (esc_start, self.pos),
                })
            }
        };
        self.advance();
        match c {
            'b' => Ok('\u{0008}'),
            'f' => Ok('\u{000C}'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            '/' => Ok('/'),
            '\\' => Ok('\\'),
            '"' if quote == '"' => Ok('"'),
            '\'' if quote == '\'' => Ok('\''),
            'u' => self.lex_unicode_escape(esc_start),
            _ => Err(LexError::BadEscape {
                span: (esc_start, self.pos),
            }),
        }
    }

    fn lex_unicode_escape(&mut self, esc_start: usize) -> Result<char, LexError> {
        let first = self.lex_hex4(esc_start)?;
        // a low surrogate may only follow a high surrogate
        if (0xDC00..=0xDFFF).contains(&first) {
            return Err(LexError::BadEscape {
                span: (esc_start, self.pos),
            });
        }

        let code = if (0xD800..=0xDBFF).contains(&first) {
            if self.peek() != Some('\\') {
                return Err(LexError::BadEscape {
                    span: (esc_start, self.pos),
                });
            }
            self.advance();
            if self.peek() != Some('u') {
                return Err(LexError::BadEscape {
                    span: (esc_start, self.pos),
                });
            }
            self.advance();
            let second = self.lex_hex4(esc_start)?;
            if !(0xDC00..=0xDFFF).contains(&second) {
                return Err(LexError::BadEscape {
                    span: (esc_start, self.pos),
                });
            }
            0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
        } else {
            first
        };

        char::from_u32(code).ok_or(LexError::BadEscape {
            span: (esc_start, self.pos),
        })
    }

    fn lex_hex4(&mut self, esc_start: usize) -> Result<u32, LexError> {
        let mut value = 0u32;
        for _ in 0..4 {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    value = value * 16 + digit;
                    self.advance();
                }
                None => {
                    return Err(LexError::BadEscape {
                        span: (esc_start, self.pos),
                    })
                }
            }
        }
        Ok(value)
    }

    fn lex_number(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }

        match self.peek() {
            Some('0') => {
                self.advance();
                if matches!(self.peek(), Some('0'..='9')) {
                    // leading zeros are not valid JSON numbers
                    return Err(LexError::BadNumber {
                        span: (start, self.pos),
                    });
                }
            }
            Some('1'..='9') => {
                while matches!(self.peek(), Some('0'..='9')) {
                    self.advance();
                }
            }
            _ => {
                return Err(LexError::BadNumber {
                    span: (start, self.pos),
                })
            }
        }

        let mut is_float = false;
        if self.peek() == Some('.') && matches!(self.peek_second(), Some('0'..='9')) {
            is_float = true;
            self.advance();
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if !matches!(self.peek(), Some('0'..='9')) {
                return Err(LexError::BadNumber {
                    span: (start, self.pos),
                });
            }
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }

        let text = &self.input[start..self.pos];
        // a bare `-0` is a valid number but not a valid index
        if is_float || text == "-0" {
            let value = text.parse::<f64>().map_err(|_| LexError::BadNumber {
                span: (start, self.pos),
            })?;
            Ok(TokenKind::NumberLiteral(value))
        } else {
            let value = text.parse::<i64>().map_err(|_| LexError::BadNumber {
                span: (start, self.pos),
            })?;
            Ok(TokenKind::IntLiteral(value))
        }
    }

    fn lex_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance();
        while let Some(c) = self.peek() {
            if is_name_char(c) {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.input[start..self.pos];
        match text {
            "true" => TokenKind::TrueLiteral,
            "false" => TokenKind::FalseLiteral,
            "null" => TokenKind::NullLiteral,
            _ => {
                if self.next_significant_char() == Some('(') {
                    TokenKind::FunctionName(text.to_string())
                } else {
                    TokenKind::MemberNameShorthand(text.to_string())
                }
            }
        }
    }

    fn next_significant_char(&self) -> Option<char> {
        self.input[self.pos..]
            .chars()
            .find(|c| !matches!(c, ' ' | '\t' | '\n' | '\r'))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }
}

/// RFC 9535 `name-first`: ASCII alpha, `_`, or any non-ASCII code point.
fn is_name_first(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// RFC 9535 `name-char`: `name-first` plus ASCII digits.
fn is_name_char(c: char) -> bool {
    is_name_first(c) || c.is_ascii_digit()
}
