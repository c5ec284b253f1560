use json_path::{Error, JsonPath, LexError, ParseError, ValidateError};

fn compile_err(query: &str) -> Error {
    match JsonPath::compile(query) {
        Ok(path) => panic!("expected '{query}' to fail, parsed {path}"),
        Err(err) => err,
    }
}

#[test]
fn lex_error_matrix() {
    let cases: &[(&str, fn(&LexError) -> bool)] = &[
        ("$['abc", |e| matches!(e, LexError::UnterminatedString { .. })),
        ("$[\"a\\q\"]", |e| matches!(e, LexError::BadEscape { .. })),
        ("$[\"a\\u12\"]", |e| matches!(e, LexError::BadEscape { .. })),
        ("$[01]", |e| matches!(e, LexError::BadNumber { .. })),
        ("$[1e]", |e| matches!(e, LexError::BadNumber { .. })),
        ("$[?@.a = 1]", |e| {
            matches!(e, LexError::UnexpectedChar { ch: '=', .. })
        }),
        ("$[?@.a & @.b]", |e| {
            matches!(e, LexError::UnexpectedChar { ch: '&', .. })
        }),
        ("$#", |e| matches!(e, LexError::UnexpectedChar { ch: '#', .. })),
    ];
    for (query, check) in cases {
        match compile_err(query) {
            Error::Lex(e) => assert!(check(&e), "unexpected lex error for '{query}': {e:?}"),
            other => panic!("expected lex error for '{query}', got {other:?}"),
        }
    }
}

#[test]
fn parse_error_matrix() {
    let cases: &[(&str, fn(&ParseError) -> bool)] = &[
        ("", |e| matches!(e, ParseError::Unexpected { .. })),
        ("@.a", |e| matches!(e, ParseError::Unexpected { .. })),
        ("$.a]", |e| matches!(e, ParseError::TrailingTokens { .. })),
        ("$ $", |e| matches!(e, ParseError::TrailingTokens { .. })),
        ("$[]", |e| matches!(e, ParseError::EmptySelection { .. })),
        ("$[", |e| matches!(e, ParseError::Unexpected { .. })),
        ("$.", |e| matches!(e, ParseError::Unexpected { .. })),
        ("$..", |e| matches!(e, ParseError::Unexpected { .. })),
        ("$.1", |e| matches!(e, ParseError::Unexpected { .. })),
        ("$[1.5]", |e| matches!(e, ParseError::Unexpected { .. })),
        ("$[-0]", |e| matches!(e, ParseError::Unexpected { .. })),
        ("$[0 1]", |e| matches!(e, ParseError::Unexpected { .. })),
        ("$[?]", |e| matches!(e, ParseError::Unexpected { .. })),
        ("$[?(@.a]", |e| matches!(e, ParseError::Unexpected { .. })),
        ("$[?@.a == ]", |e| matches!(e, ParseError::Unexpected { .. })),
        ("$[?@.a == 1 == 2]", |e| {
            matches!(e, ParseError::NonAssociativeComparison { .. })
        }),
        ("$[?true]", |e| matches!(e, ParseError::UncomparedLiteral { .. })),
        ("$[?@.a && 1]", |e| {
            matches!(e, ParseError::UncomparedLiteral { .. })
        }),
    ];
    for (query, check) in cases {
        match compile_err(query) {
            Error::Parse(e) => assert!(check(&e), "unexpected parse error for '{query}': {e:?}"),
            other => panic!("expected parse error for '{query}', got {other:?}"),
        }
    }
}

#[test]
fn validate_error_matrix() {
    let cases: &[(&str, fn(&ValidateError) -> bool)] = &[
        ("$[?@.* == 1]", |e| {
            matches!(e, ValidateError::NonSingularQuery { .. })
        }),
        ("$[?@..a == 1]", |e| {
            matches!(e, ValidateError::NonSingularQuery { .. })
        }),
        ("$[?1 == @[*]]", |e| {
            matches!(e, ValidateError::NonSingularQuery { .. })
        }),
        ("$[?nope(@.a)]", |e| {
            matches!(e, ValidateError::UnknownFunction { .. })
        }),
        ("$[?length(@.a, @.b) == 1]", |e| {
            matches!(e, ValidateError::FunctionArity { .. })
        }),
        ("$[?length(@.*) == 1]", |e| {
            matches!(e, ValidateError::FunctionArgType { .. })
        }),
        ("$[?count(1) == 1]", |e| {
            matches!(e, ValidateError::FunctionArgType { .. })
        }),
        ("$[?length(@.a)]", |e| {
            matches!(e, ValidateError::UncomparedFunction { .. })
        }),
        ("$[?search(@.a, 'x') == true]", |e| {
            matches!(e, ValidateError::NotComparableFunction { .. })
        }),
        ("$[?match(@.a, @.b) == false]", |e| {
            matches!(e, ValidateError::NotComparableFunction { .. })
        }),
        ("$[0:5:0]", |e| matches!(e, ValidateError::SliceStepZero { .. })),
        ("$[9007199254740992]", |e| {
            matches!(e, ValidateError::IndexOutOfRange { .. })
        }),
        ("$[:-9007199254740992]", |e| {
            matches!(e, ValidateError::IndexOutOfRange { .. })
        }),
    ];
    for (query, check) in cases {
        match compile_err(query) {
            Error::Validate(e) => {
                assert!(check(&e), "unexpected validate error for '{query}': {e:?}")
            }
            other => panic!("expected validate error for '{query}', got {other:?}"),
        }
    }
}

#[test]
fn error_spans_point_into_the_source() {
    // the unterminated string starts at the opening quote
    assert_eq!(compile_err("$['abc").span(), (2, 6));
    // the offending query is spanned, not just its first token
    assert_eq!(compile_err("$[?@.* == 1]").span(), (3, 6));
    // the step token itself is blamed
    assert_eq!(compile_err("$[0:5:0]").span(), (6, 7));
    // trailing garbage is blamed where it starts
    assert_eq!(compile_err("$.a]").span(), (3, 4));
    // every error exposes a span within the input
    for query in ["", "$[", "$[?nope(@.a)]", "$[?@.a == ]"] {
        let (start, end) = compile_err(query).span();
        assert!(start <= end && end <= query.len(), "span for '{query}'");
    }
}

#[test]
fn whitespace_tolerance_matrix() {
    // inserting whitespace between any two tokens leaves the AST unchanged
    let pairs = [
        ("$.a[0]", "$ . a [ 0 ]"),
        ("$..book[1:2:1]", "$ .. book [ 1 : 2 : 1 ]"),
        ("$[?@.a==1&&!(@.b||@.c)]", "$[? @.a == 1 && ! ( @.b || @.c ) ]"),
        ("$[?length(@.a)>2]", "$[? length ( @.a ) > 2 ]"),
        ("$['a','b']", "$[ 'a' , 'b' ]"),
    ];
    for (tight, spaced) in pairs {
        assert_eq!(
            JsonPath::compile(tight).unwrap(),
            JsonPath::compile(spaced).unwrap(),
            "whitespace changed the AST for '{tight}'"
        );
    }
}

#[test]
fn keywords_remain_usable_as_member_names() {
    for query in ["$.true", "$.false", "$.null", "$..true"] {
        assert!(JsonPath::compile(query).is_ok(), "'{query}' should parse");
    }
}
