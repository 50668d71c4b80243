use ghost_lang::compiler::{lexer::tokenize, parse, parser::Parser};

#[test]
fn test_parse_error() {
    let input = r#"
x := [1, 2

print(1 + 1)

y := 3 +
"#;
    let (_, lex_errors, parse_errors) = parse(input);
    assert!(lex_errors.is_empty());
    assert_eq!(
        parse_errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        vec![
            "Line: 2: Expected next token to be ], got: IDENTIFIER instead",
            "Line: 7: No prefix parse function for EOF found",
        ]
    );
}

#[test]
fn test_errors_on_different_lines() {
    let mut parser = Parser::new(tokenize("a := )\nb := 1\nc := (2").0);
    let program = parser.parse();
    let lines = parser.errors().iter().map(|e| e.line()).collect::<Vec<_>>();
    assert_eq!(lines, vec![1, 3]);
    assert_eq!(program.to_string(), "b := 1");
}

#[test]
fn test_print_is_an_identifier() {
    let (program, _, errors) = parse(r#"print("hello")"#);
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), r#"print("hello")"#);
}

#[test]
fn test_reserved_words_are_not_expressions() {
    let (_, _, errors) = parse("x := super");
    assert_eq!(
        errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["Line: 1: No prefix parse function for super found"]
    );
}

#[test]
fn test_independent_errors_inside_statements() {
    let (program, _, errors) = parse("print(1 2)\nx := 1\nprint(3 4)");
    assert_eq!(errors.iter().map(|e| e.line()).collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(program.to_string(), "x := 1");
}
