use bubble::lang::lex::{tokenize, TokenKind};
use bubble::{evaluate, Runtime, Value};

fn assert_session(lines: &[(&str, Value)]) {
    let mut runtime = Runtime::new();
    for (line, expected) in lines {
        assert_eq!(&runtime.eval(line), expected, "evaluating {:?}", line);
    }
}

#[test]
fn arithmetic_matches_ieee() {
    let pairs = vec![(1.5, 2.25), (7.0, 3.0), (0.1, 0.2), (1e10, 3.0), (5.0, 0.5)];

    for (a, b) in pairs {
        assert_eq!(evaluate(&format!("{} plus {}", a, b)), Value::Number(a + b));
        assert_eq!(evaluate(&format!("{} minus {}", a, b)), Value::Number(a - b));
        assert_eq!(evaluate(&format!("{} times {}", a, b)), Value::Number(a * b));
        assert_eq!(evaluate(&format!("{} over {}", a, b)), Value::Number(a / b));
        assert_eq!(evaluate(&format!("{} * {}", a, b)), Value::Number(a * b));
        assert_eq!(evaluate(&format!("{} / {}", a, b)), Value::Number(a / b));
    }

    assert_eq!(
        evaluate("4 over 0"),
        Value::Text("Error: Division by zero".to_string())
    );
}

#[test]
fn precedence() {
    assert_eq!(evaluate("2 plus 3 times 4"), Value::Number(14.0));
    assert_eq!(evaluate("2 times 3 plus 4"), Value::Number(10.0));
}

#[test]
fn assignment_persists_across_lines() {
    assert_session(&[
        ("x = 5", Value::Number(5.0)),
        ("say x plus 1", Value::from("6")),
    ]);
}

#[test]
fn remember_is_assignment() {
    assert_session(&[
        ("remember y as 10", Value::Number(10.0)),
        ("say y", Value::from("10")),
        ("y = y plus 1", Value::Number(11.0)),
        ("remember y as y times 2", Value::Number(22.0)),
    ]);
}

#[test]
fn unbound_identifier_is_placeholder() {
    assert_eq!(evaluate("say z"), Value::from("<z>"));
    assert_eq!(evaluate("z"), Value::from("<z>"));
}

#[test]
fn out_of_range_literal_is_identifier() {
    assert_eq!(evaluate("say 1e400"), Value::from("<1e400>"));
    assert_eq!(evaluate("say 1e308 times 10"), Value::from("+Inf"));
}

#[test]
fn text_concatenation() {
    assert_eq!(evaluate(r#""foo" plus "bar""#), Value::from("foobar"));
    assert_eq!(evaluate(r#""n=" plus 5"#), Value::from("n=5"));
}

#[test]
fn say_takes_rest_of_line() {
    assert_eq!(evaluate("say 1 2 3"), Value::from("123"));
    assert_eq!(evaluate("say 1 x = 2"), Value::from("1<x>2"));
}

#[test]
fn rescanning_literals_is_stable() {
    let inputs = vec!["x=1+2", "say a-b plus 3 times 4", "remember q as 1 over 2-3"];

    for input in inputs {
        let tokens = tokenize(input);
        let joined = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::EndOfInput)
            .map(|t| t.literal.clone())
            .collect::<Vec<String>>()
            .join(" ");

        assert_eq!(tokenize(&joined), tokens);
    }
}

#[test]
fn never_hangs_on_stray_tokens() {
    assert_eq!(evaluate("= = ="), Value::default());
    assert_eq!(evaluate("say as remember say"), Value::from(""));
    assert_eq!(evaluate("5 = 6"), Value::Number(6.0));
}
