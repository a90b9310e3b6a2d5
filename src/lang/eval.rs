use log::debug;

use crate::lang::ast::*;
use crate::lang::value::{Value, DIVISION_BY_ZERO};
use crate::lang::variables::Variables;

/// Tree walking evaluator
///
/// Evaluation never fails. Problems surface as text values instead: an unbound name becomes
/// `<name>` and dividing by zero becomes `Error: Division by zero`.
pub struct Eval {
    variables: Variables<Value>,
}

impl Eval {
    pub fn new() -> Self {
        Self {
            variables: Variables::new(),
        }
    }

    pub fn variables(&self) -> &Variables<Value> {
        &self.variables
    }

    fn eval_identifier(&self, ident: &Identifier) -> Value {
        match self.variables.get(ident) {
            Some(v) => v.clone(),
            None => {
                debug!("Unknown variable: {}", ident);
                Value::Text(format!("<{}>", ident))
            }
        }
    }

    fn eval_infix_expr(&self, lhs: &Expression, op: Operator, rhs: &Expression) -> Value {
        let lhs_val = self.eval_expr(lhs);
        let rhs_val = self.eval_expr(rhs);

        match (lhs_val.as_number(), rhs_val.as_number()) {
            (Some(l), Some(r)) => match op {
                Operator::Plus => Value::Number(l + r),
                Operator::Minus => Value::Number(l - r),
                Operator::Times => Value::Number(l * r),
                Operator::Over => {
                    if r == 0.0 {
                        debug!("Divide by zero: {} {} {}", l, op, r);
                        Value::Text(DIVISION_BY_ZERO.to_string())
                    } else {
                        Value::Number(l / r)
                    }
                }
            },
            // Anything involving text concatenates, whatever the operator
            _ => {
                debug!("Concatenating operands of '{}'", op);
                Value::Text(format!("{}{}", lhs_val, rhs_val))
            }
        }
    }

    pub fn eval_expr(&self, expr: &Expression) -> Value {
        match expr {
            Expression::Number(n) => Value::Number(*n),
            Expression::Str(s) => Value::Text(s.clone()),
            Expression::Identifier(ident) => self.eval_identifier(ident),
            Expression::Infix(lhs, op, rhs) => self.eval_infix_expr(lhs, *op, rhs),
            Expression::Missing => Value::default(),
        }
    }

    fn eval_statement(&mut self, stmt: &Statement) -> Value {
        match stmt {
            Statement::Assign(name, expr) => {
                let val = self.eval_expr(expr);
                if let Some(ident) = name {
                    self.variables.insert(ident.clone(), val.clone());
                }

                val
            }
            Statement::Say(exprs) => {
                let mut s = String::new();
                for expr in exprs {
                    s += &self.eval_expr(expr).to_string();
                }

                Value::Text(s)
            }
        }
    }

    /// Run `stmts` in order
    ///
    /// Returns the result of the last statement, or `None` if there were no statements.
    pub fn eval(&mut self, stmts: &[Statement]) -> Option<Value> {
        let mut result = None;
        for stmt in stmts {
            result = Some(self.eval_statement(stmt));
        }

        result
    }
}

impl Default for Eval {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
fn eval_str(eval: &mut Eval, input: &str) -> Option<Value> {
    use crate::lang::lex::tokenize;
    use crate::lang::parse::parse;

    eval.eval(&parse(&tokenize(input)))
}

#[test]
fn test_arithmetic() {
    let tests = vec![
        ("5 + 5", Value::Number(10.0)),
        ("100 -3", Value::Number(97.0)),
        ("100 times 3", Value::Number(300.0)),
        ("100 * 3", Value::Number(300.0)),
        ("99 over 3", Value::Number(33.0)),
        ("1 / 4", Value::Number(0.25)),
        ("0.1 plus 0.2", Value::Number(0.1 + 0.2)),
        ("2 plus 3 times 4", Value::Number(14.0)),
        ("2 times 3 plus 4", Value::Number(10.0)),
        ("10 minus 4 minus 3", Value::Number(3.0)),
        ("7 over 0", Value::from(DIVISION_BY_ZERO)),
        ("7 / 0", Value::from(DIVISION_BY_ZERO)),
    ];

    for (input, expected) in tests {
        let mut eval = Eval::new();
        assert_eq!(eval_str(&mut eval, input), Some(expected), "{:?}", input);
    }
}

#[test]
fn test_concatenation() {
    let tests = vec![
        (r#""foo" plus "bar""#, "foobar"),
        (r#""n=" plus 5"#, "n=5"),
        (r#"5 plus "n""#, "5n"),
        (r#""a" minus "b""#, "ab"),
        (r#""a" times 2"#, "a2"),
        (r#""a" over 0"#, "a0"),
        ("z plus 1", "<z>1"),
        (r#""x" plus 1 plus 2"#, "x12"),
        (r#"1 plus 2 plus "x""#, "3x"),
        ("2 over 0 plus 1", "Error: Division by zero1"),
    ];

    for (input, expected) in tests {
        let mut eval = Eval::new();
        assert_eq!(
            eval_str(&mut eval, input),
            Some(Value::from(expected)),
            "{:?}",
            input
        );
    }
}

#[test]
fn test_say() {
    let tests = vec![
        ("say 1 2 3", "123"),
        ("say", ""),
        (r#"say "hello" " " "world""#, "hello world"),
        ("say 1.5 times 2", "3"),
        ("say z", "<z>"),
        ("say 1 over 0", "Error: Division by zero"),
    ];

    for (input, expected) in tests {
        let mut eval = Eval::new();
        assert_eq!(
            eval_str(&mut eval, input),
            Some(Value::from(expected)),
            "{:?}",
            input
        );
    }
}

#[test]
fn test_assignment_persists() {
    let mut eval = Eval::new();

    assert_eq!(eval_str(&mut eval, "x = 5"), Some(Value::Number(5.0)));
    assert_eq!(eval_str(&mut eval, "say x plus 1"), Some(Value::from("6")));
    assert_eq!(eval_str(&mut eval, "remember y as 10"), Some(Value::Number(10.0)));
    assert_eq!(eval_str(&mut eval, "say y"), Some(Value::from("10")));
    assert_eq!(eval_str(&mut eval, "x = x times y"), Some(Value::Number(50.0)));
    assert_eq!(eval_str(&mut eval, "x"), Some(Value::Number(50.0)));
    assert_eq!(eval.variables().len(), 2);
}

#[test]
fn test_bare_expression_does_not_bind() {
    let mut eval = Eval::new();

    assert_eq!(eval_str(&mut eval, "1 plus 1"), Some(Value::Number(2.0)));
    assert!(eval.variables().is_empty());
}

#[test]
fn test_last_statement_wins() {
    let mut eval = Eval::new();

    assert_eq!(eval_str(&mut eval, "a = 1 b = 2"), Some(Value::Number(2.0)));
    assert_eq!(eval_str(&mut eval, "say a b"), Some(Value::from("12")));
    assert_eq!(eval_str(&mut eval, ""), None);
}

#[test]
fn test_degraded_input() {
    let tests = vec![
        ("-5", Value::from("5")),
        ("3 plus", Value::from("3")),
        ("remember", Value::default()),
        ("x =", Value::default()),
    ];

    for (input, expected) in tests {
        let mut eval = Eval::new();
        assert_eq!(eval_str(&mut eval, input), Some(expected), "{:?}", input);
    }

    let mut eval = Eval::new();
    eval_str(&mut eval, "remember w");
    assert_eq!(eval_str(&mut eval, "say w plus 1"), Some(Value::from("1")));
}

#[test]
fn test_division_by_zero_is_a_value() {
    let mut eval = Eval::new();

    eval_str(&mut eval, "e = 1 over 0");
    assert_eq!(
        eval_str(&mut eval, r#"say "got: " e"#),
        Some(Value::from("got: Error: Division by zero"))
    );
}
