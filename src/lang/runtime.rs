use log::{debug, info};

use crate::lang::eval::Eval;
use crate::lang::lex::tokenize;
use crate::lang::parse::parse;
use crate::lang::value::Value;
use crate::lang::variables::Variables;

/// One evaluation session
///
/// Each `Runtime` owns its own variable store, so bindings made through one runtime are never
/// visible to another.
pub struct Runtime {
    eval: Eval,
}

impl Runtime {
    pub fn new() -> Self {
        Self { eval: Eval::new() }
    }

    /// Evaluate one line of source
    ///
    /// Returns the result of the last statement on the line. A line with no statements
    /// evaluates to empty text.
    pub fn eval(&mut self, line: &str) -> Value {
        info!("eval: {}", line);

        let tokens = tokenize(line);
        let stmts = parse(&tokens);

        let result = self.eval.eval(&stmts).unwrap_or_default();
        debug!("{} variable(s) bound", self.variables().len());

        result
    }

    pub fn variables(&self) -> &Variables<Value> {
        self.eval.variables()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate `line` in a fresh session
pub fn evaluate(line: &str) -> Value {
    Runtime::new().eval(line)
}

#[test]
fn test_sessions_are_isolated() {
    let mut first = Runtime::new();
    let mut second = Runtime::new();

    assert_eq!(first.eval("x = 5"), Value::Number(5.0));
    assert_eq!(first.eval("say x"), Value::from("5"));
    assert_eq!(second.eval("say x"), Value::from("<x>"));
    assert_eq!(evaluate("say x"), Value::from("<x>"));
    assert!(second.variables().is_empty());
}

#[test]
fn test_empty_line() {
    assert_eq!(evaluate(""), Value::default());
    assert_eq!(evaluate("   "), Value::default());
}
