use std::fmt;

/// Text produced by `over` when the divisor is zero
pub const DIVISION_BY_ZERO: &str = "Error: Division by zero";

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Text(String::new())
    }
}

/// Numbers print in their shortest round-trippable decimal form, never with an exponent.
/// Infinities print as `+Inf`/`-Inf`. Text prints as is, without quotes
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.is_infinite() => {
                write!(f, "{}", if *n > 0.0 { "+Inf" } else { "-Inf" })
            }
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[test]
fn test_display() {
    let data = vec![
        (Value::Number(5.0), "5"),
        (Value::Number(-3.0), "-3"),
        (Value::Number(2.5), "2.5"),
        (Value::Number(0.1 + 0.2), "0.30000000000000004"),
        (Value::Number(1.0 / 3.0), "0.3333333333333333"),
        (Value::Number(1e21), "1000000000000000000000"),
        (Value::Number(1e-7), "0.0000001"),
        (Value::Number(f64::INFINITY), "+Inf"),
        (Value::Number(f64::NEG_INFINITY), "-Inf"),
        (Value::Number(f64::NAN), "NaN"),
        (Value::Text("foo".to_string()), "foo"),
        (Value::Text("".to_string()), ""),
        (Value::Text("<z>".to_string()), "<z>"),
    ];

    for (value, expected) in data {
        assert_eq!(value.to_string(), expected);
    }
}

#[test]
fn test_accessors() {
    assert_eq!(Value::from(4.0).as_number(), Some(4.0));
    assert_eq!(Value::from("4").as_number(), None);
    assert_eq!(Value::default(), Value::Text(String::new()));
}
