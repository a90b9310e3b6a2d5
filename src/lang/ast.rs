use std::fmt;

use crate::lang::lex::TokenKind;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    /// `plus` or `+`
    Plus,
    /// `minus` or `-`
    Minus,
    /// `times` or `*`
    Times,
    /// `over` or `/`
    Over,
}

impl Operator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Operator::Plus),
            TokenKind::Minus => Some(Operator::Minus),
            TokenKind::Times => Some(Operator::Times),
            TokenKind::DividedBy => Some(Operator::Over),
            _ => None,
        }
    }

    pub fn op_str(&self) -> &str {
        match self {
            Operator::Plus => "plus",
            Operator::Minus => "minus",
            Operator::Times => "times",
            Operator::Over => "over",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op_str())
    }
}

#[derive(Debug, PartialEq, Hash, PartialOrd, Ord, Eq, Clone)]
pub struct Identifier(pub String);

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    Str(String),
    Identifier(Identifier),
    /// (lhs, operator, rhs)
    Infix(Box<Expression>, Operator, Box<Expression>),
    /// An operand the parser expected but could not find
    Missing,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    /// `name = value` or `remember name as value`. A bare expression is an assignment with no name
    Assign(Option<Identifier>, Expression),
    /// `say value...`
    Say(Vec<Expression>),
}

#[test]
fn test_operator_from_token_kind() {
    let data = vec![
        (TokenKind::Plus, Some("plus")),
        (TokenKind::Minus, Some("minus")),
        (TokenKind::Times, Some("times")),
        (TokenKind::DividedBy, Some("over")),
        (TokenKind::Assign, None),
        (TokenKind::Identifier, None),
    ];

    for (kind, expected) in data {
        let op = Operator::from_token_kind(kind).map(|op| op.to_string());
        assert_eq!(op.as_deref(), expected);
    }
}
