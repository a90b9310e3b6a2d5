//! Recursive descent parser for the Bubble language.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//!     statement  <- ident '=' expression
//!                 | 'remember' (ident ('as' expression)?)?
//!                 | 'say' expression*
//!                 | expression
//!     expression <- term (('plus' | 'minus') term)*
//!     term       <- factor (('times' | 'over') factor)*
//!     factor     <- number | string | ident
//! ```
//!
//! Parsing never fails. An operand that isn't there becomes `Expression::Missing`, and a token
//! that cannot start an expression where one is expected is skipped. `say` has no terminator and
//! swallows the rest of the input.

use log::{debug, trace};

use crate::lang::ast::*;
use crate::lang::lex::{Token, TokenKind};

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Kind of the token `n` positions ahead. Running off the end reads as end of input
    fn peek_nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::EndOfInput)
    }

    fn peek(&self) -> TokenKind {
        self.peek_nth(0)
    }

    fn at_end(&self) -> bool {
        self.peek() == TokenKind::EndOfInput
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }

        token
    }

    fn parse_factor(&mut self) -> Expression {
        match self.peek() {
            TokenKind::Number => match self.bump() {
                Some(t) => t
                    .literal
                    .parse::<f64>()
                    .map(Expression::Number)
                    .unwrap_or(Expression::Missing),
                None => Expression::Missing,
            },
            TokenKind::String => match self.bump() {
                Some(t) => Expression::Str(t.literal.clone()),
                None => Expression::Missing,
            },
            TokenKind::Identifier => match self.bump() {
                Some(t) => Expression::Identifier(Identifier(t.literal.clone())),
                None => Expression::Missing,
            },
            kind => {
                debug!("Expected an operand, found {}", kind);
                Expression::Missing
            }
        }
    }

    fn parse_term(&mut self) -> Expression {
        let mut expr = self.parse_factor();

        while let Some(op @ Operator::Times) | Some(op @ Operator::Over) =
            Operator::from_token_kind(self.peek())
        {
            self.bump();
            let rhs = self.parse_factor();
            expr = Expression::Infix(Box::new(expr), op, Box::new(rhs));
        }

        expr
    }

    fn parse_expression(&mut self) -> Expression {
        let mut expr = self.parse_term();

        while let Some(op @ Operator::Plus) | Some(op @ Operator::Minus) =
            Operator::from_token_kind(self.peek())
        {
            self.bump();
            let rhs = self.parse_term();
            expr = Expression::Infix(Box::new(expr), op, Box::new(rhs));
        }

        expr
    }

    /// Parse an expression, or skip the current token if no expression can start here
    ///
    /// Guarantees progress for callers that loop until end of input.
    fn parse_expression_or_skip(&mut self) -> Option<Expression> {
        let start = self.pos;
        let expr = self.parse_expression();
        if self.pos != start {
            return Some(expr);
        }

        if let Some(token) = self.bump() {
            debug!("Skipping stray token '{}'", token.literal);
        }

        None
    }

    fn parse_assign(&mut self) -> Statement {
        let name = self.bump().map(|t| Identifier(t.literal.clone()));
        // Skip `=`
        self.bump();
        let value = self.parse_expression();

        Statement::Assign(name, value)
    }

    fn parse_remember(&mut self) -> Statement {
        // Skip `remember`
        self.bump();

        if self.peek() != TokenKind::Identifier {
            debug!("Expected a name after 'remember', found {}", self.peek());
            return Statement::Assign(None, Expression::Missing);
        }

        let name = self.bump().map(|t| Identifier(t.literal.clone()));
        if self.peek() != TokenKind::As {
            debug!("Expected 'as' after 'remember', found {}", self.peek());
            return Statement::Assign(name, Expression::Missing);
        }

        // Skip `as`
        self.bump();
        let value = self.parse_expression();

        Statement::Assign(name, value)
    }

    fn parse_say(&mut self) -> Statement {
        // Skip `say`
        self.bump();

        let mut values = Vec::new();
        while !self.at_end() {
            if let Some(expr) = self.parse_expression_or_skip() {
                values.push(expr);
            }
        }

        Statement::Say(values)
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match (self.peek(), self.peek_nth(1)) {
            (TokenKind::Identifier, TokenKind::Assign) => Some(self.parse_assign()),
            (TokenKind::Remember, _) => Some(self.parse_remember()),
            (TokenKind::Say, _) => Some(self.parse_say()),
            _ => self
                .parse_expression_or_skip()
                .map(|expr| Statement::Assign(None, expr)),
        }
    }

    fn parse_statements(&mut self) -> Vec<Statement> {
        let mut stmts = Vec::new();
        while !self.at_end() {
            if let Some(stmt) = self.parse_statement() {
                stmts.push(stmt);
            }
        }

        stmts
    }
}

/// Build statements from a token sequence produced by `tokenize`
pub fn parse(tokens: &[Token]) -> Vec<Statement> {
    let stmts = Parser::new(tokens).parse_statements();
    trace!("statements: {:?}", stmts);

    stmts
}

#[cfg(test)]
use crate::lang::lex::tokenize;

#[cfg(test)]
fn num(n: f64) -> Box<Expression> {
    Box::new(Expression::Number(n))
}

#[cfg(test)]
fn ident(name: &str) -> Identifier {
    Identifier(name.to_string())
}

#[cfg(test)]
fn parse_str(input: &str) -> Vec<Statement> {
    parse(&tokenize(input))
}

#[test]
fn test_assign() {
    let data = vec![
        (
            "x = 5",
            vec![Statement::Assign(Some(ident("x")), Expression::Number(5.0))],
        ),
        (
            "by=2.5",
            vec![Statement::Assign(Some(ident("by")), Expression::Number(2.5))],
        ),
        (
            r#"greeting = "hi there""#,
            vec![Statement::Assign(
                Some(ident("greeting")),
                Expression::Str("hi there".to_string()),
            )],
        ),
        (
            "x = y",
            vec![Statement::Assign(
                Some(ident("x")),
                Expression::Identifier(ident("y")),
            )],
        ),
        ("x =", vec![Statement::Assign(Some(ident("x")), Expression::Missing)]),
    ];

    for (input, expected) in data {
        assert_eq!(parse_str(input), expected, "parsing {:?}", input);
    }
}

#[test]
fn test_remember() {
    let data = vec![
        (
            "remember y as 10",
            vec![Statement::Assign(Some(ident("y")), Expression::Number(10.0))],
        ),
        (
            "remember y as 1 plus 2",
            vec![Statement::Assign(
                Some(ident("y")),
                Expression::Infix(num(1.0), Operator::Plus, num(2.0)),
            )],
        ),
        (
            "remember y",
            vec![Statement::Assign(Some(ident("y")), Expression::Missing)],
        ),
        ("remember", vec![Statement::Assign(None, Expression::Missing)]),
        (
            "remember 5",
            vec![
                Statement::Assign(None, Expression::Missing),
                Statement::Assign(None, Expression::Number(5.0)),
            ],
        ),
    ];

    for (input, expected) in data {
        assert_eq!(parse_str(input), expected, "parsing {:?}", input);
    }
}

#[test]
fn test_precedence() {
    let data = vec![
        (
            "2 plus 3 times 4",
            Expression::Infix(
                num(2.0),
                Operator::Plus,
                Box::new(Expression::Infix(num(3.0), Operator::Times, num(4.0))),
            ),
        ),
        (
            "2 times 3 plus 4",
            Expression::Infix(
                Box::new(Expression::Infix(num(2.0), Operator::Times, num(3.0))),
                Operator::Plus,
                num(4.0),
            ),
        ),
        (
            "8 - 2 - 1",
            Expression::Infix(
                Box::new(Expression::Infix(num(8.0), Operator::Minus, num(2.0))),
                Operator::Minus,
                num(1.0),
            ),
        ),
        (
            "8 / 2 over 2",
            Expression::Infix(
                Box::new(Expression::Infix(num(8.0), Operator::Over, num(2.0))),
                Operator::Over,
                num(2.0),
            ),
        ),
    ];

    for (input, expected) in data {
        assert_eq!(
            parse_str(input),
            vec![Statement::Assign(None, expected)],
            "parsing {:?}",
            input
        );
    }
}

#[test]
fn test_say() {
    let data = vec![
        ("say", vec![Statement::Say(vec![])]),
        (
            "say 1 2 3",
            vec![Statement::Say(vec![
                Expression::Number(1.0),
                Expression::Number(2.0),
                Expression::Number(3.0),
            ])],
        ),
        (
            "say x plus 1",
            vec![Statement::Say(vec![Expression::Infix(
                Box::new(Expression::Identifier(ident("x"))),
                Operator::Plus,
                num(1.0),
            )])],
        ),
        // Everything after `say` belongs to it
        (
            "say a b = 3",
            vec![Statement::Say(vec![
                Expression::Identifier(ident("a")),
                Expression::Identifier(ident("b")),
                Expression::Number(3.0),
            ])],
        ),
        (
            "say 1 say 2",
            vec![Statement::Say(vec![
                Expression::Number(1.0),
                Expression::Number(2.0),
            ])],
        ),
    ];

    for (input, expected) in data {
        assert_eq!(parse_str(input), expected, "parsing {:?}", input);
    }
}

#[test]
fn test_malformed() {
    let data = vec![
        ("", vec![]),
        ("=", vec![]),
        ("as as", vec![]),
        (
            "-5",
            vec![Statement::Assign(
                None,
                Expression::Infix(Box::new(Expression::Missing), Operator::Minus, num(5.0)),
            )],
        ),
        (
            "3 plus",
            vec![Statement::Assign(
                None,
                Expression::Infix(num(3.0), Operator::Plus, Box::new(Expression::Missing)),
            )],
        ),
        (
            "5 = 6",
            vec![
                Statement::Assign(None, Expression::Number(5.0)),
                Statement::Assign(None, Expression::Number(6.0)),
            ],
        ),
    ];

    for (input, expected) in data {
        assert_eq!(parse_str(input), expected, "parsing {:?}", input);
    }
}

#[test]
fn test_multiple_statements() {
    assert_eq!(
        parse_str("x = 1 y = 2"),
        vec![
            Statement::Assign(Some(ident("x")), Expression::Number(1.0)),
            Statement::Assign(Some(ident("y")), Expression::Number(2.0)),
        ]
    );
    assert_eq!(
        parse_str("1 2 x"),
        vec![
            Statement::Assign(None, Expression::Number(1.0)),
            Statement::Assign(None, Expression::Number(2.0)),
            Statement::Assign(None, Expression::Identifier(ident("x"))),
        ]
    );
}
