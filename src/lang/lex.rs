//! Scanner for the Bubble language.
//!
//! Words are split on spaces. `=`, `+` and `-` split words on their own, so `x=5+3` scans the
//! same as `x = 5 + 3`. `*` and `/` are only recognized as whole words. Double quotes toggle
//! string mode; there are no escape sequences.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use log::trace;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    Number,
    String,
    Plus,
    Minus,
    Times,
    DividedBy,
    Assign,
    Remember,
    As,
    Identifier,
    Say,
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Plus => "plus",
            TokenKind::Minus => "minus",
            TokenKind::Times => "times",
            TokenKind::DividedBy => "over",
            TokenKind::Assign => "=",
            TokenKind::Remember => "remember",
            TokenKind::As => "as",
            TokenKind::Identifier => "identifier",
            TokenKind::Say => "say",
            TokenKind::EndOfInput => "end of input",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token, verbatim. Empty for `EndOfInput`
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: &str) -> Self {
        Token {
            kind,
            literal: literal.to_string(),
        }
    }
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("say", TokenKind::Say);
        map.insert("plus", TokenKind::Plus);
        map.insert("+", TokenKind::Plus);
        map.insert("minus", TokenKind::Minus);
        map.insert("-", TokenKind::Minus);
        map.insert("times", TokenKind::Times);
        map.insert("*", TokenKind::Times);
        map.insert("over", TokenKind::DividedBy);
        map.insert("/", TokenKind::DividedBy);
        // Reserved, but carries no meaning yet
        map.insert("by", TokenKind::Identifier);
        map.insert("remember", TokenKind::Remember);
        map.insert("as", TokenKind::As);
        map
    };
}

/// Whether `word` is a float literal that fits in an `f64`
///
/// Literals out of range (eg. `1e400`) are not numbers. Spelled out infinities and NaN are.
fn is_number(word: &str) -> bool {
    match word.parse::<f64>() {
        Ok(n) if n.is_finite() => true,
        Ok(_) => {
            let unsigned = word.trim_start_matches(|c: char| c == '+' || c == '-');
            ["inf", "infinity", "nan"]
                .iter()
                .any(|s| unsigned.eq_ignore_ascii_case(s))
        }
        Err(_) => false,
    }
}

/// Classify a whole word
///
/// Keywords are matched exactly (case sensitive). Anything else that is a float literal in range
/// is a number and everything left over is an identifier.
pub fn classify(word: &str) -> Token {
    if let Some(kind) = KEYWORDS.get(word) {
        return Token::new(*kind, word);
    }

    if is_number(word) {
        Token::new(TokenKind::Number, word)
    } else {
        Token::new(TokenKind::Identifier, word)
    }
}

/// Push the pending word, if any, as a classified token
fn flush(word: &mut String, tokens: &mut Vec<Token>) {
    if !word.is_empty() {
        tokens.push(classify(word));
        word.clear();
    }
}

/// Split `input` into tokens
///
/// Never fails. The returned sequence always ends with an `EndOfInput` token. An unterminated
/// string is classified like any other word once input runs out.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut in_string = false;

    for c in input.chars() {
        if c == '"' {
            if in_string {
                tokens.push(Token::new(TokenKind::String, &word));
                word.clear();
            }
            in_string = !in_string;
        } else if in_string {
            word.push(c);
        } else if c == ' ' {
            flush(&mut word, &mut tokens);
        } else if c == '=' {
            flush(&mut word, &mut tokens);
            tokens.push(Token::new(TokenKind::Assign, "="));
        } else if c == '+' || c == '-' {
            flush(&mut word, &mut tokens);
            tokens.push(classify(&c.to_string()));
        } else {
            word.push(c);
        }
    }

    flush(&mut word, &mut tokens);
    tokens.push(Token::new(TokenKind::EndOfInput, ""));

    trace!("tokens: {:?}", tokens);

    tokens
}

#[cfg(test)]
fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_classify() {
    let data = vec![
        ("say", TokenKind::Say),
        ("plus", TokenKind::Plus),
        ("+", TokenKind::Plus),
        ("minus", TokenKind::Minus),
        ("-", TokenKind::Minus),
        ("times", TokenKind::Times),
        ("*", TokenKind::Times),
        ("over", TokenKind::DividedBy),
        ("/", TokenKind::DividedBy),
        ("by", TokenKind::Identifier),
        ("remember", TokenKind::Remember),
        ("as", TokenKind::As),
        ("42", TokenKind::Number),
        ("3.25", TokenKind::Number),
        ("1e3", TokenKind::Number),
        ("1e400", TokenKind::Identifier),
        ("1e308", TokenKind::Number),
        ("inf", TokenKind::Number),
        ("Infinity", TokenKind::Number),
        ("NaN", TokenKind::Number),
        ("x", TokenKind::Identifier),
        ("Say", TokenKind::Identifier),
        ("sayer", TokenKind::Identifier),
        ("12abc", TokenKind::Identifier),
    ];

    for (input, expected) in data {
        let token = classify(input);
        assert_eq!(token.kind, expected, "classifying {:?}", input);
        assert_eq!(token.literal, input);
    }
}

#[test]
fn test_tokenize() {
    use TokenKind::*;

    let data = vec![
        ("", vec![EndOfInput]),
        ("   ", vec![EndOfInput]),
        ("5 + 3", vec![Number, Plus, Number, EndOfInput]),
        ("5+3", vec![Number, Plus, Number, EndOfInput]),
        ("5-3", vec![Number, Minus, Number, EndOfInput]),
        ("x=5", vec![Identifier, Assign, Number, EndOfInput]),
        ("x = 5", vec![Identifier, Assign, Number, EndOfInput]),
        ("2 * 3", vec![Number, Times, Number, EndOfInput]),
        ("2*3", vec![Identifier, EndOfInput]),
        ("6/2", vec![Identifier, EndOfInput]),
        ("6 over 2", vec![Number, DividedBy, Number, EndOfInput]),
        (
            "remember y as 10",
            vec![Remember, Identifier, As, Number, EndOfInput],
        ),
        (r#"say "a b""#, vec![Say, String, EndOfInput]),
        (r#""x"plus"y""#, vec![String, Plus, String, EndOfInput]),
        (r#""""#, vec![String, EndOfInput]),
    ];

    for (input, expected) in data {
        assert_eq!(kinds(input), expected, "tokenizing {:?}", input);
    }
}

#[test]
fn test_string_literal() {
    let tokens = tokenize(r#"say "1 + 2 = 3" x"#);
    assert_eq!(tokens[1], Token::new(TokenKind::String, "1 + 2 = 3"));
    assert_eq!(tokens[2], Token::new(TokenKind::Identifier, "x"));

    // Backslashes are kept verbatim
    let tokens = tokenize(r#""a\nb""#);
    assert_eq!(tokens[0], Token::new(TokenKind::String, "a\\nb"));
}

#[test]
fn test_unterminated_string() {
    let tokens = tokenize(r#"say "hello world"#);
    assert_eq!(
        tokens,
        vec![
            Token::new(TokenKind::Say, "say"),
            Token::new(TokenKind::Identifier, "hello world"),
            Token::new(TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn test_rescan_joined_literals() {
    let data = vec![
        "x=5+3",
        "say x plus 1",
        "remember y as 10 over 4",
        "2 times 3-4",
        "a-b+c = d",
        "  1   2    3 ",
        "by = 7 * 2",
    ];

    for input in data {
        let tokens = tokenize(input);
        let joined = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::EndOfInput)
            .map(|t| t.literal.as_str())
            .collect::<Vec<&str>>()
            .join(" ");

        assert_eq!(tokenize(&joined), tokens, "rescanning {:?}", joined);
    }
}
