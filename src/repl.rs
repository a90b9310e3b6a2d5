use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Completer, Helper, Highlighter, Hinter, Result};

pub const HELP: &str = "
  Bubble commands:
    exit - Exit the Bubble REPL
    help - Display this help message
    <expression> - Evaluate the expression
    remember <variable> as <expression> - Assign a value to a variable
    say <expression> - Print the value of an expression
";

/// Line editor hooks for the Bubble shell
///
/// A Bubble statement has no terminator, so a long `say` can only be split across prompts
/// explicitly: a trailing `\` keeps the editor reading. `fixup_input` joins the pieces again.
#[derive(Completer, Helper, Highlighter, Hinter)]
pub struct ReplHelper {}

impl ReplHelper {
    pub fn new() -> Self {
        ReplHelper {}
    }
}

impl Validator for ReplHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> Result<ValidationResult> {
        if ctx.input().ends_with('\\') {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

/// What the shell should do with a line
#[derive(Debug, PartialEq)]
pub enum Command<'a> {
    Exit,
    Help,
    /// Hand the line to the language
    Eval(&'a str),
}

/// Route a shell line
///
/// `exit` and `help` are recognized with surrounding whitespace trimmed, so `"  exit "` still
/// exits instead of being evaluated as the unbound name `exit`. Every other line goes to the
/// language untouched.
pub fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "exit" => Command::Exit,
        "help" => Command::Help,
        _ => Command::Eval(line),
    }
}

/// Fixup input so the scanner is happy
///
/// Removes the multiline escape created by `ReplHelper`. The scanner only splits words on
/// spaces, so the escape is replaced with one.
pub fn fixup_input(input: &str) -> String {
    input.replace("\\\n", " ")
}

#[test]
fn test_fixup_input() {
    assert_eq!(fixup_input("say x \\\nplus 1"), "say x  plus 1");
    assert_eq!(fixup_input("say x\\\nplus 1"), "say x plus 1");
    assert_eq!(fixup_input("say x \\ \nplus 1"), "say x \\ \nplus 1");
    assert_eq!(fixup_input("say x"), "say x");
}

#[test]
fn test_parse_command() {
    let data = vec![
        ("exit", Command::Exit),
        ("  exit ", Command::Exit),
        ("help\t", Command::Help),
        ("help", Command::Help),
        ("say help", Command::Eval("say help")),
        ("exit = 1", Command::Eval("exit = 1")),
        ("", Command::Eval("")),
    ];

    for (input, expected) in data {
        assert_eq!(parse_command(input), expected);
    }
}
