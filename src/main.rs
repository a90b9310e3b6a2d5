use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Parser;
use log::{error, info};
use rustyline::config::Config as EditorConfig;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use simplelog::{Config as LogConfig, LevelFilter, SimpleLogger};

use bubble::{evaluate, Runtime};

mod repl;

use repl::{fixup_input, parse_command, Command, ReplHelper, HELP};

const HISTORY_FILE: &str = ".bubble_history";
const PROMPT: &str = "> ";

type ReplEditor = Editor<ReplHelper, DefaultHistory>;

#[derive(Parser)]
#[command(version, about)]
struct Opt {
    /// Show debug output
    #[arg(short, long)]
    debug: bool,
    /// Also dump tokens and syntax trees
    #[arg(short, long)]
    verbose: bool,
    /// Evaluate SOURCE, print the result and exit
    #[arg(short, long, value_name = "SOURCE")]
    eval: Option<String>,
    /// File to load and save line history
    #[arg(long, default_value = HISTORY_FILE)]
    history: PathBuf,
    /// Don't load or save line history
    #[arg(long)]
    no_history: bool,
}

fn init_logging(debug: bool, verbose: bool) -> Result<()> {
    let filter = if verbose {
        LevelFilter::Trace
    } else if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Error
    };

    match SimpleLogger::init(filter, LogConfig::default()) {
        Ok(_) => Ok(()),
        Err(e) => bail!("Failed to init logger: {}", e),
    }
}

fn init_editor() -> Result<ReplEditor> {
    let config = EditorConfig::builder().auto_add_history(true).build();
    let mut editor = match ReplEditor::with_config(config) {
        Ok(e) => e,
        Err(e) => bail!("Failed to init line editor: {}", e),
    };
    editor.set_helper(Some(ReplHelper::new()));

    Ok(editor)
}

fn init_history(editor: &mut ReplEditor, path: &Path) {
    if let Err(e) = editor.load_history(path) {
        info!("No history loaded from {}: {}", path.display(), e);
    }
}

fn save_history(editor: &mut ReplEditor, path: &Path) -> Result<()> {
    match editor.save_history(path) {
        Ok(_) => Ok(()),
        Err(e) => bail!("Failed to save history: {}", e),
    }
}

fn welcome() {
    println!();
    println!("  BUBBLE v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("  Welcome to the Bubble programming language!");
    println!();
    println!("  Type help for a list of commands. To exit, type exit.");
    println!();
}

fn repl(editor: &mut ReplEditor) {
    let mut runtime = Runtime::new();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = fixup_input(&line);
                match parse_command(&line) {
                    Command::Exit => break,
                    Command::Help => println!("{}", HELP),
                    Command::Eval(src) => {
                        println!("  {}", runtime.eval(src));
                        println!();
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("Press Ctrl-D or type 'exit' to quit");
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(e) => {
                error!("Unexpected error: {}", e);
                println!("exit");
                break;
            }
        }
    }
}

fn main() -> Result<()> {
    let opts = Opt::parse();
    init_logging(opts.debug, opts.verbose)?;

    if let Some(src) = &opts.eval {
        println!("{}", evaluate(src));
        return Ok(());
    }

    let mut editor = init_editor()?;
    if !opts.no_history {
        init_history(&mut editor, &opts.history);
    }
    welcome();

    repl(&mut editor);

    if !opts.no_history {
        save_history(&mut editor, &opts.history)?;
    }

    Ok(())
}
