use std::{fs, path::PathBuf};

use clap::Parser;
use moss::{Value, interpreter::evaluator::core::Interpreter, run, span::Source};
use rustyline::{DefaultEditor, error::ReadlineError};

/// moss is a small, dynamically typed scripting language with a
/// tree-walking interpreter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script file to run. Starts the interactive prompt when omitted.
    script: Option<PathBuf>,

    /// Print the value of the last evaluated statement.
    #[arg(short, long)]
    print_result: bool,
}

fn main() {
    let args = Args::parse();

    match args.script {
        Some(path) => run_file(&path, args.print_result),
        None => repl(),
    }
}

fn run_file(path: &PathBuf, print_result: bool) {
    let text = fs::read_to_string(path).unwrap_or_else(|_| {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  path.display());
        std::process::exit(1);
    });

    let source = Source::new(&path.display().to_string(), &text);
    let mut interpreter = Interpreter::new();

    match run(&source, &mut interpreter) {
        Ok(value) => {
            if print_result && let Some(value) = value {
                println!("{}", value.repr());
            }
        },
        Err(error) => {
            eprintln!("{}", error.render(&source));
            std::process::exit(1);
        },
    }
}

fn repl() {
    let Ok(mut editor) = DefaultEditor::new() else {
        eprintln!("Failed to initialize the line editor.");
        std::process::exit(1);
    };

    // One interpreter for the whole session, so definitions persist
    // across inputs.
    let mut interpreter = Interpreter::new();

    loop {
        match editor.readline("moss > ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);

                let source = Source::new("<stdin>", &line);
                match run(&source, &mut interpreter) {
                    Ok(Some(value)) => {
                        if !matches!(value, Value::Boolean(None)) {
                            println!("{}", value.repr());
                        }
                    },
                    Ok(None) => {},
                    Err(error) => eprintln!("{}", error.render(&source)),
                }
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => {
                eprintln!("{error}");
                break;
            },
        }
    }
}
