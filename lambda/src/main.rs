#![warn(clippy::nursery)]
#![warn(clippy::unnested_or_patterns)]
#![warn(clippy::uninlined_format_args)]

use clap::Parser;
use lambda::{
    Command, Config, Output, Session,
    session::DEFAULT_MAX_STEPS,
    syntax::{COMMANDS, KEYWORDS},
};
use rustyline::{Editor, error::ReadlineError, history::DefaultHistory};
use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use util::KeywordsCompleter;

/// Normalizes untyped lambda calculus terms.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// File of `;`-separated commands to run. Starts a REPL when omitted.
    file: Option<PathBuf>,
    /// Maximum number of reduction steps before giving up on a term.
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,
    /// Print the file name and contents before running it.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("readline error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("{0} parse error(s)")]
    Parse(usize),
    #[error("{0} command(s) failed")]
    Failed(usize),
}

fn print_output(out: &Output) {
    if !matches!(out, Output::Nothing) {
        println!("{out}");
    }
}

fn run_file(session: &mut Session, path: &Path, verbose: bool) -> Result<(), RunError> {
    let src = fs::read_to_string(path)?;
    if verbose {
        println!("{}:\n", path.display());
        println!("{src}\n");
    }

    let commands = Command::parse_program(&src).map_err(|errs| {
        for err in &errs {
            eprintln!("Parse error: {err}");
        }
        RunError::Parse(errs.len())
    })?;

    let mut failed = 0;
    for cmd in commands {
        match session.execute(cmd) {
            Ok(out) => print_output(&out),
            Err(err) => {
                eprintln!("Evaluation error: {err}");
                failed += 1;
            }
        }
    }

    if failed == 0 {
        Ok(())
    } else {
        Err(RunError::Failed(failed))
    }
}

fn repl(session: &mut Session) -> Result<(), RunError> {
    let mut rl = Editor::<KeywordsCompleter, DefaultHistory>::new()?;
    let completer = KeywordsCompleter::new(KEYWORDS.iter().copied(), COMMANDS.iter().copied());
    rl.set_helper(Some(completer));

    loop {
        let input = rl.readline("lambda> ");
        match input {
            Ok(line) => {
                rl.add_history_entry(&line).ok();
                match Command::parse(line.as_str()) {
                    Ok(cmd) => match session.execute(cmd) {
                        Ok(out) => {
                            if let Some(helper) = rl.helper_mut() {
                                for name in session.environment().names() {
                                    helper.add_keyword(name);
                                }
                            }
                            print_output(&out);
                        }
                        Err(err) => eprintln!("Evaluation error: {err}"),
                    },
                    Err(errs) => {
                        for err in errs {
                            eprintln!("Parse error: {err}");
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut session = Session::new(Config {
        max_steps: args.max_steps,
    });

    let result = match &args.file {
        Some(path) => run_file(&mut session, path, args.verbose),
        None => repl(&mut session),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
