use crate::error_formatter::format_error;
use crate::formatter::Formatter;
use anyhow::{Context, Result};
use inquire::{InquireError, Text};
use metrum::Engine;
use tracing::debug;

/// One line typed at the prompt
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Skip,
    Parse(&'a str),
    Check(&'a str, &'a str),
}

fn read_command(line: &str) -> Command<'_> {
    let line = line.trim();
    match line {
        "" => Command::Skip,
        ":q" | ":quit" | "exit" | "quit" => Command::Quit,
        _ => match line.split_once("==") {
            Some((left, right)) => Command::Check(left.trim(), right.trim()),
            None => Command::Parse(line),
        },
    }
}

pub fn run_interactive(engine: &Engine) -> Result<()> {
    let formatter = Formatter::default();

    println!("Type a unit expression to resolve it, or 'A == B' to compare two.");
    println!("Enter :q or press Esc to leave.\n");

    loop {
        let line = match Text::new("units>")
            .with_help_message("e.g. kg m / s^2")
            .prompt()
        {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read a unit expression"),
        };

        match read_command(&line) {
            Command::Quit => break,
            Command::Skip => continue,
            Command::Parse(source) => {
                debug!(source, "interactive parse");
                match engine.parse_units(source) {
                    Ok(units) => print!("{}", formatter.format_units(&units)),
                    Err(e) => eprintln!("{}", format_error(&e)),
                }
            }
            Command::Check(left, right) => {
                debug!(left, right, "interactive check");
                match engine.check_equivalent(left, right) {
                    Ok(true) => println!("✓ equal"),
                    Ok(false) => println!("✗ not equal"),
                    Err(e) => eprintln!("{}", format_error(&e)),
                }
            }
        }
    }

    Ok(())
}
