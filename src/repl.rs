//! Interactive prompt: each line is tokenized, re-parsed through the same
//! subcommand set as the one-shot CLI, and dispatched against the session's
//! task file. Parse failures and command errors report and keep the loop
//! alive.

use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::Parser;

use crate::cli::{self, Commands};
use crate::error::Result;
use crate::output::Format;

#[derive(Parser)]
#[command(name = "taskpad", disable_version_flag = true)]
struct ReplLine {
    #[command(subcommand)]
    command: Commands,
}

pub fn run(file: &Path, format: Format) -> Result<()> {
    println!("taskpad interactive mode. Type 'help' to see commands, 'exit' to quit.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("task> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line.to_lowercase().as_str(), "exit" | "quit" | "q") {
            break;
        }

        let tokens = match tokenize(line) {
            Ok(tokens) => tokens,
            Err(message) => {
                eprintln!("Parse error: {message}");
                continue;
            }
        };

        // clap expects argv[0]; `help` and `--help` lines render through the
        // parse error path below.
        let argv = std::iter::once("taskpad".to_string()).chain(tokens);
        match ReplLine::try_parse_from(argv) {
            Ok(parsed) => {
                if let Err(e) = cli::dispatch(file, format, parsed.command) {
                    eprintln!("error: {e}");
                }
            }
            Err(e) => {
                let _ = e.print();
            }
        }
    }
    Ok(())
}

/// Split a prompt line into argv tokens, honoring single and double quotes
/// so multi-word titles survive.
fn tokenize(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None => match ch {
                '"' | '\'' => {
                    quote = Some(ch);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if quote.is_some() {
        return Err("unclosed quote".into());
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(tokenize("list --all").unwrap(), vec!["list", "--all"]);
    }

    #[test]
    fn double_quotes_group_words() {
        assert_eq!(
            tokenize(r#"add "Buy groceries" -d "milk and eggs""#).unwrap(),
            vec!["add", "Buy groceries", "-d", "milk and eggs"]
        );
    }

    #[test]
    fn single_quotes_group_words() {
        assert_eq!(
            tokenize("add 'call the dentist'").unwrap(),
            vec!["add", "call the dentist"]
        );
    }

    #[test]
    fn empty_quotes_produce_an_empty_token() {
        assert_eq!(tokenize(r#"add """#).unwrap(), vec!["add", ""]);
    }

    #[test]
    fn unclosed_quote_is_an_error() {
        assert!(tokenize(r#"add "oops"#).is_err());
    }

    #[test]
    fn collapses_repeated_whitespace() {
        assert_eq!(tokenize("  complete   2  3 ").unwrap(), vec!["complete", "2", "3"]);
    }
}
