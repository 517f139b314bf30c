use std::path::PathBuf;

use clap::Parser;
use taskpad::cli::Commands;
use taskpad::error::Result;
use taskpad::output::Format;

#[derive(Parser)]
#[command(
    name = "taskpad",
    version,
    about = "Local task list with per-view positional ids"
)]
struct Cli {
    /// Path to the task file
    #[arg(long, global = true, default_value = "tasks.json")]
    file: PathBuf,
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    /// Command to run; omit to enter the interactive prompt
    #[command(subcommand)]
    command: Option<Commands>,
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(command) => taskpad::cli::dispatch(&cli.file, cli.format, command),
        None => taskpad::repl::run(&cli.file, cli.format),
    }
}

fn main() {
    let cli = Cli::parse();
    let format = cli.format;
    if let Err(e) = run(cli) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            Format::Pretty => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
