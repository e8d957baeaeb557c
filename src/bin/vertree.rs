//! # vertree CLI - branching version trees from the command line
//!
//! Reads commands one per line from a script file or standard input and prints
//! the reply of each command.
//!
//! ## Usage
//! ```bash
//! # Interactive session
//! vertree
//!
//! # Run a script, logging what happens
//! vertree session.txt --verbose
//!
//! # Machine-readable replies
//! printf 'CREATE a\nUPDATE a hi\nREAD a\n' | vertree --json
//! ```
//!
//! ## Commands
//! ```text
//! CREATE <file>              READ <file>
//! UPDATE <file> <text>       INSERT <file> <text>
//! SNAPSHOT <file> <message>  ROLLBACK <file> [id]
//! HISTORY <file>             TREE <file>
//! STATS <file>               RECENT_FILES [k]
//! BIGGEST_TREES [k]
//! ```

use anyhow::Context;
use clap::Parser;
use colored::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vertree::{Reply, VersionError, Workspace, WorkspaceBuilder, DEFAULT_INITIAL_MESSAGE};

/// vertree CLI - branching version history for text files
#[derive(Parser)]
#[command(name = "vertree")]
#[command(version)]
#[command(about = "Track text files as branching trees of snapshots")]
#[command(long_about = None)]
struct Cli {
    /// Script of commands to run (defaults to standard input)
    script: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print every reply as a JSON object on its own line
    #[arg(long)]
    json: bool,

    /// Snapshot message of each new file's root version
    #[arg(long, default_value = DEFAULT_INITIAL_MESSAGE)]
    initial_message: String,

    /// Result count of RECENT_FILES / BIGGEST_TREES given without a count
    #[arg(long, default_value_t = 1)]
    default_count: usize,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // Disable colors if needed
    if std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main command loop
fn run(cli: Cli) -> anyhow::Result<()> {
    let mut workspace = WorkspaceBuilder::new()
        .initial_message(cli.initial_message)
        .default_selection_size(cli.default_count)
        .build()
        .context("invalid configuration")?;

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() && !cli.json {
                println!("{}", "vertree - branching version trees".blue().bold());
                println!("Enter commands, one per line (Ctrl+D to exit)");
            }
            Box::new(stdin.lock())
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (number, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", number + 1))?;
        run_line(&mut workspace, &line, cli.json, &mut out)?;
    }
    out.flush()?;

    Ok(())
}

/// Execute one line and print its reply or error
///
/// Command errors are reported and swallowed so the session continues.
fn run_line(workspace: &mut Workspace, line: &str, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    match workspace.execute_line(line) {
        Ok(Some(reply)) => print_reply(&reply, json, out)?,
        Ok(None) => {}
        Err(e) if e.is_recoverable() => print_error(&e, json, out)?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn print_reply(reply: &Reply, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(reply)?)?;
    } else if !reply.is_silent() {
        writeln!(out, "{}", reply)?;
    }
    Ok(())
}

fn print_error(error: &VersionError, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if json {
        let value = serde_json::json!({ "error": error.to_string() });
        writeln!(out, "{}", value)?;
    } else {
        writeln!(out, "{} {}", "Error:".red().bold(), error.user_message())?;
    }
    Ok(())
}
