//! Bisection over an arbitrary ordered list.
//!
//! Mark one line of the list good and another bad, then ask for the next line
//! to test. Mark that line and repeat until `next-line` announces the first
//! bad line. Progress is kept in `<file>.bisect_state`, so each command is a
//! separate invocation:
//!
//! ```text
//! $ listbisect --file versions.txt mark-good --line 4.3.8
//! $ listbisect --file versions.txt mark-bad --line 3.12.5
//! $ listbisect --file versions.txt next-line
//! 4.3.0
//! $ listbisect --file versions.txt mark-bad --line 4.3.0
//! ...
//! $ listbisect --file versions.txt next-line
//! Bisect complete, first bad version is: 4.3.4
//! Bisect Summary:
//! 4.3.8 good
//! ...
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::debug;

use listbisect::exit_codes;
use listbisect::io::config::{BisectConfig, DEFAULT_CONFIG_FILE, load_config};
use listbisect::io::paths::BisectPaths;
use listbisect::io::state_store::{JsonFileStore, Origin};
use listbisect::logging;
use listbisect::report::{render_complete, render_summary};
use listbisect::session::{QueryOutcome, Session};

#[derive(Parser)]
#[command(
    name = "listbisect",
    version,
    about = "Run a bisection over the lines of an arbitrary input file"
)]
struct Cli {
    /// Path to the input file (one version per line).
    #[arg(long = "file", value_name = "PATH")]
    file: PathBuf,

    /// Config file (defaults to `.listbisect.toml` if present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Lock the state file while the command runs.
    #[arg(long)]
    lock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the bisect state for the file if it does not exist yet.
    Init,
    /// Mark a line as good.
    MarkGood {
        /// Contents of the line to be marked as good.
        #[arg(long = "line", allow_hyphen_values = true)]
        line: String,
    },
    /// Mark a line as bad.
    MarkBad {
        /// Contents of the line to be marked as bad.
        #[arg(long = "line", allow_hyphen_values = true)]
        line: String,
    },
    /// Show the next line to be tested.
    NextLine,
    /// Show every line with its current marking.
    Summary,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let mut config = resolve_config(cli.config.as_deref())?;
    config.lock |= cli.lock;
    let paths = BisectPaths::new(&cli.file, &config);
    debug!(source = %paths.source_path.display(), state = %paths.state_path.display(), "resolved paths");

    let mut session = Session::open(&paths, &config)
        .with_context(|| format!("open bisect for {}", paths.source_path.display()))?;

    match cli.command {
        Command::Init => cmd_init(&session),
        Command::MarkGood { line } => {
            session.mark_good(&line).context("mark good")?;
            Ok(exit_codes::OK)
        }
        Command::MarkBad { line } => {
            session.mark_bad(&line).context("mark bad")?;
            Ok(exit_codes::OK)
        }
        Command::NextLine => cmd_next_line(&session),
        Command::Summary => {
            print!("{}", render_summary(&session.summary()));
            Ok(exit_codes::OK)
        }
    }
}

fn cmd_init(session: &Session<JsonFileStore>) -> Result<i32> {
    let index = session.index();
    match session.origin() {
        Origin::Created => println!("initialized {} lines", session.sequence().len()),
        Origin::Restored => println!(
            "resumed {} lines (good: {}, bad: {})",
            session.sequence().len(),
            index.good_count,
            index.bad_count
        ),
    }
    Ok(exit_codes::OK)
}

fn cmd_next_line(session: &Session<JsonFileStore>) -> Result<i32> {
    match session.query_next().context("select next line")? {
        QueryOutcome::Probe { label, .. } => {
            println!("{}", label);
            Ok(exit_codes::OK)
        }
        QueryOutcome::Complete {
            boundary, summary, ..
        } => {
            print!("{}", render_complete(&boundary, &summary));
            Ok(exit_codes::COMPLETE)
        }
    }
}

/// Explicit `--config` must exist; the default file is optional.
fn resolve_config(explicit: Option<&Path>) -> Result<BisectConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} not found", path.display());
            }
            Ok(load_config(path)?)
        }
        None => Ok(load_config(Path::new(DEFAULT_CONFIG_FILE))?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mark_good() {
        let cli = Cli::parse_from([
            "listbisect",
            "--file",
            "v.txt",
            "mark-good",
            "--line",
            "4.3.8",
        ]);
        assert_eq!(cli.file, PathBuf::from("v.txt"));
        assert!(matches!(cli.command, Command::MarkGood { ref line } if line == "4.3.8"));
    }

    #[test]
    fn parse_next_line_with_lock() {
        let cli = Cli::parse_from(["listbisect", "--file", "v.txt", "--lock", "next-line"]);
        assert!(cli.lock);
        assert!(matches!(cli.command, Command::NextLine));
    }

    #[test]
    fn parse_requires_file() {
        assert!(Cli::try_parse_from(["listbisect", "next-line"]).is_err());
    }
}
