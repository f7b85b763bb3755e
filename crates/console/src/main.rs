//! `boardstock` console entry point.
//!
//! Loads the configuration, builds the yard and runs the command loop on
//! stdin. Logs go to stderr so they never mix with the rendered views.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use boardstock_console::{Outcome, Session};
use boardstock_infra::config::parse_switch;
use boardstock_infra::seed::DEMO_STOCK;
use boardstock_infra::{Yard, YardConfig};
use boardstock_observability::LogFormat;

const PROMPT: &str = "boardstock> ";

#[derive(Parser)]
#[command(name = "boardstock")]
#[command(version)]
#[command(about = "Board inventory across warehouses", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Low-stock warning threshold in 方 (overrides config and environment)
    #[arg(long)]
    threshold: Option<f64>,

    /// Turn low-stock warnings on or off
    #[arg(long, value_name = "on|off", value_parser = switch)]
    warnings: Option<bool>,

    /// Start with no warehouses instead of the demonstration stock
    #[arg(long, default_value_t = false)]
    empty: bool,

    /// Emit logs as JSON lines
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Run a command non-interactively; may be repeated
    #[arg(short = 'c', long = "command", value_name = "COMMAND")]
    commands: Vec<String>,
}

fn switch(raw: &str) -> Result<bool, String> {
    parse_switch(raw).ok_or_else(|| format!("expected on or off, got {raw:?}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    boardstock_observability::init(if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    let mut config = YardConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(threshold) = cli.threshold {
        config.warnings.threshold = threshold;
    }
    if let Some(enabled) = cli.warnings {
        config.warnings.enabled = enabled;
    }
    if cli.empty {
        config.seed_demo_stock = false;
    }
    config.validate().context("invalid command-line settings")?;
    tracing::debug!(?config, "configuration resolved");

    let yard = if config.seed_demo_stock {
        Yard::seeded(config.warnings, DEMO_STOCK).context("loading demonstration stock")?
    } else {
        Yard::new(config.warnings)
    };
    let mut session = Session::new(yard);

    if !cli.commands.is_empty() {
        return run_batch(&mut session, &cli.commands);
    }
    run_interactive(&mut session)
}

/// Run each command in order; the first failure aborts with a non-zero exit.
fn run_batch(session: &mut Session, commands: &[String]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for line in commands {
        match session
            .execute_line(line)
            .with_context(|| format!("command failed: {line}"))?
        {
            Outcome::Continue(text) => stdout.write_all(text.as_bytes())?,
            Outcome::Quit => break,
        }
    }
    Ok(())
}

fn run_interactive(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{}", session.overview())?;
    writeln!(stdout, "Type `help` for commands.")?;

    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            break;
        };
        let line = line.context("reading from stdin")?;

        match session.execute_line(&line) {
            Ok(Outcome::Continue(text)) => stdout.write_all(text.as_bytes())?,
            Ok(Outcome::Quit) => break,
            // Errors are user-facing: report and keep the session alive.
            Err(e) => writeln!(stdout, "error: {e}")?,
        }
    }
    Ok(())
}
