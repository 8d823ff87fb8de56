//! Plasma panel control console.
//!
//! One-shot CLI front end over the panel session core: load the console
//! configuration, build the two panel sessions, dispatch a single command to
//! the selected panel(s), and print whatever status text the sessions report.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use plasma_panel::{
    ConsoleConfig, Dispatcher, FixedSelection, PanelId, PanelSession, Selection, SerialTransport,
    SimulatedPanel, StatusSink, Transport,
};
use plasma_protocol::{Category, CATALOG};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plasma-console", about = "Control console for dual plasma display panels")]
struct Cli {
    /// Path to the console configuration file.
    #[arg(long, default_value = "console.yaml")]
    config: PathBuf,

    /// Run against in-memory simulated panels instead of real serial links.
    #[arg(long)]
    simulate: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send one control command to the selected panel(s).
    Send {
        /// Command category (power, source, mode).
        category: String,
        /// Value within the category (e.g. "On", "PC VGA", "Zoom").
        value: String,
        /// Which panel(s) the command applies to.
        #[arg(long, value_enum, default_value = "both")]
        target: Target,
    },
    /// Print the state block each panel is assumed to hold at startup.
    Status,
    /// List the categories, values, and wire codes the catalog knows.
    Catalog,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Target {
    Left,
    Right,
    Both,
}

impl From<Target> for Selection {
    fn from(target: Target) -> Selection {
        match target {
            Target::Left => Selection::Left,
            Target::Right => Selection::Right,
            Target::Both => Selection::Both,
        }
    }
}

#[derive(Debug, Error)]
enum ConsoleError {
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ParseConfig {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown category '{0}' (expected power, source, or mode)")]
    UnknownCategory(String),

    #[error("unknown {category} value '{value}' (known values: {known})")]
    UnknownValue {
        category: Category,
        value: String,
        known: String,
    },
}

/// Prints status blocks to stdout, one labeled block per panel report.
struct StdoutSink;

impl StatusSink for StdoutSink {
    fn set_status(&self, panel: PanelId, text: &str) {
        println!("[{panel}]");
        for line in text.lines() {
            println!("  {line}");
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ConsoleError> {
    let config = load_config(&cli.config, cli.simulate)?;
    debug!(?config, simulate = cli.simulate, "console configured");

    match cli.command {
        Command::Send {
            category,
            value,
            target,
        } => {
            let (category, value) = resolve_selection(&category, &value)?;
            if cli.simulate {
                let dispatcher = Dispatcher::new(
                    simulated_session(PanelId::Left, &config.left_port),
                    simulated_session(PanelId::Right, &config.right_port),
                    FixedSelection(target.into()),
                );
                run_send(dispatcher, category, value);
            } else {
                let dispatcher = Dispatcher::new(
                    serial_session(PanelId::Left, &config.left_port, &config),
                    serial_session(PanelId::Right, &config.right_port, &config),
                    FixedSelection(target.into()),
                );
                run_send(dispatcher, category, value);
            }
        }
        Command::Status => {
            // One-shot process: this is the construction-time snapshot each
            // session starts from, not a readback from the hardware.
            for (id, port) in [
                (PanelId::Left, config.left_port.as_str()),
                (PanelId::Right, config.right_port.as_str()),
            ] {
                let session = simulated_session(id, port);
                StdoutSink.set_status(id, &session.render_state());
            }
        }
        Command::Catalog => {
            for category in Category::ALL {
                println!("{category}:");
                for entry in CATALOG.iter().filter(|e| e.category == category) {
                    println!("  {:<12} {}", entry.value, entry.code);
                }
            }
        }
    }
    Ok(())
}

fn run_send<L: Transport, R: Transport>(
    mut dispatcher: Dispatcher<L, R, FixedSelection>,
    category: Category,
    value: &'static str,
) {
    dispatcher.send(category, value, &StdoutSink);
}

/// Validate operator input against the catalog before it reaches a session,
/// so a typo is a friendly CLI error rather than a contract violation.
fn resolve_selection(
    category: &str,
    value: &str,
) -> Result<(Category, &'static str), ConsoleError> {
    let category = Category::from_str(category)
        .ok_or_else(|| ConsoleError::UnknownCategory(category.to_string()))?;
    let entry = CATALOG
        .iter()
        .find(|e| e.category == category && e.value.eq_ignore_ascii_case(value))
        .ok_or_else(|| ConsoleError::UnknownValue {
            category,
            value: value.to_string(),
            known: category.values().collect::<Vec<_>>().join(", "),
        })?;
    Ok((category, entry.value))
}

fn load_config(path: &Path, simulate: bool) -> Result<ConsoleConfig, ConsoleError> {
    if simulate && !path.exists() {
        // Simulated panels need no real endpoints.
        return Ok(ConsoleConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConsoleError::ReadConfig {
        path: path.display().to_string(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| ConsoleError::ParseConfig {
        path: path.display().to_string(),
        source,
    })
}

fn serial_session(
    id: PanelId,
    port: &str,
    config: &ConsoleConfig,
) -> PanelSession<SerialTransport> {
    PanelSession::new(id, port, SerialTransport::new(port, config.read_timeout()))
}

fn simulated_session(id: PanelId, port: &str) -> PanelSession<SimulatedPanel> {
    PanelSession::new(id, port, SimulatedPanel::new())
}
