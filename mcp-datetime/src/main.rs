//! Runs date/time actions by name.
//!
//! ```text
//! mcp-datetime invoke addDays '{"dateIso":"2025-04-17","days":3}'
//! mcp-datetime list
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use datetime_config::GeneratorConfig;
use datetime_tools::registry::{ActionRegistry, Value};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "mcp-datetime", version, about = "Date/time actions for tool hosts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Invoke an action and print its JSON result.
    Invoke {
        /// Action name, e.g. `addDays`.
        action: String,
        /// Arguments as a JSON object keyed by parameter name.
        #[arg(default_value = "{}")]
        args: String,
    },
    /// Print the advertised action schemas.
    List,
}

fn main() -> Result<()> {
    datetime_telemetry::init_tracing();
    let cli = Cli::parse();
    let config = GeneratorConfig::default();
    let registry = ActionRegistry::discover(&config.namespace)?;

    match cli.command {
        Command::Invoke { action, args } => {
            let args: Value = serde_json::from_str(&args)
                .with_context(|| format!("arguments for `{action}` are not valid JSON"))?;
            debug!(%action, "dispatching");
            let output = registry
                .invoke(&action, &args)
                .with_context(|| format!("action `{action}` failed"))?;
            println!("{}", serde_json::to_string(&output)?);
        }
        Command::List => {
            let specs: Vec<_> = registry.specs().collect();
            println!("{}", serde_json::to_string_pretty(&specs)?);
        }
    }
    Ok(())
}
