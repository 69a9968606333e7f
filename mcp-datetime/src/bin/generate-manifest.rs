//! Writes `manifest.json` for the built-in action catalogue.

use anyhow::Result;
use datetime_config::GeneratorConfig;
use mcp_datetime::generator;

fn main() -> Result<()> {
    datetime_telemetry::init_tracing();
    generator::generate(&GeneratorConfig::default())?;
    println!("-> manifest.json generated successfully!");
    Ok(())
}
