//! Date/time actions for tool-invocation hosts.
//!
//! This crate bundles the workspace crates behind one facade and hosts the
//! manifest [`generator`]. Two binaries ship with it: `generate-manifest`
//! writes `manifest.json`, and `mcp-datetime` invokes actions by name.

#![warn(missing_docs, clippy::pedantic)]

pub mod generator;

/// Shared data model: type tags, action specs, manifests.
pub use datetime_primitives as primitives;

/// Action catalogue, registry, and discovery.
pub use datetime_tools as tools;

/// Generator configuration.
pub use datetime_config as config;

/// Tracing setup.
pub use datetime_telemetry as telemetry;
