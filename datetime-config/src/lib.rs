//! Configuration for the manifest generator.
//!
//! The generator takes no flags and reads no environment: everything it needs
//! is fixed at compile time in [`defaults`] and gathered into a
//! [`GeneratorConfig`]. Tests and embedders build their own configs to point
//! discovery at another namespace or write somewhere else.

#![warn(missing_docs, clippy::pedantic)]

use std::path::PathBuf;

use datetime_primitives::{Entrypoint, Result};
use serde::{Deserialize, Serialize};

pub mod defaults {
    //! Compile-time constants describing the published tool.

    /// Tool name advertised in the manifest.
    pub const TOOL_NAME: &str = "MCP-DateTime";

    /// Tool version advertised in the manifest.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Human-readable summary of the tool.
    pub const DESCRIPTION: &str = "Date and time utilities: arithmetic, comparison, formatting, \
                                   time-zone conversion, and week/month calendar math";

    /// Module namespace scanned for actions.
    pub const NAMESPACE: &str = "datetime_tools::actions";

    /// Output file, relative to the working directory.
    pub const OUTPUT_PATH: &str = "manifest.json";

    /// Program the host launches to run an action.
    pub const ENTRYPOINT_COMMAND: &str = "./libs/mcp-datetime";

    /// Arguments placed before the action name and its JSON arguments.
    pub const ENTRYPOINT_ARGS: &[&str] = &["invoke"];
}

/// Everything the manifest generator needs to produce `manifest.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Tool name written into the manifest header.
    pub tool_name: String,
    /// Tool version written into the manifest header.
    pub version: String,
    /// Tool description written into the manifest header.
    pub description: String,
    /// Module namespace whose actions are advertised.
    pub namespace: String,
    /// Destination of the rendered manifest.
    pub output_path: PathBuf,
    /// Program the host launches.
    pub entrypoint_command: String,
    /// Arguments passed to the program ahead of the action.
    pub entrypoint_args: Vec<String>,
}

impl GeneratorConfig {
    /// Returns a copy scanning `namespace` instead.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Returns a copy writing to `path` instead.
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Builds the manifest entrypoint.
    ///
    /// # Errors
    ///
    /// Returns [`datetime_primitives::Error::InvalidManifest`] when the
    /// command is empty.
    pub fn entrypoint(&self) -> Result<Entrypoint> {
        Entrypoint::new(&self.entrypoint_command, self.entrypoint_args.clone())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tool_name: defaults::TOOL_NAME.to_owned(),
            version: defaults::VERSION.to_owned(),
            description: defaults::DESCRIPTION.to_owned(),
            namespace: defaults::NAMESPACE.to_owned(),
            output_path: PathBuf::from(defaults::OUTPUT_PATH),
            entrypoint_command: defaults::ENTRYPOINT_COMMAND.to_owned(),
            entrypoint_args: defaults::ENTRYPOINT_ARGS
                .iter()
                .map(|arg| (*arg).to_owned())
                .collect(),
        }
    }
}
