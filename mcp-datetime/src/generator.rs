//! Manifest emitter.
//!
//! Discovers the actions of the configured namespace, wraps them in a
//! [`Manifest`] with the configured header, and writes the result as pretty
//! JSON. Output is deterministic: discovery order is fixed and the JSON field
//! order follows the manifest model.

use std::fs;
use std::io;
use std::path::PathBuf;

use datetime_config::GeneratorConfig;
use datetime_primitives::Manifest;
use datetime_tools::ActionError;
use datetime_tools::registry::ActionRegistry;
use thiserror::Error;
use tracing::{debug, info};

/// Result alias for manifest generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors raised while producing `manifest.json`.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Action discovery failed, typically on a duplicate name.
    #[error("action discovery failed")]
    Discovery(#[from] ActionError),

    /// Header fields or the action list were rejected by the manifest model.
    #[error("manifest is invalid")]
    Manifest(#[from] datetime_primitives::Error),

    /// Serialization failed.
    #[error("failed to render manifest")]
    Render(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("failed to write `{path}`")]
    Write {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Discovers the configured namespace and assembles the manifest.
///
/// # Errors
///
/// Returns [`GenerateError::Discovery`] when two actions share a name and
/// [`GenerateError::Manifest`] when header fields are invalid.
pub fn build_manifest(config: &GeneratorConfig) -> GenerateResult<Manifest> {
    let registry = ActionRegistry::discover(&config.namespace)?;
    debug!(
        namespace = %config.namespace,
        actions = registry.len(),
        "discovered actions"
    );

    let manifest = Manifest::builder(config.entrypoint()?)
        .tool_name(&config.tool_name)?
        .version(&config.version)?
        .description(&config.description)
        .actions(registry.specs().cloned().collect())
        .build()?;
    Ok(manifest)
}

/// Renders a manifest as two-space indented JSON with a trailing newline.
///
/// # Errors
///
/// Returns [`GenerateError::Render`] if serialization fails.
pub fn render(manifest: &Manifest) -> GenerateResult<String> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    Ok(json)
}

/// Builds, renders, and writes the manifest, replacing any existing file.
///
/// Nothing is written unless building and rendering both succeed.
///
/// # Errors
///
/// Propagates [`build_manifest`] and [`render`] failures, and returns
/// [`GenerateError::Write`] when the file cannot be written.
pub fn generate(config: &GeneratorConfig) -> GenerateResult<Manifest> {
    let manifest = build_manifest(config)?;
    let json = render(&manifest)?;

    fs::write(&config.output_path, json).map_err(|source| GenerateError::Write {
        path: config.output_path.clone(),
        source,
    })?;
    info!(
        path = %config.output_path.display(),
        actions = manifest.actions().len(),
        "manifest written"
    );
    Ok(manifest)
}
