//! Core shared types for the MCP date/time toolkit.

#![warn(missing_docs, clippy::pedantic)]

mod action;
mod error;
mod manifest;
mod type_tag;

/// Action descriptors advertised in the manifest.
pub use action::{ActionSpec, Parameter, Parameters};
/// Error type and result alias shared across the toolkit.
pub use error::{Error, Result};
/// Manifest document advertised to the tool-invocation host.
pub use manifest::{Entrypoint, Manifest, ManifestBuilder};
/// Coarse external representation of a parameter type.
pub use type_tag::TypeTag;
