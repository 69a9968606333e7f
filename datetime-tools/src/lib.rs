//! Date/time actions and their discovery.
//!
//! Every function under [`actions`] is annotated with [`action`], which
//! registers a binding at link time. [`registry::ActionRegistry::discover`]
//! collects the bindings of a module namespace into an invokable registry and
//! the schema advertised in the tool manifest.

#![warn(missing_docs, clippy::pedantic)]

extern crate self as datetime_tools;

pub mod actions;
mod error;
mod iso;
mod pattern;
pub mod registry;
mod tz;

pub use datetime_tools_macros::action;
pub use error::{ActionError, ActionResult};

#[doc(hidden)]
pub use inventory;

/// Namespace that holds the built-in action catalogue.
pub const ACTIONS_NAMESPACE: &str = "datetime_tools::actions";
