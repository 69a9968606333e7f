//! Tool manifest advertised to the tool-invocation host.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ActionSpec;

/// Process launch command for the packaged executable.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entrypoint {
    command: String,
    #[serde(default)]
    args: Vec<String>,
}

impl Entrypoint {
    /// Creates a launch command.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidManifest`] when the command is empty.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> crate::Result<Self> {
        let command = command.into();
        if command.trim().is_empty() {
            return Err(crate::Error::InvalidManifest {
                reason: "entrypoint command cannot be empty".into(),
            });
        }
        Ok(Self { command, args })
    }

    /// Returns the command to launch.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns the ordered command arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Descriptive document listing a tool's identity, launch method, and actions.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    tool_name: String,
    version: String,
    description: String,
    entrypoint: Entrypoint,
    #[serde(default)]
    actions: Vec<ActionSpec>,
}

impl Manifest {
    /// Starts building a [`Manifest`].
    #[must_use]
    pub fn builder(entrypoint: Entrypoint) -> ManifestBuilder {
        ManifestBuilder {
            entrypoint,
            tool_name: None,
            version: None,
            description: String::new(),
            actions: Vec::new(),
        }
    }

    /// Returns the tool name.
    #[must_use]
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Returns the semantic version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the tool description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the launch command.
    #[must_use]
    pub fn entrypoint(&self) -> &Entrypoint {
        &self.entrypoint
    }

    /// Returns the advertised actions in discovery order.
    #[must_use]
    pub fn actions(&self) -> &[ActionSpec] {
        &self.actions
    }
}

/// Builder for [`Manifest`].
#[derive(Debug)]
pub struct ManifestBuilder {
    entrypoint: Entrypoint,
    tool_name: Option<String>,
    version: Option<String>,
    description: String,
    actions: Vec<ActionSpec>,
}

impl ManifestBuilder {
    /// Sets the tool name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidManifest`] when the name is empty.
    pub fn tool_name(mut self, name: impl Into<String>) -> crate::Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(crate::Error::InvalidManifest {
                reason: "tool name cannot be empty".into(),
            });
        }
        self.tool_name = Some(name);
        Ok(self)
    }

    /// Sets the semantic version string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidManifest`] when the version is empty.
    pub fn version(mut self, version: impl Into<String>) -> crate::Result<Self> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(crate::Error::InvalidManifest {
                reason: "version cannot be empty".into(),
            });
        }
        self.version = Some(version);
        Ok(self)
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the action list.
    #[must_use]
    pub fn actions(mut self, actions: Vec<ActionSpec>) -> Self {
        self.actions = actions;
        self
    }

    /// Consumes the builder and returns the manifest.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidManifest`] if mandatory fields are
    /// missing, or [`crate::Error::DuplicateAction`] if two actions share a
    /// name.
    pub fn build(self) -> crate::Result<Manifest> {
        let tool_name = self
            .tool_name
            .ok_or_else(|| crate::Error::InvalidManifest {
                reason: "tool name must be provided".into(),
            })?;
        let version = self.version.ok_or_else(|| crate::Error::InvalidManifest {
            reason: "version must be provided".into(),
        })?;

        let mut seen = HashSet::new();
        for action in &self.actions {
            if !seen.insert(action.name()) {
                return Err(crate::Error::DuplicateAction {
                    name: action.name().to_owned(),
                });
            }
        }

        Ok(Manifest {
            tool_name,
            version,
            description: self.description,
            entrypoint: self.entrypoint,
            actions: self.actions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Parameter, Parameters, TypeTag};

    fn entrypoint() -> Entrypoint {
        Entrypoint::new("./libs/tool", vec!["invoke".into()]).unwrap()
    }

    fn action(name: &str) -> ActionSpec {
        let parameters =
            Parameters::try_from(vec![Parameter::new("dateIso", TypeTag::String)]).unwrap();
        ActionSpec::new(name, "demo", parameters).unwrap()
    }

    #[test]
    fn builds_manifest() {
        let manifest = Manifest::builder(entrypoint())
            .tool_name("demo")
            .unwrap()
            .version("1.2.3")
            .unwrap()
            .description("demo tool")
            .actions(vec![action("a"), action("b")])
            .build()
            .unwrap();

        assert_eq!(manifest.tool_name(), "demo");
        assert_eq!(manifest.version(), "1.2.3");
        assert_eq!(manifest.entrypoint().args(), ["invoke"]);
        assert_eq!(manifest.actions().len(), 2);
    }

    #[test]
    fn name_is_required() {
        let result = Manifest::builder(entrypoint()).build();
        assert!(matches!(result, Err(crate::Error::InvalidManifest { .. })));
    }

    #[test]
    fn duplicate_actions_are_rejected() {
        let err = Manifest::builder(entrypoint())
            .tool_name("demo")
            .unwrap()
            .version("1")
            .unwrap()
            .actions(vec![action("addDays"), action("addDays")])
            .build()
            .expect_err("duplicate names should fail");
        assert!(matches!(err, crate::Error::DuplicateAction { name } if name == "addDays"));
    }

    #[test]
    fn field_order_matches_document_layout() {
        let manifest = Manifest::builder(entrypoint())
            .tool_name("demo")
            .unwrap()
            .version("1")
            .unwrap()
            .build()
            .unwrap();
        let json = serde_json::to_string(&manifest).unwrap();
        assert_eq!(
            json,
            r#"{"tool_name":"demo","version":"1","description":"","entrypoint":{"command":"./libs/tool","args":["invoke"]},"actions":[]}"#
        );
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(Entrypoint::new("", Vec::new()).is_err());
    }
}
