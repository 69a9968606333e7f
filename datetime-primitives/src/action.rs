//! Action descriptors: name, description, and parameter schema.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::TypeTag;

/// Single formal parameter of an action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parameter {
    name: String,
    tag: TypeTag,
}

impl Parameter {
    /// Creates a parameter descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            tag,
        }
    }

    /// Returns the external parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the inferred type tag.
    #[must_use]
    pub const fn tag(&self) -> TypeTag {
        self.tag
    }
}

/// Ordered parameter list, serialized as a `{name: tag}` object.
///
/// Declaration order is preserved in both directions so that the emitted
/// document is stable across runs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] when the name is empty or already
    /// present.
    pub fn push(&mut self, parameter: Parameter) -> Result<()> {
        if parameter.name.trim().is_empty() {
            return Err(Error::InvalidAction {
                reason: "parameter name cannot be empty".into(),
            });
        }
        if self.get(&parameter.name).is_some() {
            return Err(Error::InvalidAction {
                reason: format!("parameter `{}` is declared twice", parameter.name),
            });
        }
        self.0.push(parameter);
        Ok(())
    }

    /// Looks up the tag of a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TypeTag> {
        self.0.iter().find(|p| p.name == name).map(Parameter::tag)
    }

    /// Iterates over the parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.0.iter()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the action takes no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<Parameter>> for Parameters {
    type Error = Error;

    fn try_from(value: Vec<Parameter>) -> Result<Self> {
        let mut parameters = Self::new();
        for parameter in value {
            parameters.push(parameter)?;
        }
        Ok(parameters)
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for parameter in &self.0 {
            map.serialize_entry(&parameter.name, &parameter.tag)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Parameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ParametersVisitor;

        impl<'de> Visitor<'de> for ParametersVisitor {
            type Value = Parameters;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of parameter names to type tags")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Parameters, A::Error> {
                let mut parameters = Parameters::new();
                while let Some((name, tag)) = access.next_entry::<String, TypeTag>()? {
                    parameters
                        .push(Parameter::new(name, tag))
                        .map_err(serde::de::Error::custom)?;
                }
                Ok(parameters)
            }
        }

        deserializer.deserialize_map(ParametersVisitor)
    }
}

/// Externally invokable action as advertised in the manifest.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    name: String,
    description: String,
    #[serde(default)]
    parameters: Parameters,
}

impl ActionSpec {
    /// Creates an action descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] if the name is empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Parameters,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidAction {
                reason: "action name cannot be empty".into(),
            });
        }
        Ok(Self {
            name,
            description: description.into(),
            parameters,
        })
    }

    /// Returns the unique action name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parameter schema.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_days() -> ActionSpec {
        let parameters = Parameters::try_from(vec![
            Parameter::new("dateIso", TypeTag::String),
            Parameter::new("days", TypeTag::Number),
        ])
        .unwrap();
        ActionSpec::new("addDays", "Adds days", parameters).unwrap()
    }

    #[test]
    fn parameters_serialize_in_declaration_order() {
        let json = serde_json::to_string(add_days().parameters()).unwrap();
        assert_eq!(json, r#"{"dateIso":"string","days":"number"}"#);
    }

    #[test]
    fn spec_survives_json() {
        let spec = add_days();
        let json = serde_json::to_string(&spec).unwrap();
        let parsed: ActionSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, spec);
        assert_eq!(parsed.parameters().get("days"), Some(TypeTag::Number));
    }

    #[test]
    fn duplicate_parameter_is_rejected() {
        let err = Parameters::try_from(vec![
            Parameter::new("date", TypeTag::String),
            Parameter::new("date", TypeTag::Any),
        ])
        .expect_err("duplicate parameter should fail");
        assert!(matches!(err, Error::InvalidAction { .. }));

        let err = serde_json::from_str::<Parameters>(r#"{"a":"any","a":"number"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = ActionSpec::new(" ", "blank", Parameters::new()).expect_err("blank name");
        assert!(matches!(err, Error::InvalidAction { .. }));
    }
}
