//! Registry for action metadata and execution.

use std::collections::HashMap;

use datetime_primitives::{ActionSpec, Parameter, Parameters, TypeTag};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

pub use serde_json::Value;

use crate::{ActionError, ActionResult};

/// Invoker generated by the `#[action]` macro.
pub type Invoker = fn(&Value) -> ActionResult<Value>;

/// Declared parameter of a registered action.
#[derive(Clone, Copy, Debug)]
pub struct ParamBinding {
    name: &'static str,
    rust_type: &'static str,
}

impl ParamBinding {
    /// Creates a parameter binding from its external name and Rust type name.
    #[must_use]
    pub const fn new(name: &'static str, rust_type: &'static str) -> Self {
        Self { name, rust_type }
    }

    /// Returns the external parameter name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the normalised Rust type name.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        self.rust_type
    }
}

/// Declarative binding emitted by the `#[action]` macro.
#[derive(Clone, Copy)]
pub struct ActionBinding {
    name: &'static str,
    description: &'static str,
    module: &'static str,
    line: u32,
    params: &'static [ParamBinding],
    invoker: Invoker,
}

impl ActionBinding {
    /// Creates a new binding.
    #[must_use]
    pub const fn new(
        name: &'static str,
        description: &'static str,
        module: &'static str,
        line: u32,
        params: &'static [ParamBinding],
        invoker: Invoker,
    ) -> Self {
        Self {
            name,
            description,
            module,
            line,
            params,
            invoker,
        }
    }

    /// Returns the action name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the module path the action was declared in.
    #[must_use]
    pub const fn module(&self) -> &'static str {
        self.module
    }

    /// Returns the declared parameters in order.
    #[must_use]
    pub const fn params(&self) -> &'static [ParamBinding] {
        self.params
    }

    /// Returns `true` when the binding lives in `namespace` or one of its
    /// submodules.
    #[must_use]
    pub fn is_within(&self, namespace: &str) -> bool {
        self.module == namespace
            || self
                .module
                .strip_prefix(namespace)
                .is_some_and(|rest| rest.starts_with("::"))
    }

    /// Builds the advertised schema, inferring a tag for every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Metadata`] when the name is empty or a
    /// parameter name repeats.
    pub fn spec(&self) -> ActionResult<ActionSpec> {
        let mut parameters = Parameters::new();
        for param in self.params {
            parameters.push(Parameter::new(param.name, TypeTag::infer(param.rust_type)))?;
        }
        Ok(ActionSpec::new(self.name, self.description, parameters)?)
    }
}

impl std::fmt::Debug for ActionBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionBinding")
            .field("name", &self.name)
            .field("module", &self.module)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}

inventory::collect!(ActionBinding);

/// Decodes the argument `name` from a JSON object.
///
/// Absent arguments decode as `null`, so `Option` parameters may be omitted.
///
/// # Errors
///
/// Returns [`ActionError::MissingArgument`] when a required argument is absent
/// or [`ActionError::InvalidArgument`] when it has the wrong shape.
pub fn argument<T: DeserializeOwned>(args: &Value, name: &str) -> ActionResult<T> {
    match args.get(name) {
        Some(value) => T::deserialize(value).map_err(|source| ActionError::InvalidArgument {
            name: name.to_owned(),
            source,
        }),
        None => T::deserialize(&Value::Null).map_err(|_| ActionError::MissingArgument {
            name: name.to_owned(),
        }),
    }
}

/// Encodes an action's return value.
///
/// # Errors
///
/// Returns [`ActionError::Output`] when the value cannot be represented as
/// JSON.
pub fn output<T: Serialize>(value: T) -> ActionResult<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Discovered action with its schema and invoker.
#[derive(Clone, Debug)]
pub struct RegisteredAction {
    spec: ActionSpec,
    module: &'static str,
    invoker: Invoker,
}

impl RegisteredAction {
    /// Returns the advertised schema.
    #[must_use]
    pub fn spec(&self) -> &ActionSpec {
        &self.spec
    }

    /// Returns the module path the action was declared in.
    #[must_use]
    pub const fn module(&self) -> &'static str {
        self.module
    }

    /// Executes the action with a JSON object of arguments.
    ///
    /// # Errors
    ///
    /// Propagates argument decoding failures and any error returned by the
    /// action itself.
    pub fn invoke(&self, args: &Value) -> ActionResult<Value> {
        (self.invoker)(args)
    }
}

/// Registry of actions keyed by name, in discovery order.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: Vec<RegisteredAction>,
    index: HashMap<String, usize>,
}

impl ActionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every `#[action]` declared in `namespace` or below it.
    ///
    /// Bindings are ordered by module path and then source line so the result
    /// is stable from run to run.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::DuplicateAction`] if two bindings share a name.
    pub fn discover(namespace: &str) -> ActionResult<Self> {
        let registry = Self::from_bindings(
            inventory::iter::<ActionBinding>
                .into_iter()
                .filter(|binding| binding.is_within(namespace)),
        )?;
        debug!(
            namespace,
            actions = registry.len(),
            "action discovery complete"
        );
        Ok(registry)
    }

    /// Builds a registry from an explicit set of bindings.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::DuplicateAction`] if two bindings share a name.
    pub fn from_bindings<'a>(
        bindings: impl IntoIterator<Item = &'a ActionBinding>,
    ) -> ActionResult<Self> {
        let mut bindings: Vec<_> = bindings.into_iter().collect();
        bindings.sort_by_key(|binding| (binding.module, binding.line, binding.name));

        let mut registry = Self::new();
        for binding in bindings {
            registry.register_binding(binding)?;
        }
        Ok(registry)
    }

    /// Registers a single binding.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::DuplicateAction`] if the name is already
    /// present, or [`ActionError::Metadata`] if the binding is malformed.
    pub fn register_binding(&mut self, binding: &ActionBinding) -> ActionResult<()> {
        if let Some(&existing) = self.index.get(binding.name) {
            return Err(ActionError::DuplicateAction {
                name: binding.name.to_owned(),
                first: self.actions[existing].module.to_owned(),
                second: binding.module.to_owned(),
            });
        }

        let spec = binding.spec()?;
        debug!(
            action = spec.name(),
            module = binding.module,
            parameters = spec.parameters().len(),
            "registered action"
        );
        self.index.insert(spec.name().to_owned(), self.actions.len());
        self.actions.push(RegisteredAction {
            spec,
            module: binding.module,
            invoker: binding.invoker,
        });
        Ok(())
    }

    /// Returns the action matching the supplied name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredAction> {
        self.index.get(name).map(|&idx| &self.actions[idx])
    }

    /// Invokes a registered action directly.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownAction`] when the action is not found or
    /// propagates the failure of the action itself.
    pub fn invoke(&self, name: &str, args: &Value) -> ActionResult<Value> {
        let action = self.get(name).ok_or_else(|| ActionError::UnknownAction {
            name: name.to_owned(),
        })?;
        debug!(action = name, "invoking action");
        action.invoke(args)
    }

    /// Iterates over the advertised schemas in discovery order.
    pub fn specs(&self) -> impl Iterator<Item = &ActionSpec> {
        self.actions.iter().map(RegisteredAction::spec)
    }

    /// Returns the number of registered actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` when no action is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
