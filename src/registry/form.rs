use super::{Component, ComponentRegistry, Variable, VariableRegistry};
use crate::error::RegistryError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;

/// The JSON shape of form metadata handed over by the form builder.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct FormDefinition {
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// In-memory variable and component registry for one form.
///
/// Built once and then only read; lookups are keyed by variable/component key,
/// listings keep declaration order.
#[derive(Debug, Default, Clone)]
pub struct FormRegistry {
    variables: Vec<Variable>,
    variable_index: AHashMap<String, usize>,
    components: AHashMap<String, Component>,
}

impl FormRegistry {
    pub fn new(
        variables: Vec<Variable>,
        components: Vec<Component>,
    ) -> Result<Self, RegistryError> {
        let mut variable_index = AHashMap::with_capacity(variables.len());
        for (idx, variable) in variables.iter().enumerate() {
            if variable_index.insert(variable.key.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateKey(variable.key.clone()));
            }
        }

        let mut component_map = AHashMap::with_capacity(components.len());
        for component in components {
            let key = component.key.clone();
            if component_map.insert(key.clone(), component).is_some() {
                return Err(RegistryError::DuplicateKey(key));
            }
        }

        Ok(Self {
            variables,
            variable_index,
            components: component_map,
        })
    }

    pub fn from_definition(definition: FormDefinition) -> Result<Self, RegistryError> {
        Self::new(definition.variables, definition.components)
    }

    /// Parses a `FormDefinition` from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let definition: FormDefinition = serde_json::from_str(json)?;
        Self::from_definition(definition)
    }

    /// Loads a `FormDefinition` from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl VariableRegistry for FormRegistry {
    fn lookup_variable(&self, key: &str) -> Option<&Variable> {
        self.variable_index
            .get(key)
            .and_then(|idx| self.variables.get(*idx))
    }

    fn list_by_filter(&self, predicate: &dyn Fn(&Variable) -> bool) -> Vec<&Variable> {
        self.variables.iter().filter(|v| predicate(v)).collect()
    }
}

impl ComponentRegistry for FormRegistry {
    fn lookup_component(&self, key: &str) -> Option<&Component> {
        self.components.get(key)
    }
}
