use serde::{Deserialize, Serialize};

/// Component types whose encoding differs from a plain `{"var": key}` subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Textfield,
    Number,
    Select,
    Radio,
    Selectboxes,
    Checkbox,
    Date,
    Datetime,
    #[serde(other)]
    Other,
}

/// The subset of form component metadata the codec consults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub key: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default)]
    pub label: String,
}

impl Component {
    pub fn new(key: &str, component_type: ComponentType) -> Self {
        Self {
            key: key.to_string(),
            component_type,
            label: String::new(),
        }
    }
}

/// Read-only lookup of form components.
pub trait ComponentRegistry {
    fn lookup_component(&self, key: &str) -> Option<&Component>;
}
