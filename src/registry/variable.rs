use serde::{Deserialize, Serialize};
use std::fmt;

/// Data types a form variable can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Float,
    Int,
    Boolean,
    Date,
    Datetime,
    Array,
    Object,
    #[serde(other)]
    Unknown,
}

impl DataType {
    pub fn name(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Float => "float",
            DataType::Int => "int",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::Datetime => "datetime",
            DataType::Array => "array",
            DataType::Object => "object",
            DataType::Unknown => "unknown",
        }
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, DataType::Date | DataType::Datetime)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a variable's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableSource {
    #[serde(rename = "component")]
    Component,
    #[serde(rename = "userDefined", alias = "user_defined")]
    UserDefined,
    #[serde(rename = "static")]
    Static,
}

/// Metadata of one form variable, supplied by the form builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "dataType", alias = "data_type")]
    pub data_type: DataType,
    pub source: VariableSource,
}

impl Variable {
    pub fn new(key: &str, data_type: DataType, source: VariableSource) -> Self {
        Self {
            key: key.to_string(),
            name: String::new(),
            data_type,
            source,
        }
    }
}

/// Read-only lookup of form variables.
pub trait VariableRegistry {
    fn lookup_variable(&self, key: &str) -> Option<&Variable>;

    /// Lists variables matching `predicate`, in declaration order.
    fn list_by_filter(&self, predicate: &dyn Fn(&Variable) -> bool) -> Vec<&Variable>;

    fn contains_variable(&self, key: &str) -> bool {
        self.lookup_variable(key).is_some()
    }
}
