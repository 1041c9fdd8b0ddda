use crate::action::{ActionField, ActionType};
use crate::catalog::OperandKind;
use crate::expression::Operator;
use crate::registry::DataType;
use thiserror::Error;

/// Errors raised while turning a stored expression or action into structured editor state.
///
/// Every variant means "this shape is outside what the structured editor can represent".
/// Callers keep the original JSON untouched and switch to a raw editing view.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Operator '{0}' is not part of the supported vocabulary")]
    UnknownOperator(String),

    #[error("Expression node has {} keys ({}), but exactly one operator key is required", .keys.len(), .keys.join(", "))]
    MultiKeyNode { keys: Vec<String> },

    #[error("Expected an operator node at the root of the trigger, found literal '{0}'")]
    NotAnOperation(serde_json::Value),

    #[error("Marker '{0}' cannot be used as the root of a trigger")]
    UnsupportedRoot(&'static str),

    #[error("Operator '{0}' has no subject operand")]
    MissingSubject(&'static str),

    #[error("The subject of a trigger must be a variable reference, found '{0}'")]
    UnsupportedSubject(serde_json::Value),

    #[error("Operator '{operator}' has {found} operands, but at most {max} are supported")]
    UnexpectedArity {
        operator: &'static str,
        max: usize,
        found: usize,
    },

    #[error("Comparison operand uses unsupported operator '{0}'")]
    UnsupportedOperand(&'static str),

    #[error("Relative date expression is malformed: {0}")]
    MalformedRelativeDate(String),

    #[error("Option path '{key}' is compared against '{found}', only `true` is supported")]
    UnsupportedCompoundComparison {
        key: String,
        found: serde_json::Value,
    },

    #[error("Trigger uses a choice not offered for its variable: {0}")]
    IllegalChoice(#[from] TransitionError),

    #[error("Action type '{0}' is not supported")]
    UnknownActionType(String),

    #[error("Component property '{0}' cannot be modified by an action")]
    UnknownProperty(String),

    #[error("Invalid '{action_type}' configuration: {message}")]
    InvalidConfig {
        action_type: &'static str,
        message: String,
    },
}

/// Errors signalling a field change the editor choices should never have offered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    #[error("Variable '{0}' is not known to the form")]
    UnknownVariable(String),

    #[error("Operator '{operator}' is not valid for variables of type '{data_type}'")]
    IllegalOperator {
        operator: Operator,
        data_type: DataType,
    },

    #[error("Operand kind '{kind}' is not valid for variables of type '{data_type}'")]
    IllegalOperandKind {
        kind: OperandKind,
        data_type: DataType,
    },

    #[error("Operand value of kind '{found}' does not match the selected kind '{expected}'")]
    OperandKindMismatch {
        expected: OperandKind,
        found: OperandKind,
    },

    #[error("Field '{field}' does not apply to actions of type '{action_type}'")]
    FieldNotApplicable {
        field: ActionField,
        action_type: ActionType,
    },

    #[error("Field '{0}' cannot be set before an action type is chosen")]
    NoActionType(ActionField),

    #[error("Configuration does not belong to actions of type '{0}'")]
    ConfigMismatch(ActionType),
}

/// Errors that can occur while building a logic expression from structured state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    #[error("Trigger field '{0}' must be set before it can be encoded")]
    MissingField(&'static str),

    #[error("Variable '{0}' is not known to the form")]
    UnknownVariable(String),

    #[error(transparent)]
    Invalid(#[from] TransitionError),

    #[error("Failed to serialize action configuration: {0}")]
    Serialize(String),
}

/// Errors that can occur when loading form metadata into a registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Could not read form definition '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse form definition JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Key '{0}' is defined more than once")]
    DuplicateKey(String),
}
