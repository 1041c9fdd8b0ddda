//! Rule actions: the side effects a rule performs once its trigger holds.

mod codec;
mod state;

pub use codec::{decode_action, encode_action};
pub use state::{ActionChange, ActionEditor};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The closed set of action types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    Property,
    Variable,
    FetchFromService,
    DisableNext,
    StepNotApplicable,
    StepApplicable,
    SetRegistrationBackend,
    SynchronizeVariables,
    EvaluateDmn,
}

/// What the `target` field of an action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Component,
    Variable,
    Step,
}

impl ActionType {
    pub const ALL: [ActionType; 9] = [
        ActionType::Property,
        ActionType::Variable,
        ActionType::FetchFromService,
        ActionType::DisableNext,
        ActionType::StepNotApplicable,
        ActionType::StepApplicable,
        ActionType::SetRegistrationBackend,
        ActionType::SynchronizeVariables,
        ActionType::EvaluateDmn,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ActionType::Property => "property",
            ActionType::Variable => "variable",
            ActionType::FetchFromService => "fetch-from-service",
            ActionType::DisableNext => "disable-next",
            ActionType::StepNotApplicable => "step-not-applicable",
            ActionType::StepApplicable => "step-applicable",
            ActionType::SetRegistrationBackend => "set-registration-backend",
            ActionType::SynchronizeVariables => "synchronize-variables",
            ActionType::EvaluateDmn => "evaluate-dmn",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.token() == token)
    }

    pub fn target_kind(self) -> Option<TargetKind> {
        match self {
            ActionType::Property => Some(TargetKind::Component),
            ActionType::Variable | ActionType::FetchFromService => Some(TargetKind::Variable),
            ActionType::StepNotApplicable | ActionType::StepApplicable => Some(TargetKind::Step),
            _ => None,
        }
    }

    /// Whether actions of this type carry `field` at all.
    pub fn supports(self, field: ActionField) -> bool {
        match field {
            ActionField::ActionType => true,
            ActionField::Target => self.target_kind().is_some(),
            ActionField::Config => matches!(
                self,
                ActionType::FetchFromService
                    | ActionType::SynchronizeVariables
                    | ActionType::EvaluateDmn
            ),
            ActionField::Property | ActionField::PropertyValue => self == ActionType::Property,
            ActionField::OperandSource => self == ActionType::Variable,
            ActionField::OperandValue => {
                matches!(self, ActionType::Variable | ActionType::SetRegistrationBackend)
            }
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Editable action fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionField {
    ActionType,
    Target,
    Config,
    Property,
    PropertyValue,
    OperandSource,
    OperandValue,
}

impl ActionField {
    pub const ALL: [ActionField; 7] = [
        ActionField::ActionType,
        ActionField::Target,
        ActionField::Config,
        ActionField::Property,
        ActionField::PropertyValue,
        ActionField::OperandSource,
        ActionField::OperandValue,
    ];

    /// Position in the dependency order; changing a field resets every field of higher rank.
    ///
    /// action type → target / config → property → property value / operand source → operand value
    pub fn rank(self) -> u8 {
        match self {
            ActionField::ActionType => 0,
            ActionField::Target | ActionField::Config => 1,
            ActionField::Property => 2,
            ActionField::PropertyValue | ActionField::OperandSource => 3,
            ActionField::OperandValue => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ActionField::ActionType => "actionType",
            ActionField::Target => "target",
            ActionField::Config => "config",
            ActionField::Property => "property",
            ActionField::PropertyValue => "propertyValue",
            ActionField::OperandSource => "operandSource",
            ActionField::OperandValue => "operandValue",
        }
    }
}

impl fmt::Display for ActionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Component properties an action may modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentProperty {
    #[serde(rename = "hidden")]
    Hidden,
    #[serde(rename = "validate.required")]
    Required,
    #[serde(rename = "disabled")]
    Disabled,
}

impl ComponentProperty {
    pub const ALL: [ComponentProperty; 3] = [
        ComponentProperty::Hidden,
        ComponentProperty::Required,
        ComponentProperty::Disabled,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ComponentProperty::Hidden => "hidden",
            ComponentProperty::Required => "validate.required",
            ComponentProperty::Disabled => "disabled",
        }
    }

    /// The stored value type tag of the property.
    pub fn value_type(self) -> &'static str {
        match self {
            ComponentProperty::Required => "json",
            ComponentProperty::Hidden | ComponentProperty::Disabled => "bool",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token() == token)
    }
}

/// Where the value assigned by a `variable` action comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandSource {
    Literal,
    Variable,
}

impl OperandSource {
    pub fn token(self) -> &'static str {
        match self {
            OperandSource::Literal => "literal",
            OperandSource::Variable => "variable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DmnMapping {
    #[serde(default)]
    pub form_variable: String,
    #[serde(default)]
    pub dmn_variable: String,
}

/// Configuration of an `evaluate-dmn` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DmnConfig {
    #[serde(default)]
    pub plugin_id: String,
    #[serde(default)]
    pub decision_definition_id: String,
    #[serde(default)]
    pub decision_definition_version: String,
    #[serde(default)]
    pub input_mapping: Vec<DmnMapping>,
    #[serde(default)]
    pub output_mapping: Vec<DmnMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SyncMapping {
    #[serde(default)]
    pub component_key: String,
    #[serde(default)]
    pub property: String,
}

/// Configuration of a `synchronize-variables` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    #[serde(default)]
    pub source_variable: String,
    #[serde(default)]
    pub destination_variable: String,
    #[serde(default)]
    pub identifier_variable: String,
    #[serde(default)]
    pub data_mappings: Vec<SyncMapping>,
}

/// Type-specific action payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "config", rename_all = "camelCase")]
pub enum ActionConfig {
    #[default]
    None,
    /// Identifier of the service fetch configuration.
    ServiceFetch(Value),
    Synchronize(SyncConfig),
    Dmn(DmnConfig),
}

impl ActionConfig {
    /// The empty configuration for actions of `action_type`.
    pub fn empty_for(action_type: Option<ActionType>) -> Self {
        match action_type {
            Some(ActionType::FetchFromService) => ActionConfig::ServiceFetch(Value::Null),
            Some(ActionType::SynchronizeVariables) => ActionConfig::Synchronize(SyncConfig::default()),
            Some(ActionType::EvaluateDmn) => ActionConfig::Dmn(DmnConfig::default()),
            _ => ActionConfig::None,
        }
    }

    pub fn belongs_to(&self, action_type: Option<ActionType>) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(&Self::empty_for(action_type))
    }
}

/// Flat, editor-friendly form of one action.
///
/// Fields not supported by the current `action_type` always hold their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActionEntry {
    pub action_type: Option<ActionType>,
    /// Component key, variable key or form step id, depending on the action type.
    pub target: String,
    pub property: Option<ComponentProperty>,
    pub property_value: Value,
    pub operand_source: Option<OperandSource>,
    pub operand_value: Value,
    pub config: ActionConfig,
}

impl ActionEntry {
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type: Some(action_type),
            config: ActionConfig::empty_for(Some(action_type)),
            ..Default::default()
        }
    }
}

/// `{"value": "hidden", "type": "bool"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StoredProperty {
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type", default)]
    pub value_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StoredActionBody {
    #[serde(rename = "type", default)]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<StoredProperty>,
    #[serde(default)]
    pub state: Value,
    #[serde(default)]
    pub value: Value,
    /// Explicit operand source written by older editors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub config: Value,
}

/// The persisted shape of an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StoredAction {
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub variable: String,
    #[serde(rename = "formStepUuid", alias = "formStep", default)]
    pub form_step_uuid: String,
    pub action: StoredActionBody,
}
