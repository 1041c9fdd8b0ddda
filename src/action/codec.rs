use super::{
    ActionConfig, ActionEntry, ActionField, ActionType, ComponentProperty, OperandSource,
    StoredAction, StoredProperty, TargetKind,
};
use crate::error::{DecodeError, EncodeError};
use crate::expression::{var, var_key};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes a stored action into structured editor state.
pub fn decode_action(stored: &StoredAction) -> Result<ActionEntry, DecodeError> {
    let body = &stored.action;
    let action_type = match body.action_type.as_str() {
        "" => None,
        token => Some(
            ActionType::from_token(token)
                .ok_or_else(|| DecodeError::UnknownActionType(token.to_string()))?,
        ),
    };

    let mut entry = ActionEntry {
        action_type,
        config: ActionConfig::empty_for(action_type),
        ..Default::default()
    };
    let Some(action_type) = action_type else {
        return Ok(entry);
    };

    entry.target = match action_type.target_kind() {
        Some(TargetKind::Component) => stored.component.clone(),
        Some(TargetKind::Variable) => stored.variable.clone(),
        Some(TargetKind::Step) => stored.form_step_uuid.clone(),
        None => String::new(),
    };

    if action_type.supports(ActionField::Property) {
        entry.property = match body.property.as_ref().map(|p| p.value.as_str()) {
            None | Some("") => None,
            Some(token) => Some(
                ComponentProperty::from_token(token)
                    .ok_or_else(|| DecodeError::UnknownProperty(token.to_string()))?,
            ),
        };
        entry.property_value = body.state.clone();
    }

    if action_type.supports(ActionField::OperandSource) {
        let (source, value) = decode_operand(&body.value, body.source.as_deref());
        entry.operand_source = source;
        entry.operand_value = value;
    } else if action_type.supports(ActionField::OperandValue) {
        entry.operand_value = body.value.clone();
    }

    entry.config = match action_type {
        ActionType::FetchFromService => ActionConfig::ServiceFetch(body.value.clone()),
        ActionType::SynchronizeVariables => {
            ActionConfig::Synchronize(decode_config(&body.config, action_type)?)
        }
        ActionType::EvaluateDmn => ActionConfig::Dmn(decode_config(&body.config, action_type)?),
        _ => ActionConfig::None,
    };

    Ok(entry)
}

/// Infers the operand source of an assigned value.
///
/// Without a `var` marker the value is a literal; an empty `var` means no source was
/// chosen yet. An explicit `source` tag wins over the inference.
fn decode_operand(value: &Value, explicit_source: Option<&str>) -> (Option<OperandSource>, Value) {
    match (explicit_source, var_key(value)) {
        (Some("literal"), _) => (Some(OperandSource::Literal), value.clone()),
        (Some("variable"), Some(key)) => (Some(OperandSource::Variable), Value::String(key.to_string())),
        (Some("variable"), None) => (Some(OperandSource::Variable), value.clone()),
        (Some(""), _) => (None, Value::Null),
        (_, None) => (Some(OperandSource::Literal), value.clone()),
        (_, Some("")) => (None, Value::Null),
        (_, Some(key)) => (Some(OperandSource::Variable), Value::String(key.to_string())),
    }
}

fn decode_config<T: DeserializeOwned + Default>(
    config: &Value,
    action_type: ActionType,
) -> Result<T, DecodeError> {
    match config {
        Value::Null => Ok(T::default()),
        Value::Object(map) if map.is_empty() => Ok(T::default()),
        other => serde_json::from_value(other.clone()).map_err(|e| DecodeError::InvalidConfig {
            action_type: action_type.token(),
            message: e.to_string(),
        }),
    }
}

/// Builds the stored shape of an action. The mirror of [`decode_action`].
pub fn encode_action(entry: &ActionEntry) -> Result<StoredAction, EncodeError> {
    let mut stored = StoredAction::default();
    let Some(action_type) = entry.action_type else {
        return Ok(stored);
    };
    stored.action.action_type = action_type.token().to_string();

    match action_type.target_kind() {
        Some(TargetKind::Component) => stored.component = entry.target.clone(),
        Some(TargetKind::Variable) => stored.variable = entry.target.clone(),
        Some(TargetKind::Step) => stored.form_step_uuid = entry.target.clone(),
        None => {}
    }

    let body = &mut stored.action;
    if action_type.supports(ActionField::Property) {
        body.property = Some(StoredProperty {
            value: entry.property.map(|p| p.token()).unwrap_or_default().to_string(),
            value_type: entry
                .property
                .map(|p| p.value_type())
                .unwrap_or_default()
                .to_string(),
        });
        body.state = entry.property_value.clone();
    }

    if action_type.supports(ActionField::OperandSource) {
        body.value = match entry.operand_source {
            Some(OperandSource::Literal) => entry.operand_value.clone(),
            Some(OperandSource::Variable) => var(entry.operand_value.as_str().unwrap_or_default()),
            None => var(""),
        };
    } else if action_type.supports(ActionField::OperandValue) {
        body.value = entry.operand_value.clone();
    }

    match &entry.config {
        ActionConfig::ServiceFetch(configuration) => body.value = configuration.clone(),
        ActionConfig::Synchronize(config) => {
            body.config = serde_json::to_value(config)
                .map_err(|e| EncodeError::Serialize(e.to_string()))?;
        }
        ActionConfig::Dmn(config) => {
            body.config = serde_json::to_value(config)
                .map_err(|e| EncodeError::Serialize(e.to_string()))?;
        }
        ActionConfig::None => {}
    }

    Ok(stored)
}
