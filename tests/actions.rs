//! Tests for decoding and encoding stored actions.
use joken::action::{DmnConfig, DmnMapping, SyncConfig, decode_action, encode_action};
use joken::prelude::*;
use serde_json::{Value, json};

fn stored(value: Value) -> StoredAction {
    serde_json::from_value(value).expect("Failed to parse stored action")
}

#[test]
fn test_variable_action_infers_operand_source() {
    let from_variable = decode_action(&stored(json!({
        "variable": "income",
        "action": {"type": "variable", "value": {"var": "partnerIncome"}}
    })))
    .unwrap();
    assert_eq!(from_variable.target, "income");
    assert_eq!(from_variable.operand_source, Some(OperandSource::Variable));
    assert_eq!(from_variable.operand_value, json!("partnerIncome"));

    let from_literal = decode_action(&stored(json!({
        "variable": "income",
        "action": {"type": "variable", "value": 1200.5}
    })))
    .unwrap();
    assert_eq!(from_literal.operand_source, Some(OperandSource::Literal));
    assert_eq!(from_literal.operand_value, json!(1200.5));

    let unchosen = decode_action(&stored(json!({
        "variable": "income",
        "action": {"type": "variable", "value": {"var": ""}}
    })))
    .unwrap();
    assert_eq!(unchosen.operand_source, None);
    assert_eq!(unchosen.operand_value, Value::Null);
}

#[test]
fn test_explicit_source_overrides_inference() {
    let entry = decode_action(&stored(json!({
        "variable": "name",
        "action": {"type": "variable", "source": "literal", "value": {"var": "age"}}
    })))
    .unwrap();
    assert_eq!(entry.operand_source, Some(OperandSource::Literal));
    assert_eq!(entry.operand_value, json!({"var": "age"}));
}

#[test]
fn test_property_action_round_trip() {
    let original = stored(json!({
        "component": "name",
        "action": {
            "type": "property",
            "property": {"value": "hidden", "type": "bool"},
            "state": true
        }
    }));

    let entry = decode_action(&original).unwrap();
    assert_eq!(entry.action_type, Some(ActionType::Property));
    assert_eq!(entry.target, "name");
    assert_eq!(entry.property, Some(ComponentProperty::Hidden));
    assert_eq!(entry.property_value, json!(true));
    assert_eq!(entry.operand_source, None);

    assert_eq!(encode_action(&entry).unwrap(), original);
}

#[test]
fn test_step_and_registration_targets() {
    let step = decode_action(&stored(json!({
        "formStep": "step-2",
        "action": {"type": "step-not-applicable"}
    })))
    .unwrap();
    assert_eq!(step.target, "step-2");
    assert_eq!(
        encode_action(&step).unwrap().form_step_uuid,
        "step-2".to_string()
    );

    let backend = decode_action(&stored(json!({
        "action": {"type": "set-registration-backend", "value": "backend-1"}
    })))
    .unwrap();
    assert_eq!(backend.target, "");
    assert_eq!(backend.operand_value, json!("backend-1"));
}

#[test]
fn test_dmn_action_round_trip() {
    let original = stored(json!({
        "action": {
            "type": "evaluate-dmn",
            "config": {
                "pluginId": "camunda",
                "decisionDefinitionId": "approve",
                "decisionDefinitionVersion": "2",
                "inputMapping": [{"formVariable": "age", "dmnVariable": "applicantAge"}],
                "outputMapping": [{"formVariable": "isAdult", "dmnVariable": "adult"}]
            }
        }
    }));

    let entry = decode_action(&original).unwrap();
    assert_eq!(
        entry.config,
        ActionConfig::Dmn(DmnConfig {
            plugin_id: "camunda".to_string(),
            decision_definition_id: "approve".to_string(),
            decision_definition_version: "2".to_string(),
            input_mapping: vec![DmnMapping {
                form_variable: "age".to_string(),
                dmn_variable: "applicantAge".to_string(),
            }],
            output_mapping: vec![DmnMapping {
                form_variable: "isAdult".to_string(),
                dmn_variable: "adult".to_string(),
            }],
        })
    );
    assert_eq!(encode_action(&entry).unwrap(), original);
}

#[test]
fn test_empty_config_decodes_to_default() {
    let entry = decode_action(&stored(json!({
        "action": {"type": "synchronize-variables", "config": {}}
    })))
    .unwrap();
    assert_eq!(entry.config, ActionConfig::Synchronize(SyncConfig::default()));
}

#[test]
fn test_fetch_from_service_keeps_configuration_id() {
    let entry = decode_action(&stored(json!({
        "variable": "income",
        "action": {"type": "fetch-from-service", "value": "42"}
    })))
    .unwrap();
    assert_eq!(entry.target, "income");
    assert_eq!(entry.config, ActionConfig::ServiceFetch(json!("42")));
    assert_eq!(entry.operand_value, Value::Null);

    let encoded = encode_action(&entry).unwrap();
    assert_eq!(encoded.variable, "income");
    assert_eq!(encoded.action.value, json!("42"));
}

#[test]
fn test_undecodable_actions() {
    assert_eq!(
        decode_action(&stored(json!({"action": {"type": "launch-rocket"}}))),
        Err(DecodeError::UnknownActionType("launch-rocket".to_string()))
    );
    assert_eq!(
        decode_action(&stored(json!({
            "component": "name",
            "action": {"type": "property", "property": {"value": "label", "type": "string"}}
        }))),
        Err(DecodeError::UnknownProperty("label".to_string()))
    );
    assert!(matches!(
        decode_action(&stored(json!({
            "action": {"type": "evaluate-dmn", "config": {"inputMapping": "nope"}}
        }))),
        Err(DecodeError::InvalidConfig {
            action_type: "evaluate-dmn",
            ..
        })
    ));
}

#[test]
fn test_action_without_type() {
    let entry = decode_action(&stored(json!({"action": {"type": ""}}))).unwrap();
    assert_eq!(entry, ActionEntry::default());
    assert_eq!(encode_action(&entry).unwrap(), StoredAction::default());
}

#[test]
fn test_unsupported_fields_stay_default_after_decoding() {
    let entry = decode_action(&stored(json!({
        "component": "name",
        "variable": "income",
        "action": {
            "type": "disable-next",
            "property": {"value": "hidden", "type": "bool"},
            "state": true,
            "value": 3
        }
    })))
    .unwrap();
    assert_eq!(entry, ActionEntry::new(ActionType::DisableNext));
}

#[test]
fn test_variable_action_encoding() {
    let mut entry = ActionEntry::new(ActionType::Variable);
    entry.target = "income".to_string();

    assert_eq!(encode_action(&entry).unwrap().action.value, json!({"var": ""}));

    entry.operand_source = Some(OperandSource::Variable);
    entry.operand_value = json!("partnerIncome");
    assert_eq!(
        encode_action(&entry).unwrap().action.value,
        json!({"var": "partnerIncome"})
    );

    entry.operand_source = Some(OperandSource::Literal);
    entry.operand_value = json!(10);
    let stored = encode_action(&entry).unwrap();
    assert_eq!(stored.variable, "income");
    assert_eq!(stored.action.value, json!(10));
    assert_eq!(decode_action(&stored).unwrap(), entry);
}
