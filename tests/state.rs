//! Tests for the trigger and action editing state machines.
mod common;
use common::*;
use joken::prelude::*;
use joken::trigger::TRIGGER_FIELD_ORDER;
use serde_json::{Value, json};

fn complete_age_trigger() -> StructuredTrigger {
    StructuredTrigger::new("age", Operator::GreaterThan, OperandValue::Literal(json!(18)))
}

#[test]
fn test_variable_change_resets_everything_downstream() {
    let next = complete_age_trigger().transition(TriggerChange::Variable("income".to_string()));
    assert_eq!(next.variable_key, "income");
    assert_eq!(next.operator, None);
    assert_eq!(next.operand, Operand::Unset);
}

#[test]
fn test_operator_change_resets_operand() {
    let next = complete_age_trigger().transition(TriggerChange::Operator(Some(Operator::LessThan)));
    assert_eq!(next.variable_key, "age");
    assert_eq!(next.operator, Some(Operator::LessThan));
    assert_eq!(next.operand, Operand::Unset);
}

#[test]
fn test_operand_kind_change_keeps_kind_but_drops_value() {
    let next = complete_age_trigger()
        .transition(TriggerChange::OperandKind(Some(OperandKind::VariableRef)));
    assert_eq!(next.operator, Some(Operator::GreaterThan));
    assert_eq!(next.operand, Operand::Pending(OperandKind::VariableRef));

    let cleared = next.transition(TriggerChange::OperandKind(None));
    assert_eq!(cleared.operand, Operand::Unset);
}

#[test]
fn test_transition_does_not_modify_current_state() {
    let state = complete_age_trigger();
    let _ = state.transition(TriggerChange::Variable("name".to_string()));
    assert_eq!(state, complete_age_trigger());
}

#[test]
fn test_transition_never_touches_upstream_fields() {
    let state = complete_age_trigger();
    let changes = [
        TriggerChange::Variable("name".to_string()),
        TriggerChange::Operator(None),
        TriggerChange::OperandKind(Some(OperandKind::Array)),
        TriggerChange::OperandValue(OperandValue::Literal(json!(21))),
    ];

    for change in changes {
        let field = change.field();
        let next = state.transition(change);
        for upstream in TRIGGER_FIELD_ORDER.iter().filter(|f| **f < field) {
            match upstream {
                TriggerField::Variable => assert_eq!(next.variable_key, state.variable_key),
                TriggerField::Operator => assert_eq!(next.operator, state.operator),
                TriggerField::OperandKind => {
                    assert_eq!(next.operand_kind(), state.operand_kind())
                }
                TriggerField::OperandValue => unreachable!("nothing follows the operand value"),
            }
        }
    }
}

#[test]
fn test_editor_builds_a_complete_trigger() {
    let form = create_form();
    let mut editor = TriggerEditor::default();

    editor
        .apply(TriggerChange::Variable("birthDate".to_string()), &form)
        .unwrap();
    editor
        .apply(TriggerChange::Operator(Some(Operator::LessThanOrEqual)), &form)
        .unwrap();
    assert!(!editor.is_complete());
    editor
        .apply(TriggerChange::OperandKind(Some(OperandKind::RelativeDate)), &form)
        .unwrap();
    assert_eq!(
        editor.state().operand,
        Operand::Set(OperandValue::RelativeDate(RelativeDelta::default()))
    );

    editor
        .apply(
            TriggerChange::OperandValue(OperandValue::RelativeDate(RelativeDelta::new(
                DeltaSign::Minus,
                18,
                0,
                0,
            ))),
            &form,
        )
        .unwrap();
    assert!(editor.is_complete());

    let codec = RuleCodec::for_form(&form);
    assert_eq!(
        codec.encode_trigger(editor.state()).unwrap(),
        json!({"<=": [{"date": {"var": "birthDate"}}, {"-": [{"today": []}, {"rdelta": [18, 0, 0]}]}]})
    );
}

#[test]
fn test_editor_reports_illegal_choices_after_resetting() {
    let form = create_form();
    let mut editor = TriggerEditor::new(complete_age_trigger());

    let result = editor.apply(TriggerChange::Variable("name".to_string()), &form);
    assert_eq!(result, Ok(()));

    let result = editor.apply(TriggerChange::Operator(Some(Operator::GreaterThan)), &form);
    assert_eq!(
        result,
        Err(TransitionError::IllegalOperator {
            operator: Operator::GreaterThan,
            data_type: DataType::String,
        })
    );
    assert_eq!(editor.state().operator, Some(Operator::GreaterThan));
    assert_eq!(editor.state().operand, Operand::Unset);

    let result = editor.apply(TriggerChange::Variable("ghost".to_string()), &form);
    assert_eq!(result, Err(TransitionError::UnknownVariable("ghost".to_string())));
    assert_eq!(editor.state().operator, None);
}

#[test]
fn test_editor_rejects_operand_of_other_kind() {
    let form = create_form();
    let mut editor = TriggerEditor::new(complete_age_trigger());
    editor
        .apply(TriggerChange::OperandKind(Some(OperandKind::Literal)), &form)
        .unwrap();

    let result = editor.apply(
        TriggerChange::OperandValue(OperandValue::VariableRef("income".to_string())),
        &form,
    );
    assert_eq!(
        result,
        Err(TransitionError::OperandKindMismatch {
            expected: OperandKind::Literal,
            found: OperandKind::VariableRef,
        })
    );
    assert_eq!(editor.state().operand_kind(), Some(OperandKind::Literal));
    assert_eq!(editor.state().operand, Operand::Pending(OperandKind::Literal));
}

#[test]
fn test_value_of_other_kind_keeps_chosen_kind() {
    let state = complete_age_trigger();
    let next = state.transition(TriggerChange::OperandValue(OperandValue::Array(vec![json!(1)])));
    assert_eq!(next.operand, Operand::Pending(OperandKind::Literal));

    let unset = StructuredTrigger {
        variable_key: "age".to_string(),
        operator: Some(Operator::Equal),
        operand: Operand::Unset,
    };
    let next = unset.transition(TriggerChange::OperandValue(OperandValue::Array(vec![json!(1)])));
    assert_eq!(next.operand, Operand::Set(OperandValue::Array(vec![json!(1)])));
}

#[test]
fn test_blank_values_stay_pending() {
    let state = StructuredTrigger {
        variable_key: "name".to_string(),
        operator: Some(Operator::Equal),
        operand: Operand::Pending(OperandKind::Literal),
    };
    let next = state.transition(TriggerChange::OperandValue(OperandValue::Literal(json!(""))));
    assert_eq!(next.operand, Operand::Pending(OperandKind::Literal));
    assert!(!next.is_complete());
}

#[test]
fn test_action_type_change_clears_all_other_fields() {
    let mut property_action = ActionEntry::new(ActionType::Property);
    property_action.target = "name".to_string();
    property_action.property = Some(ComponentProperty::Hidden);
    property_action.property_value = json!(true);

    let next = property_action.transition(ActionChange::ActionType(Some(ActionType::Variable)));
    assert_eq!(next.action_type, Some(ActionType::Variable));
    assert_eq!(next.target, "");
    assert_eq!(next.property, None);
    assert_eq!(next.property_value, Value::Null);
    assert_eq!(next.operand_source, None);
    assert_eq!(next.operand_value, Value::Null);
    assert_eq!(next.config, ActionConfig::None);
}

#[test]
fn test_action_type_change_installs_empty_config() {
    let next = ActionEntry::new(ActionType::Variable)
        .transition(ActionChange::ActionType(Some(ActionType::EvaluateDmn)));
    assert!(matches!(next.config, ActionConfig::Dmn(ref config) if config.plugin_id.is_empty()));
}

#[test]
fn test_action_cascade_follows_rank() {
    let mut entry = ActionEntry::new(ActionType::Variable);
    entry.target = "income".to_string();
    entry.operand_source = Some(OperandSource::Variable);
    entry.operand_value = json!("partnerIncome");

    let new_source = entry.transition(ActionChange::OperandSource(Some(OperandSource::Literal)));
    assert_eq!(new_source.target, "income");
    assert_eq!(new_source.operand_source, Some(OperandSource::Literal));
    assert_eq!(new_source.operand_value, Value::Null);

    let new_target = entry.transition(ActionChange::Target("tags".to_string()));
    assert_eq!(new_target.target, "tags");
    assert_eq!(new_target.operand_source, None);
}

#[test]
fn test_action_editor_rejects_unsupported_fields() {
    let mut editor = ActionEditor::default();
    assert_eq!(
        editor.apply(ActionChange::Target("name".to_string())),
        Err(TransitionError::NoActionType(ActionField::Target))
    );

    editor
        .apply(ActionChange::ActionType(Some(ActionType::DisableNext)))
        .unwrap();
    let before = editor.state().clone();
    assert_eq!(
        editor.apply(ActionChange::Property(Some(ComponentProperty::Disabled))),
        Err(TransitionError::FieldNotApplicable {
            field: ActionField::Property,
            action_type: ActionType::DisableNext,
        })
    );
    assert_eq!(editor.state(), &before);

    editor
        .apply(ActionChange::ActionType(Some(ActionType::SynchronizeVariables)))
        .unwrap();
    assert_eq!(
        editor.apply(ActionChange::Config(ActionConfig::Dmn(Default::default()))),
        Err(TransitionError::ConfigMismatch(ActionType::SynchronizeVariables))
    );
}

#[test]
fn test_action_editor_builds_property_action() {
    let mut editor = ActionEditor::default();
    editor
        .apply(ActionChange::ActionType(Some(ActionType::Property)))
        .unwrap();
    editor.apply(ActionChange::Target("name".to_string())).unwrap();
    editor
        .apply(ActionChange::Property(Some(ComponentProperty::Required)))
        .unwrap();
    editor.apply(ActionChange::PropertyValue(json!(true))).unwrap();

    let stored = joken::action::encode_action(editor.state()).unwrap();
    assert_eq!(
        serde_json::to_value(&stored).unwrap(),
        json!({
            "component": "name",
            "variable": "",
            "formStepUuid": "",
            "action": {
                "type": "property",
                "property": {"value": "validate.required", "type": "json"},
                "state": true,
                "value": null,
                "config": null
            }
        })
    );
}
