//! Common test fixtures: a form with one variable per encoding quirk.
use joken::prelude::*;
use serde_json::{Value, json};

/// Creates the form registry shared by the codec tests.
///
/// Component variables: `age` (number), `name` (textfield), `birthDate` (date),
/// `appointment` (datetime), `selBox` (selectboxes), `agree` (checkbox).
/// User-defined variables: `someDateVar`, `otherDate`, `deadline`, `isAdult`,
/// `tags`, `income`, `partnerIncome`.
#[allow(dead_code)]
pub fn create_form() -> FormRegistry {
    let component = |key: &str, data_type: DataType| {
        Variable::new(key, data_type, VariableSource::Component)
    };
    let user_defined = |key: &str, data_type: DataType| {
        Variable::new(key, data_type, VariableSource::UserDefined)
    };

    FormRegistry::new(
        vec![
            component("age", DataType::Int),
            component("name", DataType::String),
            component("birthDate", DataType::Date),
            component("appointment", DataType::Datetime),
            component("selBox", DataType::Object),
            component("agree", DataType::Boolean),
            user_defined("someDateVar", DataType::Date),
            user_defined("otherDate", DataType::Date),
            user_defined("deadline", DataType::Datetime),
            user_defined("isAdult", DataType::Boolean),
            user_defined("tags", DataType::Array),
            user_defined("income", DataType::Float),
            user_defined("partnerIncome", DataType::Float),
        ],
        vec![
            Component::new("age", ComponentType::Number),
            Component::new("name", ComponentType::Textfield),
            Component::new("birthDate", ComponentType::Date),
            Component::new("appointment", ComponentType::Datetime),
            Component::new("selBox", ComponentType::Selectboxes),
            Component::new("agree", ComponentType::Checkbox),
        ],
    )
    .expect("Fixture form must be valid")
}

/// A representative operand value of `kind` for a variable of `data_type`.
#[allow(dead_code)]
pub fn sample_operand(kind: OperandKind, data_type: DataType) -> OperandValue {
    match kind {
        OperandKind::Literal => OperandValue::Literal(sample_literal(data_type)),
        OperandKind::VariableRef => OperandValue::VariableRef("partnerIncome".to_string()),
        OperandKind::RelativeDate => {
            OperandValue::RelativeDate(RelativeDelta::new(DeltaSign::Minus, 18, 6, 1))
        }
        OperandKind::Array => OperandValue::Array(vec![json!(1), json!("two")]),
    }
}

fn sample_literal(data_type: DataType) -> Value {
    match data_type {
        DataType::String => json!("abc"),
        DataType::Float => json!(2.5),
        DataType::Int => json!(5),
        DataType::Boolean => json!(true),
        DataType::Date => json!("2024-01-01"),
        DataType::Datetime => json!("2024-01-01T10:00:00Z"),
        DataType::Array => json!(["a"]),
        DataType::Object | DataType::Unknown => json!("optionA"),
    }
}

/// A stored rule set mixing supported and unsupported shapes.
#[allow(dead_code)]
pub fn create_rules_json() -> Value {
    json!([
        {
            "uuid": "rule-1",
            "description": "Adults only",
            "jsonLogicTrigger": {">=": [{"var": "age"}, 18]},
            "actions": [
                {
                    "component": "name",
                    "action": {
                        "type": "property",
                        "property": {"value": "hidden", "type": "bool"},
                        "state": true
                    }
                }
            ],
            "order": 0
        },
        {
            "uuid": "rule-2",
            "description": "Compound",
            "jsonLogicTrigger": {"and": [{"==": [{"var": "age"}, 1]}, {"==": [{"var": "name"}, "x"]}]},
            "actions": [
                {
                    "variable": "income",
                    "action": {"type": "variable", "value": {"var": "partnerIncome"}}
                },
                {
                    "action": {"type": "launch-rocket"}
                }
            ],
            "order": 1
        },
        {
            "uuid": "rule-3",
            "jsonLogicTrigger": {"==": [{"var": "selBox.optionA"}, true]},
            "actions": [
                {
                    "action": {
                        "type": "evaluate-dmn",
                        "config": {
                            "pluginId": "camunda",
                            "decisionDefinitionId": "approve",
                            "inputMapping": [{"formVariable": "age", "dmnVariable": ""}],
                            "outputMapping": []
                        }
                    }
                }
            ],
            "order": 2
        }
    ])
}
