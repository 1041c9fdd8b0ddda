use super::{
    KeyPathResolver, Operand, OperandKind, OperandValue, RelativeDelta, StructuredTrigger,
};
use crate::catalog::validate_trigger;
use crate::error::EncodeError;
use crate::expression::{Marker, operation, var, wrap};
use crate::registry::{
    ComponentRegistry, ComponentType, DataType, Variable, VariableRegistry, VariableSource,
};
use serde_json::Value;

/// The subject metadata the encoder needs for type-dependent output.
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'a> {
    pub variable: &'a Variable,
    /// Only set when the variable is backed by a form component.
    pub component_type: Option<ComponentType>,
}

impl<'a> EncodeContext<'a> {
    /// Looks up the subject variable and, for component variables, its component type.
    pub fn resolve(
        variable_key: &str,
        variables: &'a dyn VariableRegistry,
        components: &dyn ComponentRegistry,
    ) -> Result<Self, EncodeError> {
        let variable = variables
            .lookup_variable(variable_key)
            .ok_or_else(|| EncodeError::UnknownVariable(variable_key.to_string()))?;
        let component_type = match variable.source {
            VariableSource::Component => components
                .lookup_component(variable_key)
                .map(|c| c.component_type),
            _ => None,
        };
        Ok(Self {
            variable,
            component_type,
        })
    }

    fn is_boolean_subject(&self) -> bool {
        self.component_type == Some(ComponentType::Checkbox)
            || (self.variable.source == VariableSource::UserDefined
                && self.variable.data_type == DataType::Boolean)
    }
}

/// Builds the logic expression for a structured trigger.
///
/// Output is deterministic for a given trigger and context. An unset operand is
/// left out of the expression. A chosen kind without a value is written as its
/// blank form (`""`, `{"var": ""}`, `[]`) so the kind survives decoding; relative
/// dates default to `today + 0`.
pub fn encode_trigger(
    trigger: &StructuredTrigger,
    context: &EncodeContext<'_>,
    key_paths: &dyn KeyPathResolver,
) -> Result<Value, EncodeError> {
    if trigger.variable_key.is_empty() {
        return Err(EncodeError::MissingField("variable"));
    }
    let operator = trigger
        .operator
        .ok_or(EncodeError::MissingField("operator"))?;

    if let Err(e) = validate_trigger(trigger, context.variable) {
        log::error!(
            "Refusing to encode trigger on '{}' with a choice the editor should not offer: {}",
            trigger.variable_key,
            e
        );
        return Err(e.into());
    }

    let data_type = context.variable.data_type;
    let key = trigger.variable_key.as_str();

    let comparison = match &trigger.operand {
        Operand::Set(OperandValue::Literal(value)) => Some(literal_operand(value, data_type)),
        Operand::Pending(OperandKind::Literal) => {
            Some(literal_operand(&Value::String(String::new()), data_type))
        }
        Operand::Set(OperandValue::VariableRef(reference)) => {
            Some(reference_operand(reference, data_type))
        }
        Operand::Pending(OperandKind::VariableRef) => Some(reference_operand("", data_type)),
        Operand::Set(OperandValue::RelativeDate(delta)) => Some(delta.to_expression()),
        Operand::Pending(OperandKind::RelativeDate) => {
            Some(RelativeDelta::default().to_expression())
        }
        Operand::Set(OperandValue::Array(items)) => Some(Value::Array(items.clone())),
        Operand::Pending(OperandKind::Array) => Some(Value::Array(Vec::new())),
        Operand::Unset => None,
    };

    let (subject, comparison) = match context.component_type {
        Some(ComponentType::Selectboxes) => match (&trigger.operand, comparison) {
            (Operand::Set(OperandValue::Literal(option)), Some(_)) if *option != "" => {
                let option = match option {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (var(&key_paths.join(key, &option)), Some(Value::Bool(true)))
            }
            (_, comparison) => (var(key), comparison),
        },
        Some(ComponentType::Date) => (wrap(Marker::Date, var(key)), comparison),
        Some(ComponentType::Datetime) => (wrap(Marker::Datetime, var(key)), comparison),
        _ if context.is_boolean_subject() => (var(key), comparison.map(cast_boolean)),
        _ => (var(key), comparison),
    };

    let mut args = vec![subject];
    args.extend(comparison);
    Ok(operation(operator, args))
}

fn literal_operand(value: &Value, data_type: DataType) -> Value {
    match data_type {
        DataType::Date => wrap(Marker::Date, value.clone()),
        DataType::Datetime => wrap(Marker::Datetime, value.clone()),
        _ => value.clone(),
    }
}

/// The backend compares datetime subjects against date-wrapped references.
fn reference_operand(reference: &str, data_type: DataType) -> Value {
    match data_type {
        DataType::Datetime => wrap(Marker::Date, var(reference)),
        _ => var(reference),
    }
}

fn cast_boolean(value: Value) -> Value {
    match value.as_str() {
        Some("true") => Value::Bool(true),
        Some("false") => Value::Bool(false),
        _ => value,
    }
}
