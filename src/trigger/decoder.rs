use super::{DeltaSign, KeyPathResolver, Operand, OperandValue, RelativeDelta, StructuredTrigger};
use crate::catalog::validate_trigger;
use crate::error::DecodeError;
use crate::expression::{Marker, Node, Operator, is_empty_expression, var_key};
use crate::registry::VariableRegistry;
use serde_json::Value;

/// Decodes a stored trigger expression into structured editor state.
///
/// The input is never modified. An empty expression (`null` or `{}`) decodes to an
/// empty trigger; any shape outside the supported vocabulary yields a `DecodeError`
/// and the caller is expected to keep the expression in a raw view. So does an
/// operator or operand kind the catalog does not offer for a known variable.
pub fn decode_trigger(
    expression: &Value,
    variables: &dyn VariableRegistry,
    key_paths: &dyn KeyPathResolver,
) -> Result<StructuredTrigger, DecodeError> {
    if is_empty_expression(expression) {
        return Ok(StructuredTrigger::default());
    }

    let (operator, args) = match Node::classify(expression)? {
        Node::Operation { operator, args } => (operator, args),
        Node::Marker { marker, .. } => return Err(DecodeError::UnsupportedRoot(marker.token())),
        Node::Literal(value) => return Err(DecodeError::NotAnOperation(value.clone())),
    };

    if args.len() > 2 {
        return Err(DecodeError::UnexpectedArity {
            operator: operator.token(),
            max: 2,
            found: args.len(),
        });
    }

    let mut args = args.into_iter();
    let subject = args
        .next()
        .ok_or(DecodeError::MissingSubject(operator.token()))?;
    let raw_key = subject_key(subject)?;
    let path = key_paths.split(raw_key, variables);

    let operand = match (path.option, args.next()) {
        (None, None) => Operand::Unset,
        (None, Some(second)) => decode_operand(second)?,
        // The option under test was folded into the key; the comparison itself is `true`.
        (Some(option), None | Some(Value::Bool(true))) => {
            Operand::from_value(OperandValue::Literal(Value::String(option)))
        }
        (Some(_), Some(other)) => {
            return Err(DecodeError::UnsupportedCompoundComparison {
                key: raw_key.to_string(),
                found: other.clone(),
            });
        }
    };

    let trigger = StructuredTrigger {
        variable_key: path.variable_key,
        operator: Some(operator),
        operand,
    };
    if let Some(variable) = variables.lookup_variable(&trigger.variable_key) {
        validate_trigger(&trigger, variable)?;
    }
    Ok(trigger)
}

/// Extracts the variable key of the subject operand, unwrapping one date marker.
fn subject_key(subject: &Value) -> Result<&str, DecodeError> {
    if let Some(key) = var_key(subject) {
        return Ok(key);
    }
    if let Node::Marker {
        marker: Marker::Date | Marker::Datetime,
        args,
    } = Node::classify(subject)?
    {
        if let Some(key) = args.first().and_then(|inner| var_key(inner)) {
            return Ok(key);
        }
    }
    Err(DecodeError::UnsupportedSubject(subject.clone()))
}

fn decode_operand(value: &Value) -> Result<Operand, DecodeError> {
    let operand = match Node::classify(value)? {
        Node::Literal(Value::Array(items)) => OperandValue::Array(items.clone()),
        Node::Literal(literal) => OperandValue::Literal(literal.clone()),
        Node::Marker {
            marker: Marker::Var,
            ..
        } => match var_key(value) {
            Some(key) => OperandValue::VariableRef(key.to_string()),
            None => return Err(DecodeError::UnsupportedOperand(Marker::Var.token())),
        },
        Node::Marker {
            marker: marker @ (Marker::Date | Marker::Datetime),
            args,
        } => {
            let payload = match args.as_slice() {
                [payload] => *payload,
                _ => return Err(DecodeError::UnsupportedOperand(marker.token())),
            };
            match var_key(payload) {
                Some(key) => OperandValue::VariableRef(key.to_string()),
                None => OperandValue::Literal(payload.clone()),
            }
        }
        Node::Operation {
            operator: operator @ (Operator::Add | Operator::Subtract),
            args,
        } => OperandValue::RelativeDate(decode_relative_delta(operator, &args)?),
        Node::Operation { operator, .. } => {
            return Err(DecodeError::UnsupportedOperand(operator.token()));
        }
        Node::Marker { marker, .. } => return Err(DecodeError::UnsupportedOperand(marker.token())),
    };
    Ok(Operand::from_value(operand))
}

/// Parses `[{"today": []}, {"rdelta": [y, m, d]}]` under a `+` or `-` head.
///
/// Missing trailing offsets count as zero.
fn decode_relative_delta(operator: Operator, args: &[&Value]) -> Result<RelativeDelta, DecodeError> {
    let sign = match operator {
        Operator::Subtract => DeltaSign::Minus,
        _ => DeltaSign::Plus,
    };
    let [base, delta] = args else {
        return Err(DecodeError::MalformedRelativeDate(format!(
            "expected 2 operands, found {}",
            args.len()
        )));
    };

    if !matches!(
        Node::classify(base)?,
        Node::Marker {
            marker: Marker::Today,
            ..
        }
    ) {
        return Err(DecodeError::MalformedRelativeDate(format!(
            "offset base must be today, found {}",
            base
        )));
    }

    let offsets = match Node::classify(delta)? {
        Node::Marker {
            marker: Marker::RelativeDelta,
            args,
        } => args,
        _ => {
            return Err(DecodeError::MalformedRelativeDate(format!(
                "expected an rdelta offset, found {}",
                delta
            )));
        }
    };
    if offsets.len() > 3 {
        return Err(DecodeError::MalformedRelativeDate(format!(
            "rdelta takes at most 3 offsets, found {}",
            offsets.len()
        )));
    }

    let mut parts = [0i64; 3];
    for (slot, offset) in parts.iter_mut().zip(offsets) {
        *slot = offset.as_i64().ok_or_else(|| {
            DecodeError::MalformedRelativeDate(format!("offset '{}' is not an integer", offset))
        })?;
    }

    Ok(RelativeDelta::new(sign, parts[0], parts[1], parts[2]))
}
