//! Static operator and operand tables driving which editor choices are legal.
//!
//! Both tables are keyed by [`DataType`]. Data types without a row (objects,
//! unrecognized types) resolve to the default row: equality/inequality with a
//! literal operand.

use crate::error::TransitionError;
use crate::expression::Operator;
use crate::registry::{DataType, Variable};
use crate::trigger::StructuredTrigger;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of the comparison value in a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperandKind {
    Literal,
    VariableRef,
    RelativeDate,
    Array,
}

impl OperandKind {
    pub fn token(self) -> &'static str {
        match self {
            OperandKind::Literal => "literal",
            OperandKind::VariableRef => "variableRef",
            OperandKind::RelativeDate => "relativeDate",
            OperandKind::Array => "array",
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Display metadata and applicability of one operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub operator: Operator,
    pub label: &'static str,
    pub data_types: &'static [DataType],
}

const EQUATABLE: &[DataType] = &[
    DataType::String,
    DataType::Float,
    DataType::Int,
    DataType::Boolean,
    DataType::Date,
    DataType::Datetime,
    DataType::Array,
];
const ORDERED: &[DataType] = &[
    DataType::Float,
    DataType::Int,
    DataType::Date,
    DataType::Datetime,
];
const MEMBERSHIP: &[DataType] = &[DataType::String, DataType::Float, DataType::Int];
const NUMERIC: &[DataType] = &[DataType::Float, DataType::Int];

const CATALOG: [OperatorInfo; 9] = [
    OperatorInfo { operator: Operator::Equal, label: "equal to", data_types: EQUATABLE },
    OperatorInfo { operator: Operator::NotEqual, label: "not equal to", data_types: EQUATABLE },
    OperatorInfo { operator: Operator::GreaterThan, label: "greater than", data_types: ORDERED },
    OperatorInfo { operator: Operator::GreaterThanOrEqual, label: "greater than or equal to", data_types: ORDERED },
    OperatorInfo { operator: Operator::LessThan, label: "less than", data_types: ORDERED },
    OperatorInfo { operator: Operator::LessThanOrEqual, label: "less than or equal to", data_types: ORDERED },
    OperatorInfo { operator: Operator::In, label: "is in", data_types: MEMBERSHIP },
    OperatorInfo { operator: Operator::Add, label: "plus", data_types: NUMERIC },
    OperatorInfo { operator: Operator::Subtract, label: "minus", data_types: NUMERIC },
];

const DEFAULT_OPERATORS: &[Operator] = &[Operator::Equal, Operator::NotEqual];
const DEFAULT_OPERAND_KINDS: &[OperandKind] = &[OperandKind::Literal];

/// All catalog entries, in display order.
pub fn operators() -> &'static [OperatorInfo] {
    &CATALOG
}

pub fn operator_info(operator: Operator) -> &'static OperatorInfo {
    // The catalog has exactly one row per operator, in `Operator::ALL` order.
    &CATALOG[Operator::ALL
        .iter()
        .position(|op| *op == operator)
        .unwrap_or_default()]
}

/// Operators legal for a variable of `data_type`, in display order.
pub fn legal_operators(data_type: DataType) -> Vec<Operator> {
    let legal: Vec<Operator> = CATALOG
        .iter()
        .filter(|info| info.data_types.contains(&data_type))
        .map(|info| info.operator)
        .collect();
    if legal.is_empty() {
        DEFAULT_OPERATORS.to_vec()
    } else {
        legal
    }
}

/// Operand kinds legal for a variable of `data_type`, in display order.
pub fn legal_operand_kinds(data_type: DataType) -> &'static [OperandKind] {
    use OperandKind::*;
    match data_type {
        DataType::String | DataType::Float | DataType::Int => &[Literal, VariableRef, Array],
        DataType::Boolean => &[Literal, VariableRef],
        DataType::Date | DataType::Datetime => &[Literal, VariableRef, RelativeDate],
        DataType::Array => &[VariableRef, Array],
        DataType::Object | DataType::Unknown => DEFAULT_OPERAND_KINDS,
    }
}

pub fn is_legal_operator(operator: Operator, data_type: DataType) -> bool {
    legal_operators(data_type).contains(&operator)
}

pub fn is_legal_operand_kind(kind: OperandKind, data_type: DataType) -> bool {
    legal_operand_kinds(data_type).contains(&kind)
}

/// Checks that the chosen operator and operand kind are offered for `variable`.
///
/// Unset fields are not violations; completeness is checked separately.
pub fn validate_trigger(
    trigger: &StructuredTrigger,
    variable: &Variable,
) -> Result<(), TransitionError> {
    if let Some(operator) = trigger.operator {
        if !is_legal_operator(operator, variable.data_type) {
            return Err(TransitionError::IllegalOperator {
                operator,
                data_type: variable.data_type,
            });
        }
    }
    if let Some(kind) = trigger.operand.kind() {
        if !is_legal_operand_kind(kind, variable.data_type) {
            return Err(TransitionError::IllegalOperandKind {
                kind,
                data_type: variable.data_type,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rows_follow_operator_order() {
        for op in Operator::ALL {
            assert_eq!(operator_info(op).operator, op);
        }
    }

    #[test]
    fn test_unknown_types_use_default_row() {
        assert_eq!(
            legal_operators(DataType::Object),
            vec![Operator::Equal, Operator::NotEqual]
        );
        assert_eq!(legal_operand_kinds(DataType::Unknown), &[OperandKind::Literal]);
    }
}
