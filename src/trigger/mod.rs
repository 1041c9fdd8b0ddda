//! Structured trigger state and its codec to and from logic expressions.

mod decoder;
mod encoder;
pub mod keypath;
mod state;

pub use crate::catalog::OperandKind;
pub use decoder::decode_trigger;
pub use encoder::{EncodeContext, encode_trigger};
pub use keypath::{DottedKeyPath, KeyPath, KeyPathResolver};
pub use state::{TRIGGER_FIELD_ORDER, TriggerChange, TriggerEditor, TriggerField};

use crate::expression::{Marker, Operator, operation, today, wrap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Direction of a relative date offset from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeltaSign {
    #[default]
    Plus,
    Minus,
}

impl DeltaSign {
    pub fn operator(self) -> Operator {
        match self {
            DeltaSign::Plus => Operator::Add,
            DeltaSign::Minus => Operator::Subtract,
        }
    }
}

/// A `today ± (years, months, days)` comparison value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct RelativeDelta {
    pub sign: DeltaSign,
    pub years: i64,
    pub months: i64,
    pub days: i64,
}

impl RelativeDelta {
    pub fn new(sign: DeltaSign, years: i64, months: i64, days: i64) -> Self {
        Self {
            sign,
            years,
            months,
            days,
        }
    }

    /// `{"+": [{"today": []}, {"rdelta": [years, months, days]}]}`
    pub fn to_expression(&self) -> Value {
        let delta = wrap(
            Marker::RelativeDelta,
            Value::Array(vec![
                self.years.into(),
                self.months.into(),
                self.days.into(),
            ]),
        );
        operation(self.sign.operator(), vec![today(), delta])
    }
}

impl fmt::Display for RelativeDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            DeltaSign::Plus => '+',
            DeltaSign::Minus => '-',
        };
        write!(
            f,
            "today {} {}y {}m {}d",
            sign, self.years, self.months, self.days
        )
    }
}

/// A fully chosen comparison value, one variant per operand kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum OperandValue {
    Literal(Value),
    VariableRef(String),
    RelativeDate(RelativeDelta),
    Array(Vec<Value>),
}

impl OperandValue {
    pub fn kind(&self) -> OperandKind {
        match self {
            OperandValue::Literal(_) => OperandKind::Literal,
            OperandValue::VariableRef(_) => OperandKind::VariableRef,
            OperandValue::RelativeDate(_) => OperandKind::RelativeDate,
            OperandValue::Array(_) => OperandKind::Array,
        }
    }
}

/// The comparison side of a trigger.
///
/// `Pending` holds a chosen kind whose value has not been entered yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "operand", rename_all = "camelCase")]
pub enum Operand {
    #[default]
    Unset,
    Pending(OperandKind),
    Set(OperandValue),
}

impl Operand {
    /// The operand a freshly chosen `kind` starts with.
    ///
    /// Relative dates have no empty form and start at `today + 0y 0m 0d`.
    pub fn empty(kind: OperandKind) -> Self {
        match kind {
            OperandKind::RelativeDate => {
                Operand::Set(OperandValue::RelativeDate(RelativeDelta::default()))
            }
            kind => Operand::Pending(kind),
        }
    }

    /// Wraps an entered value; blank entries (`""`, `[]`, an empty reference) stay pending.
    pub fn from_value(value: OperandValue) -> Self {
        let blank = match &value {
            OperandValue::Literal(Value::String(s)) => s.is_empty(),
            OperandValue::VariableRef(key) => key.is_empty(),
            OperandValue::Array(items) => items.is_empty(),
            _ => false,
        };
        if blank {
            Operand::Pending(value.kind())
        } else {
            Operand::Set(value)
        }
    }

    pub fn kind(&self) -> Option<OperandKind> {
        match self {
            Operand::Unset => None,
            Operand::Pending(kind) => Some(*kind),
            Operand::Set(value) => Some(value.kind()),
        }
    }

    pub fn value(&self) -> Option<&OperandValue> {
        match self {
            Operand::Set(value) => Some(value),
            _ => None,
        }
    }
}

/// Flat, editor-friendly form of a single-comparison trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StructuredTrigger {
    #[serde(rename = "variableKey")]
    pub variable_key: String,
    pub operator: Option<Operator>,
    pub operand: Operand,
}

impl StructuredTrigger {
    pub fn new(variable_key: &str, operator: Operator, operand: OperandValue) -> Self {
        Self {
            variable_key: variable_key.to_string(),
            operator: Some(operator),
            operand: Operand::Set(operand),
        }
    }

    pub fn operand_kind(&self) -> Option<OperandKind> {
        self.operand.kind()
    }

    /// A trigger is complete once every field holds a value.
    pub fn is_complete(&self) -> bool {
        !self.variable_key.is_empty()
            && self.operator.is_some()
            && matches!(self.operand, Operand::Set(_))
    }
}

impl fmt::Display for StructuredTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = if self.variable_key.is_empty() {
            "?"
        } else {
            self.variable_key.as_str()
        };
        write!(f, "{}", subject)?;
        match self.operator {
            Some(op) => write!(f, " {}", op)?,
            None => return write!(f, " ?"),
        }
        match &self.operand {
            Operand::Unset => write!(f, " ?"),
            Operand::Pending(kind) => write!(f, " <{}>", kind),
            Operand::Set(OperandValue::Literal(v)) => write!(f, " {}", v),
            Operand::Set(OperandValue::VariableRef(key)) => write!(f, " ${}", key),
            Operand::Set(OperandValue::RelativeDate(delta)) => write!(f, " {}", delta),
            Operand::Set(OperandValue::Array(items)) => write!(f, " {}", Value::Array(items.clone())),
        }
    }
}

/// How a stored trigger is presented to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum TriggerView {
    Structured { trigger: StructuredTrigger },
    /// The expression could not be decoded and is kept verbatim.
    Raw { expression: Value, reason: String },
}

impl TriggerView {
    pub fn is_raw(&self) -> bool {
        matches!(self, TriggerView::Raw { .. })
    }

    pub fn structured(&self) -> Option<&StructuredTrigger> {
        match self {
            TriggerView::Structured { trigger } => Some(trigger),
            TriggerView::Raw { .. } => None,
        }
    }
}
