use super::{Operand, OperandKind, OperandValue, StructuredTrigger};
use crate::catalog::validate_trigger;
use crate::error::TransitionError;
use crate::expression::Operator;
use crate::registry::VariableRegistry;
use std::fmt;

/// Editable trigger fields, ordered by causal dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TriggerField {
    Variable,
    Operator,
    OperandKind,
    OperandValue,
}

/// Changing a field resets every field after it in this order.
pub const TRIGGER_FIELD_ORDER: [TriggerField; 4] = [
    TriggerField::Variable,
    TriggerField::Operator,
    TriggerField::OperandKind,
    TriggerField::OperandValue,
];

impl fmt::Display for TriggerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TriggerField::Variable => "variable",
            TriggerField::Operator => "operator",
            TriggerField::OperandKind => "operandKind",
            TriggerField::OperandValue => "operandValue",
        };
        f.write_str(name)
    }
}

/// A single field-level edit event.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerChange {
    Variable(String),
    Operator(Option<Operator>),
    OperandKind(Option<OperandKind>),
    OperandValue(OperandValue),
}

impl TriggerChange {
    pub fn field(&self) -> TriggerField {
        match self {
            TriggerChange::Variable(_) => TriggerField::Variable,
            TriggerChange::Operator(_) => TriggerField::Operator,
            TriggerChange::OperandKind(_) => TriggerField::OperandKind,
            TriggerChange::OperandValue(_) => TriggerField::OperandValue,
        }
    }
}

impl StructuredTrigger {
    /// Applies one field change and resets every downstream field to its default.
    ///
    /// Pure: `self` is left untouched and the next state is returned.
    pub fn transition(&self, change: TriggerChange) -> StructuredTrigger {
        let field = change.field();
        let mut next = self.clone();
        match change {
            TriggerChange::Variable(key) => next.variable_key = key,
            TriggerChange::Operator(operator) => next.operator = operator,
            TriggerChange::OperandKind(kind) => {
                next.operand = kind.map_or(Operand::Unset, Operand::empty);
            }
            // A value never changes the kind chosen upstream of it.
            TriggerChange::OperandValue(value) => {
                next.operand = match self.operand.kind() {
                    Some(kind) if kind != value.kind() => Operand::Pending(kind),
                    _ => Operand::from_value(value),
                };
            }
        }
        for downstream in TRIGGER_FIELD_ORDER.iter().filter(|f| **f > field) {
            next.reset(*downstream);
        }
        next
    }

    fn reset(&mut self, field: TriggerField) {
        match field {
            TriggerField::Variable => self.variable_key.clear(),
            TriggerField::Operator => self.operator = None,
            TriggerField::OperandKind => self.operand = Operand::Unset,
            TriggerField::OperandValue => {
                if let Operand::Set(value) = &self.operand {
                    self.operand = Operand::empty(value.kind());
                }
            }
        }
    }
}

/// One trigger editing session.
///
/// Changes go through [`StructuredTrigger::transition`] and are then checked against
/// the catalog. A rejected change is still applied, so the downstream reset is never
/// skipped, and the error is reported to the caller. An operand value of the wrong
/// kind only clears the current value.
#[derive(Debug, Clone, Default)]
pub struct TriggerEditor {
    state: StructuredTrigger,
}

impl TriggerEditor {
    pub fn new(state: StructuredTrigger) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &StructuredTrigger {
        &self.state
    }

    pub fn into_state(self) -> StructuredTrigger {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn apply(
        &mut self,
        change: TriggerChange,
        variables: &dyn VariableRegistry,
    ) -> Result<(), TransitionError> {
        let mismatch = match &change {
            TriggerChange::OperandValue(value) => self
                .state
                .operand
                .kind()
                .filter(|expected| *expected != value.kind())
                .map(|expected| (expected, value.kind())),
            _ => None,
        };

        log::trace!("Trigger field '{}' changed", change.field());
        self.state = self.state.transition(change);

        if let Some((expected, found)) = mismatch {
            return Err(TransitionError::OperandKindMismatch { expected, found });
        }
        if self.state.variable_key.is_empty() {
            return Ok(());
        }
        let variable = variables
            .lookup_variable(&self.state.variable_key)
            .ok_or_else(|| TransitionError::UnknownVariable(self.state.variable_key.clone()))?;
        validate_trigger(&self.state, variable)
    }
}
