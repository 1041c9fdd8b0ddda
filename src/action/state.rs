use super::{ActionConfig, ActionEntry, ActionField, ActionType, ComponentProperty, OperandSource};
use crate::error::TransitionError;
use serde_json::Value;

/// A single field-level edit event on an action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionChange {
    ActionType(Option<ActionType>),
    Target(String),
    Config(ActionConfig),
    Property(Option<ComponentProperty>),
    PropertyValue(Value),
    OperandSource(Option<OperandSource>),
    OperandValue(Value),
}

impl ActionChange {
    pub fn field(&self) -> ActionField {
        match self {
            ActionChange::ActionType(_) => ActionField::ActionType,
            ActionChange::Target(_) => ActionField::Target,
            ActionChange::Config(_) => ActionField::Config,
            ActionChange::Property(_) => ActionField::Property,
            ActionChange::PropertyValue(_) => ActionField::PropertyValue,
            ActionChange::OperandSource(_) => ActionField::OperandSource,
            ActionChange::OperandValue(_) => ActionField::OperandValue,
        }
    }
}

impl ActionEntry {
    /// Applies one field change and resets every field of higher rank.
    pub fn transition(&self, change: ActionChange) -> ActionEntry {
        let field = change.field();
        let mut next = self.clone();
        match change {
            ActionChange::ActionType(action_type) => next.action_type = action_type,
            ActionChange::Target(target) => next.target = target,
            ActionChange::Config(config) => next.config = config,
            ActionChange::Property(property) => next.property = property,
            ActionChange::PropertyValue(value) => next.property_value = value,
            ActionChange::OperandSource(source) => next.operand_source = source,
            ActionChange::OperandValue(value) => next.operand_value = value,
        }
        for downstream in ActionField::ALL
            .into_iter()
            .filter(|f| f.rank() > field.rank())
        {
            next.reset(downstream);
        }
        next
    }

    fn reset(&mut self, field: ActionField) {
        match field {
            ActionField::ActionType => self.action_type = None,
            ActionField::Target => self.target.clear(),
            ActionField::Config => self.config = ActionConfig::empty_for(self.action_type),
            ActionField::Property => self.property = None,
            ActionField::PropertyValue => self.property_value = Value::Null,
            ActionField::OperandSource => self.operand_source = None,
            ActionField::OperandValue => self.operand_value = Value::Null,
        }
    }
}

/// One action editing session.
///
/// Unlike triggers, a change to a field the current action type does not carry is
/// rejected and leaves the state untouched, so unsupported fields stay at their default.
#[derive(Debug, Clone, Default)]
pub struct ActionEditor {
    state: ActionEntry,
}

impl ActionEditor {
    pub fn new(state: ActionEntry) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ActionEntry {
        &self.state
    }

    pub fn into_state(self) -> ActionEntry {
        self.state
    }

    pub fn apply(&mut self, change: ActionChange) -> Result<(), TransitionError> {
        if let Err(e) = self.check(&change) {
            log::warn!("Rejected action change: {}", e);
            return Err(e);
        }
        log::trace!("Action field '{}' changed", change.field());
        self.state = self.state.transition(change);
        Ok(())
    }

    fn check(&self, change: &ActionChange) -> Result<(), TransitionError> {
        let field = change.field();
        if field == ActionField::ActionType {
            return Ok(());
        }
        let action_type = self
            .state
            .action_type
            .ok_or(TransitionError::NoActionType(field))?;
        if !action_type.supports(field) {
            return Err(TransitionError::FieldNotApplicable { field, action_type });
        }
        if let ActionChange::Config(config) = change {
            if !config.belongs_to(Some(action_type)) {
                return Err(TransitionError::ConfigMismatch(action_type));
            }
        }
        Ok(())
    }
}
