use crate::action::{ActionEntry, StoredAction};
use crate::trigger::TriggerView;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A persisted logic rule: one trigger expression and the actions it fires.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LogicRule {
    #[serde(alias = "uuid", default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "jsonLogicTrigger", alias = "trigger", default)]
    pub trigger: Value,
    #[serde(default)]
    pub actions: Vec<StoredAction>,
    #[serde(default)]
    pub order: u32,
}

/// How a stored action is presented to the editor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ActionView {
    Structured { action: ActionEntry },
    /// The action could not be decoded and is kept verbatim.
    Raw { stored: StoredAction, reason: String },
}

impl ActionView {
    pub fn structured(&self) -> Option<&ActionEntry> {
        match self {
            ActionView::Structured { action } => Some(action),
            ActionView::Raw { .. } => None,
        }
    }
}

/// Editor state of one rule. Owns independent copies of everything it was decoded from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DecodedRule {
    pub id: String,
    pub description: String,
    pub order: u32,
    pub trigger: TriggerView,
    pub actions: Vec<ActionView>,
}

impl DecodedRule {
    /// True when neither the trigger nor any action fell back to a raw view.
    pub fn is_fully_structured(&self) -> bool {
        !self.trigger.is_raw()
            && self
                .actions
                .iter()
                .all(|a| matches!(a, ActionView::Structured { .. }))
    }
}
