//! Advisory checks for rules that are well-formed but probably not what the author meant.
//!
//! Nothing here blocks decoding, encoding or saving.

use crate::action::{ActionConfig, ActionEntry, ActionType, DmnMapping, OperandSource, TargetKind};
use crate::registry::{ComponentRegistry, VariableRegistry};
use crate::rule::{ActionView, DecodedRule};
use crate::trigger::{Operand, OperandValue, StructuredTrigger, TriggerView};
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProblemKind {
    UnknownVariable,
    IncompleteTrigger,
    MissingActionType,
    MissingTarget,
    UnknownTarget,
    IncompleteMapping,
    MissingConfiguration,
}

/// One advisory finding, located by a short path such as `actions[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub kind: ProblemKind,
    pub location: String,
    pub message: String,
}

impl Problem {
    fn new(kind: ProblemKind, location: &str, message: String) -> Self {
        Self {
            kind,
            location: location.to_string(),
            message,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

pub fn trigger_problems(
    trigger: &StructuredTrigger,
    variables: &dyn VariableRegistry,
) -> Vec<Problem> {
    let mut problems = Vec::new();
    if *trigger == StructuredTrigger::default() {
        return problems;
    }

    if !trigger.variable_key.is_empty() && !variables.contains_variable(&trigger.variable_key) {
        problems.push(Problem::new(
            ProblemKind::UnknownVariable,
            "trigger",
            format!("Variable '{}' no longer exists", trigger.variable_key),
        ));
    }
    if let Operand::Set(OperandValue::VariableRef(reference)) = &trigger.operand {
        if !variables.contains_variable(reference) {
            problems.push(Problem::new(
                ProblemKind::UnknownVariable,
                "trigger",
                format!("Compared variable '{}' no longer exists", reference),
            ));
        }
    }
    if !trigger.is_complete() {
        problems.push(Problem::new(
            ProblemKind::IncompleteTrigger,
            "trigger",
            format!("Trigger '{}' is incomplete", trigger),
        ));
    }
    problems
}

pub fn action_problems(
    location: &str,
    action: &ActionEntry,
    variables: &dyn VariableRegistry,
    components: &dyn ComponentRegistry,
) -> Vec<Problem> {
    let mut problems = Vec::new();
    let Some(action_type) = action.action_type else {
        problems.push(Problem::new(
            ProblemKind::MissingActionType,
            location,
            "No action type selected".to_string(),
        ));
        return problems;
    };

    if let Some(target_kind) = action_type.target_kind() {
        if action.target.is_empty() {
            problems.push(Problem::new(
                ProblemKind::MissingTarget,
                location,
                format!("'{}' action has no target", action_type),
            ));
        } else {
            let known = match target_kind {
                TargetKind::Component => components.lookup_component(&action.target).is_some(),
                TargetKind::Variable => variables.contains_variable(&action.target),
                TargetKind::Step => true,
            };
            if !known {
                problems.push(Problem::new(
                    ProblemKind::UnknownTarget,
                    location,
                    format!("'{}' action targets unknown '{}'", action_type, action.target),
                ));
            }
        }
    }

    if action_type == ActionType::Variable && action.operand_source == Some(OperandSource::Variable) {
        let source = action.operand_value.as_str().unwrap_or_default();
        if !variables.contains_variable(source) {
            problems.push(Problem::new(
                ProblemKind::UnknownVariable,
                location,
                format!("Assigned variable '{}' does not exist", source),
            ));
        }
    }

    match &action.config {
        ActionConfig::Dmn(config) => {
            if config.plugin_id.is_empty() || config.decision_definition_id.is_empty() {
                problems.push(Problem::new(
                    ProblemKind::MissingConfiguration,
                    location,
                    "DMN evaluation has no plugin or decision definition".to_string(),
                ));
            }
            for (name, rows) in [
                ("input", &config.input_mapping),
                ("output", &config.output_mapping),
            ] {
                let blank = blank_dmn_rows(rows);
                if !blank.is_empty() {
                    problems.push(Problem::new(
                        ProblemKind::IncompleteMapping,
                        location,
                        format!("DMN {} mapping rows {} have a blank variable", name, blank.iter().join(", ")),
                    ));
                }
            }
        }
        ActionConfig::Synchronize(config) => {
            if config.source_variable.is_empty() && !config.destination_variable.is_empty() {
                problems.push(Problem::new(
                    ProblemKind::IncompleteMapping,
                    location,
                    format!(
                        "Destination '{}' is synchronized without a source variable",
                        config.destination_variable
                    ),
                ));
            }
            let blank = config
                .data_mappings
                .iter()
                .positions(|m| m.component_key.is_empty() || m.property.is_empty())
                .collect_vec();
            if !blank.is_empty() {
                problems.push(Problem::new(
                    ProblemKind::IncompleteMapping,
                    location,
                    format!("Data mapping rows {} are incomplete", blank.iter().join(", ")),
                ));
            }
        }
        ActionConfig::ServiceFetch(configuration) => {
            if configuration.is_null() || configuration.as_str() == Some("") {
                problems.push(Problem::new(
                    ProblemKind::MissingConfiguration,
                    location,
                    "No service fetch configuration selected".to_string(),
                ));
            }
        }
        ActionConfig::None => {}
    }

    problems
}

fn blank_dmn_rows(rows: &[DmnMapping]) -> Vec<usize> {
    rows.iter()
        .positions(|row| row.form_variable.is_empty() || row.dmn_variable.is_empty())
        .collect()
}

/// Collects trigger and action problems of a decoded rule. Raw parts are skipped.
pub fn rule_problems(
    rule: &DecodedRule,
    variables: &dyn VariableRegistry,
    components: &dyn ComponentRegistry,
) -> Vec<Problem> {
    let mut problems = match &rule.trigger {
        TriggerView::Structured { trigger } => trigger_problems(trigger, variables),
        TriggerView::Raw { .. } => Vec::new(),
    };
    for (idx, view) in rule.actions.iter().enumerate() {
        if let ActionView::Structured { action } = view {
            let location = format!("actions[{}]", idx);
            problems.extend(action_problems(&location, action, variables, components));
        }
    }
    problems
}
