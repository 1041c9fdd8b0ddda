use crate::action::{self, StoredAction};
use crate::error::{DecodeError, EncodeError};
use crate::problems::{self, Problem};
use crate::registry::{ComponentRegistry, FormRegistry, Variable, VariableRegistry};
use crate::rule::{ActionView, DecodedRule, LogicRule};
use crate::trigger::{
    self, DottedKeyPath, EncodeContext, KeyPathResolver, StructuredTrigger, TriggerView,
};
use serde_json::{Map, Value};

/// Decodes and encodes rules against one form's variable and component metadata.
///
/// The registries are borrowed read-only for the lifetime of the codec; nothing is
/// looked up from ambient state.
pub struct RuleCodec<'a> {
    variables: &'a dyn VariableRegistry,
    components: &'a dyn ComponentRegistry,
    key_paths: Box<dyn KeyPathResolver>,
}

pub struct RuleCodecBuilder<'a> {
    variables: &'a dyn VariableRegistry,
    components: &'a dyn ComponentRegistry,
    key_paths: Box<dyn KeyPathResolver>,
}

impl<'a> RuleCodecBuilder<'a> {
    pub fn new(
        variables: &'a dyn VariableRegistry,
        components: &'a dyn ComponentRegistry,
    ) -> Self {
        Self {
            variables,
            components,
            key_paths: Box::new(DottedKeyPath),
        }
    }

    /// Replaces the dotted option-path heuristic.
    pub fn with_key_path_resolver(mut self, resolver: Box<dyn KeyPathResolver>) -> Self {
        self.key_paths = resolver;
        self
    }

    pub fn build(self) -> RuleCodec<'a> {
        RuleCodec {
            variables: self.variables,
            components: self.components,
            key_paths: self.key_paths,
        }
    }
}

impl<'a> RuleCodec<'a> {
    pub fn builder(
        variables: &'a dyn VariableRegistry,
        components: &'a dyn ComponentRegistry,
    ) -> RuleCodecBuilder<'a> {
        RuleCodecBuilder::new(variables, components)
    }

    /// A codec with default settings over a [`FormRegistry`].
    pub fn for_form(form: &'a FormRegistry) -> Self {
        Self::builder(form, form).build()
    }

    pub fn variables(&self) -> &dyn VariableRegistry {
        self.variables
    }

    pub fn components(&self) -> &dyn ComponentRegistry {
        self.components
    }

    pub fn try_decode_trigger(&self, expression: &Value) -> Result<StructuredTrigger, DecodeError> {
        trigger::decode_trigger(expression, self.variables, self.key_paths.as_ref())
    }

    /// Decodes a trigger, falling back to a raw view of the untouched expression.
    pub fn decode_trigger(&self, expression: &Value) -> TriggerView {
        match self.try_decode_trigger(expression) {
            Ok(trigger) => TriggerView::Structured { trigger },
            Err(e) => {
                log::debug!("Trigger falls back to raw view: {}", e);
                TriggerView::Raw {
                    expression: expression.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn encode_trigger(&self, trigger: &StructuredTrigger) -> Result<Value, EncodeError> {
        let context =
            EncodeContext::resolve(&trigger.variable_key, self.variables, self.components)?;
        trigger::encode_trigger(trigger, &context, self.key_paths.as_ref())
    }

    /// Encodes whatever the editor currently shows.
    ///
    /// Raw views are returned verbatim and an untouched empty trigger encodes to `{}`.
    pub fn encode_view(&self, view: &TriggerView) -> Result<Value, EncodeError> {
        match view {
            TriggerView::Raw { expression, .. } => Ok(expression.clone()),
            TriggerView::Structured { trigger } if *trigger == StructuredTrigger::default() => {
                Ok(Value::Object(Map::new()))
            }
            TriggerView::Structured { trigger } => self.encode_trigger(trigger),
        }
    }

    pub fn decode_action(&self, stored: &StoredAction) -> ActionView {
        match action::decode_action(stored) {
            Ok(action) => ActionView::Structured { action },
            Err(e) => {
                log::debug!("Action falls back to raw view: {}", e);
                ActionView::Raw {
                    stored: stored.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Decodes one rule. Failures stay local to the trigger or action they occur in.
    pub fn decode_rule(&self, rule: &LogicRule) -> DecodedRule {
        DecodedRule {
            id: rule.id.clone(),
            description: rule.description.clone(),
            order: rule.order,
            trigger: self.decode_trigger(&rule.trigger),
            actions: rule.actions.iter().map(|a| self.decode_action(a)).collect(),
        }
    }

    pub fn decode_rules(&self, rules: &[LogicRule]) -> Vec<DecodedRule> {
        rules.iter().map(|rule| self.decode_rule(rule)).collect()
    }

    pub fn encode_rule(&self, rule: &DecodedRule) -> Result<LogicRule, EncodeError> {
        let actions = rule
            .actions
            .iter()
            .map(|view| match view {
                ActionView::Structured { action } => action::encode_action(action),
                ActionView::Raw { stored, .. } => Ok(stored.clone()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LogicRule {
            id: rule.id.clone(),
            description: rule.description.clone(),
            trigger: self.encode_view(&rule.trigger)?,
            actions,
            order: rule.order,
        })
    }

    /// Variables a variable-reference operand may point at: same data type, other key.
    pub fn reference_candidates(&self, subject_key: &str) -> Vec<&Variable> {
        let Some(subject) = self.variables.lookup_variable(subject_key) else {
            return Vec::new();
        };
        let data_type = subject.data_type;
        self.variables
            .list_by_filter(&|v| v.data_type == data_type && v.key != subject_key)
    }

    pub fn problems(&self, rule: &DecodedRule) -> Vec<Problem> {
        problems::rule_problems(rule, self.variables, self.components)
    }
}
