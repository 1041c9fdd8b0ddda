//! # Joken - Form Rule Trigger Codec
//!
//! **Joken** translates between the flat, editor-friendly state used to configure
//! conditional form rules ("when X then Y") and the JSON logic expressions that the
//! rule-evaluation backend persists and evaluates.
//!
//! ## Core Workflow
//!
//! The codec never evaluates anything; it only reshapes values. A typical editing
//! session looks like this:
//!
//! 1.  **Load Form Metadata**: Build a `FormRegistry` from the form's variables and components.
//! 2.  **Decode**: Use a `RuleCodec` to turn each stored `LogicRule` into a `DecodedRule`.
//!     Triggers or actions outside the supported vocabulary become raw views that keep
//!     the original JSON untouched.
//! 3.  **Edit**: Feed field changes through a `TriggerEditor` / `ActionEditor`. Every change
//!     resets the fields that depend on it.
//! 4.  **Encode**: Rebuild the logic expression (and stored actions) from the edited state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use joken::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let form = FormRegistry::new(
//!         vec![Variable::new("age", DataType::Int, VariableSource::Component)],
//!         vec![Component::new("age", ComponentType::Number)],
//!     )?;
//!     let codec = RuleCodec::for_form(&form);
//!
//!     // Decode a stored trigger into editor state.
//!     let view = codec.decode_trigger(&json!({">": [{"var": "age"}, 18]}));
//!     let trigger = view.structured().cloned().unwrap_or_default();
//!
//!     // Change the operator; the operand is reset because it depends on it.
//!     let mut editor = TriggerEditor::new(trigger);
//!     editor.apply(TriggerChange::Operator(Some(Operator::GreaterThanOrEqual)), &form)?;
//!     editor.apply(TriggerChange::OperandKind(Some(OperandKind::Literal)), &form)?;
//!     editor.apply(TriggerChange::OperandValue(OperandValue::Literal(json!(21))), &form)?;
//!
//!     // Encode the edited state back into a logic expression.
//!     let expression = codec.encode_trigger(editor.state())?;
//!     assert_eq!(expression, json!({">=": [{"var": "age"}, 21]}));
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod catalog;
pub mod codec;
pub mod error;
pub mod expression;
pub mod prelude;
pub mod problems;
pub mod registry;
pub mod rule;
pub mod trigger;

#[cfg(feature = "python-bindings")]
mod python;
