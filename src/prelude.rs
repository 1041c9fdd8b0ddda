//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the joken crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use joken::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let form = FormRegistry::from_file("path/to/form.json")?;
//! let rules: Vec<LogicRule> =
//!     serde_json::from_str(&std::fs::read_to_string("path/to/rules.json")?)?;
//!
//! let codec = RuleCodec::for_form(&form);
//! for rule in codec.decode_rules(&rules) {
//!     for problem in codec.problems(&rule) {
//!         println!("{}: {}", rule.id, problem);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Codec entry points
pub use crate::codec::{RuleCodec, RuleCodecBuilder};
pub use crate::rule::{ActionView, DecodedRule, LogicRule};

// Trigger state and editing
pub use crate::expression::{LogicExpression, Operator};
pub use crate::trigger::{
    DeltaSign, Operand, OperandKind, OperandValue, RelativeDelta, StructuredTrigger,
    TriggerChange, TriggerEditor, TriggerField, TriggerView,
};

// Actions
pub use crate::action::{
    ActionChange, ActionConfig, ActionEditor, ActionEntry, ActionField, ActionType,
    ComponentProperty, OperandSource, StoredAction,
};

// Form metadata
pub use crate::registry::{
    Component, ComponentRegistry, ComponentType, DataType, FormRegistry, Variable,
    VariableRegistry, VariableSource,
};

// Error types and advisories
pub use crate::error::{DecodeError, EncodeError, RegistryError, TransitionError};
pub use crate::problems::{Problem, ProblemKind};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
