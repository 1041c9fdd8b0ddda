pub mod node;
pub mod operator;

pub use node::*;
pub use operator::*;

/// The JSON logic interchange value persisted for rule triggers.
pub type LogicExpression = serde_json::Value;
