use super::{Marker, Operator};
use crate::error::DecodeError;
use serde_json::{Map, Value};

/// A borrowed, classified view of one expression node.
///
/// Arguments are normalized: an array payload yields its elements, any other
/// payload yields a single argument (`{"var": "x"}` has the argument `"x"`).
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    Literal(&'a Value),
    Operation {
        operator: Operator,
        args: Vec<&'a Value>,
    },
    Marker {
        marker: Marker,
        args: Vec<&'a Value>,
    },
}

impl<'a> Node<'a> {
    /// Classifies a value without copying it.
    ///
    /// Objects must carry exactly one key from the operator or marker vocabulary,
    /// every other object is rejected. Non-object values are literals.
    pub fn classify(value: &'a Value) -> Result<Self, DecodeError> {
        let Value::Object(map) = value else {
            return Ok(Node::Literal(value));
        };

        let mut entries = map.iter();
        let (token, payload) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            (None, _) => return Err(DecodeError::UnknownOperator(String::new())),
            (Some(_), Some(_)) => {
                return Err(DecodeError::MultiKeyNode {
                    keys: map.keys().cloned().collect(),
                });
            }
        };

        let args = match payload {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };

        if let Some(operator) = Operator::from_token(token) {
            Ok(Node::Operation { operator, args })
        } else if let Some(marker) = Marker::from_token(token) {
            Ok(Node::Marker { marker, args })
        } else {
            Err(DecodeError::UnknownOperator(token.clone()))
        }
    }
}

/// Returns true for the values that stand for "no trigger configured yet".
pub fn is_empty_expression(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn single_key(token: &str, payload: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(token.to_string(), payload);
    Value::Object(map)
}

/// `{"<op>": [args...]}`
pub fn operation(operator: Operator, args: Vec<Value>) -> Value {
    single_key(operator.token(), Value::Array(args))
}

/// `{"<marker>": payload}`
pub fn wrap(marker: Marker, payload: Value) -> Value {
    single_key(marker.token(), payload)
}

/// `{"var": key}`
pub fn var(key: &str) -> Value {
    wrap(Marker::Var, Value::String(key.to_string()))
}

/// `{"today": []}`
pub fn today() -> Value {
    wrap(Marker::Today, Value::Array(Vec::new()))
}

/// Extracts the key of a `{"var": ...}` node, honoring the `[key, default]` shorthand.
pub fn var_key(value: &Value) -> Option<&str> {
    match Node::classify(value).ok()? {
        Node::Marker {
            marker: Marker::Var,
            args,
        } => match args.first() {
            Some(Value::String(key)) => Some(key.as_str()),
            None => Some(""),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_normalizes_scalar_payload() {
        let value = json!({"var": "age"});
        match Node::classify(&value).unwrap() {
            Node::Marker { marker, args } => {
                assert_eq!(marker, Marker::Var);
                assert_eq!(args, vec![&json!("age")]);
            }
            other => panic!("Expected marker node, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_rejects_multi_key_objects() {
        let value = json!({"==": [1, 1], "!=": [1, 2]});
        assert!(matches!(
            Node::classify(&value),
            Err(DecodeError::MultiKeyNode { .. })
        ));
    }

    #[test]
    fn test_var_key_default_shorthand() {
        assert_eq!(var_key(&json!({"var": ["age", 18]})), Some("age"));
        assert_eq!(var_key(&json!({"var": ""})), Some(""));
        assert_eq!(var_key(&json!({"date": "2024-01-01"})), None);
    }

    #[test]
    fn test_builders_produce_single_key_nodes() {
        assert_eq!(
            operation(Operator::Equal, vec![var("a"), json!(1)]),
            json!({"==": [{"var": "a"}, 1]})
        );
        assert_eq!(today(), json!({"today": []}));
    }
}
