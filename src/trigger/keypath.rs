//! Mapping between variable keys and option paths such as `"selBox.optionA"`.
//!
//! Selectboxes-style components are tested per option by folding the option
//! into the variable path. Telling such a path apart from a plain key is a
//! heuristic, so it lives behind [`KeyPathResolver`] and nothing else in the
//! codec splits or joins keys.

use crate::registry::VariableRegistry;

/// A variable key with an optional folded-in option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    pub variable_key: String,
    pub option: Option<String>,
}

impl KeyPath {
    pub fn plain(key: &str) -> Self {
        Self {
            variable_key: key.to_string(),
            option: None,
        }
    }
}

/// Splits and joins option paths.
pub trait KeyPathResolver: Send + Sync {
    /// Resolves a raw `var` key found in a stored expression.
    fn split(&self, raw_key: &str, variables: &dyn VariableRegistry) -> KeyPath;

    /// Builds the `var` key testing `option` of `variable_key`.
    fn join(&self, variable_key: &str, option: &str) -> String;
}

/// Treats unknown keys as `<variable>.<option>`.
///
/// The longest prefix naming a known variable wins, so options may contain dots
/// (`selBox.opt.a` is option `opt.a` of `selBox`). Without a known prefix the key is
/// split on its last dot.
#[derive(Debug, Default, Clone, Copy)]
pub struct DottedKeyPath;

impl KeyPathResolver for DottedKeyPath {
    fn split(&self, raw_key: &str, variables: &dyn VariableRegistry) -> KeyPath {
        if variables.contains_variable(raw_key) {
            return KeyPath::plain(raw_key);
        }
        let known_prefix = raw_key
            .match_indices('.')
            .rev()
            .map(|(idx, _)| (&raw_key[..idx], &raw_key[idx + 1..]))
            .find(|(prefix, _)| variables.contains_variable(prefix));
        match known_prefix.or_else(|| raw_key.rsplit_once('.')) {
            Some((prefix, option)) if !prefix.is_empty() => KeyPath {
                variable_key: prefix.to_string(),
                option: Some(option.to_string()),
            },
            _ => KeyPath::plain(raw_key),
        }
    }

    fn join(&self, variable_key: &str, option: &str) -> String {
        format!("{}.{}", variable_key, option)
    }
}
