use crate::codec::RuleCodec;
use crate::registry::FormRegistry;
use crate::rule::{DecodedRule, LogicRule};
use pyo3::prelude::*;

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
}

/// A codec between stored form rules and editor state.
///
/// The form metadata is parsed once on initialization. All other methods
/// take and return JSON strings.
#[pyclass(name = "RuleCodec")]
struct RuleCodecPy {
    form: FormRegistry,
}

#[pymethods]
impl RuleCodecPy {
    /// Initializes the codec for one form.
    ///
    /// Args:
    ///     form_json (str): A JSON object with `variables` and `components` arrays.
    ///
    /// Raises:
    ///     ValueError: If the form definition is malformed or defines a key twice.
    #[new]
    fn new(form_json: &str) -> PyResult<Self> {
        let form = FormRegistry::from_json(form_json).map_err(value_error)?;
        Ok(RuleCodecPy { form })
    }

    /// Decodes a JSON array of stored rules into a JSON array of editor states.
    ///
    /// Triggers and actions that cannot be represented structurally are returned
    /// in "raw" mode with the original JSON and a reason.
    fn decode_rules(&self, rules_json: &str) -> PyResult<String> {
        let rules: Vec<LogicRule> = serde_json::from_str(rules_json).map_err(value_error)?;
        let decoded = RuleCodec::for_form(&self.form).decode_rules(&rules);
        serde_json::to_string(&decoded).map_err(value_error)
    }

    /// Encodes a JSON array of editor states back into stored rules.
    ///
    /// Raises:
    ///     ValueError: If a structured trigger references an unknown variable or
    ///         uses an operator or operand kind not offered for its data type.
    fn encode_rules(&self, decoded_json: &str) -> PyResult<String> {
        let decoded: Vec<DecodedRule> = serde_json::from_str(decoded_json).map_err(value_error)?;
        let codec = RuleCodec::for_form(&self.form);
        let rules = decoded
            .iter()
            .map(|rule| codec.encode_rule(rule))
            .collect::<Result<Vec<_>, _>>()
            .map_err(value_error)?;
        serde_json::to_string(&rules).map_err(value_error)
    }

    /// Returns a JSON object mapping rule ids to their advisory problems.
    fn check(&self, rules_json: &str) -> PyResult<String> {
        let rules: Vec<LogicRule> = serde_json::from_str(rules_json).map_err(value_error)?;
        let codec = RuleCodec::for_form(&self.form);
        let report = codec
            .decode_rules(&rules)
            .iter()
            .map(|rule| Ok((rule.id.clone(), serde_json::to_value(codec.problems(rule))?)))
            .collect::<Result<serde_json::Map<_, _>, serde_json::Error>>()
            .map_err(value_error)?;
        serde_json::to_string(&report).map_err(value_error)
    }
}

/// Bidirectional codec for form logic rules.
#[pymodule]
fn joken(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<RuleCodecPy>()?;
    Ok(())
}
