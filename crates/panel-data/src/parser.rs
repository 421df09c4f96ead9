//! Parser for submitted blood panels.
//!
//! Expected body:
//! `{"gender": "male", "age": 30, "testResults": {"Hemoglobin": 10.2, ...}}`
//!
//! Presence of all three fields is checked before any field is
//! interpreted, so a body missing `age` reports missing fields even when
//! `gender` is also malformed.

use crate::error::{PanelError, Result};
use crate::types::Gender;
use serde::Serialize;
use serde_json::Value;

const REQUIRED_FIELDS: [&str; 3] = ["gender", "age", "testResults"];

/// A validated panel submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRequest {
    /// Lowercased as submitted
    pub gender: String,
    pub age: i64,
    /// Test code to measured value, `null` entries excluded
    pub test_results: Vec<(String, f64)>,
    /// Codes submitted as `null`, kept so the classifier can impute them
    pub empty_results: Vec<String>,
}

impl PanelRequest {
    pub fn new(gender: impl Into<String>, age: i64) -> Self {
        Self {
            gender: gender.into().to_lowercase(),
            age,
            test_results: Vec::new(),
            empty_results: Vec::new(),
        }
    }

    /// Builder-style helper for tests and the CLI.
    pub fn with_result(mut self, code: impl Into<String>, value: f64) -> Self {
        self.test_results.push((code.into(), value));
        self
    }

    pub fn with_empty_result(mut self, code: impl Into<String>) -> Self {
        self.empty_results.push(code.into());
        self
    }

    /// Recognised gender, if any.
    pub fn sex(&self) -> Option<Gender> {
        Gender::from_label(&self.gender)
    }

    pub fn value_of(&self, code: &str) -> Option<f64> {
        self.test_results
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, v)| *v)
    }
}

/// Parse a raw request body.
pub fn parse_panel_body(body: &[u8]) -> Result<PanelRequest> {
    let value: Value = serde_json::from_slice(body)?;
    parse_panel_request(&value)
}

/// Validate an already-decoded JSON document.
pub fn parse_panel_request(value: &Value) -> Result<PanelRequest> {
    let object = value.as_object().ok_or(PanelError::MissingFields)?;
    if REQUIRED_FIELDS.iter().any(|field| !object.contains_key(*field)) {
        return Err(PanelError::MissingFields);
    }

    let gender = object["gender"]
        .as_str()
        .ok_or_else(|| PanelError::invalid("gender", &object["gender"]))?
        .to_lowercase();
    let age = parse_age(&object["age"])?;

    let results = object["testResults"]
        .as_object()
        .ok_or_else(|| PanelError::invalid("testResults", &object["testResults"]))?;

    let mut test_results = Vec::with_capacity(results.len());
    let mut empty_results = Vec::new();
    for (code, raw) in results {
        match raw {
            Value::Null => empty_results.push(code.clone()),
            Value::Number(n) => match n.as_f64() {
                Some(v) => test_results.push((code.clone(), v)),
                None => return Err(PanelError::invalid(code.as_str(), raw)),
            },
            other => return Err(PanelError::invalid(code.as_str(), other)),
        }
    }

    Ok(PanelRequest {
        gender,
        age,
        test_results,
        empty_results,
    })
}

/// Age is an integer, or a string holding one. Whole floats such as `30.0`
/// are accepted; fractional ages are not.
fn parse_age(raw: &Value) -> Result<i64> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .ok_or_else(|| PanelError::invalid("age", raw)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| PanelError::invalid("age", raw)),
        _ => Err(PanelError::invalid("age", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_request() {
        let request = parse_panel_request(&json!({
            "gender": "Male",
            "age": 30,
            "testResults": {"Hemoglobin": 10, "WBC": 7.5}
        }))
        .unwrap();

        assert_eq!(request.gender, "male");
        assert_eq!(request.age, 30);
        assert_eq!(request.value_of("Hemoglobin"), Some(10.0));
        assert_eq!(request.value_of("WBC"), Some(7.5));
        assert_eq!(request.sex(), Some(Gender::Male));
    }

    #[test]
    fn test_missing_fields() {
        for body in [
            json!({"age": 30, "testResults": {}}),
            json!({"gender": "male", "testResults": {}}),
            json!({"gender": "male", "age": 30}),
            json!([1, 2, 3]),
        ] {
            assert!(matches!(
                parse_panel_request(&body),
                Err(PanelError::MissingFields)
            ));
        }
    }

    #[test]
    fn test_age_as_string() {
        let request = parse_panel_request(&json!({
            "gender": "female", "age": " 42 ", "testResults": {}
        }))
        .unwrap();
        assert_eq!(request.age, 42);

        let err = parse_panel_request(&json!({
            "gender": "female", "age": "forty", "testResults": {}
        }))
        .unwrap_err();
        assert!(matches!(err, PanelError::InvalidValue { ref field, .. } if field == "age"));
    }

    #[test]
    fn test_null_results_kept_apart() {
        let request = parse_panel_request(&json!({
            "gender": "male", "age": 30, "testResults": {"PLT": null, "MCV": 90}
        }))
        .unwrap();
        assert_eq!(request.test_results, vec![("MCV".to_string(), 90.0)]);
        assert_eq!(request.empty_results, vec!["PLT".to_string()]);
    }

    #[test]
    fn test_non_numeric_result_rejected() {
        let err = parse_panel_request(&json!({
            "gender": "male", "age": 30, "testResults": {"PLT": "high"}
        }))
        .unwrap_err();
        assert!(matches!(err, PanelError::InvalidValue { ref field, .. } if field == "PLT"));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            parse_panel_body(b"{not json"),
            Err(PanelError::MalformedBody(_))
        ));
    }
}
