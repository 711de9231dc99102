//! Wire types shared with the checking service.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A named check the service can apply to text.
///
/// The service may send more fields; only the name is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
}

impl Rule {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One reported error: the offending text and its suggested replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextError {
    pub word: String,
    pub correction: String,
    /// Name of the rule that produced this error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

impl TextError {
    pub fn new(word: impl Into<String>, correction: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            correction: correction.into(),
            rule: None,
            start: None,
            end: None,
        }
    }
}

/// Aggregate statistics for a checked text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_errors: usize,
    /// Error count per type, in the order the service sent them
    #[serde(default)]
    pub error_types: IndexMap<String, usize>,
}

/// Normalized response for both `/check` and `/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub original_text: String,
    pub corrected_text: String,
    #[serde(default)]
    pub errors: Vec<TextError>,
    #[serde(default)]
    pub stats: Stats,
    /// File name echoed back by `/upload`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl CheckResult {
    /// Reshape an `/upload` response: the total is the number of reported
    /// errors, whatever the service claims.
    pub fn normalize_upload(mut self) -> Self {
        self.stats.total_errors = self.errors.len();
        self
    }
}

/// JSON body for `POST /check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRequest {
    pub text: String,
    pub rules: Vec<String>,
}

/// A file to send to `POST /upload`, with the rules to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub rules: Vec<String>,
}

/// Error body the service returns alongside a non-success status.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ServerError {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_keeps_error_type_order() {
        let json = r#"{
            "original_text": "teh cat",
            "corrected_text": "the cat",
            "errors": [{"word": "teh", "correction": "the"}],
            "stats": {"total_errors": 3, "error_types": {"spelling": 2, "grammar": 1}}
        }"#;
        let result: CheckResult = serde_json::from_str(json).expect("parse");
        let types: Vec<(&str, usize)> = result
            .stats
            .error_types
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        assert_eq!(types, vec![("spelling", 2), ("grammar", 1)]);
        assert_eq!(result.stats.total_errors, 3);
        assert!(result.filename.is_none());
    }

    #[test]
    fn test_error_extra_fields_are_optional() {
        let json = r#"{"word": "teh", "correction": "the", "start": 0, "end": 3, "rule": "spelling"}"#;
        let error: TextError = serde_json::from_str(json).expect("parse");
        assert_eq!(error.rule.as_deref(), Some("spelling"));
        assert_eq!(error.start, Some(0));
        assert_eq!(error.end, Some(3));

        let minimal: TextError =
            serde_json::from_str(r#"{"word": "a", "correction": "b"}"#).expect("parse");
        assert_eq!(minimal, TextError::new("a", "b"));
    }

    #[test]
    fn test_rule_ignores_unknown_fields() {
        let rules: Vec<Rule> =
            serde_json::from_str(r#"[{"name": "spelling", "pattern": "teh"}, {"name": "grammar"}]"#)
                .expect("parse");
        assert_eq!(rules, vec![Rule::new("spelling"), Rule::new("grammar")]);
    }

    #[test]
    fn test_normalize_upload_counts_errors() {
        let json = r#"{
            "original_text": "teh adn",
            "corrected_text": "the and",
            "errors": [{"word": "teh", "correction": "the"}, {"word": "adn", "correction": "and"}],
            "stats": {"total_errors": 99, "error_types": {"spelling": 2}},
            "filename": "notes.txt"
        }"#;
        let result: CheckResult = serde_json::from_str(json).expect("parse");
        let result = result.normalize_upload();
        assert_eq!(result.stats.total_errors, 2);
        assert_eq!(result.filename.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn test_upload_without_total_parses() {
        let json = r#"{
            "original_text": "x",
            "corrected_text": "x",
            "errors": [],
            "stats": {"error_types": {}}
        }"#;
        let result: CheckResult = serde_json::from_str(json).expect("parse");
        assert_eq!(result.normalize_upload().stats.total_errors, 0);
    }

    #[test]
    fn test_check_request_serializes_as_payload() {
        let request = CheckRequest {
            text: "teh cat".to_string(),
            rules: vec!["spelling".to_string()],
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"text": "teh cat", "rules": ["spelling"]})
        );
    }
}
