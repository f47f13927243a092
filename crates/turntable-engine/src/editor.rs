//! Free-form JSON document validation for the timeline editor.
//!
//! The editor re-parses its whole buffer on every change. A successful parse
//! caches the value and enables submission; a failed parse drops the cached
//! value and records the parser's message.

use serde_json::Value;

/// Message shown when a submission is refused.
pub const SUBMIT_BLOCKED_MESSAGE: &str = "Please enter valid JSON";

/// Validated state of the editor buffer.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    text: String,
    valid: bool,
    parsed: Option<Value>,
    error: Option<String>,
}

impl EditorState {
    /// Create an editor holding `text`, validated immediately.
    pub fn new(text: impl Into<String>) -> Self {
        let mut state = Self::default();
        state.set_text(text);
        state
    }

    /// Replace the buffer and re-validate.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        match serde_json::from_str::<Value>(&self.text) {
            Ok(value) => {
                self.valid = true;
                self.parsed = Some(value);
                self.error = None;
            }
            Err(e) => {
                self.valid = false;
                self.parsed = None;
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The cached parse of the buffer, if it is valid.
    pub fn parsed(&self) -> Option<&Value> {
        self.parsed.as_ref()
    }

    /// Pretty-printed preview of the parsed document.
    pub fn preview(&self) -> Option<String> {
        self.parsed
            .as_ref()
            .and_then(|v| serde_json::to_string_pretty(v).ok())
    }

    /// Inline message for an invalid buffer.
    pub fn validation_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| EditorError::InvalidJson(e.clone()).to_string())
    }

    /// Whether a submission would be accepted.
    pub fn can_submit(&self) -> bool {
        self.valid && self.parsed.is_some()
    }

    /// The body to submit, or the reason submission is refused.
    pub fn submission(&self) -> Result<&Value, EditorError> {
        match (&self.parsed, self.valid) {
            (Some(value), true) => Ok(value),
            _ => Err(EditorError::NotReady),
        }
    }
}

/// Local validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// The buffer is not well-formed JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Submission attempted without a valid, parsed buffer.
    #[error("Please enter valid JSON")]
    NotReady,
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use serde_json::json;

    #[test]
    fn test_valid_object() {
        let editor = EditorState::new(r#"{"a":1}"#);
        assert!(editor.is_valid());
        assert_eq!(editor.parsed(), Some(&json!({"a": 1})));
        assert!(editor.validation_message().is_none());
        assert_eq!(editor.submission().unwrap(), &json!({"a": 1}));
    }

    #[test]
    fn test_preview_is_pretty_printed() {
        let editor = EditorState::new(r#"{"a":1}"#);
        assert_snapshot!(editor.preview().unwrap(), @r#"
{
  "a": 1
}
"#);
    }

    #[test]
    fn test_truncated_object() {
        let editor = EditorState::new(r#"{"a":1"#);
        assert!(!editor.is_valid());
        assert!(editor.parsed().is_none());
        assert!(editor.preview().is_none());
        assert!(!editor.can_submit());
        assert_eq!(editor.submission(), Err(EditorError::NotReady));
        assert!(editor
            .validation_message()
            .unwrap()
            .starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_reparse_clears_previous_value() {
        let mut editor = EditorState::new("[1, 2]");
        assert!(editor.is_valid());

        editor.set_text("[1, 2");
        assert!(!editor.is_valid());
        assert!(editor.parsed().is_none());

        editor.set_text("[1, 2, 3]");
        assert_eq!(editor.parsed(), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn test_primitives_are_valid_json() {
        for text in ["42", "\"spin\"", "null", "true", "[]"] {
            let editor = EditorState::new(text);
            assert!(editor.is_valid(), "{text} should be valid");
            assert!(editor.preview().is_some());
        }
    }

    #[test]
    fn test_empty_buffer_is_invalid() {
        let editor = EditorState::new("");
        assert!(!editor.is_valid());
        assert!(editor.validation_message().is_some());
    }

    #[test]
    fn test_blocked_message() {
        assert_eq!(EditorError::NotReady.to_string(), SUBMIT_BLOCKED_MESSAGE);
    }
}
