//! Document-level validation entry point.
//!
//! Runs in two phases: every element is validated individually, in document
//! order, and only then is cross-element uniqueness checked. A malformed
//! element is therefore always reported ahead of a duplicate type, wherever
//! the duplicate sits.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use ui_schema_core::{FeatureSet, validate_document};
//!
//! let document = json!({
//!     "elements": [{"type": "stacktrace-link", "uri": "/sentry/issue"}]
//! });
//! assert!(validate_document(&document, &FeatureSet::new()).is_ok());
//!
//! let missing = json!({"type": "nothing"});
//! let err = validate_document(&missing, &FeatureSet::new()).unwrap_err();
//! assert_eq!(err.to_string(), "'elements' is a required property");
//! ```

use serde_json::{Map, Value};

use crate::ValidationError;
use crate::element::validate_element;
use crate::features::FeatureSet;
use crate::unique::enforce_unique;

/// Validates a whole schema document under `features`.
///
/// The document is only read; acceptance carries no payload.
///
/// # Errors
///
/// Returns the first violation found: document shape, then each element in
/// order, then duplicate element types.
pub fn validate_document(document: &Value, features: &FeatureSet) -> Result<(), ValidationError> {
    let elements = document_elements(document)?;

    let mut entries = Vec::with_capacity(elements.len());
    for element in elements {
        entries.push(validate_element(element, features)?);
    }

    enforce_unique(entries)
}

/// Validates `document` with every feature flag inactive.
///
/// # Errors
///
/// See [`validate_document`].
pub fn validate(document: &Value) -> Result<(), ValidationError> {
    validate_document(document, &FeatureSet::new())
}

fn document_elements(document: &Value) -> Result<Vec<&Map<String, Value>>, ValidationError> {
    let root = document
        .as_object()
        .ok_or(ValidationError::DocumentNotObject)?;
    let elements = root
        .get("elements")
        .ok_or(ValidationError::MissingElements)?
        .as_array()
        .ok_or(ValidationError::ElementsNotArray)?;

    elements
        .iter()
        .map(|element| element.as_object().ok_or(ValidationError::ElementsNotArray))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_elements_not_array() {
        let err = validate(&json!({"elements": {"type": "issue-link"}})).unwrap_err();
        assert_eq!(err.to_string(), "'elements' should be an array of objects");
    }

    #[test]
    fn test_elements_with_scalar_member() {
        let document = json!({"elements": [{"type": "stacktrace-link", "uri": "/a"}, "issue-link"]});
        assert_eq!(validate(&document).unwrap_err(), ValidationError::ElementsNotArray);
    }

    #[test]
    fn test_document_must_be_object() {
        let err = validate(&json!([{"type": "stacktrace-link"}])).unwrap_err();
        assert_eq!(err, ValidationError::DocumentNotObject);
        assert_eq!(err.kind(), ErrorKind::WrongShape);
    }

    #[test]
    fn test_empty_elements_accepted() {
        assert!(validate(&json!({"elements": []})).is_ok());
    }

    #[test]
    fn test_duplicate_type() {
        let document = json!({
            "elements": [
                {"uri": "/stacktrace/github/getsentry/sentry", "type": "stacktrace-link"},
                {"uri": "/stacktrace/github/getsentry/sentry", "type": "stacktrace-link"}
            ]
        });
        let err = validate(&document).unwrap_err();
        assert_eq!(err.to_string(), "Multiple elements of type: stacktrace-link");
    }

    #[test]
    fn test_structural_error_wins_over_earlier_duplicate() {
        let document = json!({
            "elements": [
                {"type": "stacktrace-link", "uri": "/a"},
                {"type": "stacktrace-link", "uri": "/b"},
                {"type": "issue-media", "title": "Demo"}
            ]
        });
        let err = validate(&document).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'elements' is a required property for element of type 'issue-media'"
        );
    }

    #[test]
    fn test_structural_error_wins_over_later_duplicate_of_same_type() {
        let document = json!({
            "elements": [
                {"type": "stacktrace-link"},
                {"type": "stacktrace-link", "uri": "/b"}
            ]
        });
        let err = validate(&document).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'uri' is a required property for element of type 'stacktrace-link'"
        );
    }
}
