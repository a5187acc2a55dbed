//! Field descriptor rules.
//!
//! Field descriptors describe one user-facing input inside a
//! `required_fields` / `optional_fields` sequence. Media items are the
//! single-member contents of an `issue-media` element's `elements`.

use std::fmt;

use serde_json::{Map, Value};

use crate::ValidationError;

/// Kinds of input a field descriptor may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free-form text input. Needs only `name` and `label`.
    Text,
    /// Choice input backed by static `options` or a remote `uri`.
    Select,
}

impl FieldKind {
    pub const ALL: [FieldKind; 2] = [Self::Select, Self::Text];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Select => "select",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of media a media container may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
}

impl MediaKind {
    pub const ALL: [MediaKind; 1] = [Self::Video];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

/// Validates every member of a field-descriptor sequence, stopping at the
/// first invalid one.
///
/// `property` names the sequence (e.g. `required_fields`) and
/// `element_type` the enclosing element; both only feed error messages.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, in sequence order.
pub fn validate_fields(
    property: &str,
    fields: &[Value],
    element_type: &str,
) -> Result<(), ValidationError> {
    for field in fields {
        let field = field
            .as_object()
            .ok_or_else(|| ValidationError::FieldNotObject {
                property: property.to_string(),
                element_type: element_type.to_string(),
            })?;
        validate_field(field, element_type)?;
    }
    Ok(())
}

/// Validates a single field descriptor and returns its kind.
///
/// # Errors
///
/// Fails when `type` is missing or unknown, when `name` / `label` are
/// missing or not strings, or when a `select` does not define exactly one
/// well-formed source of options.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use ui_schema_core::{FieldKind, validate_field};
///
/// let field = json!({"type": "select", "name": "assignee", "label": "Assignee", "uri": "/members"});
/// let kind = validate_field(field.as_object().unwrap(), "issue-link").unwrap();
/// assert_eq!(kind, FieldKind::Select);
///
/// let both = json!({"type": "select", "name": "a", "label": "A", "uri": "/a", "options": []});
/// assert!(validate_field(both.as_object().unwrap(), "issue-link").is_err());
/// ```
pub fn validate_field(
    field: &Map<String, Value>,
    element_type: &str,
) -> Result<FieldKind, ValidationError> {
    let raw_type = field
        .get("type")
        .ok_or_else(|| ValidationError::MissingFieldType {
            element_type: element_type.to_string(),
        })?;
    let kind = raw_type
        .as_str()
        .and_then(FieldKind::parse)
        .ok_or_else(|| ValidationError::UnknownFieldType {
            found: render_discriminator(raw_type),
            valid: FieldKind::ALL
                .iter()
                .map(|kind| kind.as_str().to_string())
                .collect(),
            element_type: element_type.to_string(),
        })?;

    let name = require_string(field, "name", kind.as_str(), element_type)?;
    require_string(field, "label", kind.as_str(), element_type)?;

    if kind == FieldKind::Select {
        validate_select_source(field, name, element_type)?;
    }

    Ok(kind)
}

/// Validates a media item such as `{"type": "video", "url": "..."}`.
///
/// # Errors
///
/// Fails when `type` is missing or not a known media kind, or when `url`
/// is missing or not a string.
pub fn validate_media_item(
    item: &Map<String, Value>,
    element_type: &str,
) -> Result<MediaKind, ValidationError> {
    let raw_type = item
        .get("type")
        .ok_or_else(|| ValidationError::MissingFieldType {
            element_type: element_type.to_string(),
        })?;
    let kind = raw_type
        .as_str()
        .and_then(MediaKind::parse)
        .ok_or_else(|| ValidationError::UnknownFieldType {
            found: render_discriminator(raw_type),
            valid: MediaKind::ALL
                .iter()
                .map(|kind| kind.as_str().to_string())
                .collect(),
            element_type: element_type.to_string(),
        })?;

    match kind {
        MediaKind::Video => {
            require_string(item, "url", kind.as_str(), element_type)?;
        }
    }

    Ok(kind)
}

fn validate_select_source(
    field: &Map<String, Value>,
    name: &str,
    element_type: &str,
) -> Result<(), ValidationError> {
    match (field.get("options"), field.get("uri")) {
        (Some(options), None) => validate_options(options, name, element_type),
        (None, Some(uri)) if uri.is_string() => Ok(()),
        (None, Some(_)) => Err(ValidationError::InvalidFieldProperty {
            property: "uri".to_string(),
            expected: "a string".to_string(),
            field_type: FieldKind::Select.as_str().to_string(),
            element_type: element_type.to_string(),
        }),
        _ => Err(ValidationError::SelectSource {
            name: name.to_string(),
            element_type: element_type.to_string(),
        }),
    }
}

fn validate_options(options: &Value, name: &str, element_type: &str) -> Result<(), ValidationError> {
    let options = options
        .as_array()
        .ok_or_else(|| ValidationError::InvalidFieldProperty {
            property: "options".to_string(),
            expected: "an array of [value, label] pairs".to_string(),
            field_type: FieldKind::Select.as_str().to_string(),
            element_type: element_type.to_string(),
        })?;

    for (index, option) in options.iter().enumerate() {
        let is_pair = option.as_array().is_some_and(|pair| {
            pair.len() == 2 && pair.iter().all(Value::is_string)
        });
        if !is_pair {
            return Err(ValidationError::InvalidSelectOption {
                name: name.to_string(),
                index,
                element_type: element_type.to_string(),
            });
        }
    }

    Ok(())
}

fn require_string<'a>(
    object: &'a Map<String, Value>,
    property: &str,
    field_type: &str,
    element_type: &str,
) -> Result<&'a str, ValidationError> {
    let value = object
        .get(property)
        .ok_or_else(|| ValidationError::MissingFieldProperty {
            property: property.to_string(),
            field_type: field_type.to_string(),
            element_type: element_type.to_string(),
        })?;
    value
        .as_str()
        .ok_or_else(|| ValidationError::InvalidFieldProperty {
            property: property.to_string(),
            expected: "a string".to_string(),
            field_type: field_type.to_string(),
            element_type: element_type.to_string(),
        })
}

/// Strings render bare; anything else renders as JSON.
pub(crate) fn render_discriminator(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn check(field: Value) -> Result<FieldKind, ValidationError> {
        validate_field(field.as_object().unwrap(), "issue-link")
    }

    #[test]
    fn test_text_field_needs_only_name_and_label() {
        let kind = check(json!({"type": "text", "name": "title", "label": "Title"})).unwrap();
        assert_eq!(kind, FieldKind::Text);
    }

    #[test]
    fn test_unknown_field_type_is_named() {
        let err = check(json!({"type": "checkbox", "name": "x", "label": "X"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unrecognized field type 'checkbox' in element of type 'issue-link'. \
             Type must be one of the following: ['select', 'text']"
        );
    }

    #[test]
    fn test_missing_field_type() {
        let err = check(json!({"name": "x", "label": "X"})).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFieldType {
                element_type: "issue-link".to_string()
            }
        );
    }

    #[test]
    fn test_missing_label() {
        let err = check(json!({"type": "text", "name": "title"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'label' is a required property for field of type 'text' in element of type 'issue-link'"
        );
    }

    #[test]
    fn test_name_must_be_string() {
        let err = check(json!({"type": "text", "name": 3, "label": "Title"})).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFieldProperty { ref property, .. } if property == "name"
        ));
    }

    #[test]
    fn test_select_with_options() {
        let field = json!({
            "type": "select",
            "name": "points",
            "label": "Points",
            "options": [["1", "1"], ["2", "2"]],
        });
        assert_eq!(check(field).unwrap(), FieldKind::Select);
    }

    #[test]
    fn test_select_with_both_sources_fails() {
        let field = json!({
            "type": "select",
            "name": "points",
            "label": "Points",
            "uri": "/points",
            "options": [["1", "1"]],
        });
        assert_eq!(
            check(field).unwrap_err(),
            ValidationError::SelectSource {
                name: "points".to_string(),
                element_type: "issue-link".to_string(),
            }
        );
    }

    #[test]
    fn test_select_without_source_fails() {
        let field = json!({"type": "select", "name": "points", "label": "Points"});
        assert!(matches!(
            check(field).unwrap_err(),
            ValidationError::SelectSource { .. }
        ));
    }

    #[test]
    fn test_select_option_must_be_string_pair() {
        let field = json!({
            "type": "select",
            "name": "points",
            "label": "Points",
            "options": [["1", "1"], ["2"]],
        });
        let err = check(field).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Option 1 of field 'points' should be a [value, label] pair of strings in element of type 'issue-link'"
        );
    }

    #[test]
    fn test_select_option_members_must_be_strings() {
        let field = json!({
            "type": "select",
            "name": "points",
            "label": "Points",
            "options": [[1, "a"]],
        });
        assert_eq!(
            check(field).unwrap_err(),
            ValidationError::InvalidSelectOption {
                name: "points".to_string(),
                index: 0,
                element_type: "issue-link".to_string(),
            }
        );
    }

    #[test]
    fn test_select_uri_must_be_string() {
        let field = json!({"type": "select", "name": "assignee", "label": "Assignee", "uri": 5});
        assert!(matches!(
            check(field).unwrap_err(),
            ValidationError::InvalidFieldProperty { ref property, ref field_type, .. }
                if property == "uri" && field_type == "select"
        ));
    }

    #[test]
    fn test_fields_stop_at_first_invalid_member() {
        let fields = vec![
            json!({"type": "text", "name": "a", "label": "A"}),
            json!({"type": "bogus"}),
            json!("not an object"),
        ];
        let err = validate_fields("required_fields", &fields, "issue-link").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownFieldType { .. }));
    }

    #[test]
    fn test_non_object_field_member() {
        let fields = vec![json!(["text"])];
        let err = validate_fields("optional_fields", &fields, "issue-link").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Each field in 'optional_fields' should be an object for element of type 'issue-link'"
        );
    }

    #[test]
    fn test_video_needs_url() {
        let ok = json!({"type": "video", "url": "/sentry/issues/video"});
        assert_eq!(
            validate_media_item(ok.as_object().unwrap(), "issue-media").unwrap(),
            MediaKind::Video
        );

        let missing = json!({"type": "video"});
        let err = validate_media_item(missing.as_object().unwrap(), "issue-media").unwrap_err();
        assert_eq!(
            err.to_string(),
            "'url' is a required property for field of type 'video' in element of type 'issue-media'"
        );
    }

    #[test]
    fn test_video_url_must_be_string() {
        let item = json!({"type": "video", "url": 5});
        let err = validate_media_item(item.as_object().unwrap(), "issue-media").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFieldProperty { ref property, ref field_type, .. }
                if property == "url" && field_type == "video"
        ));
    }

    #[test]
    fn test_non_string_discriminator_renders_as_json() {
        let err = check(json!({"type": 7, "name": "x", "label": "X"})).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownFieldType { ref found, .. } if found == "7"
        ));
    }
}
