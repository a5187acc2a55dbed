//! Validation failures and their classification.
//!
//! Every failure carries exactly one human-readable message (the `Display`
//! impl) and can be classified with [`ValidationError::kind`] or the coarser
//! [`ValidationError::category`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single, terminal validation failure.
///
/// Validation is fail-fast: the first violation found is the one reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The document itself is not an object.
    #[error("Schema document should be an object")]
    DocumentNotObject,
    /// The document has no `elements` key.
    #[error("'elements' is a required property")]
    MissingElements,
    /// `elements` is present but is not a sequence of objects.
    #[error("'elements' should be an array of objects")]
    ElementsNotArray,
    /// An element has no `type` discriminator.
    #[error("Each element needs a 'type' field.")]
    MissingElementType,
    /// An element's `type` is not in the catalog.
    #[error(
        "Element has type '{found}'. Type must be one of the following: {}",
        TypeList(.valid)
    )]
    UnknownElementType {
        /// The offending discriminator, rendered as text.
        found: String,
        /// Sorted element types accepted under the current feature set.
        valid: Vec<String>,
    },
    /// An element's `type` is in the catalog but its feature flag is off.
    ///
    /// Renders exactly like [`UnknownElementType`](Self::UnknownElementType)
    /// since disabled types are invisible to the submitter.
    #[error(
        "Element has type '{found}'. Type must be one of the following: {}",
        TypeList(.valid)
    )]
    FeatureDisabled {
        /// The gated element type.
        found: String,
        /// Sorted element types accepted under the current feature set.
        valid: Vec<String>,
        /// Flag that would enable `found`.
        feature: String,
    },
    /// A required key is absent from an element or one of its nested objects.
    #[error("'{property}' is a required property for element of type '{element_type}'")]
    MissingProperty {
        property: String,
        element_type: String,
    },
    /// A key is present but its value has the wrong shape.
    #[error("'{property}' should be {expected} for element of type '{element_type}'")]
    WrongShape {
        property: String,
        expected: String,
        element_type: String,
    },
    /// A member of a field sequence is not an object.
    #[error("Each field in '{property}' should be an object for element of type '{element_type}'")]
    FieldNotObject {
        property: String,
        element_type: String,
    },
    /// A field descriptor has no `type`.
    #[error("Each field needs a 'type' field in element of type '{element_type}'")]
    MissingFieldType { element_type: String },
    /// A field descriptor's `type` is not a known field kind.
    #[error(
        "Unrecognized field type '{found}' in element of type '{element_type}'. Type must be one of the following: {}",
        TypeList(.valid)
    )]
    UnknownFieldType {
        found: String,
        valid: Vec<String>,
        element_type: String,
    },
    /// A field descriptor lacks a key its kind requires.
    #[error(
        "'{property}' is a required property for field of type '{field_type}' in element of type '{element_type}'"
    )]
    MissingFieldProperty {
        property: String,
        field_type: String,
        element_type: String,
    },
    /// A field descriptor key has the wrong shape.
    #[error(
        "'{property}' should be {expected} for field of type '{field_type}' in element of type '{element_type}'"
    )]
    InvalidFieldProperty {
        property: String,
        expected: String,
        field_type: String,
        element_type: String,
    },
    /// A select field defines both `options` and `uri`, or neither.
    #[error(
        "Field '{name}' of type 'select' must define exactly one of 'options' or 'uri' in element of type '{element_type}'"
    )]
    SelectSource { name: String, element_type: String },
    /// A select option is not a `[value, label]` pair of strings.
    #[error(
        "Option {index} of field '{name}' should be a [value, label] pair of strings in element of type '{element_type}'"
    )]
    InvalidSelectOption {
        name: String,
        index: usize,
        element_type: String,
    },
    /// A single-instance element type occurs more than once.
    #[error("Multiple elements of type: {0}")]
    DuplicateElementType(String),
}

impl ValidationError {
    /// Returns the fine-grained failure kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use ui_schema_core::{ErrorKind, ValidationError};
    ///
    /// let err = ValidationError::DuplicateElementType("stacktrace-link".into());
    /// assert_eq!(err.kind(), ErrorKind::DuplicateType);
    /// assert_eq!(err.to_string(), "Multiple elements of type: stacktrace-link");
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingElements | Self::MissingElementType | Self::MissingProperty { .. } => {
                ErrorKind::MissingKey
            }
            Self::DocumentNotObject | Self::ElementsNotArray | Self::WrongShape { .. } => {
                ErrorKind::WrongShape
            }
            Self::UnknownElementType { .. } => ErrorKind::UnknownType,
            Self::FeatureDisabled { .. } => ErrorKind::FeatureDisabled,
            Self::FieldNotObject { .. }
            | Self::MissingFieldType { .. }
            | Self::UnknownFieldType { .. }
            | Self::MissingFieldProperty { .. }
            | Self::InvalidFieldProperty { .. }
            | Self::SelectSource { .. }
            | Self::InvalidSelectOption { .. } => ErrorKind::BadFieldDescriptor,
            Self::DuplicateElementType(_) => ErrorKind::DuplicateType,
        }
    }

    /// Returns the coarse failure category.
    pub fn category(&self) -> ErrorCategory {
        self.kind().category()
    }
}

/// Fine-grained classification of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    MissingKey,
    WrongShape,
    UnknownType,
    FeatureDisabled,
    DuplicateType,
    BadFieldDescriptor,
}

impl ErrorKind {
    /// Returns the kebab-case name used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingKey => "missing-key",
            Self::WrongShape => "wrong-shape",
            Self::UnknownType => "unknown-type",
            Self::FeatureDisabled => "feature-disabled",
            Self::DuplicateType => "duplicate-type",
            Self::BadFieldDescriptor => "bad-field-descriptor",
        }
    }

    /// Maps the kind onto the four-way error taxonomy.
    pub fn category(self) -> ErrorCategory {
        match self {
            Self::MissingKey | Self::WrongShape => ErrorCategory::Structural,
            Self::UnknownType | Self::FeatureDisabled => ErrorCategory::UnknownType,
            Self::BadFieldDescriptor => ErrorCategory::FieldDescriptor,
            Self::DuplicateType => ErrorCategory::DuplicateType,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A required key is missing or has the wrong shape.
    Structural,
    /// The discriminator is unknown or feature-gated off.
    UnknownType,
    /// A field descriptor is malformed.
    FieldDescriptor,
    /// A single-instance element type is repeated.
    DuplicateType,
}

/// Renders names as `['a', 'b']`, the list form submitters are shown.
struct TypeList<'a>(&'a [String]);

impl fmt::Display for TypeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, name) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{name}'")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_lists_valid_types() {
        let err = ValidationError::UnknownElementType {
            found: "other".to_string(),
            valid: vec!["issue-link".to_string(), "stacktrace-link".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Element has type 'other'. Type must be one of the following: ['issue-link', 'stacktrace-link']"
        );
    }

    #[test]
    fn test_feature_disabled_reads_like_unknown_type() {
        let disabled = ValidationError::FeatureDisabled {
            found: "alert-rule-action".to_string(),
            valid: vec!["issue-link".to_string()],
            feature: "organizations:alert-rule-ui-component".to_string(),
        };
        let unknown = ValidationError::UnknownElementType {
            found: "alert-rule-action".to_string(),
            valid: vec!["issue-link".to_string()],
        };
        assert_eq!(disabled.to_string(), unknown.to_string());
        assert_eq!(disabled.kind(), ErrorKind::FeatureDisabled);
        assert_eq!(disabled.category(), ErrorCategory::UnknownType);
    }

    #[test]
    fn test_empty_type_list_renders_brackets() {
        assert_eq!(TypeList(&[]).to_string(), "[]");
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ErrorKind::BadFieldDescriptor).unwrap();
        assert_eq!(json, "\"bad-field-descriptor\"");
        assert_eq!(ErrorKind::BadFieldDescriptor.as_str(), "bad-field-descriptor");
    }
}
