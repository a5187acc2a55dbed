//! Per-element validation.
//!
//! Resolves an element's discriminator in the [`Catalog`](crate::Catalog)
//! and walks the resolved [`ObjectRule`] depth-first, recursing into nested
//! objects and field sequences. The first violation is returned.

use serde_json::{Map, Value};

use crate::ValidationError;
use crate::catalog::{CatalogEntry, ObjectRule, Property, Shape, catalog};
use crate::features::FeatureSet;
use crate::field::{render_discriminator, validate_fields, validate_media_item};

/// Validates one element and returns the catalog entry it resolved to.
///
/// # Errors
///
/// Returns [`ValidationError::MissingElementType`] when `type` is absent,
/// an unknown-type error when the type is not enabled under `features`, or
/// the first structural / field-descriptor violation found in the element.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use ui_schema_core::{FeatureSet, validate_element};
///
/// let element = json!({"type": "stacktrace-link"});
/// let err = validate_element(element.as_object().unwrap(), &FeatureSet::new()).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "'uri' is a required property for element of type 'stacktrace-link'"
/// );
/// ```
pub fn validate_element(
    element: &Map<String, Value>,
    features: &FeatureSet,
) -> Result<&'static CatalogEntry, ValidationError> {
    let raw_type = element
        .get("type")
        .ok_or(ValidationError::MissingElementType)?;
    let entry = catalog().lookup(&render_discriminator(raw_type), features)?;

    validate_object(element, entry.rule, entry.name())?;
    Ok(entry)
}

fn validate_object(
    object: &Map<String, Value>,
    rule: &ObjectRule,
    element_type: &str,
) -> Result<(), ValidationError> {
    for property in rule.required {
        let value = object
            .get(property.key)
            .ok_or_else(|| ValidationError::MissingProperty {
                property: property.key.to_string(),
                element_type: element_type.to_string(),
            })?;
        validate_property(property, value, element_type)?;
    }

    for property in rule.optional {
        if let Some(value) = object.get(property.key) {
            validate_property(property, value, element_type)?;
        }
    }

    Ok(())
}

fn validate_property(
    property: &Property,
    value: &Value,
    element_type: &str,
) -> Result<(), ValidationError> {
    let wrong_shape = || ValidationError::WrongShape {
        property: property.key.to_string(),
        expected: property.shape.describe(),
        element_type: element_type.to_string(),
    };

    match property.shape {
        Shape::String => {
            if !value.is_string() {
                return Err(wrong_shape());
            }
        }
        Shape::Constant(literal) => {
            if value.as_str() != Some(literal) {
                return Err(wrong_shape());
            }
        }
        Shape::Object(rule) => {
            let nested = value.as_object().ok_or_else(wrong_shape)?;
            validate_object(nested, rule, element_type)?;
        }
        Shape::Fields => {
            let fields = value.as_array().ok_or_else(wrong_shape)?;
            validate_fields(property.key, fields, element_type)?;
        }
        Shape::Media => {
            let item = match value.as_array().map(Vec::as_slice) {
                Some([item]) => item.as_object().ok_or_else(wrong_shape)?,
                _ => return Err(wrong_shape()),
            };
            validate_media_item(item, element_type)?;
        }
    }

    Ok(())
}
