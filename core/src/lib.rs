//! Structural validation for integration UI component schemas.
//!
//! A schema document is a JSON object whose `elements` sequence describes
//! UI components contributed by an integration. This crate judges whether
//! such a document is structurally acceptable:
//!
//! - [`Catalog`] - the static table of element types ([`ElementType`]) and
//!   their nested [`ObjectRule`]s, some gated by a feature flag.
//! - [`validate_field`] / [`validate_media_item`] - field descriptor rules.
//! - [`validate_element`] - resolves one element and walks its rule.
//! - [`enforce_unique`] - rejects repeated single-instance types.
//! - [`validate_document`] - the entry point tying the above together.
//!
//! Validation is pure and fail-fast: each call returns the first violation
//! as a [`ValidationError`], classified by [`ErrorKind`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use ui_schema_core::*;
//!
//! let document = json!({
//!     "elements": [
//!         {
//!             "type": "issue-media",
//!             "title": "Feature Demo",
//!             "elements": [{"type": "video", "url": "/sentry/issues/video"}]
//!         },
//!         {"type": "stacktrace-link", "uri": "/sentry/issue"}
//!     ]
//! });
//! assert!(validate_document(&document, &FeatureSet::new()).is_ok());
//!
//! let duplicate = json!({
//!     "elements": [
//!         {"type": "stacktrace-link", "uri": "/a"},
//!         {"type": "stacktrace-link", "uri": "/b"}
//!     ]
//! });
//! let err = validate(&duplicate).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DuplicateType);
//! ```

mod catalog;
mod element;
mod error;
mod features;
mod field;
mod unique;
mod validate;

pub use catalog::{Catalog, CatalogEntry, ElementType, ObjectRule, Property, Shape, catalog};
pub use element::validate_element;
pub use error::{ErrorCategory, ErrorKind, ValidationError};
pub use features::{ALERT_RULE_UI_COMPONENT, FeatureSet};
pub use field::{FieldKind, MediaKind, validate_field, validate_fields, validate_media_item};
pub use unique::enforce_unique;
pub use validate::{validate, validate_document};
