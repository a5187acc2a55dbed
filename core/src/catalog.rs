//! Static catalog of element types and their structural rules.
//!
//! Each [`CatalogEntry`] maps an element discriminator to an [`ObjectRule`]
//! describing its required and optional keys. Rules nest: a key may hold
//! another object rule, a field-descriptor sequence, or a scalar.
//!
//! The catalog is built once on first use and never mutated afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use crate::ValidationError;
use crate::features::{ALERT_RULE_UI_COMPONENT, FeatureSet};

/// Known top-level element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    IssueLink,
    IssueMedia,
    StacktraceLink,
    AlertRuleAction,
}

impl ElementType {
    pub const ALL: [ElementType; 4] = [
        Self::IssueLink,
        Self::IssueMedia,
        Self::StacktraceLink,
        Self::AlertRuleAction,
    ];

    /// Returns the discriminator string used in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IssueLink => "issue-link",
            Self::IssueMedia => "issue-media",
            Self::StacktraceLink => "stacktrace-link",
            Self::AlertRuleAction => "alert-rule-action",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected shape of a value held under a key.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Any string.
    String,
    /// A string equal to the given literal.
    Constant(&'static str),
    /// A nested object validated by its own rule.
    Object(&'static ObjectRule),
    /// A sequence of field descriptors (`text` / `select`).
    Fields,
    /// A sequence holding exactly one media item (`video`).
    Media,
}

impl Shape {
    /// Phrase used in wrong-shape messages, e.g. "an object".
    pub fn describe(self) -> String {
        match self {
            Self::String => "a string".to_string(),
            Self::Constant(literal) => format!("'{literal}'"),
            Self::Object(_) => "an object".to_string(),
            Self::Fields => "an array of objects".to_string(),
            Self::Media => "an array containing exactly one object".to_string(),
        }
    }
}

/// A key together with the shape its value must have.
#[derive(Debug, Clone, Copy)]
pub struct Property {
    pub key: &'static str,
    pub shape: Shape,
}

impl Property {
    pub const fn new(key: &'static str, shape: Shape) -> Self {
        Self { key, shape }
    }
}

/// Structural rule for one object: keys checked in declaration order.
#[derive(Debug)]
pub struct ObjectRule {
    pub required: &'static [Property],
    pub optional: &'static [Property],
}

/// One element type known to the catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub element_type: ElementType,
    pub rule: &'static ObjectRule,
    /// Flag that must be active for the type to be accepted at all.
    pub feature: Option<&'static str>,
    /// Whether the type may occur more than once per document.
    pub multiple: bool,
}

impl CatalogEntry {
    pub fn name(&self) -> &'static str {
        self.element_type.as_str()
    }

    /// Returns `true` when the entry is ungated or its flag is active.
    pub fn is_enabled(&self, features: &FeatureSet) -> bool {
        self.feature.is_none_or(|flag| features.is_active(flag))
    }
}

static ISSUE_LINK_FORM: ObjectRule = ObjectRule {
    required: &[
        Property::new("uri", Shape::String),
        Property::new("required_fields", Shape::Fields),
    ],
    optional: &[Property::new("optional_fields", Shape::Fields)],
};

static ISSUE_LINK: ObjectRule = ObjectRule {
    required: &[
        Property::new("link", Shape::Object(&ISSUE_LINK_FORM)),
        Property::new("create", Shape::Object(&ISSUE_LINK_FORM)),
    ],
    optional: &[],
};

static ISSUE_MEDIA: ObjectRule = ObjectRule {
    required: &[
        Property::new("title", Shape::String),
        Property::new("elements", Shape::Media),
    ],
    optional: &[],
};

static STACKTRACE_LINK: ObjectRule = ObjectRule {
    required: &[Property::new("uri", Shape::String)],
    optional: &[],
};

static ALERT_RULE_SETTINGS: ObjectRule = ObjectRule {
    required: &[
        Property::new("type", Shape::Constant("alert-rule-settings")),
        Property::new("uri", Shape::String),
        Property::new("required_fields", Shape::Fields),
    ],
    optional: &[Property::new("optional_fields", Shape::Fields)],
};

static ALERT_RULE_ACTION: ObjectRule = ObjectRule {
    required: &[
        Property::new("title", Shape::String),
        Property::new("settings", Shape::Object(&ALERT_RULE_SETTINGS)),
    ],
    optional: &[],
};

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::builtin);

/// Returns the process-wide element catalog.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Lookup table from discriminator string to [`CatalogEntry`].
#[derive(Debug)]
pub struct Catalog {
    entries: BTreeMap<&'static str, CatalogEntry>,
}

impl Catalog {
    fn builtin() -> Self {
        let entries = [
            CatalogEntry {
                element_type: ElementType::IssueLink,
                rule: &ISSUE_LINK,
                feature: None,
                multiple: false,
            },
            CatalogEntry {
                element_type: ElementType::IssueMedia,
                rule: &ISSUE_MEDIA,
                feature: None,
                multiple: false,
            },
            CatalogEntry {
                element_type: ElementType::StacktraceLink,
                rule: &STACKTRACE_LINK,
                feature: None,
                multiple: false,
            },
            CatalogEntry {
                element_type: ElementType::AlertRuleAction,
                rule: &ALERT_RULE_ACTION,
                feature: Some(ALERT_RULE_UI_COMPONENT),
                multiple: false,
            },
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.name(), entry))
                .collect(),
        }
    }

    /// Returns the entry for `name` regardless of feature gating.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Resolves `name` to an entry enabled under `features`.
    ///
    /// A gated type whose flag is inactive is reported exactly like an
    /// unknown type, only the error kind differs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownElementType`] or
    /// [`ValidationError::FeatureDisabled`] listing the enabled types.
    ///
    /// # Examples
    ///
    /// ```
    /// use ui_schema_core::{FeatureSet, catalog};
    ///
    /// let features = FeatureSet::new();
    /// assert!(catalog().lookup("stacktrace-link", &features).is_ok());
    ///
    /// let err = catalog().lookup("alert-rule-action", &features).unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Element has type 'alert-rule-action'. Type must be one of the following: \
    ///      ['issue-link', 'issue-media', 'stacktrace-link']"
    /// );
    /// ```
    pub fn lookup(
        &self,
        name: &str,
        features: &FeatureSet,
    ) -> Result<&CatalogEntry, ValidationError> {
        match self.entries.get(name) {
            Some(entry) if entry.is_enabled(features) => Ok(entry),
            Some(entry) => Err(ValidationError::FeatureDisabled {
                found: name.to_string(),
                valid: self.enabled_names(features),
                feature: entry.feature.unwrap_or_default().to_string(),
            }),
            None => Err(ValidationError::UnknownElementType {
                found: name.to_string(),
                valid: self.enabled_names(features),
            }),
        }
    }

    /// Sorted names of the types accepted under `features`.
    pub fn enabled_types(&self, features: &FeatureSet) -> Vec<&'static str> {
        self.entries
            .values()
            .filter(|entry| entry.is_enabled(features))
            .map(CatalogEntry::name)
            .collect()
    }

    /// Iterates every entry, gated or not, sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    fn enabled_names(&self, features: &FeatureSet) -> Vec<String> {
        self.enabled_types(features)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
