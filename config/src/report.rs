//! Per-document validation reports.

use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, info};
use ui_schema_core::{ErrorKind, FeatureSet, validate_document};

use crate::loader::load_document;

/// Why a document was not accepted.
///
/// Serializes flat: `unreadable` or the validation [`ErrorKind`] itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCode {
    /// The file could not be read or parsed.
    Unreadable,
    /// The document was parsed but failed validation.
    Invalid(ErrorKind),
}

impl std::fmt::Display for FailureCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable => write!(f, "unreadable"),
            Self::Invalid(kind) => write!(f, "{kind}"),
        }
    }
}

impl Serialize for FailureCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unreadable => serializer.serialize_str("unreadable"),
            Self::Invalid(kind) => kind.serialize(serializer),
        }
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureCode>,
}

impl FileReport {
    /// Validates an already-parsed document and records the outcome.
    pub fn from_document(path: impl Into<PathBuf>, document: &Value, features: &FeatureSet) -> Self {
        let path = path.into();
        match validate_document(document, features) {
            Ok(()) => Self {
                path,
                accepted: true,
                error: None,
                kind: None,
            },
            Err(err) => Self {
                path,
                accepted: false,
                kind: Some(FailureCode::Invalid(err.kind())),
                error: Some(err.to_string()),
            },
        }
    }

    fn unreadable(path: &Path, error: String) -> Self {
        Self {
            path: path.to_path_buf(),
            accepted: false,
            error: Some(error),
            kind: Some(FailureCode::Unreadable),
        }
    }
}

/// Reports for a batch of documents, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub reports: Vec<FileReport>,
}

impl ValidationSummary {
    pub fn accepted(&self) -> usize {
        self.reports.iter().filter(|r| r.accepted).count()
    }

    pub fn rejected(&self) -> usize {
        self.reports.len() - self.accepted()
    }

    /// Returns `true` when every document was accepted.
    pub fn all_accepted(&self) -> bool {
        self.reports.iter().all(|r| r.accepted)
    }
}

/// Loads and validates every path under the same feature set.
///
/// Unreadable files are reported alongside invalid ones rather than
/// aborting the batch.
pub fn validate_files(paths: &[PathBuf], features: &FeatureSet) -> ValidationSummary {
    let mut reports = Vec::with_capacity(paths.len());

    for path in paths {
        let report = match load_document(path) {
            Ok(document) => FileReport::from_document(path.clone(), &document, features),
            Err(err) => FileReport::unreadable(path, err.to_string()),
        };

        match &report.error {
            None => debug!(path = %path.display(), "document accepted"),
            Some(error) => debug!(path = %path.display(), %error, "document rejected"),
        }
        reports.push(report);
    }

    let summary = ValidationSummary { reports };
    info!(
        accepted = summary.accepted(),
        rejected = summary.rejected(),
        "validated schema documents"
    );
    summary
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_report_records_error_kind() {
        let report = FileReport::from_document(
            "inline",
            &json!({"elements": [{"type": "other"}]}),
            &FeatureSet::new(),
        );
        assert!(!report.accepted);
        assert_eq!(report.kind, Some(FailureCode::Invalid(ErrorKind::UnknownType)));
        assert_eq!(report.kind.unwrap().to_string(), "unknown-type");
    }

    #[test]
    fn test_unreadable_files_do_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let broken = dir.path().join("broken.json");
        std::fs::write(
            &good,
            r#"{"elements": [{"type": "stacktrace-link", "uri": "/sentry/issue"}]}"#,
        )
        .unwrap();
        std::fs::write(&broken, "{").unwrap();

        let summary = validate_files(&[broken.clone(), good.clone()], &FeatureSet::new());
        assert_eq!(summary.reports.len(), 2);
        assert_eq!(summary.reports[0].kind, Some(FailureCode::Unreadable));
        assert!(summary.reports[1].accepted);
        assert_eq!(summary.accepted(), 1);
        assert_eq!(summary.rejected(), 1);
        assert!(!summary.all_accepted());
    }

    #[test]
    fn test_serialized_report_omits_empty_error() {
        let report = FileReport::from_document(
            "ok.json",
            &json!({"elements": []}),
            &FeatureSet::new(),
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value, json!({"path": "ok.json", "accepted": true}));
    }

    #[test]
    fn test_failure_kind_serializes_flat() {
        let invalid = FileReport::from_document(
            "dup.json",
            &json!({"elements": [
                {"type": "stacktrace-link", "uri": "/a"},
                {"type": "stacktrace-link", "uri": "/b"}
            ]}),
            &FeatureSet::new(),
        );
        let value = serde_json::to_value(&invalid).unwrap();
        assert_eq!(value["kind"], "duplicate-type");
        assert!(value.get("code").is_none());

        let yaml = serde_yaml::to_string(&invalid).unwrap();
        assert!(yaml.contains("kind: duplicate-type"), "{yaml}");

        let unreadable = FileReport::unreadable(Path::new("broken.json"), "eof".to_string());
        assert_eq!(serde_json::to_value(&unreadable).unwrap()["kind"], "unreadable");
    }
}
