//! Schema document discovery and loading.
//!
//! Documents are stored as `.json`, `.yaml` or `.yml` files and are parsed
//! into [`serde_json::Value`] before validation.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

/// On-disk encoding of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Infers the format from a file extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use ui_schema_config::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_path("schema.json"), Some(DocumentFormat::Json));
    /// assert_eq!(DocumentFormat::from_path("schema.yml"), Some(DocumentFormat::Yaml));
    /// assert_eq!(DocumentFormat::from_path("schema.txt"), None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml" | "yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Collects schema document paths from input files and/or directories.
///
/// Directories are scanned one level deep. The result is sorted and free
/// of duplicates.
///
/// # Errors
///
/// Returns [`InvalidInput`](ConfigError::InvalidInput) when no inputs are
/// given, a path does not exist, a file has an unsupported extension, or
/// no documents are found at all.
pub fn collect_document_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if inputs.is_empty() {
        return Err(ConfigError::InvalidInput(
            "No document paths were provided".to_string(),
        ));
    }

    let mut paths = BTreeSet::new();

    for input in inputs {
        if input.is_dir() {
            for entry in std::fs::read_dir(input)? {
                let path = entry?.path();
                if path.is_file() && DocumentFormat::from_path(&path).is_some() {
                    paths.insert(path);
                }
            }
            continue;
        }

        if input.is_file() {
            if DocumentFormat::from_path(input).is_none() {
                return Err(ConfigError::InvalidInput(format!(
                    "Document '{}' must end in .json, .yaml or .yml",
                    input.display()
                )));
            }
            paths.insert(input.clone());
            continue;
        }

        return Err(ConfigError::InvalidInput(format!(
            "Document path '{}' does not exist",
            input.display()
        )));
    }

    if paths.is_empty() {
        warn!(inputs = inputs.len(), "no schema documents found");
        return Err(ConfigError::InvalidInput(
            "No schema documents found in provided paths".to_string(),
        ));
    }

    debug!(count = paths.len(), "collected schema documents");
    Ok(paths.into_iter().collect())
}

/// Reads and parses one document, choosing the format by extension.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a parse error if it
/// is not valid JSON / YAML.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path).unwrap_or(DocumentFormat::Json);
    let raw = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = raw.len(), "read schema document");
    parse_document(&raw, format)
}

/// Parses document text in the given format.
///
/// # Errors
///
/// Returns [`JsonError`](ConfigError::JsonError) or
/// [`YamlError`](ConfigError::YamlError) on malformed input.
///
/// # Examples
///
/// ```
/// use ui_schema_config::{DocumentFormat, parse_document};
///
/// let yaml = "elements:\n  - type: stacktrace-link\n    uri: /sentry/issue\n";
/// let json = r#"{"elements": [{"type": "stacktrace-link", "uri": "/sentry/issue"}]}"#;
/// assert_eq!(
///     parse_document(yaml, DocumentFormat::Yaml).unwrap(),
///     parse_document(json, DocumentFormat::Json).unwrap()
/// );
/// ```
pub fn parse_document(raw: &str, format: DocumentFormat) -> Result<Value> {
    let value = match format {
        DocumentFormat::Json => serde_json::from_str(raw)?,
        DocumentFormat::Yaml => serde_yaml::from_str(raw)?,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_rejects_empty_inputs() {
        assert!(matches!(
            collect_document_paths(&[]),
            Err(ConfigError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_collect_rejects_missing_path() {
        let err = collect_document_paths(&[PathBuf::from("/definitely/not/here.json")])
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_collect_scans_directory_sorted_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.yaml", "notes.txt", "c.yml"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }

        let inputs = vec![dir.path().to_path_buf(), dir.path().join("b.json")];
        let paths = collect_document_paths(&inputs).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.json", "c.yml"]);
    }

    #[test]
    fn test_collect_rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.txt");
        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(
            collect_document_paths(&[path]),
            Err(ConfigError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_document_reports_malformed_json() {
        assert!(matches!(
            parse_document("{", DocumentFormat::Json),
            Err(ConfigError::JsonError(_))
        ));
    }
}
