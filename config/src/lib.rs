//! Configuration, document loading and reporting for UI schema validation.
//!
//! This crate wraps the pure validator in `ui-schema-core` with the file
//! handling a caller needs: a [`FeatureConfig`] holding the active feature
//! flags, helpers to find and parse schema documents, and per-document
//! [`FileReport`]s.
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use ui_schema_config::{FeatureConfig, collect_document_paths, validate_files};
//!
//! let config = FeatureConfig::load("features.yml").unwrap();
//! let paths = collect_document_paths(&[PathBuf::from("schemas/")]).unwrap();
//! let summary = validate_files(&paths, &config.features);
//! for report in &summary.reports {
//!     println!("{}: {}", report.path.display(), report.accepted);
//! }
//! ```

mod config;
mod error;
mod loader;
mod report;

pub use config::{CONFIG_VERSION, FeatureConfig, parse_feature_override};
pub use error::{ConfigError, Result};
pub use loader::{DocumentFormat, collect_document_paths, load_document, parse_document};
pub use report::{FailureCode, FileReport, ValidationSummary, validate_files};
