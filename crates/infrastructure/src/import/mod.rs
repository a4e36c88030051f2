//! Import Module
//!
//! Converts third-party collection formats into the canonical tree. Input
//! text is sniffed by [`detect_format`] and handed to exactly one format
//! mapper; the result is a brand-new [`Collection`] plus any field-level
//! warnings. A single cURL command is handled separately by
//! [`import_from_curl`] and yields a lone [`Request`](arbor_domain::Request).

mod common;
mod config;
mod curl;
mod detect;
mod error;
mod warning;

pub mod har;
pub mod insomnia;
pub mod postman;
pub mod swagger;

use arbor_domain::Collection;
use serde::Serialize;
use serde_json::Value;

pub use config::ImportConfig;
pub use curl::import_from_curl;
pub use detect::{ImportFormat, detect_format, detect_structure};
pub use error::ImportError;
pub use warning::{ImportWarning, WarningSeverity, WarningStats, Warnings};

/// A successfully imported collection.
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// The new collection, paths already stamped
    pub collection: Collection,
    /// Format the input was recognized as
    pub format: ImportFormat,
    /// Degraded fields and skipped items, in source order
    pub warnings: Vec<ImportWarning>,
}

impl ImportResult {
    /// Counts the warnings by severity.
    #[must_use]
    pub fn stats(&self) -> WarningStats {
        WarningStats::from_warnings(&self.warnings)
    }
}

/// Summary of what an import would produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPreview {
    /// Detected format
    pub format: ImportFormat,
    /// Name the collection will get
    pub collection_name: String,
    /// Number of requests to be imported
    pub request_count: usize,
    /// Number of folders to be imported
    pub folder_count: usize,
    /// Warnings generated while mapping
    pub warnings: Vec<ImportWarning>,
}

/// Detects and imports collection files.
#[derive(Debug, Clone, Default)]
pub struct CollectionImporter {
    config: ImportConfig,
}

impl CollectionImporter {
    /// Creates an importer with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an importer with custom limits.
    #[must_use]
    pub const fn with_config(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Imports `content`, using `file_name` only as a YAML hint.
    ///
    /// # Errors
    ///
    /// Fails when the input is empty or too large, cannot be parsed, matches
    /// no known format, does not fit the detected format's schema, or maps
    /// to more items than allowed. No partial collection is ever returned.
    pub fn import_file(&self, content: &str, file_name: &str) -> Result<ImportResult, ImportError> {
        if content.len() > self.config.max_file_size {
            return Err(ImportError::FileTooLarge {
                size: content.len(),
                max: self.config.max_file_size,
            });
        }
        if content.trim().is_empty() {
            return Err(ImportError::Empty);
        }

        let (value, format) = parse_document(content, file_name)?;
        let result = match format {
            ImportFormat::Postman => postman::import(value, &self.config)?,
            ImportFormat::Insomnia => insomnia::import(value)?,
            ImportFormat::Swagger => swagger::import(value)?,
            ImportFormat::Har => har::import(value)?,
            ImportFormat::Yaml | ImportFormat::Unknown => {
                return Err(ImportError::UnrecognizedFormat);
            }
        };

        let count = result.collection.request_count() + result.collection.folder_count();
        if count > self.config.max_items {
            return Err(ImportError::TooManyItems {
                count,
                max: self.config.max_items,
            });
        }

        let stats = result.stats();
        tracing::info!(
            format = %result.format,
            collection = %result.collection.name,
            requests = result.collection.request_count(),
            folders = result.collection.folder_count(),
            warnings = stats.total(),
            errors = stats.error_count,
            "Imported collection"
        );
        Ok(result)
    }

    /// Maps `content` without keeping the collection.
    ///
    /// # Errors
    ///
    /// Same as [`import_file`](Self::import_file).
    pub fn preview(&self, content: &str, file_name: &str) -> Result<ImportPreview, ImportError> {
        let result = self.import_file(content, file_name)?;
        Ok(ImportPreview {
            format: result.format,
            request_count: result.collection.request_count(),
            folder_count: result.collection.folder_count(),
            collection_name: result.collection.name,
            warnings: result.warnings,
        })
    }
}

/// Parses JSON, falling back to YAML for `.yaml`/`.yml` names, and resolves
/// the structural format.
fn parse_document(content: &str, file_name: &str) -> Result<(Value, ImportFormat), ImportError> {
    match serde_json::from_str::<Value>(content) {
        Ok(value) => {
            let format = detect_format(Some(&value), file_name);
            Ok((value, format))
        }
        Err(json_error) => {
            if detect_format(None, file_name) != ImportFormat::Yaml {
                return Err(ImportError::InvalidJson(json_error.to_string()));
            }
            let value: Value = serde_yaml::from_str(content)
                .map_err(|e| ImportError::InvalidYaml(e.to_string()))?;
            let format = detect_structure(&value).ok_or(ImportError::UnrecognizedFormat)?;
            Ok((value, format))
        }
    }
}

/// Imports a collection file with default limits.
///
/// # Errors
///
/// See [`CollectionImporter::import_file`].
pub fn import_from_file(content: &str, file_name: &str) -> Result<ImportResult, ImportError> {
    CollectionImporter::new().import_file(content, file_name)
}
