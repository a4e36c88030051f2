//! Import warnings
//!
//! Field-level problems never abort an import. They degrade to a safe
//! default and are reported here instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Warning severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    /// Something was reshaped or skipped, nothing was lost
    Info,
    /// A value was replaced by a default
    Warning,
    /// An item was dropped
    Error,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One degraded field or skipped item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportWarning {
    /// Location in the source document, e.g. `"Users/Login"`
    pub path: String,
    /// What happened
    pub message: String,
    /// Severity level
    pub severity: WarningSeverity,
}

impl ImportWarning {
    /// Creates a new warning.
    pub fn new(
        path: impl Into<String>,
        message: impl Into<String>,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity,
        }
    }

    /// Creates an info-level warning.
    pub fn info(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, message, WarningSeverity::Info)
    }

    /// Creates a warning-level warning.
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, message, WarningSeverity::Warning)
    }

    /// Creates an error-level warning.
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, message, WarningSeverity::Error)
    }

    /// Returns true for error-level warnings.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, WarningSeverity::Error)
    }
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.path, self.message)
    }
}

/// Warning collector shared by the format mappers.
///
/// Every pushed warning is also emitted as a `debug` event.
#[derive(Debug, Default)]
pub struct Warnings(Vec<ImportWarning>);

impl Warnings {
    /// Creates an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Records a warning.
    pub fn push(&mut self, warning: ImportWarning) {
        tracing::debug!(
            path = %warning.path,
            severity = %warning.severity,
            "{}",
            warning.message
        );
        self.0.push(warning);
    }

    /// Returns the number of recorded warnings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the recorded warnings.
    #[must_use]
    pub fn into_vec(self) -> Vec<ImportWarning> {
        self.0
    }
}

/// Aggregate counts by severity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WarningStats {
    /// Count of informational warnings
    pub info_count: usize,
    /// Count of warning-level warnings
    pub warning_count: usize,
    /// Count of error-level warnings
    pub error_count: usize,
}

impl WarningStats {
    /// Counts warnings by severity.
    #[must_use]
    pub fn from_warnings(warnings: &[ImportWarning]) -> Self {
        let mut stats = Self::default();
        for w in warnings {
            match w.severity {
                WarningSeverity::Info => stats.info_count += 1,
                WarningSeverity::Warning => stats.warning_count += 1,
                WarningSeverity::Error => stats.error_count += 1,
            }
        }
        stats
    }

    /// Total count of all warnings
    #[must_use]
    pub const fn total(&self) -> usize {
        self.info_count + self.warning_count + self.error_count
    }

    /// Returns true if any item was dropped.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_warning_display() {
        let warning = ImportWarning::warning("Users/Login", "bad base64 credentials");
        assert_eq!(
            warning.to_string(),
            "[warning] Users/Login: bad base64 credentials"
        );
    }

    #[test]
    fn test_collector_keeps_order() {
        let mut warnings = Warnings::new();
        warnings.push(ImportWarning::info("a", "first"));
        warnings.push(ImportWarning::error("b", "second"));
        assert_eq!(warnings.len(), 2);

        let warnings = warnings.into_vec();
        assert_eq!(warnings[0].message, "first");
        assert!(warnings[1].is_error());
    }

    #[test]
    fn test_warning_stats() {
        let warnings = vec![
            ImportWarning::info("a", "info"),
            ImportWarning::warning("b", "warn"),
            ImportWarning::warning("c", "warn"),
            ImportWarning::error("d", "err"),
        ];

        let stats = WarningStats::from_warnings(&warnings);
        assert_eq!(
            stats,
            WarningStats {
                info_count: 1,
                warning_count: 2,
                error_count: 1,
            }
        );
        assert_eq!(stats.total(), 4);
        assert!(stats.has_errors());
    }
}
