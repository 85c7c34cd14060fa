//! Error handling for the intake form controller.
//!
//! Field-level validation failures are not errors: they are verdicts (see
//! [`crate::validation`]). This module covers everything around them that can
//! actually fail:
//! - configuration loading
//! - store file reads and writes
//! - form snapshot parsing
//! - the state list fetch
//!
//! # Usage
//!
//! ```rust,ignore
//! use intake_core::error::{ErrorCode, ErrorContext, Result};
//!
//! fn read_store(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).with_error_code(ErrorCode::StorageError)
//! }
//! ```

use metrics::counter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// Result Type Alias
// ═══════════════════════════════════════════════════════════════════════════════

/// A specialized Result type for intake operations.
pub type Result<T> = std::result::Result<T, IntakeError>;

// ═══════════════════════════════════════════════════════════════════════════════
// Error Codes
// ═══════════════════════════════════════════════════════════════════════════════

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Form Errors (1000-1099)
    UnknownField,
    InvalidSnapshot,

    // Storage Errors (2000-2099)
    StorageError,
    StoreFileCorrupt,

    // Serialization Errors (2200-2299)
    SerializationError,
    DeserializationError,

    // External Source Errors (3000-3099)
    StateListUnavailable,
    NetworkError,

    // Configuration Errors (5000-5099)
    InvalidConfiguration,

    // Internal Errors (9000-9099)
    InternalError,
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub const fn numeric_code(&self) -> u32 {
        match self {
            Self::UnknownField => 1000,
            Self::InvalidSnapshot => 1001,

            Self::StorageError => 2000,
            Self::StoreFileCorrupt => 2001,

            Self::SerializationError => 2200,
            Self::DeserializationError => 2201,

            Self::StateListUnavailable => 3000,
            Self::NetworkError => 3001,

            Self::InvalidConfiguration => 5001,

            Self::InternalError => 9000,
        }
    }

    /// Check if the failed operation may succeed when tried again.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError | Self::StateListUnavailable)
    }

    /// Get the error category for grouping.
    pub const fn category(&self) -> &'static str {
        match self.numeric_code() {
            1000..=1099 => "form",
            2000..=2099 => "storage",
            2200..=2299 => "serialization",
            3000..=3099 => "external_source",
            5000..=5099 => "configuration",
            9000..=9099 => "internal",
            _ => "unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Error Severity
// ═══════════════════════════════════════════════════════════════════════════════

/// Severity level for errors (affects logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Bad input from the user or a snapshot file
    Low,
    /// Degraded optional features (state list, network)
    Medium,
    /// Broken configuration or storage
    High,
}

impl ErrorSeverity {
    /// Get severity based on error code.
    pub const fn from_code(code: &ErrorCode) -> Self {
        match code {
            ErrorCode::UnknownField | ErrorCode::InvalidSnapshot => Self::Low,

            ErrorCode::StateListUnavailable | ErrorCode::NetworkError => Self::Medium,

            ErrorCode::StorageError
            | ErrorCode::StoreFileCorrupt
            | ErrorCode::SerializationError
            | ErrorCode::DeserializationError
            | ErrorCode::InvalidConfiguration
            | ErrorCode::InternalError => Self::High,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Main Error Type
// ═══════════════════════════════════════════════════════════════════════════════

/// The main error type for the intake crate.
#[derive(Error, Debug)]
pub struct IntakeError {
    /// Machine-readable error code
    code: ErrorCode,

    /// Message safe to show to the person filling the form
    user_message: Cow<'static, str>,

    /// Detailed internal message (for logging only)
    internal_message: Option<String>,

    /// The source error that caused this error
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.user_message)?;
        if let Some(ref internal) = self.internal_message {
            write!(f, " (internal: {})", internal)?;
        }
        Ok(())
    }
}

impl IntakeError {
    // ─────────────────────────────────────────────────────────────────────────
    // Constructors
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a new error with code and user message.
    pub fn new(code: ErrorCode, user_message: impl Into<Cow<'static, str>>) -> Self {
        let error = Self {
            code,
            user_message: user_message.into(),
            internal_message: None,
            source: None,
        };
        error.record_metrics();
        error
    }

    /// Create an error with both user and internal messages.
    pub fn with_internal(
        code: ErrorCode,
        user_message: impl Into<Cow<'static, str>>,
        internal_message: impl Into<String>,
    ) -> Self {
        let mut error = Self::new(code, user_message);
        error.internal_message = Some(internal_message.into());
        error
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_internal(ErrorCode::InternalError, "An internal error occurred", message)
    }

    /// A field id that is not part of the rule table.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(ErrorCode::UnknownField, format!("Unknown form field: {}", field))
    }

    /// A form snapshot that could not be parsed or applied.
    pub fn invalid_snapshot(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSnapshot, message.into())
    }

    /// The state list could not be loaded.
    pub fn state_list(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_internal(
            ErrorCode::StateListUnavailable,
            format!("Could not load the state list from {}", source.into()),
            message,
        )
    }

    /// A configuration value that loaded but cannot be used.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfiguration, message.into())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a source error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the user-facing message.
    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    /// Get the internal message (if any).
    pub fn internal_message(&self) -> Option<&str> {
        self.internal_message.as_deref()
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::from_code(&self.code)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Logging
    // ─────────────────────────────────────────────────────────────────────────

    /// Log this error with appropriate severity.
    pub fn log(&self) {
        let code = self.code.to_string();
        let category = self.code.category();

        match self.severity() {
            ErrorSeverity::High => {
                error!(
                    error_code = %code,
                    category = category,
                    user_message = %self.user_message,
                    internal_message = ?self.internal_message,
                    source = ?self.source,
                    "High severity error"
                );
            }
            ErrorSeverity::Medium => {
                warn!(
                    error_code = %code,
                    category = category,
                    user_message = %self.user_message,
                    internal_message = ?self.internal_message,
                    "Medium severity error"
                );
            }
            ErrorSeverity::Low => {
                tracing::debug!(
                    error_code = %code,
                    category = category,
                    user_message = %self.user_message,
                    "Low severity error"
                );
            }
        }
    }

    fn record_metrics(&self) {
        counter!(
            "intake_errors_total",
            "code" => self.code.to_string(),
            "category" => self.code.category().to_string(),
            "retryable" => self.is_retryable().to_string(),
        )
        .increment(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Error Context Extension Trait
// ═══════════════════════════════════════════════════════════════════════════════

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with error code.
    fn with_error_code(self, code: ErrorCode) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| IntakeError::internal(message.into()).with_source(e))
    }

    fn with_error_code(self, code: ErrorCode) -> Result<T> {
        self.map_err(|e| IntakeError::new(code, e.to_string()).with_source(e))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// From Implementations for Common Error Types
// ═══════════════════════════════════════════════════════════════════════════════

impl From<serde_json::Error> for IntakeError {
    fn from(error: serde_json::Error) -> Self {
        let code = if error.is_syntax() || error.is_data() || error.is_eof() {
            ErrorCode::DeserializationError
        } else {
            ErrorCode::SerializationError
        };

        Self::with_internal(code, "Failed to process JSON data", error.to_string()).with_source(error)
    }
}

impl From<serde_yaml::Error> for IntakeError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::with_internal(
            ErrorCode::DeserializationError,
            "Failed to process YAML data",
            error.to_string(),
        )
        .with_source(error)
    }
}

impl From<toml::de::Error> for IntakeError {
    fn from(error: toml::de::Error) -> Self {
        Self::with_internal(
            ErrorCode::DeserializationError,
            "Failed to process TOML data",
            error.to_string(),
        )
        .with_source(error)
    }
}

impl From<reqwest::Error> for IntakeError {
    fn from(error: reqwest::Error) -> Self {
        let user_msg = if error.is_timeout() {
            "Request timed out"
        } else if error.is_connect() {
            "Failed to connect"
        } else if error.is_status() {
            "Server returned an error status"
        } else {
            "Request failed"
        };

        Self::with_internal(ErrorCode::NetworkError, user_msg, error.to_string()).with_source(error)
    }
}

impl From<std::io::Error> for IntakeError {
    fn from(error: std::io::Error) -> Self {
        Self::with_internal(ErrorCode::StorageError, "An I/O error occurred", error.to_string())
            .with_source(error)
    }
}

impl From<config::ConfigError> for IntakeError {
    fn from(error: config::ConfigError) -> Self {
        Self::with_internal(
            ErrorCode::InvalidConfiguration,
            "Invalid configuration",
            error.to_string(),
        )
        .with_source(error)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_categories() {
        assert_eq!(ErrorCode::UnknownField.category(), "form");
        assert_eq!(ErrorCode::StoreFileCorrupt.category(), "storage");
        assert_eq!(ErrorCode::StateListUnavailable.category(), "external_source");
        assert_eq!(ErrorCode::InvalidConfiguration.category(), "configuration");
    }

    #[test]
    fn test_error_code_is_retryable() {
        assert!(ErrorCode::NetworkError.is_retryable());
        assert!(ErrorCode::StateListUnavailable.is_retryable());
        assert!(!ErrorCode::InvalidSnapshot.is_retryable());
    }

    #[test]
    fn test_unknown_field_message() {
        let error = IntakeError::unknown_field("shoe_size");
        assert_eq!(error.code(), ErrorCode::UnknownField);
        assert_eq!(error.user_message(), "Unknown form field: shoe_size");
        assert_eq!(error.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_display_includes_internal() {
        let error = IntakeError::state_list("states.html", "404 Not Found");
        let text = error.to_string();
        assert!(text.starts_with("[StateListUnavailable]"));
        assert!(text.contains("states.html"));
        assert!(text.contains("404 Not Found"));
    }

    #[test]
    fn test_result_with_error_code_keeps_source() {
        let io: std::result::Result<(), _> =
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"));
        let err = io.with_error_code(ErrorCode::StorageError).unwrap_err();
        assert_eq!(err.code(), ErrorCode::StorageError);
        assert_eq!(err.user_message(), "read-only");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_configuration_is_high_severity() {
        let err = IntakeError::invalid_configuration("cookie_ttl_days out of range");
        assert_eq!(err.code(), ErrorCode::InvalidConfiguration);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: IntakeError = parse.unwrap_err().into();
        assert_eq!(err.code(), ErrorCode::DeserializationError);
    }
}
