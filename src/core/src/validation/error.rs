//! Validation verdict and error types.
//!
//! A [`FieldVerdict`] is what one run of a field's rule produces: a validity
//! flag and the messages shown next to the field. [`ValidationErrors`] gathers
//! the failing verdicts of a whole form, keyed by field id.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════════
// Validation Error Types
// ═══════════════════════════════════════════════════════════════════════════════

/// The kind of validation failure that occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Value does not match the field's pattern.
    Pattern,
    /// Required value is empty.
    MissingValue,
    /// Date is later than today.
    FutureDate,
    /// Date is further back than the allowed age span.
    TooOld,
    /// Value is not a `YYYY-MM-DD` date.
    InvalidDate,
    /// Password shorter than the minimum length.
    TooShort { min: usize },
    /// Password has no lowercase letter.
    MissingLowercase,
    /// Password has no uppercase letter.
    MissingUppercase,
    /// Password has no digit.
    MissingDigit,
    /// Password has no character from the special set.
    MissingSpecial,
    /// Password contains a double quote.
    DoubleQuote,
    /// Password contains the user id.
    ContainsUserId,
    /// Confirmation does not equal the password.
    Mismatch,
    /// Required control left blank (aggregate gate only).
    Required,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern => write!(f, "Invalid format"),
            Self::MissingValue => write!(f, "Value is required"),
            Self::FutureDate => write!(f, "Date cannot be in the future"),
            Self::TooOld => write!(f, "Date too far in the past"),
            Self::InvalidDate => write!(f, "Invalid date"),
            Self::TooShort { min } => write!(f, "• Min {} chars", min),
            Self::MissingLowercase => write!(f, "• Missing lowercase"),
            Self::MissingUppercase => write!(f, "• Missing uppercase"),
            Self::MissingDigit => write!(f, "• Missing number"),
            Self::MissingSpecial => write!(f, "• Missing special char"),
            Self::DoubleQuote => write!(f, "• No double quotes"),
            Self::ContainsUserId => write!(f, "• Cannot contain UserID"),
            Self::Mismatch => write!(f, "Passwords do not match"),
            Self::Required => write!(f, "This field is required"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Field Error
// ═══════════════════════════════════════════════════════════════════════════════

/// A single validation failure for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The kind of validation error.
    pub kind: ValidationErrorKind,
    /// Human-readable error message.
    pub message: String,
}

impl FieldError {
    /// Create a new field error with the kind's default message.
    pub fn new(kind: ValidationErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    /// Create a new field error with a custom message.
    pub fn with_message(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Field Verdict
// ═══════════════════════════════════════════════════════════════════════════════

/// Outcome of validating one field. Each new verdict replaces the last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVerdict {
    errors: Vec<FieldError>,
}

impl FieldVerdict {
    /// A passing verdict.
    pub fn valid() -> Self {
        Self::default()
    }

    /// A verdict carrying the given failures (valid if empty).
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// A verdict with a single failure.
    pub fn fail(error: FieldError) -> Self {
        Self { errors: vec![error] }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Check whether any failure has the given kind.
    pub fn has(&self, kind: &ValidationErrorKind) -> bool {
        self.errors.iter().any(|e| &e.kind == kind)
    }

    /// Text written to the field's error display: one message per line.
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Validation Errors Collection
// ═══════════════════════════════════════════════════════════════════════════════

/// Failures across a whole form, ordered by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    #[serde(flatten)]
    errors: BTreeMap<String, Vec<FieldError>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the total number of errors across all fields.
    pub fn error_count(&self) -> usize {
        self.errors.values().map(|v| v.len()).sum()
    }

    /// Get the number of fields with errors.
    pub fn field_count(&self) -> usize {
        self.errors.len()
    }

    /// Add an error for a specific field.
    pub fn add(&mut self, field: impl Into<String>, error: FieldError) {
        self.errors.entry(field.into()).or_default().push(error);
    }

    /// Add every failure of a verdict under the field id.
    pub fn add_verdict(&mut self, field: impl Into<String>, verdict: FieldVerdict) {
        if verdict.is_valid() {
            return;
        }
        self.errors
            .entry(field.into())
            .or_default()
            .extend(verdict.into_errors());
    }

    /// Add a required field error.
    pub fn add_required(&mut self, field: impl Into<String>) {
        self.add(field, FieldError::new(ValidationErrorKind::Required));
    }

    pub fn get(&self, field: &str) -> Option<&Vec<FieldError>> {
        self.errors.get(field)
    }

    pub fn has_errors(&self, field: &str) -> bool {
        self.errors.get(field).map(|v| !v.is_empty()).unwrap_or(false)
    }

    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.errors.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<FieldError>)> {
        self.errors.iter()
    }

    /// Convert to a flat list of error messages with field prefixes.
    pub fn to_flat_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| format!("{}: {}", field, e.message))
            })
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_flat_messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Result type for form-level validation.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_message_joins_lines() {
        let verdict = FieldVerdict::from_errors(vec![
            FieldError::new(ValidationErrorKind::TooShort { min: 8 }),
            FieldError::new(ValidationErrorKind::MissingDigit),
        ]);
        assert!(!verdict.is_valid());
        assert_eq!(verdict.message(), "• Min 8 chars\n• Missing number");
    }

    #[test]
    fn test_valid_verdict_has_empty_message() {
        let verdict = FieldVerdict::valid();
        assert!(verdict.is_valid());
        assert_eq!(verdict.message(), "");
    }

    #[test]
    fn test_errors_collection_ordering() {
        let mut errors = ValidationErrors::new();
        errors.add_required("zip");
        errors.add_verdict(
            "email",
            FieldVerdict::fail(FieldError::with_message(ValidationErrorKind::Pattern, "Invalid email")),
        );
        errors.add_verdict("city", FieldVerdict::valid());

        assert_eq!(errors.field_count(), 2);
        assert!(!errors.has_errors("city"));
        assert_eq!(
            errors.to_flat_messages(),
            vec!["email: Invalid email", "zip: This field is required"]
        );
    }
}
