//! Aggregate validity gate.
//!
//! The gate never keeps state of its own. The controller first re-runs
//! every field's validation, then [`GateReport::inspect`] reads what that
//! left on the page: controls carrying the `invalid` marker and required
//! controls that are still blank.

use crate::host::{FormHost, INVALID_CLASS};
use crate::validation::error::{FieldError, ValidationErrorKind, ValidationErrors};
use serde::Serialize;

/// What blocked (or did not block) the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GateReport {
    /// Controls whose last verdict failed, in document order.
    pub invalid_fields: Vec<String>,
    /// Required controls that are empty or whitespace-only.
    pub missing_required: Vec<String>,
}

impl GateReport {
    /// Read the current markers and required-field state.
    pub fn inspect<H: FormHost + ?Sized>(host: &H) -> Self {
        let invalid_fields = host.elements_with_class(INVALID_CLASS);
        let missing_required = host
            .controls()
            .into_iter()
            .filter(|id| host.is_required(id) && host.trimmed_value(id).is_empty())
            .collect();

        Self {
            invalid_fields,
            missing_required,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.invalid_fields.is_empty() && self.missing_required.is_empty()
    }

    /// Every control that blocks submission, without duplicates.
    pub fn blocking_fields(&self) -> Vec<String> {
        let mut fields = self.invalid_fields.clone();
        for id in &self.missing_required {
            if !fields.contains(id) {
                fields.push(id.clone());
            }
        }
        fields
    }

    /// Convert to field errors, using the text each field currently displays.
    pub fn to_errors<H: FormHost + ?Sized>(&self, host: &H) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for id in &self.invalid_fields {
            let shown = host.text(&crate::host::error_id(id)).unwrap_or_default();
            if shown.is_empty() {
                errors.add(id.as_str(), FieldError::new(ValidationErrorKind::Pattern));
            } else {
                for line in shown.lines() {
                    errors.add(id.as_str(), FieldError::with_message(ValidationErrorKind::Pattern, line));
                }
            }
        }
        for id in &self.missing_required {
            if !errors.has_errors(id) {
                errors.add_required(id.as_str());
            }
        }
        errors
    }
}
