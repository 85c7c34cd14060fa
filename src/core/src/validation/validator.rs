//! The field validator: one field in, one verdict out.
//!
//! [`FieldValidator::evaluate`] is pure: it reads the live values it needs
//! from the host and returns the verdict. [`FieldValidator::run`] also
//! shows that verdict on the page: the `invalid` marker on the control and
//! the joined messages in the field's `-error` element.

use crate::fields;
use crate::host::{error_id, FormHost, INVALID_CLASS};
use crate::telemetry::SensitiveFieldRedactor;
use crate::validation::error::{FieldVerdict, ValidationErrors, ValidationResult};
use crate::validation::predicates::{check_confirm_password, check_date_of_birth, check_password};
use crate::validation::rules::{CustomRule, FieldRule, RuleTable, ValidationRule};
use chrono::NaiveDate;
use tracing::debug;

// ═══════════════════════════════════════════════════════════════════════════════
// Field Validator
// ═══════════════════════════════════════════════════════════════════════════════

/// Applies a [`RuleTable`] to the fields of a host as of a given day.
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator<'a> {
    rules: &'a RuleTable,
    today: NaiveDate,
}

impl<'a> FieldValidator<'a> {
    pub fn new(rules: &'a RuleTable, today: NaiveDate) -> Self {
        Self { rules, today }
    }

    pub fn rules(&self) -> &'a RuleTable {
        self.rules
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Compute the verdict for `field`. `None` when the field has no rule.
    ///
    /// Pattern rules see the trimmed value. Password and confirmation see
    /// the raw value; the other field they depend on is read live.
    pub fn evaluate<H: FormHost + ?Sized>(&self, field: &str, host: &H) -> Option<FieldVerdict> {
        let descriptor = self.rules.get(field)?;

        let verdict = match &descriptor.rule {
            FieldRule::Pattern(pattern) => {
                let value = host.trimmed_value(field);
                match pattern.validate(&value) {
                    Some(error) => FieldVerdict::fail(error),
                    None => FieldVerdict::valid(),
                }
            }
            FieldRule::Custom(CustomRule::DateOfBirth(policy)) => {
                let value = host.value(field).unwrap_or_default();
                check_date_of_birth(&value, self.today, policy)
            }
            FieldRule::Custom(CustomRule::Password(policy)) => {
                let value = host.value(field).unwrap_or_default();
                let user_id = host.trimmed_value(fields::USER_ID);
                check_password(&value, &user_id, policy)
            }
            FieldRule::Custom(CustomRule::ConfirmPassword) => {
                let value = host.value(field).unwrap_or_default();
                let password = host.value(fields::PASSWORD).unwrap_or_default();
                check_confirm_password(&value, &password)
            }
        };
        Some(verdict)
    }

    /// Evaluate `field` and reflect the verdict on the page.
    pub fn run<H: FormHost + ?Sized>(&self, field: &str, host: &mut H) -> Option<FieldVerdict> {
        let verdict = self.evaluate(field, &*host)?;

        host.set_text(&error_id(field), &verdict.message());
        host.toggle_class(field, INVALID_CLASS, !verdict.is_valid());

        let outcome = if verdict.is_valid() { "valid" } else { "invalid" };
        metrics::counter!("intake_field_validations_total", "field" => field.to_string(), "outcome" => outcome)
            .increment(1);
        debug!(
            field = %field,
            outcome = outcome,
            errors = verdict.errors().len(),
            value = %SensitiveFieldRedactor::global().redact(field, &host.trimmed_value(field)),
            "Field validated"
        );

        Some(verdict)
    }

    /// Evaluate every field in the table without touching the page.
    pub fn evaluate_all<H: FormHost + ?Sized>(&self, host: &H) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for id in self.rules.ids() {
            if !host.contains(id) {
                continue;
            }
            if let Some(verdict) = self.evaluate(id, host) {
                errors.add_verdict(id, verdict);
            }
        }
        errors
    }

    /// [`evaluate_all`](Self::evaluate_all) as a `Result`.
    pub fn validate<H: FormHost + ?Sized>(&self, host: &H) -> ValidationResult<()> {
        let errors = self.evaluate_all(host);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Element, MemoryDocument};
    use crate::validation::error::ValidationErrorKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn doc() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        for id in ["zip", "userid", "passid", "confirmpass", "dob"] {
            doc.insert(Element::input(id));
            doc.insert(Element::text(error_id(id)));
        }
        doc
    }

    #[test]
    fn test_unknown_field_has_no_verdict() {
        let rules = RuleTable::default();
        let validator = FieldValidator::new(&rules, today());
        assert!(validator.evaluate("addr2", &doc()).is_none());
    }

    #[test]
    fn test_pattern_value_is_trimmed() {
        let rules = RuleTable::default();
        let validator = FieldValidator::new(&rules, today());
        let mut doc = doc();
        doc.set_value("zip", "  77002 ");
        assert!(validator.evaluate("zip", &doc).unwrap().is_valid());
        doc.set_value("zip", "   ");
        assert!(validator.evaluate("zip", &doc).unwrap().is_valid());
    }

    #[test]
    fn test_run_marks_and_clears() {
        let rules = RuleTable::default();
        let validator = FieldValidator::new(&rules, today());
        let mut doc = doc();

        doc.set_value("zip", "abc");
        validator.run("zip", &mut doc);
        assert!(doc.has_class("zip", INVALID_CLASS));
        assert_eq!(doc.text("zip-error").as_deref(), Some("ZIP format: 12345 or 12345-6789"));

        doc.set_value("zip", "");
        validator.run("zip", &mut doc);
        assert!(!doc.has_class("zip", INVALID_CLASS));
        assert_eq!(doc.text("zip-error").as_deref(), Some(""));
    }

    #[test]
    fn test_password_messages_joined() {
        let rules = RuleTable::default();
        let validator = FieldValidator::new(&rules, today());
        let mut doc = doc();
        doc.set_value("passid", "ABCDEFGH1!");
        validator.run("passid", &mut doc);
        assert_eq!(doc.text("passid-error").as_deref(), Some("• Missing lowercase"));

        doc.set_value("passid", "abc");
        validator.run("passid", &mut doc);
        assert_eq!(
            doc.text("passid-error").as_deref(),
            Some("• Min 8 chars\n• Missing uppercase\n• Missing number\n• Missing special char")
        );
    }

    #[test]
    fn test_password_reads_live_user_id() {
        let rules = RuleTable::default();
        let validator = FieldValidator::new(&rules, today());
        let mut doc = doc();
        doc.set_value("userid", " jsmith ");
        doc.set_value("passid", "Jsmith2024!");
        let verdict = validator.evaluate("passid", &doc).unwrap();
        assert!(verdict.has(&ValidationErrorKind::ContainsUserId));
    }

    #[test]
    fn test_evaluate_all() {
        let rules = RuleTable::default();
        let validator = FieldValidator::new(&rules, today());
        let mut doc = doc();
        doc.set_value("dob", "1990-01-01");
        doc.set_value("passid", "Abcdef1!");
        doc.set_value("confirmpass", "Abcdef1!");
        assert!(validator.validate(&doc).is_ok());

        doc.set_value("confirmpass", "nope");
        let errors = validator.validate(&doc).unwrap_err();
        assert_eq!(errors.field_count(), 1);
        assert!(errors.has_errors("confirmpass"));
    }
}
