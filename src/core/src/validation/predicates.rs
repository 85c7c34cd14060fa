//! Custom predicates for fields a single regex cannot express.

use crate::validation::error::{FieldError, FieldVerdict, ValidationErrorKind};
use chrono::{Months, NaiveDate};

/// Characters that satisfy the password's special-character requirement.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_-\\/+.,~<>";

/// Date format of the date-of-birth control.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ═══════════════════════════════════════════════════════════════════════════════
// Date of Birth
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOfBirthPolicy {
    /// Oldest accepted age, in years.
    pub max_age_years: u32,
}

impl Default for DateOfBirthPolicy {
    fn default() -> Self {
        Self { max_age_years: 120 }
    }
}

impl DateOfBirthPolicy {
    /// Earliest accepted birth date relative to `today`.
    ///
    /// February 29 maps to February 28 when the target year has no leap day.
    pub fn earliest(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_months(Months::new(self.max_age_years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Check a date of birth against `today`.
pub fn check_date_of_birth(value: &str, today: NaiveDate, policy: &DateOfBirthPolicy) -> FieldVerdict {
    let value = value.trim();
    if value.is_empty() {
        return FieldVerdict::fail(FieldError::with_message(
            ValidationErrorKind::MissingValue,
            "Date of birth is required",
        ));
    }

    let dob = match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => date,
        Err(_) => return FieldVerdict::fail(FieldError::new(ValidationErrorKind::InvalidDate)),
    };

    if dob > today {
        FieldVerdict::fail(FieldError::new(ValidationErrorKind::FutureDate))
    } else if dob < policy.earliest(today) {
        FieldVerdict::fail(FieldError::new(ValidationErrorKind::TooOld))
    } else {
        FieldVerdict::valid()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Password
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum length in characters.
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

/// Check password composition. Every failed requirement is reported.
///
/// The user-id containment check is skipped while `user_id` is blank.
pub fn check_password(password: &str, user_id: &str, policy: &PasswordPolicy) -> FieldVerdict {
    let mut errors = Vec::new();

    if password.chars().count() < policy.min_length {
        errors.push(FieldError::new(ValidationErrorKind::TooShort {
            min: policy.min_length,
        }));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push(FieldError::new(ValidationErrorKind::MissingLowercase));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push(FieldError::new(ValidationErrorKind::MissingUppercase));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(FieldError::new(ValidationErrorKind::MissingDigit));
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        errors.push(FieldError::new(ValidationErrorKind::MissingSpecial));
    }
    if password.contains('"') {
        errors.push(FieldError::new(ValidationErrorKind::DoubleQuote));
    }

    let user_id = user_id.trim().to_lowercase();
    if !user_id.is_empty() && password.to_lowercase().contains(&user_id) {
        errors.push(FieldError::new(ValidationErrorKind::ContainsUserId));
    }

    FieldVerdict::from_errors(errors)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Confirm Password
// ═══════════════════════════════════════════════════════════════════════════════

pub fn check_confirm_password(confirm: &str, password: &str) -> FieldVerdict {
    if confirm == password {
        FieldVerdict::valid()
    } else {
        FieldVerdict::fail(FieldError::new(ValidationErrorKind::Mismatch))
    }
}
