//! Declarative field validation for the intake form.
//!
//! - **Rule table**: each validated field maps to a regex pattern with a
//!   fixed message, or to a custom predicate
//! - **Custom predicates**: date-of-birth range, password composition
//!   (checked against the live user id) and password confirmation
//! - **Field validator**: computes one field's verdict and reflects it on
//!   the page
//! - **Gate**: aggregate validity derived from the page after every field
//!   has been re-validated
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use intake_core::host::{Element, FormHost, MemoryDocument};
//! use intake_core::validation::{FieldValidator, RuleTable};
//!
//! let mut doc = MemoryDocument::new()
//!     .with(Element::input("zip"))
//!     .with(Element::text("zip-error"));
//! doc.set_value("zip", "7700");
//!
//! let rules = RuleTable::default();
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let verdict = FieldValidator::new(&rules, today).run("zip", &mut doc).unwrap();
//!
//! assert!(!verdict.is_valid());
//! assert_eq!(doc.text("zip-error").unwrap(), "ZIP format: 12345 or 12345-6789");
//! ```

pub mod error;
pub mod gate;
pub mod predicates;
pub mod rules;
pub mod validator;

pub use error::{FieldError, FieldVerdict, ValidationErrorKind, ValidationErrors, ValidationResult};
pub use gate::GateReport;
pub use predicates::{
    check_confirm_password, check_date_of_birth, check_password, DateOfBirthPolicy,
    PasswordPolicy, DATE_FORMAT, SPECIAL_CHARACTERS,
};
pub use rules::{CustomRule, FieldDescriptor, FieldRule, Pattern, RuleTable, ValidationRule};
pub use validator::FieldValidator;
