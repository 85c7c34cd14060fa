//! Integration tests for field validation.

use chrono::{Days, Months, NaiveDate};
use intake_core::host::{error_id, Element, FormHost, MemoryDocument, INVALID_CLASS};
use intake_core::validation::{
    check_date_of_birth, check_password, DateOfBirthPolicy, FieldRule, FieldValidator,
    PasswordPolicy, RuleTable, ValidationErrorKind, ValidationRule,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn rule_fields_doc() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    for descriptor in RuleTable::default().iter() {
        doc.insert(Element::input(descriptor.id.as_str()));
        doc.insert(Element::text(error_id(&descriptor.id)));
    }
    doc
}

// ============================================================================
// Pattern Rules
// ============================================================================

#[test]
fn test_empty_pattern_field_clears_marker() {
    let rules = RuleTable::default();
    let validator = FieldValidator::new(&rules, today());
    let mut doc = rule_fields_doc();

    for descriptor in rules.iter().filter(|d| !d.is_custom()) {
        doc.toggle_class(&descriptor.id, INVALID_CLASS, true);
        doc.set_text(&error_id(&descriptor.id), "stale");

        let verdict = validator.run(&descriptor.id, &mut doc).unwrap();

        assert!(verdict.is_valid(), "{} empty should be valid", descriptor.id);
        assert!(!doc.has_class(&descriptor.id, INVALID_CLASS));
        assert_eq!(doc.text(&error_id(&descriptor.id)).unwrap(), "");
    }
}

#[test]
fn test_pattern_match_and_mismatch() {
    let cases = [
        ("firstname", "Anne-Marie", "Anne Marie"),
        ("lastname", "D'Arcy", "D'Arcy3"),
        ("ssn", "078-05-1120", "078-051-120"),
        ("addr1", "12", "1"),
        ("city", "Winston-Salem", "Winston_Salem"),
        ("zip", "30301-0001", "30301-1"),
        ("tel", "404-555-0100", "(404) 555-0100"),
        ("email", "a.b+c@mail.co", "a.b@mail"),
        ("userid", "patsmith_1", "_patsmith"),
    ];

    let rules = RuleTable::default();
    for (id, good, bad) in cases {
        let FieldRule::Pattern(pattern) = &rules.get(id).unwrap().rule else {
            panic!("{} should be a pattern rule", id);
        };
        assert!(pattern.validate(good).is_none(), "{} rejected {}", id, good);
        let error = pattern.validate(bad).expect("mismatch should fail");
        assert_eq!(error.message, pattern.message());
    }
}

#[test]
fn test_whitespace_around_value_is_ignored() {
    let rules = RuleTable::default();
    let validator = FieldValidator::new(&rules, today());
    let mut doc = rule_fields_doc();
    doc.set_value("email", "  pat@example.com\t");
    assert!(validator.run("email", &mut doc).unwrap().is_valid());
}

// ============================================================================
// Date of Birth
// ============================================================================

#[test]
fn test_dob_boundaries() {
    let policy = DateOfBirthPolicy::default();
    let today = today();
    let earliest = today.checked_sub_months(Months::new(120 * 12)).unwrap();

    assert!(check_date_of_birth(&iso(today), today, &policy).is_valid());
    assert!(check_date_of_birth(&iso(earliest), today, &policy).is_valid());

    let tomorrow = today.checked_add_days(Days::new(1)).unwrap();
    let verdict = check_date_of_birth(&iso(tomorrow), today, &policy);
    assert!(verdict.has(&ValidationErrorKind::FutureDate));
    assert_eq!(verdict.message(), "Date cannot be in the future");

    let too_old = earliest.checked_sub_days(Days::new(1)).unwrap();
    let verdict = check_date_of_birth(&iso(too_old), today, &policy);
    assert!(verdict.has(&ValidationErrorKind::TooOld));
    assert_eq!(verdict.message(), "Date too far in the past");
}

#[test]
fn test_dob_through_validator() {
    let rules = RuleTable::default();
    let validator = FieldValidator::new(&rules, today());
    let mut doc = rule_fields_doc();

    validator.run("dob", &mut doc);
    assert!(doc.has_class("dob", INVALID_CLASS));
    assert_eq!(doc.text("dob-error").unwrap(), "Date of birth is required");

    doc.set_value("dob", "1988-07-04");
    validator.run("dob", &mut doc);
    assert!(!doc.has_class("dob", INVALID_CLASS));
}

// ============================================================================
// Password
// ============================================================================

#[test]
fn test_short_password_reports_four_reasons() {
    let verdict = check_password("abc", "", &PasswordPolicy::default());
    let kinds: Vec<_> = verdict.errors().iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ValidationErrorKind::TooShort { min: 8 },
            ValidationErrorKind::MissingUppercase,
            ValidationErrorKind::MissingDigit,
            ValidationErrorKind::MissingSpecial,
        ]
    );
}

#[test]
fn test_strong_password_valid() {
    assert!(check_password("Abcdef1!", "", &PasswordPolicy::default()).is_valid());
    assert!(check_password("Abcdef1!", "jsmith", &PasswordPolicy::default()).is_valid());
}

#[test]
fn test_password_containing_user_id() {
    let verdict = check_password("Xjsmith1!", "JSmith", &PasswordPolicy::default());
    assert!(!verdict.is_valid());
    assert_eq!(verdict.message(), "• Cannot contain UserID");
}

#[test]
fn test_confirm_goes_stale_after_password_change() {
    let rules = RuleTable::default();
    let validator = FieldValidator::new(&rules, today());
    let mut doc = rule_fields_doc();

    doc.set_value("passid", "Abcdef1!");
    doc.set_value("confirmpass", "Abcdef1!");
    assert!(validator.run("confirmpass", &mut doc).unwrap().is_valid());

    doc.set_value("passid", "Abcdef2!");
    let verdict = validator.run("confirmpass", &mut doc).unwrap();
    assert!(!verdict.is_valid());
    assert_eq!(doc.text("confirmpass-error").unwrap(), "Passwords do not match");
}
