//! The rule table: one validation rule per intake field.
//!
//! Most fields are checked against a regular expression with a fixed error
//! message. Date of birth, password and password confirmation use custom
//! predicates because they depend on the clock or on other fields.

use crate::config::FormConfig;
use crate::fields;
use crate::validation::error::{FieldError, ValidationErrorKind};
use crate::validation::predicates::{DateOfBirthPolicy, PasswordPolicy};
use regex::Regex;
use std::sync::LazyLock;

// ═══════════════════════════════════════════════════════════════════════════════
// Pre-compiled Regex Patterns
// ═══════════════════════════════════════════════════════════════════════════════

/// First and last names: letters, apostrophes, dashes.
static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z'-]{1,30}$").expect("Invalid name regex"));

static MIDDLE_INITIAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]?$").expect("Invalid middle initial regex"));

static SSN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}-[0-9]{2}-[0-9]{4}$").expect("Invalid SSN regex"));

static ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.{2,30}$").expect("Invalid address regex"));

static CITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z .'-]{1,40}$").expect("Invalid city regex"));

static ZIP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("Invalid ZIP regex"));

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$").expect("Invalid phone regex"));

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,20}$").expect("Invalid email regex")
});

static USER_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_-]{4,29}$").expect("Invalid user id regex"));

// ═══════════════════════════════════════════════════════════════════════════════
// Validation Rule Trait
// ═══════════════════════════════════════════════════════════════════════════════

/// A validation rule that can be applied to a single value.
pub trait ValidationRule {
    /// Validate the value and return the failure, if any.
    fn validate(&self, value: &str) -> Option<FieldError>;

    /// Get a description of this rule.
    fn description(&self) -> String;
}

// ═══════════════════════════════════════════════════════════════════════════════
// Pattern Rule
// ═══════════════════════════════════════════════════════════════════════════════

/// Rule that validates a value against a regex pattern.
///
/// An empty value passes: absence of input is not a format error. Whether
/// the field may stay empty is decided by the required-field check.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    message: String,
}

impl Pattern {
    /// Create a new pattern rule from a regex string.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    fn from_regex(regex: &Regex, message: &str) -> Self {
        Self {
            regex: regex.clone(),
            message: message.to_string(),
        }
    }

    /// Error message shown when a non-empty value does not match.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl ValidationRule for Pattern {
    fn validate(&self, value: &str) -> Option<FieldError> {
        if value.is_empty() || self.regex.is_match(value) {
            None
        } else {
            Some(FieldError::with_message(ValidationErrorKind::Pattern, &self.message))
        }
    }

    fn description(&self) -> String {
        format!("matches pattern: {}", self.regex.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rule Table
// ═══════════════════════════════════════════════════════════════════════════════

/// Predicates that need more than the field's own value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomRule {
    /// Range check against today's date.
    DateOfBirth(DateOfBirthPolicy),
    /// Composition check, also reads the live user id.
    Password(PasswordPolicy),
    /// Equality with the live password.
    ConfirmPassword,
}

/// How a field is validated.
#[derive(Debug, Clone)]
pub enum FieldRule {
    Pattern(Pattern),
    Custom(CustomRule),
}

/// A field id bound to its rule.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub id: String,
    pub rule: FieldRule,
}

impl FieldDescriptor {
    fn pattern(id: &str, regex: &Regex, message: &str) -> Self {
        Self {
            id: id.to_string(),
            rule: FieldRule::Pattern(Pattern::from_regex(regex, message)),
        }
    }

    fn custom(id: &str, rule: CustomRule) -> Self {
        Self {
            id: id.to_string(),
            rule: FieldRule::Custom(rule),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.rule, FieldRule::Custom(_))
    }
}

/// Immutable table of field rules, built once at startup.
#[derive(Debug, Clone)]
pub struct RuleTable {
    descriptors: Vec<FieldDescriptor>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard(DateOfBirthPolicy::default(), PasswordPolicy::default())
    }
}

impl RuleTable {
    /// The intake form's thirteen field rules.
    pub fn standard(dob: DateOfBirthPolicy, password: PasswordPolicy) -> Self {
        let descriptors = vec![
            FieldDescriptor::pattern(fields::FIRST_NAME, &NAME_REGEX, "Only letters, apostrophes, dashes"),
            FieldDescriptor::pattern(fields::MIDDLE_INITIAL, &MIDDLE_INITIAL_REGEX, "One letter only (or blank)"),
            FieldDescriptor::pattern(fields::LAST_NAME, &NAME_REGEX, "Only letters, apostrophes, dashes"),
            FieldDescriptor::custom(fields::DATE_OF_BIRTH, CustomRule::DateOfBirth(dob)),
            FieldDescriptor::pattern(fields::SSN, &SSN_REGEX, "Format: 123-45-6789"),
            FieldDescriptor::pattern(fields::ADDRESS_1, &ADDRESS_REGEX, "Min 2 characters"),
            FieldDescriptor::pattern(fields::CITY, &CITY_REGEX, "Letters/spaces/.- only"),
            FieldDescriptor::pattern(fields::ZIP, &ZIP_REGEX, "ZIP format: 12345 or 12345-6789"),
            FieldDescriptor::pattern(fields::PHONE, &PHONE_REGEX, "Phone: 123-456-7890"),
            FieldDescriptor::pattern(fields::EMAIL, &EMAIL_REGEX, "Invalid email"),
            FieldDescriptor::pattern(fields::USER_ID, &USER_ID_REGEX, "Start w/ letter, 5–30 chars"),
            FieldDescriptor::custom(fields::PASSWORD, CustomRule::Password(password)),
            FieldDescriptor::custom(fields::CONFIRM_PASSWORD, CustomRule::ConfirmPassword),
        ];
        Self { descriptors }
    }

    /// Standard table with policies taken from configuration.
    pub fn from_config(form: &FormConfig) -> Self {
        Self::standard(
            DateOfBirthPolicy {
                max_age_years: form.max_age_years,
            },
            PasswordPolicy {
                min_length: form.password_min_length,
            },
        )
    }

    pub fn get(&self, id: &str) -> Option<&FieldDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.descriptors.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern_for(id: &str) -> Pattern {
        match &RuleTable::default().get(id).unwrap().rule {
            FieldRule::Pattern(p) => p.clone(),
            FieldRule::Custom(_) => panic!("{} is not a pattern field", id),
        }
    }

    #[test]
    fn test_table_has_thirteen_fields() {
        let table = RuleTable::default();
        assert_eq!(table.len(), 13);
        assert_eq!(table.iter().filter(|d| d.is_custom()).count(), 3);
        assert!(table.get("range").is_none());
    }

    #[test]
    fn test_empty_values_pass_every_pattern() {
        let table = RuleTable::default();
        for descriptor in table.iter() {
            if let FieldRule::Pattern(p) = &descriptor.rule {
                assert!(p.validate("").is_none(), "{} rejected empty", descriptor.id);
            }
        }
    }

    #[test]
    fn test_names() {
        let rule = pattern_for("firstname");
        assert!(rule.validate("O'Neil").is_none());
        assert!(rule.validate("Mary-Jo").is_none());
        let err = rule.validate("J0hn").unwrap();
        assert_eq!(err.message, "Only letters, apostrophes, dashes");
        assert!(rule.validate(&"a".repeat(31)).is_some());
    }

    #[test]
    fn test_middle_initial() {
        let rule = pattern_for("middleinitial");
        assert!(rule.validate("Q").is_none());
        assert!(rule.validate("QR").is_some());
    }

    #[test]
    fn test_ssn_and_phone_groups() {
        let ssn = pattern_for("ssn");
        assert!(ssn.validate("123-45-6789").is_none());
        assert!(ssn.validate("123456789").is_some());

        let tel = pattern_for("tel");
        assert!(tel.validate("713-555-0100").is_none());
        assert!(tel.validate("713-5550-100").is_some());
    }

    #[test]
    fn test_zip_plus_four() {
        let zip = pattern_for("zip");
        assert!(zip.validate("77002").is_none());
        assert!(zip.validate("77002-1234").is_none());
        assert!(zip.validate("7700").is_some());
        assert_eq!(zip.validate("abcde").unwrap().message, "ZIP format: 12345 or 12345-6789");
    }

    #[test]
    fn test_digits_are_ascii_only() {
        // Arabic-Indic digits must not satisfy the numeric groups.
        let zip = pattern_for("zip");
        assert!(zip.validate("٠١٢٣٤").is_some());
    }

    #[test]
    fn test_email_case_insensitive() {
        let email = pattern_for("email");
        assert!(email.validate("Pat.Smith@Example.ORG").is_none());
        assert!(email.validate("pat@example").is_some());
        assert!(email.validate("pat.example.com").is_some());
    }

    #[test]
    fn test_email_case_folding_stays_ascii() {
        let email = pattern_for("email");
        assert!(email.validate("\u{212A}im@example.com").is_some());
        assert!(email.validate("pa\u{17F}@example.com").is_some());
        assert!(email.validate("KIM@EXAMPLE.COM").is_none());
    }

    #[test]
    fn test_user_id() {
        let userid = pattern_for("userid");
        assert!(userid.validate("jsmith").is_none());
        assert!(userid.validate("j_s-9").is_none());
        assert!(userid.validate("1smith").is_some());
        assert!(userid.validate("JSmith").is_some());
        assert!(userid.validate("abcd").is_some());
    }

    #[test]
    fn test_address_and_city() {
        assert!(pattern_for("addr1").validate("1").is_some());
        assert!(pattern_for("addr1").validate("12 Main St").is_none());
        assert!(pattern_for("city").validate("St. Louis").is_none());
        assert!(pattern_for("city").validate("Houston77").is_some());
    }

    #[test]
    fn test_custom_pattern() {
        let rule = Pattern::new(r"^[A-Z]{3}$", "Three capitals").unwrap();
        assert!(rule.validate("ABC").is_none());
        assert_eq!(rule.validate("abc").unwrap().message, "Three capitals");
        assert_eq!(rule.description(), "matches pattern: ^[A-Z]{3}$");
    }

    #[test]
    fn test_from_config_policies() {
        let form = FormConfig {
            password_min_length: 12,
            max_age_years: 100,
            ..FormConfig::default()
        };
        let table = RuleTable::from_config(&form);
        match &table.get("passid").unwrap().rule {
            FieldRule::Custom(CustomRule::Password(p)) => assert_eq!(p.min_length, 12),
            other => panic!("unexpected rule {:?}", other),
        }
        match &table.get("dob").unwrap().rule {
            FieldRule::Custom(CustomRule::DateOfBirth(p)) => assert_eq!(p.max_age_years, 100),
            other => panic!("unexpected rule {:?}", other),
        }
    }
}
