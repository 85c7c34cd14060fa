//! Configuration management.

use crate::error::{IntakeError, Result};
use crate::fields;
use crate::telemetry::LoggingConfig;
use serde::Deserialize;

/// Longest cookie lifetime accepted from configuration (100 years).
pub const MAX_COOKIE_TTL_DAYS: i64 = 36_500;

/// Upper bound for `form.max_age_years`.
pub const MAX_AGE_YEARS_LIMIT: u32 = 200;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Form rules and page setup
    #[serde(default)]
    pub form: FormConfig,

    /// Remember-me persistence
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// State dropdown source
    #[serde(default)]
    pub states: StatesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    /// Controls marked required on the intake page
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<String>,

    /// Minimum password length
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,

    /// Oldest accepted date of birth, in years before today
    #[serde(default = "default_max_age_years")]
    pub max_age_years: u32,

    /// Income slider bounds, in thousands of dollars
    #[serde(default)]
    pub income: IncomeRange,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            required_fields: default_required_fields(),
            password_min_length: default_password_min_length(),
            max_age_years: default_max_age_years(),
            income: IncomeRange::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IncomeRange {
    #[serde(default = "default_income_min")]
    pub min: u32,

    #[serde(default = "default_income_max")]
    pub max: u32,

    #[serde(default = "default_income_default")]
    pub default: u32,
}

impl Default for IncomeRange {
    fn default() -> Self {
        Self {
            min: default_income_min(),
            max: default_income_max(),
            default: default_income_default(),
        }
    }
}

/// A field saved to the cookie store under `key`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CookieField {
    pub field: String,
    pub key: String,
}

impl CookieField {
    pub fn new(field: &str, key: &str) -> Self {
        Self {
            field: field.to_string(),
            key: key.to_string(),
        }
    }
}

/// Which fields are remembered, and where.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
    /// Cookie lifetime in days
    #[serde(default = "default_cookie_ttl_days")]
    pub cookie_ttl_days: i64,

    /// Fields saved as cookies
    #[serde(default = "default_cookie_fields")]
    pub cookie_fields: Vec<CookieField>,

    /// Fields saved to local storage, keyed by field id
    #[serde(default = "default_local_fields")]
    pub local_fields: Vec<String>,

    /// Cookie whose presence means a profile was saved
    #[serde(default = "default_profile_key")]
    pub profile_key: String,

    /// Store file used by command-line hosts
    #[serde(default)]
    pub store_path: Option<String>,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            cookie_ttl_days: default_cookie_ttl_days(),
            cookie_fields: default_cookie_fields(),
            local_fields: default_local_fields(),
            profile_key: default_profile_key(),
            store_path: None,
        }
    }
}

impl PersistenceConfig {
    /// Cookie key for a field, if it is cookie-persisted.
    pub fn cookie_key(&self, field: &str) -> Option<&str> {
        self.cookie_fields
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.key.as_str())
    }

    pub fn is_local(&self, field: &str) -> bool {
        self.local_fields.iter().any(|f| f == field)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatesConfig {
    /// File path or http(s) URL of the newline-delimited state list
    #[serde(default = "default_states_source")]
    pub source: String,

    /// Select element that receives the options
    #[serde(default = "default_states_select")]
    pub select_id: String,

    /// Disabled first option
    #[serde(default = "default_states_placeholder")]
    pub placeholder: String,
}

impl Default for StatesConfig {
    fn default() -> Self {
        Self {
            source: default_states_source(),
            select_id: default_states_select(),
            placeholder: default_states_placeholder(),
        }
    }
}

// Default value functions
fn default_required_fields() -> Vec<String> {
    [
        fields::FIRST_NAME,
        fields::LAST_NAME,
        fields::DATE_OF_BIRTH,
        fields::SSN,
        fields::ADDRESS_1,
        fields::CITY,
        fields::STATE,
        fields::ZIP,
        fields::EMAIL,
        fields::USER_ID,
        fields::PASSWORD,
        fields::CONFIRM_PASSWORD,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_password_min_length() -> usize { 8 }
fn default_max_age_years() -> u32 { 120 }
fn default_income_min() -> u32 { 200 }
fn default_income_max() -> u32 { 500 }
fn default_income_default() -> u32 { 350 }
fn default_cookie_ttl_days() -> i64 { 30 }
fn default_cookie_fields() -> Vec<CookieField> {
    vec![
        CookieField::new(fields::USER_ID, "userid"),
        CookieField::new(fields::FIRST_NAME, "firstName"),
        CookieField::new(fields::MIDDLE_INITIAL, "middleInitial"),
        CookieField::new(fields::LAST_NAME, "lastName"),
        CookieField::new(fields::EMAIL, "email"),
        CookieField::new(fields::PHONE, "phone"),
        CookieField::new(fields::INCOME, "incomeRange"),
    ]
}
fn default_local_fields() -> Vec<String> {
    [
        fields::ADDRESS_2,
        fields::CITY,
        fields::ZIP,
        fields::SYMPTOMS,
        fields::RELATIONSHIP,
        fields::EMERGENCY_NAME,
        fields::EMERGENCY_EMAIL,
        fields::EMERGENCY_PHONE,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_profile_key() -> String { "firstName".to_string() }
fn default_states_source() -> String { "states.html".to_string() }
fn default_states_select() -> String { fields::STATE.to_string() }
fn default_states_placeholder() -> String { "Select a state".to_string() }

impl Config {
    /// Reject values that deserialize but cannot drive the form.
    pub fn validate(&self) -> Result<()> {
        let ttl = self.persistence.cookie_ttl_days;
        if !(1..=MAX_COOKIE_TTL_DAYS).contains(&ttl) {
            return Err(IntakeError::invalid_configuration(format!(
                "persistence.cookie_ttl_days must be between 1 and {}, got {}",
                MAX_COOKIE_TTL_DAYS, ttl
            )));
        }

        let income = self.form.income;
        if income.min > income.max || !(income.min..=income.max).contains(&income.default) {
            return Err(IntakeError::invalid_configuration(format!(
                "form.income needs min <= default <= max, got {}/{}/{}",
                income.min, income.default, income.max
            )));
        }

        if self.form.max_age_years == 0 || self.form.max_age_years > MAX_AGE_YEARS_LIMIT {
            return Err(IntakeError::invalid_configuration(format!(
                "form.max_age_years must be between 1 and {}, got {}",
                MAX_AGE_YEARS_LIMIT, self.form.max_age_years
            )));
        }
        Ok(())
    }

    /// Load configuration from the environment (`INTAKE__SECTION__KEY`).
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("INTAKE").separator("__"))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a specific file path, with environment overrides.
    pub fn from_file(path: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("INTAKE").separator("__"))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_intake_page() {
        let cfg = Config::default();
        assert_eq!(cfg.form.password_min_length, 8);
        assert_eq!(cfg.form.max_age_years, 120);
        assert_eq!(cfg.persistence.cookie_ttl_days, 30);
        assert_eq!(cfg.persistence.cookie_key("tel"), Some("phone"));
        assert_eq!(cfg.persistence.cookie_key("city"), None);
        assert!(cfg.persistence.is_local("city"));
        assert_eq!(cfg.states.select_id, "state");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [form]
            max_age_years = 110

            [persistence]
            local_fields = ["addr2"]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.form.max_age_years, 110);
        assert_eq!(cfg.form.password_min_length, 8);
        assert_eq!(cfg.persistence.local_fields, vec!["addr2".to_string()]);
        assert_eq!(cfg.persistence.cookie_fields.len(), 7);
    }

    #[test]
    fn test_validate_rejects_huge_cookie_ttl() {
        let mut cfg = Config::default();
        assert!(cfg.validate().is_ok());

        cfg.persistence.cookie_ttl_days = 1_000_000_000;
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidConfiguration);

        cfg.persistence.cookie_ttl_days = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_income_range() {
        let mut cfg = Config::default();
        cfg.form.income.min = 600;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intake.toml");
        std::fs::write(&path, "[persistence]\ncookie_ttl_days = 1000000000\n").unwrap();

        let err = Config::from_file(path.to_str().unwrap()).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidConfiguration);
    }
}
