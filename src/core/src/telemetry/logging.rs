//! Structured logging with sensitive value redaction.
//!
//! - JSON format for collected logs, pretty/compact for local runs
//! - Per-module log levels
//! - Passwords and social security numbers never reach the log output

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Global redactor instance for sensitive data.
static REDACTOR: OnceLock<SensitiveFieldRedactor> = OnceLock::new();

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Global log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty or compact)
    #[serde(default)]
    pub format: LogFormat,

    /// Per-module log levels
    #[serde(default)]
    pub module_levels: HashMap<String, String>,

    /// Whether to include file/line information
    #[serde(default)]
    pub include_location: bool,

    /// Whether to include target (module path)
    #[serde(default = "default_include_target")]
    pub include_target: bool,

    /// Redaction configuration
    #[serde(default)]
    pub redaction: RedactionConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            module_levels: HashMap::new(),
            include_location: false,
            include_target: default_include_target(),
            redaction: RedactionConfig::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    /// Single-line format
    #[default]
    Compact,
}

/// Configuration for sensitive data redaction.
#[derive(Debug, Clone, Deserialize)]
pub struct RedactionConfig {
    /// Whether redaction is enabled
    #[serde(default = "default_redaction_enabled")]
    pub enabled: bool,

    /// Patterns to redact
    #[serde(default = "default_redaction_patterns")]
    pub patterns: Vec<RedactionPattern>,

    /// Replacement text for redacted values
    #[serde(default = "default_redaction_replacement")]
    pub replacement: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enabled: default_redaction_enabled(),
            patterns: default_redaction_patterns(),
            replacement: default_redaction_replacement(),
        }
    }
}

/// A pattern for identifying sensitive data to redact.
#[derive(Debug, Clone, Deserialize)]
pub struct RedactionPattern {
    /// Name of this pattern (for debugging)
    pub name: String,

    /// Field ids whose values are always replaced (case-insensitive)
    #[serde(default)]
    pub field_names: Vec<String>,

    /// Regex masked wherever it appears in a value
    #[serde(default)]
    pub value_pattern: Option<String>,
}

/// Redactor for sensitive form values in log output.
#[derive(Debug, Clone)]
pub struct SensitiveFieldRedactor {
    patterns: Vec<CompiledRedactionPattern>,
    replacement: String,
    enabled: bool,
}

#[derive(Debug, Clone)]
struct CompiledRedactionPattern {
    field_names: Vec<String>,
    value_regex: Option<regex::Regex>,
}

impl SensitiveFieldRedactor {
    /// Create a new redactor from configuration.
    ///
    /// Patterns whose regex does not compile only match by field name.
    pub fn new(config: &RedactionConfig) -> Self {
        let patterns = config
            .patterns
            .iter()
            .map(|p| CompiledRedactionPattern {
                field_names: p.field_names.iter().map(|s| s.to_lowercase()).collect(),
                value_regex: p
                    .value_pattern
                    .as_ref()
                    .and_then(|pat| regex::Regex::new(pat).ok()),
            })
            .collect();

        Self {
            patterns,
            replacement: config.replacement.clone(),
            enabled: config.enabled,
        }
    }

    /// Check if a field's value must never be logged.
    pub fn should_redact_field(&self, field_name: &str) -> bool {
        if !self.enabled {
            return false;
        }

        let lower = field_name.to_lowercase();
        self.patterns
            .iter()
            .any(|p| p.field_names.iter().any(|f| lower == *f))
    }

    /// Mask every sensitive match inside a value.
    pub fn redact_value(&self, value: &str) -> String {
        if !self.enabled {
            return value.to_string();
        }

        let mut result = value.to_string();
        for pattern in &self.patterns {
            if let Some(regex) = &pattern.value_regex {
                result = regex.replace_all(&result, self.replacement.as_str()).to_string();
            }
        }
        result
    }

    /// Redact a field value, checking both field id and value patterns.
    pub fn redact(&self, field_name: &str, value: &str) -> String {
        if !self.enabled {
            return value.to_string();
        }

        if self.should_redact_field(field_name) {
            return self.replacement.clone();
        }

        self.redact_value(value)
    }

    /// Get the global redactor instance.
    pub fn global() -> &'static SensitiveFieldRedactor {
        REDACTOR.get_or_init(|| SensitiveFieldRedactor::new(&RedactionConfig::default()))
    }
}

// Default value functions
fn default_log_level() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

fn default_include_target() -> bool {
    true
}

fn default_redaction_enabled() -> bool {
    true
}

fn default_redaction_replacement() -> String {
    "[REDACTED]".to_string()
}

fn default_redaction_patterns() -> Vec<RedactionPattern> {
    vec![
        RedactionPattern {
            name: "passwords".to_string(),
            field_names: vec![
                "passid".to_string(),
                "confirmpass".to_string(),
                "password".to_string(),
            ],
            value_pattern: None,
        },
        RedactionPattern {
            name: "patient_identity".to_string(),
            field_names: vec![
                "dob".to_string(),
                "email".to_string(),
                "tel".to_string(),
                "firstname".to_string(),
                "middleinitial".to_string(),
                "lastname".to_string(),
            ],
            value_pattern: None,
        },
        RedactionPattern {
            name: "ssn".to_string(),
            field_names: vec!["ssn".to_string()],
            value_pattern: Some(r"\b[0-9]{3}-[0-9]{2}-[0-9]{4}\b".to_string()),
        },
    ]
}

/// The stderr writer in the configured format.
fn format_layer(config: &LoggingConfig) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_target(config.include_target);

    match config.format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

/// Initialize the logging subsystem.
///
/// # Errors
///
/// Returns an error if the level directives do not parse or a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let _ = REDACTOR.set(SensitiveFieldRedactor::new(&config.redaction));

    let mut filter = EnvFilter::try_new(&config.level)?;
    for (module, level) in &config.module_levels {
        let directive = format!("{}={}", module, level);
        filter = filter.add_directive(directive.parse()?);
    }

    tracing_subscriber::registry()
        .with(format_layer(config))
        .with(filter)
        .try_init()?;

    Ok(())
}
