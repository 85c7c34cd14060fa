//! The intake page as a [`MemoryDocument`], and form snapshots that fill it.

use super::{error_id, Element, FormHost, MemoryDocument};
use crate::config::Config;
use crate::error::{IntakeError, Result};
use crate::fields;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Illness checkboxes as (element id, value).
const ILLNESSES: [(&str, &str); 5] = [
    ("ill-chickenpox", "Chicken Pox"),
    ("ill-measles", "Measles"),
    ("ill-covid", "Covid-19"),
    ("ill-smallpox", "Small Pox"),
    ("ill-tetanus", "Tetanus"),
];

/// Build the intake page.
///
/// Every validated field gets its `-error` display. Required flags come from
/// `config.form.required_fields`.
pub fn intake_page(config: &Config) -> MemoryDocument {
    let required = |element: Element| {
        if config.form.required_fields.iter().any(|f| *f == element.id) {
            element.required()
        } else {
            element
        }
    };

    let mut doc = MemoryDocument::new()
        .with(Element::text(fields::TODAY))
        .with(Element::container(fields::WELCOME))
        .with(Element::container(fields::FORM));

    let validated = [
        Element::input(fields::FIRST_NAME),
        Element::input(fields::MIDDLE_INITIAL),
        Element::input(fields::LAST_NAME),
        Element::typed_input(fields::DATE_OF_BIRTH, "date"),
        Element::input(fields::SSN),
        Element::input(fields::ADDRESS_1),
    ];
    for element in validated {
        let id = error_id(&element.id);
        doc.insert(required(element));
        doc.insert(Element::text(id));
    }

    doc.insert(required(Element::input(fields::ADDRESS_2)));
    doc.insert(required(Element::input(fields::CITY)));
    doc.insert(Element::text(error_id(fields::CITY)));
    doc.insert(required(Element::select(fields::STATE)));
    doc.insert(required(Element::input(fields::ZIP)));
    doc.insert(Element::text(error_id(fields::ZIP)));

    for element in [
        Element::typed_input(fields::PHONE, "tel"),
        Element::typed_input(fields::EMAIL, "email"),
    ] {
        let id = error_id(&element.id);
        doc.insert(required(element));
        doc.insert(Element::text(id));
    }

    for (id, value) in ILLNESSES {
        doc.insert(Element::checkbox(id, fields::ILLNESS_GROUP, value));
    }
    doc.insert(Element::radio("vacc-yes", fields::VACCINATED_GROUP, "Yes"));
    doc.insert(Element::radio("vacc-no", fields::VACCINATED_GROUP, "No"));
    doc.insert(Element::radio("ins-yes", fields::INSURANCE_GROUP, "Yes"));
    doc.insert(Element::radio("ins-no", fields::INSURANCE_GROUP, "No"));

    doc.insert(Element::typed_input(fields::INCOME, "range"));
    doc.insert(Element::text(fields::INCOME_DISPLAY));
    doc.insert(required(Element::textarea(fields::SYMPTOMS)));

    for id in [
        fields::EMERGENCY_NAME,
        fields::RELATIONSHIP,
    ] {
        doc.insert(required(Element::input(id)));
    }
    doc.insert(required(Element::typed_input(fields::EMERGENCY_EMAIL, "email")));
    doc.insert(required(Element::typed_input(fields::EMERGENCY_PHONE, "tel")));

    for element in [
        Element::input(fields::USER_ID),
        Element::typed_input(fields::PASSWORD, "password"),
        Element::typed_input(fields::CONFIRM_PASSWORD, "password"),
    ] {
        let id = error_id(&element.id);
        doc.insert(required(element));
        doc.insert(Element::text(id));
    }

    doc.insert(Element::checkbox(fields::REMEMBER_ME, "remember", "on"));

    doc.insert(Element::button(fields::VALIDATE_BUTTON));
    doc.insert(Element::button(fields::REVIEW_BUTTON));
    doc.insert(Element::container(fields::REVIEW_AREA));
    doc.insert(Element::container(fields::ALERT_BOX).hidden());
    doc.insert(Element::text(fields::ALERT_MESSAGE));
    doc.insert(Element::button(fields::CLOSE_ALERT));
    doc.insert(Element::container(fields::CONFIRM_MODAL).hidden());
    doc.insert(Element::container(fields::MODAL_REVIEW));
    doc.insert(Element::button(fields::CONFIRM_SUBMIT));
    doc.insert(Element::button(fields::CANCEL_SUBMIT));
    doc
}

// ═══════════════════════════════════════════════════════════════════════════════
// Form Snapshot
// ═══════════════════════════════════════════════════════════════════════════════

/// Values a user would have typed, as stored in a snapshot file.
///
/// ```toml
/// remember_me = true
///
/// [values]
/// firstname = "Pat"
/// dob = "1990-04-12"
///
/// [checked]
/// illness = ["Measles"]
/// vaccinated = ["Yes"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    /// Control id to value.
    #[serde(default)]
    pub values: BTreeMap<String, String>,

    /// Checkbox/radio group name to the checked values.
    #[serde(default)]
    pub checked: BTreeMap<String, Vec<String>>,

    /// Left out means leave remember-me as the stored preferences set it.
    #[serde(default)]
    pub remember_me: Option<bool>,
}

impl FormSnapshot {
    /// Read a snapshot, choosing the format by file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("toml");
        Self::parse(&content, format)
    }

    /// Parse snapshot text in `toml`, `json` or `yaml` format.
    pub fn parse(content: &str, format: &str) -> Result<Self> {
        match format.to_ascii_lowercase().as_str() {
            "toml" => Ok(toml::from_str(content)?),
            "json" => Ok(serde_json::from_str(content)?),
            "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
            other => Err(IntakeError::invalid_snapshot(format!(
                "Unsupported snapshot format: {}",
                other
            ))),
        }
    }

    /// Write the snapshot's values and choices into `host`.
    ///
    /// Fails on the first id or choice the page does not have. The
    /// remember-me flag is left to the controller.
    pub fn apply<H: FormHost + ?Sized>(&self, host: &mut H) -> Result<()> {
        for (id, value) in &self.values {
            if !host.contains(id) {
                return Err(IntakeError::unknown_field(id.as_str()));
            }
            host.set_value(id, value);
        }

        for (group, values) in &self.checked {
            for value in values {
                if !host.select_choice(group, value) {
                    return Err(IntakeError::invalid_snapshot(format!(
                        "No '{}' choice named '{}'",
                        group, value
                    )));
                }
            }
        }
        Ok(())
    }
}
