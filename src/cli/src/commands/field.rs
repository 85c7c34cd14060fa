//! `intake field`: validate a single value without a snapshot.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use intake_core::clock::{Clock, SystemClock};
use intake_core::config::Config;
use intake_core::fields;
use intake_core::host::{intake_page, FormHost};
use intake_core::validation::{FieldValidator, RuleTable};
use intake_core::IntakeError;

#[derive(Args)]
pub struct FieldArgs {
    /// Field id, e.g. `zip` or `passid`
    pub id: String,

    /// Value to validate
    pub value: String,

    /// User id the password must not contain
    #[arg(long)]
    pub userid: Option<String>,

    /// Password the confirmation must match
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Serialize)]
struct FieldResult {
    field: String,
    valid: bool,
    messages: Vec<String>,
}

/// Returns whether the value passed.
pub async fn execute(args: FieldArgs, config: &Config, format: OutputFormat) -> Result<bool> {
    let rules = RuleTable::from_config(&config.form);
    if rules.get(&args.id).is_none() {
        return Err(IntakeError::unknown_field(args.id.as_str()).into());
    }

    let mut page = intake_page(config);
    if let Some(ref userid) = args.userid {
        page.set_value(fields::USER_ID, userid);
    }
    if let Some(ref password) = args.password {
        page.set_value(fields::PASSWORD, password);
    }
    page.set_value(&args.id, &args.value);

    let validator = FieldValidator::new(&rules, SystemClock.today());
    let verdict = validator
        .run(&args.id, &mut page)
        .ok_or_else(|| IntakeError::unknown_field(args.id.as_str()))?;

    let result = FieldResult {
        field: args.id.clone(),
        valid: verdict.is_valid(),
        messages: verdict.errors().iter().map(|e| e.message.clone()).collect(),
    };

    match format {
        OutputFormat::Table => {
            if result.valid {
                output::print_success(&format!("{} is valid", result.field));
            } else {
                output::print_error(&format!("{} is invalid", result.field));
                for message in &result.messages {
                    output::print_detail(&result.field, message);
                }
            }
        }
        _ => output::print_item(&result, format)?,
    }

    Ok(result.valid)
}
