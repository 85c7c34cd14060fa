//! `intake check`: run every validator and the gate over a snapshot.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::{blocking_rows, FieldStatusRow, Session};
use crate::output::{self, OutputFormat};
use intake_core::config::Config;
use intake_core::validation::GateReport;

#[derive(Args)]
pub struct CheckArgs {
    /// Form snapshot (toml, json or yaml)
    pub snapshot: PathBuf,
}

#[derive(Serialize)]
struct CheckReport {
    valid: bool,
    message: String,
    fields: Vec<FieldStatusRow>,
}

/// Every validated field in table order, followed by blank required
/// fields that carry no rule.
fn field_rows(session: &Session, report: &GateReport) -> Vec<FieldStatusRow> {
    let mut blocking = blocking_rows(session, report);
    let mut rows = Vec::new();

    for id in session.controller.rules().ids() {
        match blocking.iter().position(|row| row.field == id) {
            Some(i) => rows.push(blocking.remove(i)),
            None => rows.push(FieldStatusRow {
                field: id.to_string(),
                status: "ok".to_string(),
                message: String::new(),
            }),
        }
    }
    rows.extend(blocking);
    rows
}

/// Returns whether the form passed.
pub async fn execute(args: CheckArgs, config: &Config, format: OutputFormat) -> Result<bool> {
    let mut session = Session::open(config, Some(&args.snapshot)).await?;
    let outcome = session.controller.check_data(&mut session.page);
    let rows = field_rows(&session, &outcome.report);
    session.close()?;

    match format {
        OutputFormat::Table => {
            output::print_list(&rows, format)?;
            if outcome.is_valid() {
                output::print_success(&outcome.message);
            } else {
                output::print_error(&outcome.message);
            }
        }
        _ => {
            output::print_item(
                &CheckReport {
                    valid: outcome.is_valid(),
                    message: outcome.message.clone(),
                    fields: rows,
                },
                format,
            )?;
        }
    }

    Ok(outcome.is_valid())
}
