//! `intake submit`: gate the snapshot, then confirm or stop at review.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::review::print_review;
use super::{blocking_rows, FieldStatusRow, Session};
use crate::output::{self, OutputFormat};
use intake_core::config::Config;
use intake_core::controller::{SubmissionState, SubmitOutcome, SUBMIT_BLOCKED_MESSAGE};
use intake_core::render::ReviewData;

#[derive(Args)]
pub struct SubmitArgs {
    /// Form snapshot (toml, json or yaml)
    pub snapshot: PathBuf,

    /// Confirm the reviewed submission
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Serialize)]
struct SubmitReport {
    state: SubmissionState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    blocking: Vec<FieldStatusRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    review: Option<ReviewData>,
}

/// Returns false when the gate blocked the submission.
pub async fn execute(args: SubmitArgs, config: &Config, format: OutputFormat) -> Result<bool> {
    let mut session = Session::open(config, Some(&args.snapshot)).await?;

    let outcome = session.controller.submit(&mut session.page);
    let (blocking, review) = match &outcome {
        SubmitOutcome::Blocked { report } => (blocking_rows(&session, report), None),
        _ => (Vec::new(), Some(ReviewData::collect(&session.page))),
    };
    if args.confirm && review.is_some() {
        session.controller.confirm(&mut session.page);
    }
    let state = session.controller.state();
    session.close()?;

    match format {
        OutputFormat::Table => match review {
            None => {
                output::print_list(&blocking, format)?;
                output::print_error(SUBMIT_BLOCKED_MESSAGE);
            }
            Some(ref data) => {
                print_review(data, format)?;
                if state == SubmissionState::Submitted {
                    output::print_success("Form submitted");
                } else {
                    output::print_info("Review the information above, then re-run with --confirm to submit.");
                }
            }
        },
        _ => output::print_item(&SubmitReport { state, blocking, review }, format)?,
    }

    Ok(state != SubmissionState::Editing)
}
