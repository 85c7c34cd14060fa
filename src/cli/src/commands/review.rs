//! `intake review`: show the review table for a snapshot.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

use super::Session;
use crate::output::{self, OutputFormat};
use intake_core::config::Config;
use intake_core::render::{render_review_html, ReviewData, EMPTY_MARK, REVIEW_HEADER};

#[derive(Args)]
pub struct ReviewArgs {
    /// Form snapshot (toml, json or yaml)
    pub snapshot: PathBuf,

    /// Print the review table markup instead
    #[arg(long)]
    pub html: bool,
}

#[derive(Debug, Tabled, Serialize)]
pub struct ReviewRow {
    #[tabled(rename = "Field")]
    pub label: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Review rows with blanks shown as the empty mark.
pub fn review_rows(data: &ReviewData) -> Vec<ReviewRow> {
    data.rows()
        .into_iter()
        .map(|(label, value)| ReviewRow {
            label: label.to_string(),
            value: if value.is_empty() { EMPTY_MARK.to_string() } else { value.to_string() },
        })
        .collect()
}

/// Print the review in the requested format.
pub fn print_review(data: &ReviewData, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            output::print_header(REVIEW_HEADER);
            output::print_list(&review_rows(data), format)
        }
        _ => output::print_item(data, format),
    }
}

pub async fn execute(args: ReviewArgs, config: &Config, format: OutputFormat) -> Result<bool> {
    let mut session = Session::open(config, Some(&args.snapshot)).await?;
    let data = session.controller.review(&mut session.page);
    session.close()?;

    if args.html {
        println!("{}", render_review_html(&data));
    } else {
        print_review(&data, format)?;
    }
    Ok(true)
}
