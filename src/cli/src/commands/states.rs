//! `intake states`: fetch and list the state options.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use intake_core::config::Config;
use intake_core::states::{fetch_states, source_for};

#[derive(Args)]
pub struct StatesArgs {
    /// File path or http(s) URL; defaults to `states.source`
    #[arg(long)]
    pub source: Option<String>,
}

#[derive(Debug, Tabled, Serialize)]
struct StateRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "State")]
    name: String,
}

pub async fn execute(args: StatesArgs, config: &Config, format: OutputFormat) -> Result<bool> {
    let location = args.source.unwrap_or_else(|| config.states.source.clone());
    let source = source_for(&location)?;
    let states = fetch_states(source.as_ref()).await?;

    match format {
        OutputFormat::Table => {
            let rows: Vec<StateRow> = states
                .into_iter()
                .enumerate()
                .map(|(i, name)| StateRow { index: i + 1, name })
                .collect();
            output::print_list(&rows, format)?;
        }
        _ => output::print_item(&states, format)?,
    }
    Ok(true)
}
