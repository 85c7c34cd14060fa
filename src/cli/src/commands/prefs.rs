//! Saved preferences: the cookie jar and local storage in the store file.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

use super::{store_path, Session};
use crate::output::{self, OutputFormat};
use intake_core::config::Config;
use intake_core::persistence::{KeyValueStore, StoreFile, Stores};
use intake_core::telemetry::SensitiveFieldRedactor;

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show what the store file holds
    Show,

    /// Delete the store file
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Fill a snapshot with remember-me on and save it
    Remember {
        /// Form snapshot (toml, json or yaml)
        snapshot: PathBuf,
    },
}

#[derive(Debug, Tabled, Serialize)]
struct StoredRow {
    #[tabled(rename = "Store")]
    store: &'static str,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Expires")]
    expires: String,
}

fn stored_rows(stores: &Stores) -> Vec<StoredRow> {
    let redactor = SensitiveFieldRedactor::global();
    let mut rows = Vec::new();

    for key in stores.cookies.keys() {
        let Some(entry) = stores.cookies.entry(&key) else {
            continue;
        };
        rows.push(StoredRow {
            store: "cookie",
            value: redactor.redact(&key, &entry.value),
            expires: entry.expires_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            key,
        });
    }

    for key in stores.local.keys() {
        let value = stores.local.get(&key).unwrap_or_default();
        rows.push(StoredRow {
            store: "local",
            value: redactor.redact(&key, &value),
            expires: "-".to_string(),
            key,
        });
    }
    rows
}

pub async fn execute(cmd: PrefsCommands, config: &Config, format: OutputFormat) -> Result<bool> {
    let store = StoreFile::new(store_path(config)?);

    match cmd {
        PrefsCommands::Show => {
            let stores = store
                .load()
                .with_context(|| format!("Failed to load {}", store.path().display()))?;
            let rows = stored_rows(&stores);

            if rows.is_empty() {
                output::print_info("No saved preferences.");
                return Ok(true);
            }
            if let OutputFormat::Table = format {
                output::print_detail("Store file", &store.path().display().to_string());
            }
            output::print_list(&rows, format)?;
        }

        PrefsCommands::Clear { force } => {
            if !force {
                output::print_info(&format!(
                    "This deletes {}. Re-run with --force to confirm.",
                    store.path().display()
                ));
                return Ok(false);
            }
            store
                .remove()
                .with_context(|| format!("Failed to remove {}", store.path().display()))?;
            output::print_success("Saved preferences cleared");
        }

        PrefsCommands::Remember { snapshot } => {
            let mut session = Session::open(config, Some(&snapshot)).await?;
            session.controller.set_remember_me(&mut session.page, true);
            let saved = session.controller.stores().cookies.len() + session.controller.stores().local.len();
            session.close()?;

            match format {
                OutputFormat::Table => {
                    output::print_success(&format!("Remembered {} values in {}", saved, store.path().display()));
                }
                _ => output::print_item(
                    &serde_json::json!({ "remembered": saved, "path": store.path().display().to_string() }),
                    format,
                )?,
            }
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_rows_redacts_sensitive_keys() {
        let mut stores = Stores::new();
        stores.cookies.set("firstName", "Pat");
        stores.local.set("zip", "77002");

        let rows = stored_rows(&stores);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].store, "cookie");
        assert_eq!(rows[0].key, "firstName");
        assert_eq!(rows[1].store, "local");
        assert_eq!(rows[1].expires, "-");
    }
}
