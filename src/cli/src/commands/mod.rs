//! Subcommands and the page session they share.

pub mod check;
pub mod field;
pub mod prefs;
pub mod review;
pub mod states;
pub mod submit;

use anyhow::{Context, Result};
use intake_core::config::Config;
use intake_core::controller::FormController;
use intake_core::host::{intake_page, FormSnapshot, MemoryDocument};
use intake_core::persistence::StoreFile;
use intake_core::states::{load_states, source_for};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::Tabled;
use tracing::debug;

/// Resolve the store file: `persistence.store_path`, else the user data dir.
pub fn store_path(config: &Config) -> Result<PathBuf> {
    if let Some(ref path) = config.persistence.store_path {
        return Ok(PathBuf::from(path));
    }
    let data = dirs::data_dir().context("Could not determine data directory")?;
    Ok(data.join("intake").join("stores.json"))
}

/// One loaded page plus the controller driving it.
pub struct Session {
    pub controller: FormController,
    pub page: MemoryDocument,
    store: StoreFile,
}

impl Session {
    /// Load the page the way a visit does: stored preferences and the
    /// state list first, then the snapshot typed over them.
    pub async fn open(config: &Config, snapshot: Option<&Path>) -> Result<Self> {
        let store = StoreFile::new(store_path(config)?);
        debug!(store = %store.path().display(), "Opening intake page");
        let stores = store
            .load()
            .with_context(|| format!("Failed to load {}", store.path().display()))?;

        let mut page = intake_page(config);
        let mut controller = FormController::new(config, stores);
        controller.initialize(&mut page);

        let states = source_for(&config.states.source)?;
        load_states(states.as_ref(), &mut page, &config.states).await;

        if let Some(path) = snapshot {
            let snapshot = FormSnapshot::from_path(path)
                .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
            controller.fill(&mut page, &snapshot)?;
        }

        Ok(Self { controller, page, store })
    }

    /// Write whatever the visit persisted back to the store file.
    pub fn close(self) -> Result<()> {
        self.store
            .save(self.controller.stores())
            .with_context(|| format!("Failed to write {}", self.store.path().display()))?;
        Ok(())
    }
}

/// Per-field status line used by `check` and `submit`.
#[derive(Debug, Tabled, Serialize)]
pub struct FieldStatusRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Message")]
    pub message: String,
}

/// Rows for every field the gate blocked on.
pub fn blocking_rows(session: &Session, report: &intake_core::validation::GateReport) -> Vec<FieldStatusRow> {
    let errors = report.to_errors(&session.page);
    errors
        .iter()
        .map(|(field, errs)| FieldStatusRow {
            field: field.clone(),
            status: if report.missing_required.contains(field) && !report.invalid_fields.contains(field) {
                "missing".to_string()
            } else {
                "invalid".to_string()
            },
            message: errs
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        })
        .collect()
}
