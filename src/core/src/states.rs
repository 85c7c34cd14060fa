//! The state dropdown's option list.
//!
//! The list is a newline-delimited text document read from a file or over
//! HTTP. Loading it never blocks validation: failures are logged and the
//! select is left as it was.

use crate::config::StatesConfig;
use crate::error::{IntakeError, Result};
use crate::host::FormHost;
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// Where the state list comes from.
#[async_trait]
pub trait StateListSource: Send + Sync {
    /// Read the raw list text.
    async fn fetch(&self) -> Result<String>;

    /// Human-readable location, for logs and errors.
    fn describe(&self) -> String;
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sources
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct FileStateSource {
    path: PathBuf,
}

impl FileStateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StateListSource for FileStateSource {
    async fn fetch(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| IntakeError::state_list(self.describe(), e.to_string()).with_source(e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct HttpStateSource {
    client: Client,
    url: String,
}

impl HttpStateSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl StateListSource for HttpStateSource {
    async fn fetch(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IntakeError::state_list(
                &self.url,
                format!("Network response was not ok: {}", status),
            ));
        }
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Pick a source by location: `http://` and `https://` go over the network,
/// anything else is a file path.
pub fn source_for(location: &str) -> Result<Box<dyn StateListSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpStateSource::new(location)?))
    } else {
        Ok(Box::new(FileStateSource::new(location)))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════════════════

/// Split list text into trimmed, non-empty state names.
pub fn parse_state_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn fetch_states(source: &dyn StateListSource) -> Result<Vec<String>> {
    let text = source.fetch().await?;
    Ok(parse_state_list(&text))
}

/// Fill the state select. Returns the number of options added; on failure
/// the error is logged, the select is untouched and 0 is returned.
pub async fn load_states<H: FormHost + ?Sized>(
    source: &dyn StateListSource,
    host: &mut H,
    config: &StatesConfig,
) -> usize {
    match fetch_states(source).await {
        Ok(states) => {
            host.set_options(&config.select_id, &config.placeholder, &states);
            info!(source = %source.describe(), count = states.len(), "Loaded state list");
            states.len()
        }
        Err(e) => {
            error!(source = %source.describe(), error = %e, "Error loading states");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_skips_blank() {
        let states = parse_state_list("Alabama\r\n  Alaska \n\nArizona\n");
        assert_eq!(states, vec!["Alabama", "Alaska", "Arizona"]);
    }

    #[test]
    fn test_source_for() {
        assert_eq!(source_for("states.html").unwrap().describe(), "states.html");
        assert_eq!(
            source_for("https://example.com/states.html").unwrap().describe(),
            "https://example.com/states.html"
        );
    }
}
