use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::Result;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub store: StoreConfig,
    pub suggest: SuggestConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            suggest: SuggestConfig::default(),
        }
    }
}

/// Which backing store holds the message log and suggestion set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackendType {
    /// Firestore REST. Needs real project credentials.
    Firestore,
    /// In-memory store, local to this page load. No credentials.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackendType,
    pub project_id: String,
    pub api_key: String,
    /// Poll cadence for live snapshots on the REST backend.
    pub poll_interval_ms: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        // Placeholders — replace with your project values.
        Self {
            backend: StoreBackendType::Firestore,
            project_id: "YOUR_PROJECT_ID".to_string(),
            api_key: "YOUR_API_KEY".to_string(),
            poll_interval_ms: 2_000,
        }
    }
}

impl StoreConfig {
    /// True when the selected backend can actually be opened.
    /// Placeholder credentials leave the composer permanently disabled.
    pub fn is_configured(&self) -> bool {
        match self.backend {
            StoreBackendType::Memory => true,
            StoreBackendType::Firestore => {
                !self.project_id.is_empty()
                    && self.project_id != "YOUR_PROJECT_ID"
                    && !self.api_key.is_empty()
                    && self.api_key != "YOUR_API_KEY"
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(RelayError::Config(
                "store is not configured, add your project values in RelayConfig".to_string(),
            ))
        }
    }
}

/// Configuration of the AI suggestion service call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// OpenAI-compatible API base. None uses the OpenAI default.
    pub api_base: Option<String>,
    pub api_key: String,
    pub model: String,
    pub max_output_tokens: u32,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            api_key: String::new(),
            model: "gpt-4.1-mini".to_string(),
            max_output_tokens: 120,
        }
    }
}

impl SuggestConfig {
    pub const DEFAULT_API_BASE: &'static str = "https://api.openai.com";

    pub fn base_url(&self) -> &str {
        self.api_base.as_deref().unwrap_or(Self::DEFAULT_API_BASE)
    }
}
