// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection settings shared by both OpenAI dialects.

use serde::{Deserialize, Serialize};

/// Default model used when none is specified.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Vendor-specific configuration for the OpenAI API.
///
/// Values are opaque strings to this crate; they exist so applications can
/// keep everything a vendor client needs next to the dialect functions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    /// OpenAI API key (e.g. `sk-...`).
    pub api_key: String,

    /// Base URL for API requests.
    pub base_url: String,

    /// Model identifier (e.g. `gpt-4o`).
    pub model: String,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".into(),
            model: DEFAULT_MODEL.into(),
        }
    }
}

impl OpenAIConfig {
    /// Reads the API key from `OPENAI_API_KEY` when set.
    ///
    /// A missing variable leaves the key empty rather than failing;
    /// credential checks belong to the vendor client.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.api_key = key;
        }
        config
    }
}
