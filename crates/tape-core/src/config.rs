//! Application configuration.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Which "AI" backend generation pretends to use.
///
/// Both providers run the same local classifier; the choice only changes
/// what gets logged.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Local,
    Gemini,
}

/// Contents of `config.toml`. Every field is optional in the file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub debug_logging: bool,
    pub enable_physics: bool,
    pub enable_post_processing: bool,
    pub ai_provider: AiProvider,
    /// Simulated "thinking" delay before a generation completes.
    pub generation_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug_logging: false,
            enable_physics: false,
            enable_post_processing: true,
            ai_provider: AiProvider::Local,
            generation_delay_ms: 1500,
        }
    }
}
