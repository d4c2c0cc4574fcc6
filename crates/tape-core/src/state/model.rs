//! User preferences.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Model identifiers offered in the model picker. Selection is cosmetic.
pub const SUPPORTED_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-1.5-pro", "local-keywords"];

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Color theme of the shell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Persisted shell preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub model: String,
    /// Whether the first-run notice was already acknowledged.
    pub first_run_notice_seen: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            model: DEFAULT_MODEL.to_string(),
            first_run_notice_seen: false,
        }
    }
}

pub fn is_supported_model(model: &str) -> bool {
    SUPPORTED_MODELS.contains(&model)
}
