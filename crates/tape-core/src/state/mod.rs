//! Shell preferences: theme, selected model and the first-run notice.

mod model;
mod repository;

pub use model::{DEFAULT_MODEL, Preferences, SUPPORTED_MODELS, Theme, is_supported_model};
pub use repository::PreferencesRepository;
