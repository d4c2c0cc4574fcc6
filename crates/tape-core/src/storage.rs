//! Key-value local storage abstraction.

use crate::error::Result;
use async_trait::async_trait;

/// Storage keys. Values are JSON text unless noted.
pub mod keys {
    /// `"light"` or `"dark"`, plain text.
    pub const THEME: &str = "tape-theme";
    /// Signed-in user without password.
    pub const SESSION: &str = "tape-session";
    /// Email to user record map.
    pub const USERS: &str = "tape-users";
    /// Chat list and current chat id as one document.
    pub const CHATS: &str = "tape-chats";
    /// Selected model id, plain text.
    pub const MODEL: &str = "tape-model";
    /// Present once the first-run notice was acknowledged.
    pub const FIRST_RUN_NOTICE: &str = "tape-first-run-notice";
}

/// String-keyed, string-valued persistent store.
///
/// Writes to a single key are atomic. There are no cross-key transactions.
#[async_trait]
pub trait LocalStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a key. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;
}
