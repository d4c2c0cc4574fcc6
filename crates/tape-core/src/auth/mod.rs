//! Local authentication.
//!
//! - `model`: `User`, `SessionUser` and the `UserDirectory`
//! - `error`: `AuthError`
//! - `repository`: Persistence traits for the directory and the session
//! - `store`: `AuthStore` (sign up, sign in, sign out)

mod error;
mod model;
mod repository;
mod store;

pub use error::AuthError;
pub use model::{SessionUser, User, UserDirectory, avatar_url};
pub use repository::{AuthSessionRepository, UserDirectoryRepository};
pub use store::AuthStore;
