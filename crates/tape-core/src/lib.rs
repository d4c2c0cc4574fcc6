//! Domain layer of the Tape prompt-to-object studio.
//!
//! Pure generation (`generation`), scene interpretation (`scene`), and the
//! chat, auth and preference stores with their repository traits.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod generation;
pub mod scene;
pub mod state;
pub mod storage;
pub mod training;

// Re-export common error type
pub use error::{Result, TapeError};
