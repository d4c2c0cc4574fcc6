//! Application layer for Tape.
//!
//! Coordinates the domain stores and infrastructure repositories into the
//! use cases the shell drives.

pub mod bootstrap;
pub mod generation_service;
pub mod notice;
pub mod studio_usecase;

pub use bootstrap::bootstrap;
pub use generation_service::{Generation, GenerationService};
pub use notice::{Notice, NoticeLevel};
pub use studio_usecase::{StudioUseCase, submit_shared};
