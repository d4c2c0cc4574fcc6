//! Local storage implementations.

pub mod atomic_file;
pub mod file_local_storage;
pub mod memory_local_storage;

pub use atomic_file::AtomicFile;
pub use file_local_storage::FileLocalStorage;
pub use memory_local_storage::MemoryLocalStorage;
