//! Snapshot persistence.
//!
//! The whole application state is serialized as a single JSON document and
//! rehydrated whole on startup. The storage backend is abstracted behind
//! [`SnapshotStorage`] so the domain layer never touches the filesystem
//! directly; tests swap in the in-memory implementation.

pub mod json_file;
pub mod memory;
pub mod traits;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use traits::SnapshotStorage;
