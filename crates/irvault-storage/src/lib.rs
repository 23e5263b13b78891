//! Storage backends for the irvault upload backend.
//!
//! The `Storage` trait abstracts over the drive-style object store the
//! service forwards uploads to. Production uses `DriveStorage` (HTTP);
//! tests and local development use `LocalStorage`.

mod drive;
mod local;
mod traits;

pub use drive::DriveStorage;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
