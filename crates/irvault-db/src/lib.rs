//! Warehouse repositories for the irvault upload backend.
//!
//! Repositories are concrete structs owning a `PgPool`. The `UploadLedger`
//! trait is the seam the API layer depends on, so handlers can be exercised
//! against an in-memory fake in tests.

pub mod api_key;
pub mod ledger;
pub mod upload;

pub use api_key::ApiKeyRepository;
pub use ledger::{UploadLedger, WarehouseLedger};
pub use upload::UploadRepository;
