//! Application state.
//!
//! One `AppState` is constructed at startup and shared across requests.
//! The warehouse, storage, and notifier collaborators sit behind trait
//! objects so integration tests can swap in in-memory fakes. The underlying
//! production clients (`PgPool`, `reqwest::Client`) are documented safe for
//! concurrent use; nothing here is mutated after construction.

use irvault_core::Config;
use irvault_db::UploadLedger;
use irvault_services::ProcessorNotifier;
use irvault_storage::Storage;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub ledger: Arc<dyn UploadLedger>,
    pub storage: Arc<dyn Storage>,
    pub notifier: Arc<dyn ProcessorNotifier>,
}

impl AppState {
    pub fn new(
        config: Config,
        ledger: Arc<dyn UploadLedger>,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn ProcessorNotifier>,
    ) -> Self {
        Self {
            config,
            ledger,
            storage,
            notifier,
        }
    }
}
