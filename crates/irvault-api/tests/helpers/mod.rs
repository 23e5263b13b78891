//! Shared test fixtures: in-memory fakes for the warehouse ledger, storage
//! backend, and processor notifier, plus a TestServer wired exactly like
//! the production router.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use irvault_api::setup::routes::build_router;
use irvault_api::state::AppState;
use irvault_core::models::{MasterDataRow, NewUpload, UploadRecord};
use irvault_core::{AppError, Config};
use irvault_db::UploadLedger;
use irvault_services::ProcessorNotifier;
use irvault_storage::{Storage, StorageError, StorageResult, StoredObject};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use uuid::Uuid;

pub const VALID_KEY: &str = "test-key-1";

#[derive(Default)]
pub struct FakeLedger {
    pub valid_keys: Vec<String>,
    pub records: Mutex<Vec<NewUpload>>,
    pub master_rows: Vec<MasterDataRow>,
    pub fail_record: bool,
    pub key_checks: Mutex<usize>,
}

#[async_trait]
impl UploadLedger for FakeLedger {
    async fn is_valid_api_key(&self, key: &str) -> Result<bool, AppError> {
        *self.key_checks.lock().unwrap() += 1;
        Ok(self.valid_keys.iter().any(|k| k == key))
    }

    async fn record_upload(&self, upload: &NewUpload) -> Result<UploadRecord, AppError> {
        if self.fail_record {
            return Err(AppError::Internal("warehouse unavailable".to_string()));
        }
        self.records.lock().unwrap().push(upload.clone());
        Ok(UploadRecord {
            file_id: Uuid::new_v4(),
            file_original_name: upload.file_original_name.clone(),
            file_new_name: upload.file_new_name.clone(),
            date_uploaded: Utc::now(),
            uploaded_by: upload.uploaded_by.clone(),
            ir_type: upload.ir_type.clone(),
            ir_description: upload.ir_description.clone(),
        })
    }

    async fn master_data(&self, user: &str) -> Result<Vec<MasterDataRow>, AppError> {
        Ok(self
            .master_rows
            .iter()
            .filter(|row| row.uploaded_by == user)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakeStorage {
    pub uploads: Mutex<Vec<String>>,
    /// Object names containing this substring fail the upload step.
    pub fail_on: Option<String>,
}

#[async_trait]
impl Storage for FakeStorage {
    async fn upload_file(
        &self,
        local_path: &Path,
        object_name: &str,
    ) -> StorageResult<StoredObject> {
        assert!(
            local_path.exists(),
            "storage must be handed a staged file that exists"
        );
        if let Some(needle) = &self.fail_on {
            if object_name.contains(needle.as_str()) {
                return Err(StorageError::UploadFailed(
                    "injected storage failure".to_string(),
                ));
            }
        }
        self.uploads.lock().unwrap().push(object_name.to_string());
        Ok(StoredObject {
            id: format!("obj-{}", object_name),
            name: object_name.to_string(),
            web_view_link: None,
        })
    }

    async fn delete(&self, _object_id: &str) -> StorageResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    pub submissions: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl ProcessorNotifier for FakeNotifier {
    async fn submit(&self, _local_path: &Path, file_name: &str) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Notify("processor unreachable".to_string()));
        }
        self.submissions.lock().unwrap().push(file_name.to_string());
        Ok(())
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub ledger: Arc<FakeLedger>,
    pub storage: Arc<FakeStorage>,
    pub notifier: Arc<FakeNotifier>,
    pub temp_folder: PathBuf,
    // Held so the staging directory outlives the test.
    _temp_dir: TempDir,
}

impl TestApp {
    /// Filenames currently staged in the temp folder.
    pub fn staged_files(&self) -> Vec<String> {
        std::fs::read_dir(&self.temp_folder)
            .expect("temp folder readable")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect()
    }
}

#[derive(Default)]
pub struct TestAppBuilder {
    fail_record: bool,
    fail_notify: bool,
    storage_fail_on: Option<String>,
    master_rows: Vec<MasterDataRow>,
}

impl TestAppBuilder {
    pub fn fail_metadata_recording(mut self) -> Self {
        self.fail_record = true;
        self
    }

    pub fn fail_notifications(mut self) -> Self {
        self.fail_notify = true;
        self
    }

    pub fn fail_storage_for(mut self, needle: &str) -> Self {
        self.storage_fail_on = Some(needle.to_string());
        self
    }

    pub fn with_master_rows(mut self, rows: Vec<MasterDataRow>) -> Self {
        self.master_rows = rows;
        self
    }

    pub fn build(self) -> TestApp {
        let temp_dir = TempDir::new().expect("temp dir");
        let temp_folder = temp_dir.path().join("staging");
        std::fs::create_dir_all(&temp_folder).expect("staging dir");

        let config = Config {
            server_port: 0,
            database_url: "postgres://unused".to_string(),
            db_max_connections: 1,
            db_timeout_seconds: 1,
            temp_folder: temp_folder.clone(),
            upload_folder_id: "folder-1".to_string(),
            project_name: "test-project".to_string(),
            drive_secret_id: "drive-secret".to_string(),
            drive_scope: None,
            writer_secret_id: None,
            reader_secret_id: None,
            api_secret_id: None,
            api_key_table: "api_keys".to_string(),
            processor_url: "http://processor.invalid".to_string(),
            secret_manager_token: None,
            outbound_timeout_secs: 1,
        };

        let ledger = Arc::new(FakeLedger {
            valid_keys: vec![VALID_KEY.to_string()],
            fail_record: self.fail_record,
            master_rows: self.master_rows,
            ..FakeLedger::default()
        });
        let storage = Arc::new(FakeStorage {
            fail_on: self.storage_fail_on,
            ..FakeStorage::default()
        });
        let notifier = Arc::new(FakeNotifier {
            fail: self.fail_notify,
            ..FakeNotifier::default()
        });

        let state = Arc::new(AppState::new(
            config,
            ledger.clone(),
            storage.clone(),
            notifier.clone(),
        ));
        let server = TestServer::new(build_router(state)).expect("test server");

        TestApp {
            server,
            ledger,
            storage,
            notifier,
            temp_folder,
            _temp_dir: temp_dir,
        }
    }
}

pub fn test_app() -> TestApp {
    TestAppBuilder::default().build()
}
