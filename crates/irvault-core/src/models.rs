//! Domain models for upload metadata.

use chrono::{DateTime, Utc};
use chrono_tz::Asia::Manila;
use serde::Serialize;
use uuid::Uuid;

/// Display format used by the master-data endpoint, in the service's
/// home timezone.
const DISPLAY_TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// One row of persisted metadata for a single accepted upload.
/// Append-only: never mutated or deleted by this system.
#[derive(Debug, Clone, Serialize)]
pub struct UploadRecord {
    pub file_id: Uuid,
    pub file_original_name: String,
    pub file_new_name: String,
    pub date_uploaded: DateTime<Utc>,
    pub uploaded_by: String,
    pub ir_type: String,
    pub ir_description: String,
}

/// Fields supplied by the caller for a new upload row; `file_id` and
/// `date_uploaded` are generated server-side at insert time.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub file_original_name: String,
    pub file_new_name: String,
    pub ir_type: String,
    pub ir_description: String,
    pub uploaded_by: String,
}

/// Flat row returned by the master-data query: the latest upload per
/// original filename for one user, joined with the asynchronous extraction
/// result when one exists.
#[derive(Debug, Clone, Serialize)]
pub struct MasterDataRow {
    pub file_id: Uuid,
    pub file_new_name: String,
    pub file_original_name: String,
    pub date_uploaded: String,
    pub uploaded_by: String,
    pub ir_type: String,
    pub ir_description: String,
    /// Empty string when the extract has no error recorded.
    pub error: String,
    /// Lowercased document type; `null` until the processor has produced one.
    pub document_type: Option<String>,
}

/// Render a stored timestamp in the Manila-localised display format used
/// by the master-data endpoint.
pub fn format_display_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Manila)
        .format(DISPLAY_TIMESTAMP_FORMAT)
        .to_string()
}
