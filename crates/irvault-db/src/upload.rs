//! Upload metadata repository.
//!
//! `store_upload_master` is append-only from this service's point of view:
//! one row per accepted upload, never updated, never deleted.

use chrono::{DateTime, Utc};
use irvault_core::models::{format_display_timestamp, MasterDataRow, NewUpload, UploadRecord};
use irvault_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct MasterDataDbRow {
    file_id: Uuid,
    file_new_name: String,
    file_original_name: String,
    date_uploaded: DateTime<Utc>,
    uploaded_by: String,
    ir_type: String,
    ir_description: String,
    error: String,
    document_type: Option<String>,
}

impl From<MasterDataDbRow> for MasterDataRow {
    fn from(row: MasterDataDbRow) -> Self {
        MasterDataRow {
            file_id: row.file_id,
            file_new_name: row.file_new_name,
            file_original_name: row.file_original_name,
            date_uploaded: format_display_timestamp(row.date_uploaded),
            uploaded_by: row.uploaded_by,
            ir_type: row.ir_type,
            ir_description: row.ir_description,
            error: row.error,
            document_type: row.document_type,
        }
    }
}

#[derive(Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one UploadRecord with a fresh file_id and the current server
    /// timestamp. Metadata insert and storage upload are independent side
    /// effects; there is no transaction spanning the two.
    #[tracing::instrument(
        skip(self, upload),
        fields(db.table = "store_upload_master", db.operation = "insert")
    )]
    pub async fn record_upload(&self, upload: &NewUpload) -> Result<UploadRecord, AppError> {
        let file_id = Uuid::new_v4();

        let (date_uploaded,): (DateTime<Utc>,) = sqlx::query_as(
            r#"
            INSERT INTO store_upload_master (
                file_id,
                file_original_name,
                file_new_name,
                date_uploaded,
                uploaded_by,
                ir_type,
                ir_description
            )
            VALUES ($1, $2, $3, NOW(), $4, $5, $6)
            RETURNING date_uploaded
            "#,
        )
        .bind(file_id)
        .bind(&upload.file_original_name)
        .bind(&upload.file_new_name)
        .bind(&upload.uploaded_by)
        .bind(&upload.ir_type)
        .bind(&upload.ir_description)
        .fetch_one(&self.pool)
        .await?;

        Ok(UploadRecord {
            file_id,
            file_original_name: upload.file_original_name.clone(),
            file_new_name: upload.file_new_name.clone(),
            date_uploaded,
            uploaded_by: upload.uploaded_by.clone(),
            ir_type: upload.ir_type.clone(),
            ir_description: upload.ir_description.clone(),
        })
    }

    /// Latest upload per original filename for one user, joined with any
    /// extraction result whose filename's trailing path segment matches the
    /// generated name, newest first.
    ///
    /// When two rows share an identical timestamp the window ordering is
    /// unspecified and no tie-break is imposed.
    #[tracing::instrument(
        skip(self),
        fields(db.table = "store_upload_master", db.operation = "select")
    )]
    pub async fn master_data(&self, user: &str) -> Result<Vec<MasterDataRow>, AppError> {
        let rows: Vec<MasterDataDbRow> = sqlx::query_as(
            r#"
            WITH latest AS (
                SELECT
                    file_id,
                    file_new_name,
                    file_original_name,
                    date_uploaded,
                    ROW_NUMBER() OVER (
                        PARTITION BY file_original_name
                        ORDER BY date_uploaded DESC
                    ) AS rn
                FROM store_upload_master
            )
            SELECT
                latest.file_id,
                latest.file_new_name,
                latest.file_original_name,
                latest.date_uploaded,
                master.uploaded_by,
                master.ir_type,
                master.ir_description,
                COALESCE(extracts.error, '') AS error,
                LOWER(extracts.document_type) AS document_type
            FROM latest
            JOIN store_upload_master AS master
                ON master.file_id = latest.file_id
            LEFT JOIN data_extracts AS extracts
                ON regexp_replace(extracts.file_name, '^.*/', '') = latest.file_new_name
            WHERE latest.rn = 1
              AND master.uploaded_by = $1
            ORDER BY latest.date_uploaded DESC
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MasterDataRow::from).collect())
    }
}
