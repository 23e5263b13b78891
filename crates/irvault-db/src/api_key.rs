//! API key allow-list lookups.

use irvault_core::AppError;
use sqlx::PgPool;

/// Read-only repository over the API key allow-list table.
///
/// The table name is configurable (it belongs to another team), so it is
/// validated at config load and interpolated here; the key itself is always
/// bound as a parameter.
#[derive(Clone)]
pub struct ApiKeyRepository {
    pool: PgPool,
    table: String,
}

impl ApiKeyRepository {
    pub fn new(pool: PgPool, table: String) -> Self {
        Self { pool, table }
    }

    /// True when `key` exists in the allow-list with the active flag set.
    /// Every call re-queries; there is no caching layer.
    #[tracing::instrument(skip(self, key), fields(db.table = %self.table, db.operation = "select"))]
    pub async fn is_valid_api_key(&self, key: &str) -> Result<bool, AppError> {
        let query = format!(
            "SELECT 1 FROM {} WHERE api_key = $1 AND active LIMIT 1",
            self.table
        );
        let row: Option<(i32,)> = sqlx::query_as(&query)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}
