use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{AppRecord, AppRow};
use crate::database::query_builder::{AppQuery, MAX_BIND_PARAMS};

/// Read access to API-enabled applications.
///
/// Implementations only ever return apps with `status = 'normal'` and the
/// API enabled, newest first.
#[async_trait]
pub trait AppStore: Send + Sync {
    async fn list_enabled_apps(&self) -> Result<Vec<AppRecord>, DatabaseError>;

    /// Ids with no matching visible app are left out of the result.
    async fn find_apps_by_ids(&self, ids: &[String]) -> Result<Vec<AppRecord>, DatabaseError>;
}

/// PostgreSQL-backed store reading the `apps` and `api_tokens` tables
#[derive(Debug, Clone)]
pub struct PgAppStore {
    pool: PgPool,
}

impl PgAppStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppStore for PgAppStore {
    async fn list_enabled_apps(&self) -> Result<Vec<AppRecord>, DatabaseError> {
        let rows = AppQuery::enabled().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(AppRecord::from).collect())
    }

    async fn find_apps_by_ids(&self, ids: &[String]) -> Result<Vec<AppRecord>, DatabaseError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut rows = Vec::new();
        for chunk in ids.chunks(MAX_BIND_PARAMS) {
            rows.extend(AppQuery::enabled().with_ids(chunk).fetch_all(&self.pool).await?);
        }
        sort_newest_first(&mut rows);
        Ok(rows.into_iter().map(AppRecord::from).collect())
    }
}

/// Stable, so rows sharing a timestamp keep their query order
fn sort_newest_first(rows: &mut [AppRow]) {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
