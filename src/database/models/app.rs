use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row as selected from `apps` left-joined with `api_tokens`
#[derive(Debug, Clone, FromRow)]
pub struct AppRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub mode: String,
    pub enable_api: bool,
    pub created_at: NaiveDateTime,
    pub api_key: Option<String>,
}

/// Public shape of an application in every response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    pub id: String,
    /// Same value as `name`; clients key on it
    pub code: String,
    pub name: String,
    pub description: String,
    pub api_key: Option<String>,
    pub mode: String,
    pub enable_api: bool,
}

impl From<AppRow> for AppRecord {
    fn from(row: AppRow) -> Self {
        Self {
            id: row.id,
            code: row.name.clone(),
            name: row.name,
            description: row.description.unwrap_or_default(),
            api_key: row.api_key.filter(|key| !key.is_empty()),
            mode: row.mode,
            enable_api: row.enable_api,
        }
    }
}
