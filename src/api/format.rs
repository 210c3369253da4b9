use serde::{Deserialize, Serialize};

use crate::database::AppRecord;

/// `GET /apps` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppListResponse {
    pub data: Vec<AppRecord>,
    pub total: usize,
}

impl From<Vec<AppRecord>> for AppListResponse {
    fn from(data: Vec<AppRecord>) -> Self {
        let total = data.len();
        Self { data, total }
    }
}

/// `/apps/by-ids` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDataResponse {
    pub data: Vec<AppRecord>,
}

#[derive(Debug, Deserialize)]
pub struct IdsQuery {
    pub ids: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdsBody {
    pub ids: Option<Vec<String>>,
}

/// Split a comma separated id list, trimming and dropping blanks
pub fn parse_id_list(raw: &str) -> Vec<String> {
    normalize_ids(raw.split(','))
}

/// Trim each id and drop the empty ones. Order and duplicates are kept.
pub fn normalize_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .map(|id| id.as_ref().trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}
