use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::AppRow;

const SELECT_APPS: &str = "SELECT \
    a.id::text AS id, \
    a.name, \
    a.description, \
    a.mode, \
    a.enable_api, \
    a.created_at, \
    t.token AS api_key \
FROM apps a \
LEFT JOIN api_tokens t ON a.id = t.app_id AND t.type = 'app'";

const ORDER_BY: &str = "ORDER BY a.created_at DESC";

/// Upper bound on bind parameters in one PostgreSQL statement
pub const MAX_BIND_PARAMS: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<String>,
}

/// Builds the app listing query. Visibility filters are always present;
/// every caller-supplied value goes through a numbered placeholder.
#[derive(Debug)]
pub struct AppQuery {
    conditions: Vec<String>,
    param_values: Vec<String>,
    param_index: usize,
}

impl AppQuery {
    /// Apps with `status = 'normal'` and the API enabled
    pub fn enabled() -> Self {
        Self {
            conditions: vec!["a.enable_api = true".to_string(), "a.status = 'normal'".to_string()],
            param_values: vec![],
            param_index: 0,
        }
    }

    /// Restrict to the given ids, one bound parameter per id.
    /// The key is compared in text form so a malformed id just misses.
    /// Callers split longer lists into chunks of at most [`MAX_BIND_PARAMS`].
    pub fn with_ids(mut self, ids: &[String]) -> Self {
        if ids.is_empty() {
            self.conditions.push("1=0".to_string());
            return self;
        }
        let params: Vec<String> = ids.iter().map(|id| self.param(id.clone())).collect();
        self.conditions.push(format!("a.id::text IN ({})", params.join(", ")));
        self
    }

    pub fn to_sql(&self) -> SqlResult {
        SqlResult {
            query: format!("{} WHERE {} {}", SELECT_APPS, self.conditions.join(" AND "), ORDER_BY),
            params: self.param_values.clone(),
        }
    }

    pub async fn fetch_all(self, pool: &PgPool) -> Result<Vec<AppRow>, DatabaseError> {
        let sql_result = self.to_sql();
        let mut q = sqlx::query_as::<_, AppRow>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = q.bind(p);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }

    fn param(&mut self, value: String) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}
