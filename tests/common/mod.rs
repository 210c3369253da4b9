#![allow(dead_code)]

pub mod server;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use dify_app_adapter::auth::ApiKeyAuthenticator;
use dify_app_adapter::database::{AppRecord, AppRow, AppStore, DatabaseError};
use dify_app_adapter::server::app;
use dify_app_adapter::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

pub const API_KEY: &str = "test-secret";

/// One row of the `apps` table plus its optional `app` token
#[derive(Debug, Clone)]
pub struct SeedApp {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub mode: String,
    pub enable_api: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub token: Option<String>,
}

impl SeedApp {
    /// Enabled, normal app created `age_minutes` ago
    pub fn new(id: &str, name: &str, age_minutes: i64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(format!("{} description", name)),
            mode: "chat".to_string(),
            enable_api: true,
            status: "normal".to_string(),
            created_at: Utc::now() - Duration::minutes(age_minutes),
            token: Some(format!("app-{}", id)),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enable_api = false;
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }
}

/// The `u1`/`bot` application used in the documented scenarios
pub fn bot_app() -> SeedApp {
    SeedApp {
        id: "u1".to_string(),
        name: "bot".to_string(),
        description: None,
        mode: "chat".to_string(),
        enable_api: true,
        status: "normal".to_string(),
        created_at: Utc::now(),
        token: Some("app-abc".to_string()),
    }
}

/// In-memory stand-in for the `apps` / `api_tokens` join
#[derive(Default)]
pub struct MemoryAppStore {
    apps: Vec<SeedApp>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MemoryAppStore {
    pub fn new(apps: Vec<SeedApp>) -> Self {
        Self { apps, ..Default::default() }
    }

    /// Every query fails with the given message
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn visible<F>(&self, include: F) -> Result<Vec<AppRecord>, DatabaseError>
    where
        F: Fn(&SeedApp) -> bool,
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(DatabaseError::Sqlx(sqlx::Error::Protocol(message.clone())));
        }

        let mut apps: Vec<&SeedApp> = self
            .apps
            .iter()
            .filter(|app| app.enable_api && app.status == "normal")
            .filter(|app| include(*app))
            .collect();
        apps.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(apps
            .into_iter()
            .map(|app| {
                AppRecord::from(AppRow {
                    id: app.id.clone(),
                    name: app.name.clone(),
                    description: app.description.clone(),
                    mode: app.mode.clone(),
                    enable_api: app.enable_api,
                    created_at: app.created_at.naive_utc(),
                    api_key: app.token.clone(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl AppStore for MemoryAppStore {
    async fn list_enabled_apps(&self) -> Result<Vec<AppRecord>, DatabaseError> {
        self.visible(|_| true)
    }

    async fn find_apps_by_ids(&self, ids: &[String]) -> Result<Vec<AppRecord>, DatabaseError> {
        self.visible(|app| ids.contains(&app.id))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryAppStore>,
}

impl TestApp {
    pub fn new(apps: Vec<SeedApp>) -> Self {
        Self::with_store(MemoryAppStore::new(apps), API_KEY)
    }

    pub fn with_store(store: MemoryAppStore, api_key: &str) -> Self {
        let store = Arc::new(store);
        let state = AppState::new(ApiKeyAuthenticator::new(api_key), store.clone());
        Self {
            router: app(state, false),
            store,
        }
    }

    pub fn with_state(store: MemoryAppStore, configure: impl FnOnce(AppState) -> AppState) -> Self {
        let store = Arc::new(store);
        let state = configure(AppState::new(ApiKeyAuthenticator::new(API_KEY), store.clone()));
        Self {
            router: app(state, false),
            store,
        }
    }

    /// Send a request and decode the JSON body
    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, body))
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.send(authorized(Method::GET, uri).body(Body::empty())?).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let request = authorized(Method::POST, uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body)?))?;
        self.send(request).await
    }
}

/// Request builder carrying the valid bearer token
pub fn authorized(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", API_KEY))
}

/// Ids of the records in a `data` array, in order
pub fn ids_of(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|data| {
            data.iter()
                .filter_map(|record| record["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
