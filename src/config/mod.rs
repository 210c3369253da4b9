use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while turning configuration into something usable
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    /// Full connection URL; takes precedence over the individual parts
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared bearer secret. Empty means every protected request is rejected.
    pub api_key: String,
    /// Replace database error detail in 500 bodies with a generic message
    pub redact_internal_errors: bool,
}

impl AdapterConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Preset first, then individual overrides
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database overrides
        if let Some(v) = lookup("DB_USERNAME") {
            self.database.username = v;
        }
        if let Some(v) = lookup("DB_PASSWORD") {
            self.database.password = v;
        }
        if let Some(v) = lookup("DB_HOST") {
            self.database.host = v;
        }
        if let Some(v) = lookup("DB_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Some(v) = lookup("DB_DATABASE") {
            self.database.database = v;
        }
        if let Some(v) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.database.url = Some(v);
        }
        if let Some(v) = lookup("DB_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs = v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }

        // Server overrides
        if let Some(v) = lookup("ADAPTER_HOST") {
            self.server.host = v;
        }
        if let Some(port) = lookup("ADAPTER_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }
        if let Some(v) = lookup("ADAPTER_ENABLE_CORS") {
            self.server.enable_cors = v.parse().unwrap_or(self.server.enable_cors);
        }

        // Security overrides
        if let Some(v) = lookup("ADAPTER_API_KEY") {
            self.security.api_key = v;
        }
        if let Some(v) = lookup("ADAPTER_REDACT_ERRORS") {
            self.security.redact_internal_errors = v.parse().unwrap_or(self.security.redact_internal_errors);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                acquire_timeout_secs: 30,
                ..DatabaseConfig::default()
            },
            server: ServerConfig::default(),
            security: SecurityConfig {
                api_key: String::new(),
                redact_internal_errors: false,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                acquire_timeout_secs: 10,
                ..DatabaseConfig::default()
            },
            server: ServerConfig::default(),
            security: SecurityConfig {
                api_key: String::new(),
                redact_internal_errors: false,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                acquire_timeout_secs: 5,
                ..DatabaseConfig::default()
            },
            server: ServerConfig::default(),
            security: SecurityConfig {
                api_key: String::new(),
                redact_internal_errors: true,
            },
        }
    }

    /// Copy with secrets masked, suitable for printing
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.database.password = mask(&copy.database.password);
        copy.security.api_key = mask(&copy.security.api_key);
        if let Some(url) = copy.database.url.as_deref() {
            copy.database.url = Some(match url::Url::parse(url) {
                Ok(mut parsed) if parsed.password().is_some() => {
                    let _ = parsed.set_password(Some("****"));
                    parsed.to_string()
                }
                Ok(parsed) => parsed.to_string(),
                Err(_) => "****".to_string(),
            });
        }
        copy
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            username: "postgres".to_string(),
            password: "difyai123456".to_string(),
            host: "db".to_string(),
            port: 5432,
            database: "dify".to_string(),
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Connection URL, assembled from the parts unless `url` is set.
    /// Credentials are percent-encoded by `url::Url`.
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        let mut url = url::Url::parse("postgresql://localhost")
            .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()))?;
        url.set_host(Some(&self.host))
            .map_err(|e| ConfigError::InvalidDatabaseUrl(format!("host '{}': {}", self.host, e)))?;
        url.set_port(Some(self.port))
            .map_err(|_| ConfigError::InvalidDatabaseUrl(format!("port {}", self.port)))?;
        url.set_username(&self.username)
            .map_err(|_| ConfigError::InvalidDatabaseUrl("username".to_string()))?;
        url.set_password(Some(&self.password))
            .map_err(|_| ConfigError::InvalidDatabaseUrl("password".to_string()))?;
        url.set_path(&format!("/{}", self.database));
        Ok(url.into())
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5003,
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "****".to_string()
    }
}
