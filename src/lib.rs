pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;

pub use config::AdapterConfig;
pub use database::{AppRecord, AppStore, DatabaseError};
pub use error::ApiError;
pub use state::AppState;
