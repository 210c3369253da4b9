pub mod app;

pub use app::{AppRecord, AppRow};
