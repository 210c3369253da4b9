pub mod check_db;
pub mod config;
pub mod serve;
