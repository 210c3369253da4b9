// Protected handlers (bearer token required, see middleware::auth)
pub mod apps;

pub use apps::*;
