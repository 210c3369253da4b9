pub mod by_ids;
pub mod list;

// Re-export handler functions for use in routing
pub use by_ids::get as apps_by_ids_get;
pub use by_ids::post as apps_by_ids_post;
pub use list::get as apps_get;
