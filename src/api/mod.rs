pub mod format;

pub use format::{normalize_ids, parse_id_list, AppDataResponse, AppListResponse, IdsBody, IdsQuery};
