// Reserved action types - slices must never use these for their own actions
pub const INIT_ACTION_TYPE: &str = "@@INIT";
pub const REPLACE_ACTION_TYPE: &str = "@@REPLACE";

// Store defaults
pub const DEFAULT_HISTORY_LIMIT: usize = 200;
pub const DEFAULT_LOG_ACTIONS: bool = false;

// Map viewport defaults
pub const DEFAULT_MAP_ZOOM: f64 = 14.0;
pub const MIN_MAP_ZOOM: f64 = 1.0;
pub const MAX_MAP_ZOOM: f64 = 20.0;
