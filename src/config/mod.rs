pub mod load;
pub mod save;
pub mod types;

pub use types::{Config, DEFAULT_THUMBNAIL_TIMESTAMP, MAX_RECENT_PATHS, UserSettings};
