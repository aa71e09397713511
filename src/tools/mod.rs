mod entry_scanner;
mod ffprobe_info;
mod path_validator;
mod schema_registry;

pub use entry_scanner::{scan_entry_dirs, scan_json_files};
pub use ffprobe_info::probe_duration_seconds;
pub use path_validator::{ensure_directory_exists, validate_directory_exists, validate_file_exists};
pub use schema_registry::{SchemaKind, SchemaRegistry};
