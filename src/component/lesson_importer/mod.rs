//! 課程匯入元件
//!
//! 將來源影片與課程設定整理成內容目錄的課程資料夾

mod description;
mod folder_name;
mod importer;
mod main;

pub use description::render_description;
pub use folder_name::{MAX_SLUG_CHARS, lesson_folder_name, slugify_title};
pub use importer::{ImportResult, LessonImporter, load_import_config};
pub use main::{run_import, run_interactive};
