//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含主要邏輯和專用工具

pub mod content_validator;
pub mod lesson_importer;
pub mod thumbnail_generator;

pub use content_validator::ContentValidator;
pub use lesson_importer::LessonImporter;
pub use thumbnail_generator::ThumbnailGenerator;
