//! 內容一致性驗證元件
//!
//! 檢查課程與課程計畫的中繼資料是否符合 schema、彼此引用是否完整，
//! 並將錯誤與警告寫入 validation_report.json

mod category_checker;
mod lesson_validator;
mod main;
mod program_validator;
mod registry;
mod report;

pub use category_checker::{EXPECTED_CATEGORIES, validate_categories};
pub use lesson_validator::{
    DURATION_RANGE_MINUTES, MIN_TAG_COUNT, MIN_VIDEO_SIZE_BYTES, validate_all_lessons,
    validate_lesson,
};
pub use main::{ContentValidator, ValidationOutcome, run_interactive};
pub use program_validator::{validate_all_programs, validate_program, validate_program_value};
pub use registry::LessonRegistry;
pub use report::{ReportDocument, ValidationReport, generate_report};
