//! 內容資料模型
//!
//! 課程與課程計畫的資料結構，以及內容目錄中的固定檔名

mod lesson;
mod program;

pub use lesson::{LessonRecord, Pose, lesson_id_from_folder};
pub use program::{
    DAYS_PER_WEEK, ProgramRecord, ScheduleEntry, expected_schedule_days, scheduled_lesson_ids,
};

/// 課程資料夾內的檔案名稱
pub const METADATA_FILE: &str = "metadata.json";
pub const VIDEO_FILE: &str = "video.mp4";
pub const THUMBNAIL_FILE: &str = "thumbnail.jpg";
pub const DESCRIPTION_FILE: &str = "description.md";

/// 內容根目錄下的集合名稱
pub const LESSONS_DIR: &str = "lessons";
pub const PROGRAMS_DIR: &str = "programs";
pub const CATEGORIES_DIR: &str = "categories";

/// 驗證報告輸出檔名（位於內容根目錄）
pub const REPORT_FILE: &str = "validation_report.json";
/// 課程索引檔名（位於課程目錄）
pub const LESSONS_INDEX_FILE: &str = "lessons_index.json";
