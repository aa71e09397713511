use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 最近使用路徑的保留數量
pub const MAX_RECENT_PATHS: usize = 5;

/// 預設的縮圖擷取時間點（秒）
pub const DEFAULT_THUMBNAIL_TIMESTAMP: f64 = 5.0;

/// 使用者設定（settings.json）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// 內容根目錄（包含 lessons/、programs/、categories/）
    pub content_dir: PathBuf,
    /// JSON Schema 目錄
    pub schemas_dir: PathBuf,
    /// 沒有課程長度資訊時使用的縮圖時間點（秒）
    pub thumbnail_timestamp: f64,
    pub recent_paths: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("./content"),
            schemas_dir: PathBuf::from("./schemas"),
            thumbnail_timestamp: DEFAULT_THUMBNAIL_TIMESTAMP,
            recent_paths: Vec::new(),
        }
    }
}

impl UserSettings {
    #[must_use]
    pub fn lessons_dir(&self) -> PathBuf {
        self.content_dir.join(crate::content::LESSONS_DIR)
    }

    #[must_use]
    pub fn programs_dir(&self) -> PathBuf {
        self.content_dir.join(crate::content::PROGRAMS_DIR)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: UserSettings,
}
