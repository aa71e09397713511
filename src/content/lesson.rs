use serde::{Deserialize, Serialize};
use std::path::Path;

/// 課程中的單一體式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pose {
    pub name: String,
    /// 停留秒數
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanskrit_name: Option<String>,
}

/// 課程中繼資料（metadata.json）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    /// 課程長度（分鐘）
    pub duration: u32,
    pub instructor: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub poses: Vec<Pose>,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// 從課程資料夾名稱取出課程 ID（第一個底線之前的部分）
///
/// `005_utrennyaya_praktika` → `005`
#[must_use]
pub fn lesson_id_from_folder(folder: &Path) -> String {
    let name = folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    match name.split_once('_') {
        Some((id, _)) => id.to_string(),
        None => name,
    }
}
