//! 課程驗證
//!
//! 每個課程資料夾依序檢查：中繼資料存在、schema、ID 一致、
//! 影片／預覽圖／說明檔，以及課程長度與標籤數量。

use super::registry::LessonRegistry;
use super::report::ValidationReport;
use crate::content::{
    DESCRIPTION_FILE, LESSONS_DIR, METADATA_FILE, THUMBNAIL_FILE, VIDEO_FILE,
    lesson_id_from_folder,
};
use crate::tools::{SchemaKind, SchemaRegistry, scan_entry_dirs};
use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

/// 合理的課程長度範圍（分鐘）
pub const DURATION_RANGE_MINUTES: RangeInclusive<f64> = 5.0..=90.0;
/// 影片小於此大小視為損壞或佔位檔
pub const MIN_VIDEO_SIZE_BYTES: u64 = 1024 * 1024;
/// 最少標籤數量
pub const MIN_TAG_COUNT: usize = 2;

fn read_metadata(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("無法讀取 {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("無法解析 {}", path.display()))
}

/// 驗證單一課程資料夾
///
/// 只有缺少（或無法讀取）中繼資料時會中止該課程的檢查；
/// 其餘錯誤都會記錄後繼續。讀得到中繼資料的課程一律登記到 `registry`。
///
/// 回傳此課程是否沒有任何錯誤。
pub fn validate_lesson(
    lesson_path: &Path,
    schemas: &SchemaRegistry,
    registry: &mut LessonRegistry,
    report: &mut ValidationReport,
) -> bool {
    let lesson_id = lesson_id_from_folder(lesson_path);
    let errors_before = report.error_count();
    debug!("檢查課程 {lesson_id}: {}", lesson_path.display());

    let metadata_path = lesson_path.join(METADATA_FILE);
    if !metadata_path.is_file() {
        report.add_error(format!("課程 {lesson_id}: 缺少 {METADATA_FILE}"));
        return false;
    }

    let metadata = match read_metadata(&metadata_path) {
        Ok(value) => value,
        Err(e) => {
            report.add_error(format!("課程 {lesson_id}: {METADATA_FILE} 無法讀取 ({e:#})"));
            return false;
        }
    };

    if let Some(violation) = schemas.first_violation(SchemaKind::Lesson, &metadata) {
        report.add_error(format!("課程 {lesson_id}: schema 錯誤 - {violation}"));
    }

    check_declared_id(&lesson_id, &metadata, report);

    registry.register(lesson_id.as_str());

    check_assets(&lesson_id, lesson_path, report);
    check_duration(&lesson_id, &metadata, report);
    check_tags(&lesson_id, &metadata, report);

    let is_valid = report.error_count() == errors_before;
    if is_valid {
        info!("課程 {lesson_id} 驗證通過");
    }
    is_valid
}

fn check_declared_id(lesson_id: &str, metadata: &Value, report: &mut ValidationReport) {
    let declared = metadata.get("id").and_then(Value::as_str);
    if declared != Some(lesson_id) {
        report.add_error(format!(
            "課程 {lesson_id}: 中繼資料 ID ({}) 與資料夾不符",
            declared.unwrap_or("無")
        ));
    }
}

fn check_assets(lesson_id: &str, lesson_path: &Path, report: &mut ValidationReport) {
    let video_path = lesson_path.join(VIDEO_FILE);
    match fs::metadata(&video_path) {
        Ok(meta) if meta.is_file() => {
            if meta.len() < MIN_VIDEO_SIZE_BYTES {
                let size_mb = meta.len() as f64 / 1024.0 / 1024.0;
                report.add_warning(format!("課程 {lesson_id}: 影片檔案過小 ({size_mb:.2} MB)"));
            }
        }
        _ => report.add_warning(format!("課程 {lesson_id}: 缺少影片檔案")),
    }

    if !lesson_path.join(THUMBNAIL_FILE).is_file() {
        report.add_warning(format!("課程 {lesson_id}: 缺少預覽圖"));
    }

    if !lesson_path.join(DESCRIPTION_FILE).is_file() {
        report.add_warning(format!("課程 {lesson_id}: 缺少 {DESCRIPTION_FILE}"));
    }
}

fn check_duration(lesson_id: &str, metadata: &Value, report: &mut ValidationReport) {
    let duration = metadata
        .get("duration")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    if !DURATION_RANGE_MINUTES.contains(&duration) {
        report.add_warning(format!("課程 {lesson_id}: 課程長度異常 ({duration} 分鐘)"));
    }
}

fn check_tags(lesson_id: &str, metadata: &Value, report: &mut ValidationReport) {
    let tag_count = metadata
        .get("tags")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    if tag_count < MIN_TAG_COUNT {
        report.add_warning(format!("課程 {lesson_id}: 標籤過少 ({tag_count})"));
    }
}

/// 依名稱順序驗證 `lessons/` 下所有課程，回傳沒有錯誤的課程數
pub fn validate_all_lessons(
    content_dir: &Path,
    schemas: &SchemaRegistry,
    registry: &mut LessonRegistry,
    report: &mut ValidationReport,
) -> Result<usize> {
    let lessons_dir = content_dir.join(LESSONS_DIR);
    if !lessons_dir.is_dir() {
        report.add_error(format!("找不到 {LESSONS_DIR} 資料夾"));
        return Ok(0);
    }

    let lesson_dirs = scan_entry_dirs(&lessons_dir)?;
    let valid_count = lesson_dirs
        .iter()
        .filter(|lesson_path| validate_lesson(lesson_path, schemas, registry, report))
        .count();

    info!("課程驗證完成: {valid_count}/{} 通過", lesson_dirs.len());
    Ok(valid_count)
}
