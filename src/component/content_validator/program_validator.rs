//! 課程計畫驗證
//!
//! 課程計畫引用的課程必須已經在課程驗證階段登記過，
//! 因此本階段一定在 [`super::lesson_validator::validate_all_lessons`] 之後執行。

use super::registry::LessonRegistry;
use super::report::ValidationReport;
use crate::content::{PROGRAMS_DIR, expected_schedule_days, scheduled_lesson_ids};
use crate::tools::{SchemaKind, SchemaRegistry, scan_json_files};
use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::Path;

fn program_id_from_path(program_path: &Path) -> String {
    program_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn read_program(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("無法讀取 {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("無法解析 {}", path.display()))
}

/// 驗證單一課程計畫檔，回傳是否沒有任何錯誤
pub fn validate_program(
    program_path: &Path,
    schemas: &SchemaRegistry,
    registry: &LessonRegistry,
    report: &mut ValidationReport,
) -> bool {
    let program_id = program_id_from_path(program_path);
    debug!("檢查課程計畫 {program_id}: {}", program_path.display());

    let program = match read_program(program_path) {
        Ok(value) => value,
        Err(e) => {
            report.add_error(format!("課程計畫 {program_id}: 檔案無法讀取 ({e:#})"));
            return false;
        }
    };

    validate_program_value(&program_id, &program, schemas, registry, report)
}

/// 驗證已解析的課程計畫內容
pub fn validate_program_value(
    program_id: &str,
    program: &Value,
    schemas: &SchemaRegistry,
    registry: &LessonRegistry,
    report: &mut ValidationReport,
) -> bool {
    let errors_before = report.error_count();

    if let Some(violation) = schemas.first_violation(SchemaKind::Program, program) {
        report.add_error(format!("課程計畫 {program_id}: schema 錯誤 - {violation}"));
    }

    let lessons: Vec<&str> = program
        .get("lessons")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    for lesson_id in &lessons {
        if !registry.contains(lesson_id) {
            report.add_error(format!("課程計畫 {program_id}: 找不到課程 {lesson_id}"));
        }
    }

    let schedule: &[Value] = program
        .get("schedule")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    // 只檢查 lessons → schedule 方向；只出現在課表中的課程不另外檢查
    let scheduled = scheduled_lesson_ids(schedule);

    for lesson_id in &lessons {
        if !scheduled.contains(lesson_id) {
            report.add_warning(format!(
                "課程計畫 {program_id}: 課程 {lesson_id} 未排入課表"
            ));
        }
    }

    let duration_weeks = program
        .get("duration_weeks")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let total_days = schedule.len() as u64;

    match expected_schedule_days(duration_weeks) {
        Some(expected_days) if expected_days == total_days => {}
        Some(expected_days) => report.add_warning(format!(
            "課程計畫 {program_id}: 長度不一致 ({duration_weeks} 週 = {expected_days} 天，課表共 {total_days} 天)"
        )),
        None => report.add_warning(format!(
            "課程計畫 {program_id}: 長度不一致 ({duration_weeks} 週超出可計算範圍，課表共 {total_days} 天)"
        )),
    }

    let is_valid = report.error_count() == errors_before;
    if is_valid {
        info!("課程計畫 {program_id} 驗證通過");
    }
    is_valid
}

/// 依檔名順序驗證 `programs/*.json`，回傳沒有錯誤的課程計畫數
pub fn validate_all_programs(
    content_dir: &Path,
    schemas: &SchemaRegistry,
    registry: &LessonRegistry,
    report: &mut ValidationReport,
) -> Result<usize> {
    let programs_dir = content_dir.join(PROGRAMS_DIR);
    if !programs_dir.is_dir() {
        report.add_warning(format!("找不到 {PROGRAMS_DIR} 資料夾"));
        return Ok(0);
    }

    let program_files = scan_json_files(&programs_dir)?;
    let valid_count = program_files
        .iter()
        .filter(|program_path| validate_program(program_path, schemas, registry, report))
        .count();

    info!("課程計畫驗證完成: {valid_count}/{} 通過", program_files.len());
    Ok(valid_count)
}
