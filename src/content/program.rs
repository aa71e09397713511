use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// 課程計畫中的單日安排
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 第幾天（從 1 開始），或以 `date` 指定日期
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub lesson_id: String,
}

/// 課程計畫（programs/*.json）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub lessons: Vec<String>,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
    pub duration_weeks: u32,
}

/// 每週天數
pub const DAYS_PER_WEEK: u64 = 7;

/// 依週數推算的排程天數，超出 `u64` 範圍時回傳 `None`
#[must_use]
pub const fn expected_schedule_days(duration_weeks: u64) -> Option<u64> {
    duration_weeks.checked_mul(DAYS_PER_WEEK)
}

/// 排程中出現過的課程 ID（未解析的 JSON 排程）
#[must_use]
pub fn scheduled_lesson_ids(schedule: &[Value]) -> HashSet<&str> {
    schedule
        .iter()
        .filter_map(|entry| entry.get("lesson_id").and_then(Value::as_str))
        .collect()
}
