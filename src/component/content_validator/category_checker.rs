use super::report::ValidationReport;
use crate::content::CATEGORIES_DIR;
use log::{info, warn};
use std::path::Path;

/// 必須存在的分類（固定清單，不從資料推導）
pub const EXPECTED_CATEGORIES: [&str; 5] = [
    "back_health",
    "flexibility",
    "hip_joints",
    "meditation",
    "relaxation",
];

/// 檢查 `categories/<name>.json` 是否齊全，回傳找到的分類數
///
/// 資料夾不存在時視同沒有任何分類檔。
pub fn validate_categories(content_dir: &Path, report: &mut ValidationReport) -> usize {
    let categories_dir = content_dir.join(CATEGORIES_DIR);
    if !categories_dir.is_dir() {
        warn!("找不到 {CATEGORIES_DIR} 資料夾: {}", categories_dir.display());
    }

    let mut found = 0;
    for category in EXPECTED_CATEGORIES {
        let file_name = format!("{category}.json");
        if categories_dir.join(&file_name).is_file() {
            info!("分類 {file_name} 已找到");
            found += 1;
        } else {
            report.add_warning(format!("分類 {file_name} 不存在"));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_categories_yield_five_warnings() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(CATEGORIES_DIR)).unwrap();

        let mut report = ValidationReport::new();
        assert_eq!(validate_categories(temp_dir.path(), &mut report), 0);
        assert_eq!(report.warning_count(), 5);
        for (warning, category) in report.warnings().iter().zip(EXPECTED_CATEGORIES) {
            assert!(warning.contains(category));
        }
    }

    #[test]
    fn test_missing_directory_counts_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut report = ValidationReport::new();
        validate_categories(temp_dir.path(), &mut report);
        assert_eq!(report.warning_count(), 5);
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_partial_categories() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join(CATEGORIES_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("meditation.json"), "{}").unwrap();
        fs::write(dir.join("flexibility.json"), "{}").unwrap();
        fs::write(dir.join("strength.json"), "{}").unwrap();

        let mut report = ValidationReport::new();
        assert_eq!(validate_categories(temp_dir.path(), &mut report), 2);
        assert_eq!(report.warning_count(), 3);
        assert!(report.warnings().iter().any(|w| w.contains("hip_joints")));
    }
}
