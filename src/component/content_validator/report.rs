//! 驗證報告
//!
//! 錯誤與警告在整個驗證流程中累積於 [`ValidationReport`]，
//! 結束時轉成 [`ReportDocument`] 寫入內容根目錄。

use super::registry::LessonRegistry;
use anyhow::{Context, Result};
use console::style;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 單次驗證執行中累積的錯誤與警告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{message}");
        self.errors.push(message);
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.warnings.push(message);
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    #[must_use]
    pub fn to_document(&self, registry: &LessonRegistry) -> ReportDocument {
        ReportDocument {
            total_lessons: registry.len(),
            errors_count: self.error_count(),
            warnings_count: self.warning_count(),
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
        }
    }
}

/// 寫入 validation_report.json 的報告內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub total_lessons: usize,
    pub errors_count: usize,
    pub warnings_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ReportDocument {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors_count > 0
    }

    /// 寫入報告檔，覆蓋既有內容
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize validation report")?;
        fs::write(path, content)
            .with_context(|| format!("無法寫入驗證報告: {}", path.display()))?;

        info!("驗證報告已寫入: {}", path.display());
        Ok(())
    }

    pub fn print_summary(&self) {
        println!();
        println!("{}", style("=== 驗證結果 ===").cyan().bold());
        println!("  課程總數: {}", self.total_lessons);
        println!("  錯誤: {}", style(self.errors_count).red());
        println!("  警告: {}", style(self.warnings_count).yellow());

        if !self.errors.is_empty() {
            println!();
            println!("{}", style("錯誤：").red().bold());
            for message in &self.errors {
                println!("  {} {}", style("✗").red(), message);
            }
        }

        if !self.warnings.is_empty() {
            println!();
            println!("{}", style("警告：").yellow().bold());
            for message in &self.warnings {
                println!("  {} {}", style("!").yellow(), message);
            }
        }

        println!();
        if self.errors.is_empty() && self.warnings.is_empty() {
            println!("{}", style("內容全部通過驗證").green().bold());
        } else if self.errors.is_empty() {
            println!("{}", style("沒有嚴重錯誤，但有警告").green());
        } else {
            println!("{}", style("發現嚴重錯誤，需要修正").red().bold());
        }
    }
}

/// 產生驗證報告：輸出摘要並寫入內容根目錄
pub fn generate_report(
    report: &ValidationReport,
    registry: &LessonRegistry,
    report_path: &Path,
) -> Result<ReportDocument> {
    let document = report.to_document(registry);
    document.print_summary();
    document.write_to(report_path)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_report_keeps_insertion_order() {
        let mut report = ValidationReport::new();
        report.add_error("課程 002: 缺少 metadata.json");
        report.add_warning("課程 001: 缺少預覽圖");
        report.add_error("課程計畫 yoga: 找不到課程 009");

        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.errors()[1], "課程計畫 yoga: 找不到課程 009");
    }

    #[test]
    fn test_generate_report_overwrites_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("validation_report.json");
        fs::write(&path, "stale content that is not json").unwrap();

        let mut registry = LessonRegistry::new();
        registry.register("001");
        let mut report = ValidationReport::new();
        report.add_warning("課程 001: 標籤過少 (1)");

        let document = generate_report(&report, &registry, &path).unwrap();
        assert!(!document.has_errors());

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["total_lessons"], 1);
        assert_eq!(written["errors_count"], 0);
        assert_eq!(written["warnings_count"], 1);
        assert_eq!(written["errors"], serde_json::json!([]));
        assert_eq!(written["warnings"][0], "課程 001: 標籤過少 (1)");
    }

    #[test]
    fn test_report_keeps_non_ascii_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("validation_report.json");

        let mut report = ValidationReport::new();
        report.add_error("課程 001: 缺少 metadata.json");
        report
            .to_document(&LessonRegistry::new())
            .write_to(&path)
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("課程 001"));
    }
}
