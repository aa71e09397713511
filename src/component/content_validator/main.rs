//! 內容驗證元件
//!
//! 階段順序固定：課程 → 課程計畫 → 分類 → 報告。
//! 課程登記表必須在課程計畫驗證前完整建立。

use super::category_checker::validate_categories;
use super::lesson_validator::validate_all_lessons;
use super::program_validator::validate_all_programs;
use super::registry::LessonRegistry;
use super::report::{ReportDocument, ValidationReport, generate_report};
use crate::config::UserSettings;
use crate::config::save::{add_recent_path, save_settings};
use crate::content::REPORT_FILE;
use crate::prompt_path;
use crate::tools::{SchemaRegistry, validate_directory_exists};
use anyhow::Result;
use console::style;
use log::info;
use std::path::{Path, PathBuf};

/// 一次完整驗證的結果
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub document: ReportDocument,
    pub registry: LessonRegistry,
    pub valid_lessons: usize,
    pub valid_programs: usize,
    pub categories_found: usize,
}

/// 內容驗證器
pub struct ContentValidator {
    content_dir: PathBuf,
    schemas: SchemaRegistry,
}

impl ContentValidator {
    /// 建立驗證器
    ///
    /// 內容根目錄不存在或 schema 無法載入屬於設定錯誤，直接回傳 `Err`。
    pub fn new(content_dir: &Path, schemas_dir: &Path) -> Result<Self> {
        validate_directory_exists(content_dir)?;
        let schemas = SchemaRegistry::load(schemas_dir)?;

        Ok(Self {
            content_dir: content_dir.to_path_buf(),
            schemas,
        })
    }

    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.content_dir.join(REPORT_FILE)
    }

    /// 執行完整驗證並覆寫報告檔
    ///
    /// 每次執行都從空的報告與登記表開始，輸入不變時結果相同。
    pub fn run_full_validation(&self) -> Result<ValidationOutcome> {
        info!("開始驗證內容: {}", self.content_dir.display());

        let mut registry = LessonRegistry::new();
        let mut report = ValidationReport::new();

        print_phase("課程驗證");
        let valid_lessons =
            validate_all_lessons(&self.content_dir, &self.schemas, &mut registry, &mut report)?;
        println!("  通過的課程: {valid_lessons}");

        print_phase("課程計畫驗證");
        let valid_programs =
            validate_all_programs(&self.content_dir, &self.schemas, &registry, &mut report)?;
        println!("  通過的課程計畫: {valid_programs}");

        print_phase("分類檢查");
        let categories_found = validate_categories(&self.content_dir, &mut report);
        println!("  找到的分類: {categories_found}");

        let document = generate_report(&report, &registry, &self.report_path())?;
        println!(
            "{}",
            style(format!("報告已儲存: {}", self.report_path().display())).dim()
        );

        Ok(ValidationOutcome {
            document,
            registry,
            valid_lessons,
            valid_programs,
            categories_found,
        })
    }
}

fn print_phase(title: &str) {
    println!();
    println!("{}", style(format!("=== {title} ===")).cyan().bold());
}

/// 互動模式：詢問路徑後執行驗證，並記住使用過的路徑
pub fn run_interactive(settings: &mut UserSettings) -> Result<ReportDocument> {
    println!("{}", style("=== 內容驗證 ===").cyan().bold());

    let content_dir = prompt_path("請輸入內容資料夾路徑", &settings.content_dir)?;
    let schemas_dir = prompt_path("請輸入 schema 資料夾路徑", &settings.schemas_dir)?;

    let validator = ContentValidator::new(&content_dir, &schemas_dir)?;

    let recent = content_dir.display().to_string();
    settings.content_dir = content_dir;
    settings.schemas_dir = schemas_dir;
    add_recent_path(settings, &recent);
    save_settings(settings)?;

    Ok(validator.run_full_validation()?.document)
}
