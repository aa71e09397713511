use super::importer::{ImportResult, LessonImporter, load_import_config};
use crate::config::UserSettings;
use crate::prompt_path;
use crate::tools::{SchemaRegistry, validate_directory_exists, validate_file_exists};
use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use std::path::Path;

/// 執行匯入（批次設定檔可省略，只重建索引）
pub fn run_import(
    source_dir: &Path,
    output_dir: &Path,
    schemas_dir: &Path,
    config_path: Option<&Path>,
) -> Result<ImportResult> {
    validate_directory_exists(source_dir)?;
    let schemas = SchemaRegistry::load(schemas_dir)?;
    let importer = LessonImporter::new(source_dir, output_dir, schemas);

    let mut result = ImportResult::default();
    if let Some(config_path) = config_path {
        validate_file_exists(config_path)?;
        let entries = load_import_config(config_path)?;
        println!(
            "{}",
            style(format!("開始匯入 {} 個課程", entries.len())).cyan()
        );
        result = importer.batch_import(&entries);
    }

    let indexed = importer.generate_index()?;
    print_result(&result, indexed);
    Ok(result)
}

/// 互動模式：詢問來源與設定檔後執行匯入
pub fn run_interactive(settings: &UserSettings) -> Result<ImportResult> {
    println!("{}", style("=== 課程匯入 ===").cyan().bold());

    let source_dir = prompt_path("請輸入來源影片資料夾路徑", Path::new("."))?;
    let config_path = prompt_path("請輸入課程設定檔路徑 (JSON)", Path::new("lessons.json"))?;
    let output_dir = prompt_path("請輸入課程輸出資料夾路徑", &settings.lessons_dir())?;

    let confirm = Confirm::new()
        .with_prompt("確定要開始匯入嗎？")
        .default(true)
        .interact()?;
    if !confirm {
        println!("{}", style("操作已取消").yellow());
        return Ok(ImportResult::default());
    }

    run_import(
        &source_dir,
        &output_dir,
        &settings.schemas_dir,
        Some(&config_path),
    )
}

fn print_result(result: &ImportResult, indexed: usize) {
    println!();
    println!("{}", style("=== 匯入結果 ===").cyan().bold());
    println!("  成功: {}", style(result.successful).green());
    if result.failed > 0 {
        println!("  失敗: {}", style(result.failed).red());
    }
    println!("  總處理數: {}", result.total());
    println!("  索引中的課程: {indexed}");
}
