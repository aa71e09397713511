use crate::config::save::{add_recent_path, save_settings};
use crate::config::types::Config;
use crate::menu::handlers::{
    run_content_validator, run_lesson_importer, run_thumbnail_generator,
};
use crate::prompt_path;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style("=== 瑜伽課程內容工具 ===").cyan().bold());
    println!("{}", style("按 ESC 離開").dim());

    let options = vec![
        "驗證內容",
        "匯入課程",
        "生成課程預覽圖",
        "設定",
        "離開",
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("請選擇功能")
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_content_validator(term, config)?;
            Ok(true)
        }
        Some(1) => {
            run_lesson_importer(term, config)?;
            Ok(true)
        }
        Some(2) => {
            run_thumbnail_generator(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(3) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(4) | None => Ok(false),
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style("=== 設定 ===").cyan().bold());
        println!(
            "{}",
            style(format!(
                "內容資料夾: {}\nSchema 資料夾: {}\n預設縮圖時間點: {} 秒",
                config.settings.content_dir.display(),
                config.settings.schemas_dir.display(),
                config.settings.thumbnail_timestamp
            ))
            .dim()
        );

        let options = vec![
            "變更內容資料夾",
            "變更 schema 資料夾",
            "變更預設縮圖時間點",
            "返回",
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇設定項目")
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_content_dir_menu(term, config)?,
            Some(1) => {
                config.settings.schemas_dir =
                    prompt_path("請輸入 schema 資料夾路徑", &config.settings.schemas_dir)?;
                save_settings(&config.settings)?;
            }
            Some(2) => {
                let seconds: f64 = Input::new()
                    .with_prompt("請輸入預設縮圖時間點（秒）")
                    .default(config.settings.thumbnail_timestamp)
                    .validate_with(|value: &f64| {
                        if value.is_finite() && *value >= 0.0 {
                            Ok(())
                        } else {
                            Err("時間點必須是非負數")
                        }
                    })
                    .interact_text()?;
                config.settings.thumbnail_timestamp = seconds;
                save_settings(&config.settings)?;
            }
            Some(3) | None => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// 內容資料夾選單：可從最近使用的路徑中選擇
fn show_content_dir_menu(term: &Term, config: &mut Config) -> Result<()> {
    let mut items: Vec<String> = config.settings.recent_paths.clone();
    items.push("輸入新路徑".to_string());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("請選擇內容資料夾")
        .items(&items)
        .default(0)
        .interact_on_opt(term)?;

    let Some(selection) = selection else {
        return Ok(());
    };

    let path = if selection < config.settings.recent_paths.len() {
        PathBuf::from(&config.settings.recent_paths[selection])
    } else {
        prompt_path("請輸入內容資料夾路徑", &config.settings.content_dir)?
    };

    let recent = path.display().to_string();
    config.settings.content_dir = path;
    add_recent_path(&mut config.settings, &recent);
    save_settings(&config.settings)?;

    println!("\n{} {}", style("已儲存:").green(), recent);
    std::thread::sleep(std::time::Duration::from_secs(1));
    Ok(())
}
