use super::thumbnail_extractor::{ThumbnailTask, extract_thumbnails_parallel, select_timestamp};
use crate::config::UserSettings;
use crate::content::{
    METADATA_FILE, ProgramRecord, THUMBNAIL_FILE, VIDEO_FILE, lesson_id_from_folder,
};
use crate::prompt_path;
use crate::tools::{
    ensure_directory_exists, probe_duration_seconds, scan_entry_dirs, scan_json_files,
    validate_directory_exists,
};
use anyhow::{Context, Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 課程計畫預覽圖需手動製作的尺寸
pub const PROGRAM_THUMBNAIL_WIDTH: u32 = 1200;
pub const PROGRAM_THUMBNAIL_HEIGHT: u32 = 630;

/// 預覽圖生成結果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerationResult {
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// 缺少預覽圖的課程計畫
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingProgramThumbnail {
    pub program_id: String,
    pub thumbnail_path: PathBuf,
}

/// 確認系統已安裝 ffmpeg
pub fn check_ffmpeg() -> Result<()> {
    let status = Command::new("ffmpeg").arg("-version").output();

    match status {
        Ok(output) if output.status.success() => Ok(()),
        _ => bail!(
            "找不到 ffmpeg，請先安裝：\n  macOS: brew install ffmpeg\n  Ubuntu/Debian: sudo apt install ffmpeg\n  Windows: https://ffmpeg.org/download.html"
        ),
    }
}

/// 課程預覽圖生成器
pub struct ThumbnailGenerator {
    lessons_dir: PathBuf,
    default_timestamp: f64,
    shutdown_signal: Arc<AtomicBool>,
}

impl ThumbnailGenerator {
    #[must_use]
    pub fn new(lessons_dir: &Path, default_timestamp: f64, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            lessons_dir: lessons_dir.to_path_buf(),
            default_timestamp,
            shutdown_signal,
        }
    }

    /// 建立擷取任務
    ///
    /// 沒有影片的課程計入失敗，已有預覽圖的課程計入略過。
    pub fn plan_tasks(&self, result: &mut GenerationResult) -> Result<Vec<ThumbnailTask>> {
        validate_directory_exists(&self.lessons_dir)?;

        let mut tasks = Vec::new();
        for lesson_path in scan_entry_dirs(&self.lessons_dir)? {
            let lesson_id = lesson_id_from_folder(&lesson_path);

            let video_path = lesson_path.join(VIDEO_FILE);
            if !video_path.is_file() {
                warn!("課程 {lesson_id}: 找不到影片，略過");
                result.failed += 1;
                continue;
            }

            let output_path = lesson_path.join(THUMBNAIL_FILE);
            if output_path.exists() {
                info!("課程 {lesson_id}: 預覽圖已存在，略過");
                result.skipped += 1;
                continue;
            }

            let duration_minutes = read_duration_minutes(&lesson_path.join(METADATA_FILE))
                .or_else(|| {
                    probe_duration_seconds(&video_path)
                        .ok()
                        .map(|seconds| seconds / 60.0)
                });

            tasks.push(ThumbnailTask {
                lesson_id,
                video_path,
                timestamp: select_timestamp(duration_minutes, self.default_timestamp),
                output_path,
            });
        }

        Ok(tasks)
    }

    pub fn process_all_lessons(&self) -> Result<GenerationResult> {
        check_ffmpeg()?;

        let mut result = GenerationResult::default();
        let tasks = self.plan_tasks(&mut result)?;

        if tasks.is_empty() {
            println!("{}", style("沒有需要生成預覽圖的課程").yellow());
            return Ok(result);
        }

        println!(
            "{}",
            style(format!("找到 {} 個需要生成預覽圖的課程", tasks.len())).green()
        );

        let progress_bar = ProgressBar::new(tasks.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );

        let results = extract_thumbnails_parallel(&tasks, &self.shutdown_signal, &progress_bar);
        progress_bar.finish_and_clear();

        for thumbnail in &results {
            if thumbnail.success {
                result.successful += 1;
            } else {
                result.failed += 1;
            }
        }

        info!(
            "預覽圖生成完成 - 成功: {}, 失敗: {}, 略過: {}",
            result.successful, result.failed, result.skipped
        );
        Ok(result)
    }
}

fn read_duration_minutes(metadata_path: &Path) -> Option<f64> {
    let content = fs::read_to_string(metadata_path).ok()?;
    let metadata: Value = serde_json::from_str(&content).ok()?;
    metadata.get("duration").and_then(Value::as_f64)
}

/// 為每個課程計畫建立資料夾，列出尚未有預覽圖的計畫
pub fn program_thumbnail_status(programs_dir: &Path) -> Result<Vec<MissingProgramThumbnail>> {
    validate_directory_exists(programs_dir)?;

    let mut missing = Vec::new();
    for program_path in scan_json_files(programs_dir)? {
        let stem = program_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let program_id = fs::read_to_string(&program_path)
            .ok()
            .and_then(|content| serde_json::from_str::<ProgramRecord>(&content).ok())
            .map_or_else(
                || {
                    warn!("無法解析課程計畫 {}，使用檔名", program_path.display());
                    stem.clone()
                },
                |program| program.id,
            );

        let program_folder = programs_dir.join(&stem);
        ensure_directory_exists(&program_folder)?;

        let thumbnail_path = program_folder.join(THUMBNAIL_FILE);
        if thumbnail_path.exists() {
            info!("課程計畫 {program_id}: 預覽圖已存在");
        } else {
            missing.push(MissingProgramThumbnail {
                program_id,
                thumbnail_path,
            });
        }
    }

    Ok(missing)
}

/// 執行課程預覽圖生成，並可選擇檢查課程計畫預覽圖
pub fn run_generation(
    lessons_dir: &Path,
    programs_dir: Option<&Path>,
    default_timestamp: f64,
    shutdown_signal: &Arc<AtomicBool>,
) -> Result<GenerationResult> {
    println!("{}", style("=== 課程預覽圖生成 ===").cyan().bold());

    let generator = ThumbnailGenerator::new(lessons_dir, default_timestamp, Arc::clone(shutdown_signal));
    let result = generator.process_all_lessons()?;
    print_result(&result);

    if let Some(programs_dir) = programs_dir {
        let missing = program_thumbnail_status(programs_dir)?;
        print_program_status(&missing);
    }

    Ok(result)
}

/// 互動模式
pub fn run_interactive(
    settings: &UserSettings,
    shutdown_signal: &Arc<AtomicBool>,
) -> Result<GenerationResult> {
    let lessons_dir = prompt_path("請輸入課程資料夾路徑", &settings.lessons_dir())?;
    let programs_dir = settings.programs_dir();
    let programs_dir = programs_dir.is_dir().then_some(programs_dir);

    run_generation(
        &lessons_dir,
        programs_dir.as_deref(),
        settings.thumbnail_timestamp,
        shutdown_signal,
    )
}

fn print_result(result: &GenerationResult) {
    println!();
    println!("{}", style("=== 處理結果 ===").cyan().bold());
    println!("  成功: {}", style(result.successful).green());
    println!("  失敗: {}", style(result.failed).red());
    if result.skipped > 0 {
        println!("  已跳過（預覽圖已存在）: {}", style(result.skipped).dim());
    }
    println!("  總處理數: {}", result.successful + result.failed);
}

fn print_program_status(missing: &[MissingProgramThumbnail]) {
    if missing.is_empty() {
        println!("{}", style("所有課程計畫都有預覽圖").green());
        return;
    }

    println!();
    println!(
        "{}",
        style(format!(
            "以下課程計畫需要手動製作預覽圖（{PROGRAM_THUMBNAIL_WIDTH}x{PROGRAM_THUMBNAIL_HEIGHT} JPG）："
        ))
        .yellow()
    );
    for item in missing {
        println!(
            "  {} {} → {}",
            style("→").yellow(),
            item.program_id,
            item.thumbnail_path.display()
        );
    }
}
