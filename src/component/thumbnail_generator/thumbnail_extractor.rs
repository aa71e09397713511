use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::{debug, error};
use rayon::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 課程預覽圖尺寸
pub const THUMBNAIL_WIDTH: u32 = 1280;
pub const THUMBNAIL_HEIGHT: u32 = 720;

/// 課程長度超過此值（分鐘）才依長度推算擷取時間點
const MIN_DURATION_FOR_OFFSET: f64 = 2.0;
/// 推算出的擷取時間點上限（秒）
const MAX_OFFSET_SECONDS: f64 = 30.0;

/// 預覽圖擷取任務
#[derive(Debug, Clone)]
pub struct ThumbnailTask {
    pub lesson_id: String,
    pub video_path: PathBuf,
    pub timestamp: f64,
    pub output_path: PathBuf,
}

/// 預覽圖擷取結果
#[derive(Debug)]
pub struct ThumbnailResult {
    pub lesson_id: String,
    pub output_path: PathBuf,
    pub success: bool,
    pub error_message: Option<String>,
}

/// 選取擷取時間點（秒）
///
/// 課程長度超過 2 分鐘時取長度的四分之一，最多 30 秒；否則使用預設值。
#[must_use]
pub fn select_timestamp(duration_minutes: Option<f64>, default_seconds: f64) -> f64 {
    match duration_minutes {
        Some(minutes) if minutes > MIN_DURATION_FOR_OFFSET => {
            (minutes * 60.0 / 4.0).floor().min(MAX_OFFSET_SECONDS)
        }
        _ => default_seconds,
    }
}

/// 組合 ffmpeg 參數：單一影格，縮放並補黑邊到 16:9
#[must_use]
pub fn build_ffmpeg_args(task: &ThumbnailTask) -> Vec<String> {
    let filter = format!(
        "scale={THUMBNAIL_WIDTH}:{THUMBNAIL_HEIGHT}:force_original_aspect_ratio=decrease,pad={THUMBNAIL_WIDTH}:{THUMBNAIL_HEIGHT}:(ow-iw)/2:(oh-ih)/2"
    );

    vec![
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-ss".to_string(),
        format!("{:.3}", task.timestamp),
        "-i".to_string(),
        task.video_path.to_string_lossy().to_string(),
        "-frames:v".to_string(),
        "1".to_string(),
        "-an".to_string(),
        "-threads".to_string(),
        "1".to_string(),
        "-vf".to_string(),
        filter,
        "-q:v".to_string(),
        "2".to_string(),
        "-y".to_string(),
        task.output_path.to_string_lossy().to_string(),
    ]
}

#[must_use]
pub fn extract_thumbnail(task: &ThumbnailTask) -> ThumbnailResult {
    match extract_thumbnail_inner(task) {
        Ok(()) => ThumbnailResult {
            lesson_id: task.lesson_id.clone(),
            output_path: task.output_path.clone(),
            success: true,
            error_message: None,
        },
        Err(e) => ThumbnailResult {
            lesson_id: task.lesson_id.clone(),
            output_path: task.output_path.clone(),
            success: false,
            error_message: Some(format!("{e:#}")),
        },
    }
}

fn extract_thumbnail_inner(task: &ThumbnailTask) -> Result<()> {
    debug!(
        "擷取預覽圖 {}: timestamp={:.2}s",
        task.lesson_id, task.timestamp
    );

    let output = Command::new("ffmpeg")
        .args(build_ffmpeg_args(task))
        .output()
        .with_context(|| format!("無法執行 ffmpeg 擷取預覽圖: {}", task.video_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("ffmpeg 擷取預覽圖失敗: {}", stderr.trim());
    }

    if !task.output_path.exists() {
        anyhow::bail!("預覽圖檔案未建立: {}", task.output_path.display());
    }

    Ok(())
}

/// 平行擷取多個預覽圖
///
/// 每個 ffmpeg 程序使用單執行緒，收到中斷訊號後剩餘任務直接標記為取消
pub fn extract_thumbnails_parallel(
    tasks: &[ThumbnailTask],
    shutdown_signal: &Arc<AtomicBool>,
    progress_bar: &ProgressBar,
) -> Vec<ThumbnailResult> {
    tasks
        .par_iter()
        .map(|task| {
            if shutdown_signal.load(Ordering::SeqCst) {
                return ThumbnailResult {
                    lesson_id: task.lesson_id.clone(),
                    output_path: task.output_path.clone(),
                    success: false,
                    error_message: Some("操作已取消".to_string()),
                };
            }

            let result = extract_thumbnail(task);

            if let Some(msg) = result.error_message.as_ref().filter(|_| !result.success) {
                error!("預覽圖擷取失敗 [{}]: {}", task.lesson_id, msg);
            }

            progress_bar.inc(1);
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> ThumbnailTask {
        ThumbnailTask {
            lesson_id: "001".to_string(),
            video_path: PathBuf::from("/content/lessons/001_a/video.mp4"),
            timestamp: 12.0,
            output_path: PathBuf::from("/content/lessons/001_a/thumbnail.jpg"),
        }
    }

    #[test]
    fn test_select_timestamp() {
        assert!((select_timestamp(Some(20.0), 5.0) - 30.0).abs() < f64::EPSILON);
        assert!((select_timestamp(Some(0.3), 5.0) - 5.0).abs() < f64::EPSILON);
        assert!((select_timestamp(Some(2.0), 5.0) - 5.0).abs() < f64::EPSILON);
        assert!((select_timestamp(None, 7.0) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_select_timestamp_quarter_of_short_lesson() {
        // 2.5 分鐘 = 150 秒，四分之一 = 37.5 → 上限 30
        assert!((select_timestamp(Some(2.5), 5.0) - 30.0).abs() < f64::EPSILON);
        // 1.9 分鐘不足門檻
        assert!((select_timestamp(Some(1.9), 5.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_build_ffmpeg_args() {
        let args = build_ffmpeg_args(&task());

        let ss = args.iter().position(|a| a == "-ss").unwrap();
        assert_eq!(args[ss + 1], "12.000");
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(ss < input);
        assert_eq!(args[input + 1], "/content/lessons/001_a/video.mp4");

        let vf = args.iter().position(|a| a == "-vf").unwrap();
        assert!(args[vf + 1].starts_with("scale=1280:720"));
        assert!(args[vf + 1].contains("pad=1280:720"));
        assert_eq!(args.last().unwrap(), "/content/lessons/001_a/thumbnail.jpg");
    }

    #[test]
    fn test_cancelled_tasks_are_not_run() {
        let shutdown_signal = Arc::new(AtomicBool::new(true));
        let progress_bar = ProgressBar::hidden();

        let results = extract_thumbnails_parallel(&[task()], &shutdown_signal, &progress_bar);
        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert_eq!(results[0].error_message.as_deref(), Some("操作已取消"));
    }
}
