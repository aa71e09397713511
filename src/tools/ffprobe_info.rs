use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

/// 使用 ffprobe 取得影片長度（秒）
pub fn probe_duration_seconds(path: &Path) -> Result<f64> {
    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-print_format", "json", "-show_format"])
        .arg(path)
        .output()
        .with_context(|| format!("無法執行 ffprobe: {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe 執行失敗: {stderr}");
    }

    parse_duration(&String::from_utf8_lossy(&output.stdout))
        .with_context(|| format!("無法取得影片長度: {}", path.display()))
}

fn parse_duration(stdout: &str) -> Result<f64> {
    let probe: FfprobeOutput =
        serde_json::from_str(stdout).context("無法解析 ffprobe 輸出")?;

    probe
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| anyhow::anyhow!("ffprobe 輸出缺少 duration"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        let stdout = r#"{"format": {"filename": "video.mp4", "duration": "1234.560000"}}"#;
        assert!((parse_duration(stdout).unwrap() - 1234.56).abs() < 0.001);
    }

    #[test]
    fn test_parse_duration_missing() {
        assert!(parse_duration(r#"{"format": {}}"#).is_err());
        assert!(parse_duration(r#"{}"#).is_err());
        assert!(parse_duration("not json").is_err());
    }
}
