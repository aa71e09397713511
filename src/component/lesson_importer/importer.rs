//! 課程匯入器
//!
//! 為每個課程建立 `<id>_<slug>` 資料夾，複製影片並寫入
//! metadata.json 與 description.md，最後重建 lessons_index.json

use super::description::render_description;
use super::folder_name::lesson_folder_name;
use crate::content::{
    DESCRIPTION_FILE, LESSONS_INDEX_FILE, LessonRecord, METADATA_FILE, THUMBNAIL_FILE, VIDEO_FILE,
};
use crate::tools::{SchemaKind, SchemaRegistry, ensure_directory_exists, scan_entry_dirs};
use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

/// 匯入設定檔中的單筆課程
#[derive(Debug, Clone, Deserialize)]
struct ImportEntry {
    #[serde(flatten)]
    lesson: LessonRecord,
    /// 來源影片（相對於來源資料夾）
    #[serde(default)]
    source_video: Option<String>,
}

/// 批次匯入結果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportResult {
    pub successful: usize,
    pub failed: usize,
}

impl ImportResult {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.successful + self.failed
    }
}

/// 讀取匯入設定檔（JSON 陣列）
///
/// 只檢查最外層是陣列；每筆課程在匯入時才個別驗證。
pub fn load_import_config(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("無法讀取匯入設定: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("無法解析匯入設定: {}", path.display()))
}

pub struct LessonImporter {
    source_dir: PathBuf,
    output_dir: PathBuf,
    schemas: SchemaRegistry,
}

impl LessonImporter {
    #[must_use]
    pub fn new(source_dir: &Path, output_dir: &Path, schemas: SchemaRegistry) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            schemas,
        }
    }

    /// 內容根目錄（課程目錄的上一層），metadata 中的路徑相對於此
    fn content_root(&self) -> &Path {
        self.output_dir.parent().unwrap_or(Path::new("."))
    }

    fn relative_to_content_root(&self, path: &Path) -> String {
        path.strip_prefix(self.content_root())
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// 匯入單一課程
    ///
    /// 不符合 schema 時不建立任何檔案並回傳 `Ok(None)`；
    /// 成功時回傳課程資料夾路徑。
    pub fn import_lesson(
        &self,
        lesson: &LessonRecord,
        video: Option<&Path>,
    ) -> Result<Option<PathBuf>> {
        info!("匯入課程 {}: {}", lesson.id, lesson.title);

        let value = serde_json::to_value(lesson).context("Failed to serialize lesson")?;
        if let Some(violation) = self.schemas.first_violation(SchemaKind::Lesson, &value) {
            warn!("課程 {} 未通過 schema 驗證: {violation}", lesson.id);
            return Ok(None);
        }

        let lesson_path = self
            .output_dir
            .join(lesson_folder_name(&lesson.id, &lesson.title));
        ensure_directory_exists(&lesson_path)?;

        let mut record = lesson.clone();

        match video {
            Some(source) if source.is_file() => {
                let destination = lesson_path.join(VIDEO_FILE);
                fs::copy(source, &destination).with_context(|| {
                    format!(
                        "無法複製影片: {} -> {}",
                        source.display(),
                        destination.display()
                    )
                })?;
                info!("影片已複製: {}", destination.display());
                record.video_url = Some(self.relative_to_content_root(&destination));
            }
            Some(source) => warn!("找不到來源影片: {}", source.display()),
            None => {}
        }

        record.thumbnail_url =
            Some(self.relative_to_content_root(&lesson_path.join(THUMBNAIL_FILE)));

        let metadata_path = lesson_path.join(METADATA_FILE);
        let metadata = serde_json::to_string_pretty(&record).context("Failed to serialize metadata")?;
        fs::write(&metadata_path, metadata)
            .with_context(|| format!("無法寫入 {}", metadata_path.display()))?;

        let description_path = lesson_path.join(DESCRIPTION_FILE);
        fs::write(&description_path, render_description(&record))
            .with_context(|| format!("無法寫入 {}", description_path.display()))?;

        info!("課程 {} 匯入完成: {}", record.id, lesson_path.display());
        Ok(Some(lesson_path))
    }

    /// 批次匯入；單筆失敗不會中斷其他課程
    pub fn batch_import(&self, entries: &[Value]) -> ImportResult {
        let mut result = ImportResult::default();

        for (index, entry) in entries.iter().enumerate() {
            let label = entry
                .get("id")
                .and_then(Value::as_str)
                .map_or_else(|| format!("#{}", index + 1), str::to_string);

            match self.import_entry(entry) {
                Ok(Some(_)) => result.successful += 1,
                Ok(None) => result.failed += 1,
                Err(e) => {
                    error!("匯入課程 {label} 失敗: {e:#}");
                    result.failed += 1;
                }
            }
        }

        info!(
            "批次匯入完成 - 成功: {}, 失敗: {}",
            result.successful, result.failed
        );
        result
    }

    fn import_entry(&self, entry: &Value) -> Result<Option<PathBuf>> {
        if let Some(violation) = self.schemas.first_violation(SchemaKind::Lesson, entry) {
            let id = entry.get("id").and_then(Value::as_str).unwrap_or("?");
            warn!("課程 {id} 未通過 schema 驗證: {violation}");
            return Ok(None);
        }

        let entry: ImportEntry =
            serde_json::from_value(entry.clone()).context("無法轉換課程資料")?;
        let video = entry
            .source_video
            .as_ref()
            .map(|name| self.source_dir.join(name));

        self.import_lesson(&entry.lesson, video.as_deref())
    }

    /// 重建 lessons_index.json，回傳索引中的課程數
    pub fn generate_index(&self) -> Result<usize> {
        ensure_directory_exists(&self.output_dir)?;

        let mut lessons: Vec<Value> = Vec::new();
        for lesson_dir in scan_entry_dirs(&self.output_dir)? {
            let metadata_path = lesson_dir.join(METADATA_FILE);
            if !metadata_path.is_file() {
                continue;
            }

            let parsed = fs::read_to_string(&metadata_path)
                .context("read failed")
                .and_then(|content| serde_json::from_str::<Value>(&content).context("parse failed"));

            match parsed {
                Ok(value) => lessons.push(value),
                Err(e) => warn!("略過無法讀取的中繼資料 {}: {e:#}", metadata_path.display()),
            }
        }

        let total = lessons.len();
        let index_path = self.output_dir.join(LESSONS_INDEX_FILE);
        let index = json!({
            "total_lessons": total,
            "lessons": lessons,
        });
        let content = serde_json::to_string_pretty(&index).context("Failed to serialize index")?;
        fs::write(&index_path, content)
            .with_context(|| format!("無法寫入 {}", index_path.display()))?;

        info!("索引已建立: {} ({total} 個課程)", index_path.display());
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Pose;
    use tempfile::TempDir;

    fn schemas() -> SchemaRegistry {
        SchemaRegistry::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas")).unwrap()
    }

    fn lesson(id: &str, title: &str) -> LessonRecord {
        LessonRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: "Расслабление после рабочего дня".to_string(),
            category: "relaxation".to_string(),
            level: "beginner".to_string(),
            duration: 30,
            instructor: "Ирина".to_string(),
            tags: vec!["вечер".to_string(), "отдых".to_string()],
            benefits: vec!["Улучшает сон".to_string()],
            poses: vec![Pose {
                name: "Шавасана".to_string(),
                duration_seconds: 300,
                sanskrit_name: Some("Savasana".to_string()),
            }],
            contraindications: Vec::new(),
            equipment: Vec::new(),
            video_url: None,
            thumbnail_url: None,
        }
    }

    fn lessons_dir(temp_dir: &TempDir) -> PathBuf {
        temp_dir.path().join("content").join("lessons")
    }

    fn setup() -> (TempDir, LessonImporter) {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source");
        let output = lessons_dir(&temp_dir);
        fs::create_dir_all(&source).unwrap();
        let importer = LessonImporter::new(&source, &output, schemas());
        (temp_dir, importer)
    }

    #[test]
    fn test_import_lesson_writes_artifacts() {
        let (temp_dir, importer) = setup();
        let video = temp_dir.path().join("source").join("raw.mp4");
        fs::write(&video, b"video bytes").unwrap();

        let lesson_path = importer
            .import_lesson(&lesson("001", "Evening Calm"), Some(&video))
            .unwrap()
            .unwrap();

        assert!(lesson_path.ends_with("001_evening_calm"));
        assert_eq!(fs::read(lesson_path.join(VIDEO_FILE)).unwrap(), b"video bytes");
        assert!(lesson_path.join(DESCRIPTION_FILE).is_file());

        let metadata: LessonRecord =
            serde_json::from_str(&fs::read_to_string(lesson_path.join(METADATA_FILE)).unwrap())
                .unwrap();
        assert_eq!(
            metadata.video_url.as_deref(),
            Some("lessons/001_evening_calm/video.mp4")
        );
        assert_eq!(
            metadata.thumbnail_url.as_deref(),
            Some("lessons/001_evening_calm/thumbnail.jpg")
        );
    }

    #[test]
    fn test_import_without_video_leaves_url_empty() {
        let (temp_dir, importer) = setup();
        let missing = temp_dir.path().join("source").join("missing.mp4");

        let lesson_path = importer
            .import_lesson(&lesson("002", "Calm"), Some(&missing))
            .unwrap()
            .unwrap();

        assert!(!lesson_path.join(VIDEO_FILE).exists());
        let metadata: Value =
            serde_json::from_str(&fs::read_to_string(lesson_path.join(METADATA_FILE)).unwrap())
                .unwrap();
        assert!(metadata.get("video_url").is_none());
    }

    #[test]
    fn test_schema_failure_creates_nothing() {
        let (temp_dir, importer) = setup();
        let mut invalid = lesson("003", "Broken");
        invalid.category = "unknown_category".to_string();

        assert!(importer.import_lesson(&invalid, None).unwrap().is_none());
        assert!(!lessons_dir(&temp_dir).join("003_broken").exists());
    }

    #[test]
    fn test_batch_import_and_index() {
        let (temp_dir, importer) = setup();
        fs::write(temp_dir.path().join("source").join("a.mp4"), b"a").unwrap();

        let config_path = temp_dir.path().join("lessons.json");
        fs::write(
            &config_path,
            serde_json::json!([
                {
                    "id": "010",
                    "title": "Hips",
                    "description": "Раскрытие бёдер",
                    "category": "hip_joints",
                    "level": "intermediate",
                    "duration": 40,
                    "instructor": "Ирина",
                    "tags": ["бёдра", "гибкость"],
                    "source_video": "a.mp4"
                },
                {
                    "id": "011",
                    "title": "Invalid",
                    "description": "",
                    "category": "hip_joints",
                    "level": "expert",
                    "duration": 40,
                    "instructor": "Ирина"
                }
            ])
            .to_string(),
        )
        .unwrap();

        let entries = load_import_config(&config_path).unwrap();
        assert_eq!(entries[0]["source_video"], "a.mp4");

        let result = importer.batch_import(&entries);
        assert_eq!(result, ImportResult { successful: 1, failed: 1 });
        assert_eq!(result.total(), 2);

        assert_eq!(importer.generate_index().unwrap(), 1);
        let index: Value = serde_json::from_str(
            &fs::read_to_string(lessons_dir(&temp_dir).join(LESSONS_INDEX_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(index["total_lessons"], 1);
        assert_eq!(index["lessons"][0]["id"], "010");
    }

    #[test]
    fn test_mixed_batch_counts_each_bad_entry() {
        let (temp_dir, importer) = setup();
        let config_path = temp_dir.path().join("lessons.json");
        fs::write(
            &config_path,
            serde_json::json!([
                {
                    "id": "020",
                    "title": "Good",
                    "description": "Мягкая практика",
                    "category": "meditation",
                    "level": "beginner",
                    "duration": 30,
                    "instructor": "Анна",
                    "tags": ["дыхание", "покой"]
                },
                {
                    "id": "021",
                    "title": "Typed",
                    "description": "",
                    "category": "meditation",
                    "level": "beginner",
                    "duration": "30",
                    "instructor": "Анна"
                },
                {
                    "id": "022",
                    "title": "Partial"
                },
                {
                    "id": "023",
                    "title": "Too Long",
                    "description": "",
                    "category": "meditation",
                    "level": "beginner",
                    "duration": 5_000_000_000_u64,
                    "instructor": "Анна"
                },
                "not a lesson"
            ])
            .to_string(),
        )
        .unwrap();

        let entries = load_import_config(&config_path).unwrap();
        assert_eq!(entries.len(), 5);

        let result = importer.batch_import(&entries);
        assert_eq!(result, ImportResult { successful: 1, failed: 4 });
        assert!(lessons_dir(&temp_dir).join("020_good").is_dir());
        assert!(!lessons_dir(&temp_dir).join("021_typed").exists());
        assert!(!lessons_dir(&temp_dir).join("023_too_long").exists());
    }

    #[test]
    fn test_import_config_must_be_array() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("lessons.json");
        fs::write(&config_path, r#"{"id": "001"}"#).unwrap();
        assert!(load_import_config(&config_path).is_err());
    }
}
