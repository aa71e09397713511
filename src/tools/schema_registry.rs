//! JSON Schema 載入與檢查
//!
//! 依命名慣例 `<entity>.schema.json` 從 schemas 目錄載入課程與課程計畫的 schema，
//! 並在建立時編譯成 validator。

use anyhow::{Context, Result, anyhow};
use jsonschema::Validator;
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// 需要 schema 的實體類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Lesson,
    Program,
}

impl SchemaKind {
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Lesson => "lesson.schema.json",
            Self::Program => "program.schema.json",
        }
    }
}

/// 已編譯的 schema 集合
pub struct SchemaRegistry {
    lesson: Validator,
    program: Validator,
}

impl SchemaRegistry {
    /// 從 schemas 目錄載入並編譯所有 schema
    ///
    /// 任何 schema 缺少、無法解析或不是合法的 JSON Schema 都視為設定錯誤。
    pub fn load(schemas_dir: &Path) -> Result<Self> {
        let lesson = Self::load_validator(schemas_dir, SchemaKind::Lesson)?;
        let program = Self::load_validator(schemas_dir, SchemaKind::Program)?;

        Ok(Self {
            lesson,
            program,
        })
    }

    fn load_validator(schemas_dir: &Path, kind: SchemaKind) -> Result<Validator> {
        let path = schemas_dir.join(kind.file_name());
        let content = fs::read_to_string(&path)
            .with_context(|| format!("無法讀取 schema: {}", path.display()))?;
        let schema: Value = serde_json::from_str(&content)
            .with_context(|| format!("無法解析 schema: {}", path.display()))?;

        debug!("已載入 schema: {}", path.display());

        jsonschema::validator_for(&schema)
            .map_err(|e| anyhow!("無效的 JSON Schema {}: {e}", path.display()))
    }

    const fn validator(&self, kind: SchemaKind) -> &Validator {
        match kind {
            SchemaKind::Lesson => &self.lesson,
            SchemaKind::Program => &self.program,
        }
    }

    /// 檢查資料是否符合 schema，回傳第一個違反規則的描述
    #[must_use]
    pub fn first_violation(&self, kind: SchemaKind, instance: &Value) -> Option<String> {
        self.validator(kind).iter_errors(instance).next().map(|error| {
            let location = error.instance_path.to_string();
            if location.is_empty() {
                error.to_string()
            } else {
                format!("{error} ({location})")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn shipped_schemas() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas")
    }

    #[test]
    fn test_load_shipped_schemas() {
        let registry = SchemaRegistry::load(&shipped_schemas()).unwrap();
        let lesson = json!({
            "id": "001",
            "title": "Мягкая растяжка",
            "description": "",
            "category": "flexibility",
            "level": "beginner",
            "duration": 30,
            "instructor": "Мария"
        });
        assert!(registry.first_violation(SchemaKind::Lesson, &lesson).is_none());
    }

    #[test]
    fn test_missing_schema_is_setup_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = SchemaRegistry::load(temp_dir.path());
        assert!(result.is_err());
        assert!(format!("{:#}", result.err().unwrap()).contains("lesson.schema.json"));
    }

    #[test]
    fn test_invalid_schema_json_is_setup_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("lesson.schema.json"), "{ not json").unwrap();
        fs::write(temp_dir.path().join("program.schema.json"), "{}").unwrap();
        assert!(SchemaRegistry::load(temp_dir.path()).is_err());
    }

    #[test]
    fn test_first_violation() {
        let registry = SchemaRegistry::load(&shipped_schemas()).unwrap();

        let program = json!({
            "id": "p1",
            "lessons": ["001"],
            "schedule": [{"day": 1, "lesson_id": "001"}],
            "duration_weeks": 1
        });
        assert!(registry.first_violation(SchemaKind::Program, &program).is_none());

        let broken = json!({"id": "p1", "lessons": "001"});
        let violation = registry.first_violation(SchemaKind::Program, &broken);
        assert!(violation.is_some());
    }
}
