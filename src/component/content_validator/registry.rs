use std::collections::BTreeSet;

/// 已確認存在中繼資料的課程 ID 集合
///
/// 在課程驗證階段建立，課程計畫驗證階段只做查詢。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonRegistry {
    ids: BTreeSet<String>,
}

impl LessonRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, lesson_id: impl Into<String>) {
        self.ids.insert(lesson_id.into());
    }

    #[must_use]
    pub fn contains(&self, lesson_id: &str) -> bool {
        self.ids.contains(lesson_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 依字典序列出所有課程 ID
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = LessonRegistry::new();
        assert!(registry.is_empty());

        registry.register("002");
        registry.register("001");
        registry.register("002");

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("001"));
        assert!(!registry.contains("003"));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["001", "002"]);
    }
}
