//! 課程資料夾命名
//!
//! `<id>_<slug>`：slug 取自課程標題，先音譯成 ASCII（俄文標題 → 拉丁字母），
//! 再轉小寫、空白與連字號轉底線，只保留 `[a-z0-9_]`。

use deunicode::deunicode;
use regex::Regex;
use std::sync::LazyLock;

/// slug 最長字元數
pub const MAX_SLUG_CHARS: usize = 50;

static REGEX_DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_]").expect("Invalid regex"));

static REGEX_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-]+").expect("Invalid regex"));

/// 將課程標題轉成資料夾可用的 slug
#[must_use]
pub fn slugify_title(title: &str) -> String {
    let ascii = deunicode(title.trim()).to_lowercase();
    let joined = REGEX_SEPARATORS.replace_all(&ascii, "_");
    let cleaned = REGEX_DISALLOWED_CHARS.replace_all(&joined, "");
    cleaned.chars().take(MAX_SLUG_CHARS).collect()
}

/// 組合課程資料夾名稱
#[must_use]
pub fn lesson_folder_name(lesson_id: &str, title: &str) -> String {
    format!("{lesson_id}_{}", slugify_title(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify_title("Morning Flow"), "morning_flow");
        assert_eq!(slugify_title("  Hip - Openers  "), "hip_openers");
        assert_eq!(slugify_title("Back: Health?"), "back_health");
    }

    #[test]
    fn test_slugify_transliterates_cyrillic() {
        assert_eq!(slugify_title("Практика Дома"), "praktika_doma");
        assert_eq!(slugify_title("Спина - 2"), "spina_2");

        let slug = slugify_title("Утренняя Практика");
        assert!(slug.is_ascii());
        assert!(slug.ends_with("_praktika"));
    }

    #[test]
    fn test_slugify_truncates_to_max_chars() {
        let title = "Практика ".repeat(10);
        let slug = slugify_title(&title);
        assert_eq!(slug.len(), MAX_SLUG_CHARS);
        assert!(slug.starts_with("praktika_praktika"));
    }

    #[test]
    fn test_lesson_folder_name() {
        assert_eq!(lesson_folder_name("005", "Evening Calm"), "005_evening_calm");
    }
}
