use crate::content::LessonRecord;
use std::fmt::{self, Write};

/// 產生 description.md 內容
///
/// 標題與段落名稱使用應用程式的介面語言（俄文）。
#[must_use]
pub fn render_description(lesson: &LessonRecord) -> String {
    let mut content = String::new();
    // 寫入 String 不會失敗
    let _ = write_description(&mut content, lesson);
    content
}

fn write_description(out: &mut String, lesson: &LessonRecord) -> fmt::Result {
    writeln!(out, "# {}\n", lesson.title)?;
    writeln!(out, "## Описание\n{}\n", lesson.description)?;
    writeln!(out, "## Информация об уроке")?;
    writeln!(out, "- **Категория:** {}", lesson.category)?;
    writeln!(out, "- **Уровень:** {}", lesson.level)?;
    writeln!(out, "- **Длительность:** {} минут", lesson.duration)?;
    writeln!(out, "- **Инструктор:** {}", lesson.instructor)?;

    writeln!(out, "\n## Польза")?;
    for benefit in &lesson.benefits {
        writeln!(out, "- {benefit}")?;
    }

    if !lesson.poses.is_empty() {
        writeln!(out, "\n## Асаны в уроке")?;
        for pose in &lesson.poses {
            write!(out, "- **{}** ({} сек)", pose.name, pose.duration_seconds)?;
            if let Some(sanskrit) = &pose.sanskrit_name {
                write!(out, " - *{sanskrit}*")?;
            }
            out.push('\n');
        }
    }

    write_list_section(out, "Противопоказания", &lesson.contraindications)?;
    write_list_section(out, "Необходимое оборудование", &lesson.equipment)
}

fn write_list_section(out: &mut String, heading: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n## {heading}")?;
    for item in items {
        writeln!(out, "- {item}")?;
    }
    Ok(())
}
