use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// 依名稱排序列出目錄下一層的項目，略過隱藏項目
fn scan_sorted_entries(directory: &Path) -> Vec<DirEntry> {
    WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| !is_hidden(entry))
        .collect()
}

/// 列出目錄下一層的子資料夾（例如每個課程一個資料夾），按名稱排序
pub fn scan_entry_dirs(directory: &Path) -> Result<Vec<PathBuf>> {
    Ok(scan_sorted_entries(directory)
        .into_iter()
        .filter(|entry| entry.file_type().is_dir())
        .map(DirEntry::into_path)
        .collect())
}

/// 列出目錄下一層的 `.json` 檔案，按檔名排序
pub fn scan_json_files(directory: &Path) -> Result<Vec<PathBuf>> {
    Ok(scan_sorted_entries(directory)
        .into_iter()
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .map(DirEntry::into_path)
        .collect())
}
