pub mod component;
pub mod config;
pub mod content;
pub mod init;
pub mod menu;
pub mod signal;
pub mod tools;

use anyhow::Result;
use console::{Term, style};
use dialoguer::Input;
use std::path::{Path, PathBuf};

pub fn pause(term: &Term) -> Result<()> {
    println!("\n{}", style("按 Enter 繼續...").dim());
    term.read_line()?;
    Ok(())
}

/// 詢問路徑，預設值為目前設定
pub fn prompt_path(prompt: &str, default: &Path) -> Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt(prompt)
        .default(default.display().to_string())
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}
