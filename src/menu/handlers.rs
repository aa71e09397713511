use crate::component::{content_validator, lesson_importer, thumbnail_generator};
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_content_validator(term: &Term, config: &mut Config) -> Result<()> {
    if let Err(e) = content_validator::run_interactive(&mut config.settings) {
        eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_lesson_importer(term: &Term, config: &Config) -> Result<()> {
    if let Err(e) = lesson_importer::run_interactive(&config.settings) {
        eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_thumbnail_generator(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &Config,
) -> Result<()> {
    if let Err(e) = thumbnail_generator::run_interactive(&config.settings, shutdown_signal) {
        eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}
