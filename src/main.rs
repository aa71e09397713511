use anyhow::Result;
use clap::{Parser, Subcommand};
use console::{Term, style};
use log::{info, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use yoga_content_pipeline::component::content_validator::ContentValidator;
use yoga_content_pipeline::component::{lesson_importer, thumbnail_generator};
use yoga_content_pipeline::config::types::Config;
use yoga_content_pipeline::init;
use yoga_content_pipeline::menu::show_main_menu;
use yoga_content_pipeline::signal::setup_shutdown_signal;

/// 瑜伽課程內容工具：驗證、匯入與預覽圖生成
#[derive(Parser, Debug)]
#[command(name = "yoga-content")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate lessons, programs and categories; writes validation_report.json
    Validate {
        /// Content root (defaults to the saved setting)
        #[arg(long)]
        content: Option<PathBuf>,
        /// Directory with lesson.schema.json and program.schema.json
        #[arg(long)]
        schemas: Option<PathBuf>,
    },
    /// Import lessons from a JSON config and rebuild lessons_index.json
    Import {
        /// Directory with source videos
        #[arg(long)]
        source: PathBuf,
        /// Lessons output directory (defaults to <content>/lessons)
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        schemas: Option<PathBuf>,
        /// JSON array of lessons to import
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Extract thumbnail.jpg for every lesson video with ffmpeg
    Thumbnails {
        /// Lessons directory
        #[arg(long)]
        input: PathBuf,
        /// Programs directory to check for missing program thumbnails
        #[arg(long)]
        programs: Option<PathBuf>,
        /// Frame timestamp in seconds when the lesson duration is unknown
        #[arg(long)]
        timestamp: Option<f64>,
    },
}

fn main() -> ExitCode {
    init::init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            warn!("Program error: {e:#}");
            eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = Config::new()?;

    match cli.command {
        Some(Commands::Validate { content, schemas }) => {
            let content = content.unwrap_or_else(|| config.settings.content_dir.clone());
            let schemas = schemas.unwrap_or_else(|| config.settings.schemas_dir.clone());

            let validator = ContentValidator::new(&content, &schemas)?;
            let outcome = validator.run_full_validation()?;

            if outcome.document.has_errors() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Some(Commands::Import {
            source,
            output,
            schemas,
            config: import_config,
        }) => {
            let output = output.unwrap_or_else(|| config.settings.lessons_dir());
            let schemas = schemas.unwrap_or_else(|| config.settings.schemas_dir.clone());

            let result =
                lesson_importer::run_import(&source, &output, &schemas, import_config.as_deref())?;
            if result.failed > 0 {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Some(Commands::Thumbnails {
            input,
            programs,
            timestamp,
        }) => {
            let shutdown_signal = setup_shutdown_signal()?;
            let timestamp = timestamp.unwrap_or(config.settings.thumbnail_timestamp);

            let result = thumbnail_generator::run_generation(
                &input,
                programs.as_deref(),
                timestamp,
                &shutdown_signal,
            )?;
            if result.failed > 0 {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        None => {
            run_menu(&mut config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_menu(config: &mut Config) -> Result<()> {
    let term = Term::stdout();
    let shutdown_signal = setup_shutdown_signal()?;

    loop {
        match show_main_menu(&term, &shutdown_signal, config) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style("再見！").green().bold());
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                eprintln!("{} {}", style("錯誤:").red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}
