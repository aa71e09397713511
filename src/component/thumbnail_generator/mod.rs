//! 課程預覽圖生成元件
//!
//! 透過 ffmpeg 從每個課程的 video.mp4 擷取一個影格作為 thumbnail.jpg，
//! 並檢查課程計畫是否已有手動製作的預覽圖

mod main;
mod thumbnail_extractor;

pub use main::{
    GenerationResult, MissingProgramThumbnail, PROGRAM_THUMBNAIL_HEIGHT, PROGRAM_THUMBNAIL_WIDTH,
    ThumbnailGenerator, check_ffmpeg, program_thumbnail_status, run_generation, run_interactive,
};
pub use thumbnail_extractor::{
    THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH, ThumbnailResult, ThumbnailTask, build_ffmpeg_args,
    extract_thumbnail, extract_thumbnails_parallel, select_timestamp,
};
