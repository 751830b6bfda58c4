//! Interactive rendering lessons.
//!
//! Keys `1`-`5` switch lesson, arrow up/down scale the cube, Escape quits.
//! `LUMEN_TEXTURE_PRIMARY` / `LUMEN_TEXTURE_SECONDARY` replace the built-in
//! textures with image files.

mod app;
mod config;
mod lessons;
mod uniforms;

use anyhow::Result;

use lumen_engine::device::GpuInit;
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::window::Runtime;

use crate::app::LessonsApp;
use crate::config::LessonsConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = LessonsConfig::from_env();
    log::info!(
        "starting with lesson {} ({})",
        config.first_lesson.digit(),
        config.first_lesson.title()
    );

    Runtime::run(config.window.clone(), GpuInit::default(), LessonsApp::new(config))
}
