use std::path::PathBuf;

use clap::Parser;

use crate::constants::*;

/// Three-card photo carousel with a synced caption panel and pointer tilt.
#[derive(Debug, Parser)]
#[command(name = "carousel", version, about)]
pub struct Args {
    /// Directory holding the card pictures (the first three, by file name)
    pub image_dir: PathBuf,

    /// Initial window width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: i32,

    /// Initial window height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: i32,

    /// Target frames per second
    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Advance animations by exactly one frame per frame instead of real time
    #[arg(long)]
    pub fixed_step: bool,
}

impl Args {
    pub fn frame_time(&self, measured: f32) -> f32 {
        if self.fixed_step {
            1.0 / self.fps.max(1) as f32
        } else {
            measured
        }
    }
}
