use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod caption;
mod card;
mod carousel;
mod config;
mod constants;
mod input;
mod progress;
mod render;
mod ring;
mod state;
mod style;
mod texture_loader;
mod tilt;
mod timeline;

use crate::caption::Caption;
use crate::carousel::CarouselState;
use crate::config::Args;
use crate::input::Pointer;
use crate::progress::{on_image_loaded, LoadProgress, ProgressBar};
use crate::render::Scene;
use crate::texture_loader::{find_card_images, LoadQueue};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn run(args: Args) -> Result<()> {
    let image_paths = find_card_images(&args.image_dir)
        .with_context(|| format!("cannot build cards from {}", args.image_dir.display()))?;
    info!(dir = %args.image_dir.display(), "loading cards");

    let captions: Vec<Caption> = image_paths.iter().map(|path| Caption::for_image(path)).collect();
    let fragment_counts: Vec<usize> = captions.iter().map(|c| c.fragments.len()).collect();
    let mut carousel = CarouselState::new(&fragment_counts)?;

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Card Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(args.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut scene = Scene::new(captions);
    let mut queue = LoadQueue::new(image_paths);
    let mut progress = LoadProgress::new(queue.total());
    let mut bar = ProgressBar::new();
    let mut pointer = Pointer::default();

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = args.frame_time(rl.get_frame_time());

        // One upload per frame; a failed picture never counts, so the entrance waits forever
        if let Some((slot, outcome)) = queue.poll(&mut rl, &thread) {
            let complete = match outcome {
                Ok(texture) => {
                    scene.set_texture(slot, texture);
                    true
                }
                Err(e) => {
                    warn!(slot, error = %e, "image failed to load");
                    false
                }
            };
            on_image_loaded(&mut progress, &mut bar, &mut carousel, complete);
            if queue.is_empty() && progress.loaded() < progress.total() {
                warn!(
                    loaded = progress.loaded(),
                    total = progress.total(),
                    "not every image loaded, the carousel stays locked"
                );
            }
        }

        bar.update(dt);
        pointer.handle(&rl, &mut carousel);
        carousel.update(dt);

        let mut d = rl.begin_drawing(&thread);
        render::draw_frame(&mut d, &carousel, &scene, &bar);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing();

    if let Err(e) = run(args) {
        error!("{e:#}");
        process::exit(1);
    }
}
