use raylib::prelude::*;
use tracing::debug;

use crate::carousel::CarouselState;
use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadEvent {
    /// A failed load; the counter did not move.
    Ignored,
    /// One more image finished, more remain.
    Progress(f32),
    /// The final image finished. Reported exactly once.
    Complete,
}

/// Counts finished image loads out of a fixed total.
#[derive(Debug, Clone)]
pub struct LoadProgress {
    loaded: usize,
    total: usize,
    completed: bool,
}

impl LoadProgress {
    pub fn new(total: usize) -> Self {
        Self {
            loaded: 0,
            total,
            completed: false,
        }
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.loaded as f32 / self.total as f32
    }

    pub fn record(&mut self, complete: bool) -> LoadEvent {
        if !complete || self.completed {
            return LoadEvent::Ignored;
        }
        self.loaded += 1;
        debug!(loaded = self.loaded, total = self.total, "image loaded");
        if self.loaded == self.total {
            self.completed = true;
            LoadEvent::Complete
        } else {
            LoadEvent::Progress(self.fraction())
        }
    }
}

/// Feeds one finished upload into the counter, the bar and the carousel.
/// The entrance starts on the final successful load and never again.
pub fn on_image_loaded(
    progress: &mut LoadProgress,
    bar: &mut ProgressBar,
    carousel: &mut CarouselState,
    complete: bool,
) -> LoadEvent {
    let event = progress.record(complete);
    match event {
        LoadEvent::Progress(fraction) => bar.set_progress(fraction),
        LoadEvent::Complete => {
            bar.set_progress(progress.fraction());
            carousel.images_ready();
        }
        LoadEvent::Ignored => {}
    }
    event
}

/// Loading bar that eases its width and hue toward the latest progress.
pub struct ProgressBar {
    scale: f32,
    hue: f32,
    elapsed: f32,
    tween_scale: ease::Tween,
    tween_hue: ease::Tween,
}

impl ProgressBar {
    pub fn new() -> Self {
        Self {
            scale: 0.0,
            hue: 0.0,
            elapsed: PROGRESS_TWEEN_DURATION,
            tween_scale: ease::Tween::new(ease::quad_out, 0.0, 0.0, PROGRESS_TWEEN_DURATION),
            tween_hue: ease::Tween::new(ease::quad_out, 0.0, 0.0, PROGRESS_TWEEN_DURATION),
        }
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.elapsed = 0.0;
        self.tween_scale = ease::Tween::new(ease::quad_out, self.scale, progress, PROGRESS_TWEEN_DURATION);
        self.tween_hue = ease::Tween::new(ease::quad_out, self.hue, progress * PROGRESS_MAX_HUE, PROGRESS_TWEEN_DURATION);
    }

    pub fn update(&mut self, dt: f32) {
        let step = dt.min(PROGRESS_TWEEN_DURATION - self.elapsed);
        if step <= 0.0 {
            return;
        }
        self.elapsed += step;
        self.scale = self.tween_scale.apply(step);
        self.hue = self.tween_hue.apply(step);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn color(&self) -> Color {
        // hsl(h, 100%, 50%) is hsv(h, 100%, 100%)
        Color::color_from_hsv(self.hue, 1.0, 1.0)
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}
