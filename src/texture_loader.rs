use std::collections::VecDeque;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::CARD_COUNT;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read directory {path:?}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("need 3 images in {path:?}, found {found}")]
    TooFewImages { path: PathBuf, found: usize },
    #[error("failed to read {path:?}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {message}")]
    Decode { path: PathBuf, message: String },
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg" | "bmp" | "gif"))
        .unwrap_or(false)
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let read_dir_error = |source| LoadError::ReadDir {
        path: dir_path.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// The first three pictures in `dir_path`, in file name order.
pub fn find_card_images(dir_path: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = load_sorted_image_paths(dir_path)?;
    if paths.len() < CARD_COUNT {
        return Err(LoadError::TooFewImages {
            path: dir_path.to_path_buf(),
            found: paths.len(),
        });
    }
    if paths.len() > CARD_COUNT {
        warn!(
            found = paths.len(),
            dir = %dir_path.display(),
            "more images than cards, extra images are ignored"
        );
        paths.truncate(CARD_COUNT);
    }
    Ok(paths)
}

// EXIF orientation tag, 1 when absent or unreadable.
fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            debug!(path = %image_path.display(), error = %e, "no EXIF orientation");
            1
        }
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D, LoadError> {
    let file_bytes = fs::read(image_path).map_err(|source| LoadError::ReadFile {
        path: image_path.to_path_buf(),
        source,
    })?;

    // EXIF is only read reliably from JPEG containers
    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_orientation(image_path, &file_bytes)
    } else {
        1
    };

    let decode_error = |message: String| LoadError::Decode {
        path: image_path.to_path_buf(),
        message,
    };

    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| decode_error(e.to_string()))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise; flips are ignored
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!(path = %image_path.display(), orientation, "applied EXIF rotation");
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| decode_error(e.to_string()))?;

    // Unload the CPU-side pixels once the texture is on the GPU
    drop(image);

    Ok(texture)
}

/// Uploads one picture per frame so the loading bar can advance between them.
pub struct LoadQueue {
    pending: VecDeque<(usize, PathBuf)>,
    total: usize,
}

impl LoadQueue {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        let total = paths.len();
        Self {
            pending: paths.into_iter().enumerate().collect(),
            total,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Loads the next picture, returning its slot index and the outcome.
    pub fn poll(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
    ) -> Option<(usize, Result<Texture2D, LoadError>)> {
        let (index, path) = self.pending.pop_front()?;
        Some((index, load_texture_with_exif_rotation(rl, thread, &path)))
    }
}
