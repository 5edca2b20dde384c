use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

/// Text shown under a card, one entry per separately animated line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub fragments: Vec<String>,
}

impl Caption {
    /// Reads `<stem>.txt` beside the picture, falling back to names derived from the path.
    pub fn for_image(image_path: &Path) -> Self {
        let sidecar = image_path.with_extension("txt");
        match fs::read_to_string(&sidecar) {
            Ok(text) => {
                let caption = Self::parse(&text);
                if !caption.fragments.is_empty() {
                    debug!(path = %sidecar.display(), lines = caption.fragments.len(), "caption loaded");
                    return caption;
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %sidecar.display(), error = %e, "failed to read caption"),
        }
        Self::from_path(image_path)
    }

    pub fn parse(text: &str) -> Self {
        let fragments = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { fragments }
    }

    fn from_path(image_path: &Path) -> Self {
        let title = image_path
            .file_stem()
            .map(|stem| humanize(&stem.to_string_lossy()))
            .unwrap_or_default();
        let place = image_path
            .parent()
            .and_then(Path::file_name)
            .map(|dir| humanize(&dir.to_string_lossy()))
            .unwrap_or_default();

        let fragments = [title, place].into_iter().filter(|s| !s.is_empty()).collect();
        Self { fragments }
    }
}

// "blue_lake-2" -> "Blue Lake 2"
fn humanize(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
