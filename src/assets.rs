use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Directory the tank's images and sounds are loaded from, relative to the
/// working directory.
pub const ASSET_DIR: &str = "assets";

pub fn background_path() -> PathBuf {
    Path::new(ASSET_DIR).join("ocean.jpg")
}

pub fn sound_path(name: &str) -> PathBuf {
    Path::new(ASSET_DIR).join("sounds").join(name)
}

/// Loads the ocean background image. A missing or undecodable file is not
/// fatal: the renderer falls back to the procedural water shimmer.
pub fn load_background() -> Option<DynamicImage> {
    load_background_from(&background_path())
}

fn load_background_from(path: &Path) -> Option<DynamicImage> {
    match image::open(path) {
        Ok(img) => Some(img),
        Err(err) => {
            eprintln!("Warning: could not load {}: {}", path.display(), err);
            eprintln!("Continuing with the procedural water background...");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_path_layout() {
        assert_eq!(
            sound_path("boom.wav"),
            Path::new("assets").join("sounds").join("boom.wav")
        );
    }

    #[test]
    fn test_missing_background_degrades_to_none() {
        assert!(load_background_from(Path::new("no/such/ocean.jpg")).is_none());
    }
}
