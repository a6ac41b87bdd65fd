use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use eframe::egui::{FontData, FontDefinitions, FontFamily};
use log::{info, warn};

pub const APP_NAME: &str = "Tiles Music Player";

pub const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

pub const COVER_IMAGE_SIZE: (f32, f32) = (150., 150.);

pub const TILE_MIN_SIZE: (f32, f32) = (200., 200.);

/// Playback position updates, also the lyrics repaint cadence.
pub const POSITION_TICK: Duration = Duration::from_millis(250);

/// Library directory used when none is given on the command line.
pub const DEFAULT_LIBRARY_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub library_dir: Option<PathBuf>,
}

impl Config {
    /// Resolves the configuration from the command line arguments
    /// (`tiles-music-player [LIBRARY_DIR]`).
    pub fn load() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let library_dir = match args.into_iter().next() {
            Some(dir) => Some(PathBuf::from(dir)),
            None => default_library_dir(Path::new(DEFAULT_LIBRARY_DIR)),
        };

        Self { library_dir }
    }
}

/// `dir` is created when missing; falls back to the OS audio directory when
/// that fails.
fn default_library_dir(dir: &Path) -> Option<PathBuf> {
    if dir.is_dir() {
        return Some(dir.to_owned());
    }

    match std::fs::create_dir_all(dir) {
        Ok(()) => {
            info!("Created library directory {}", dir.display());
            Some(dir.to_owned())
        }
        Err(err) => {
            warn!("Cannot create library directory {}: {err}", dir.display());
            dirs::audio_dir()
        }
    }
}

/// System fonts with CJK coverage, preferred over the egui defaults.
pub fn get_font_definitions() -> FontDefinitions {
    let mut font_definitions = FontDefinitions::default();

    for name in ["Noto Sans", "Noto Sans SC", "Noto Sans CJK SC", "Noto Sans CJK JP"] {
        let buf = match font_kit::source::SystemSource::new().select_best_match(
            &[font_kit::family_name::FamilyName::Title(name.to_owned())],
            &font_kit::properties::Properties::new(),
        ) {
            Ok(font_kit::handle::Handle::Memory { bytes, .. }) => Some(bytes.to_vec()),
            Ok(font_kit::handle::Handle::Path { path, .. }) => std::fs::read(path).ok(),
            Err(_) => None,
        };

        let Some(buf) = buf else {
            continue;
        };

        font_definitions
            .font_data
            .insert(name.to_owned(), Arc::new(FontData::from_owned(buf)));

        // NOTE: Appended after the default fonts so they only fill missing glyphs.
        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            if let Some(fonts) = font_definitions.families.get_mut(&family) {
                fonts.push(name.to_owned());
            }
        }
    }

    font_definitions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_dir_from_args() {
        let config = Config::from_args(["/music".to_owned(), "ignored".to_owned()]);

        assert_eq!(config.library_dir, Some(PathBuf::from("/music")));
    }

    #[test]
    fn test_default_library_dir_is_created() {
        let root = tempfile::tempdir().expect("tmpdir");
        let dir = root.path().join("data");

        assert_eq!(default_library_dir(&dir), Some(dir.clone()));
        assert!(dir.is_dir());

        // Existing directories are used as they are.
        assert_eq!(default_library_dir(&dir), Some(dir));
    }
}
