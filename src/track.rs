use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    result::Result,
    sync::Arc,
    time::Duration,
};

use lofty::{
    config::ParseOptions,
    error::LoftyError,
    file::{AudioFile, TaggedFile, TaggedFileExt},
    picture::PictureType,
    probe::Probe,
    tag::{ItemKey, Tag},
};
use walkdir::WalkDir;

pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["flac", "mp3", "wav"];

const DROP_TARGET_TITLE: &str = "Drop music here";

/// A tile in the carousel.
///
/// Tracks without a `path` are placeholders (the drop target) and cannot be
/// played.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub path: Option<PathBuf>,
    pub title: Option<String>,
    pub duration: Option<Duration>,
    pub cover: Option<Arc<[u8]>>,
    /// Raw LRC text as found in the tags.
    pub lyrics: Option<String>,
}

impl Track {
    /// A track with no metadata besides its file.
    pub fn from_path(path: &Path) -> Self {
        Self {
            path: Some(path.to_owned()),
            ..Default::default()
        }
    }

    pub fn drop_target() -> Self {
        Self {
            title: Some(DROP_TARGET_TITLE.to_owned()),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_playable(&self) -> bool {
        self.path.is_some()
    }

    /// Tag title, else the file name, else `"-"`.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or_else(|| {
                self.path
                    .as_deref()
                    .and_then(Path::file_name)
                    .and_then(OsStr::to_str)
            })
            .unwrap_or("-")
    }

    /// Key for the egui image cache, unique per file.
    pub fn cover_uri(&self) -> Option<String> {
        self.cover.as_ref()?;

        Some(match &self.path {
            Some(path) => format!("bytes://cover/{}", path.display()),
            None => "bytes://cover/-".to_owned(),
        })
    }
}

#[inline]
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Scans the given path for music files.
///
/// This function recursively traverses directories, collecting the paths of
/// supported music files (`.flac`, `.wav`, `.mp3`, any letter case). The
/// result is sorted so the library shows up in a stable order.
///
/// # Arguments
///
/// * `path` - The starting path to scan. This can be a file or a directory.
pub fn scan_tracks(path: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_supported(entry.path()))
        .map(|entry| entry.path().to_owned())
        .collect();

    paths.sort();
    paths
}

/// Reads metadata from a music file.
///
/// This function attempts to read title, duration, front cover and embedded
/// lyrics using the `lofty` crate.
///
/// # Errors
///
/// `LoftyError` if the file cannot be opened or its tags cannot be parsed.
pub fn read_track_metadata(path: &Path) -> Result<Track, LoftyError> {
    let probe = Probe::open(path)?.options(ParseOptions::default().implicit_conversions(false));
    let tagged = probe.read()?;

    let tag = tagged.primary_tag();

    Ok(Track {
        path: Some(path.to_owned()),
        title: tag
            .and_then(|tag| tag.get_string(ItemKey::TrackTitle))
            .map(String::from),
        duration: Some(tagged.properties().duration()),
        cover: tag.and_then(front_cover),
        lyrics: find_lyrics(&tagged),
    })
}

fn front_cover(tag: &Tag) -> Option<Arc<[u8]>> {
    tag.get_picture_type(PictureType::CoverFront)
        .or_else(|| tag.pictures().first())
        .map(|pic| Arc::from(pic.data()))
}

/// Lyrics of the primary tag, else of the other tags in file order.
fn find_lyrics(tagged: &TaggedFile) -> Option<String> {
    let primary = tagged.primary_tag_type();

    first_lyrics(
        tagged
            .primary_tag()
            .into_iter()
            .chain(tagged.tags().iter().filter(|tag| tag.tag_type() != primary)),
    )
}

/// First non-blank `ItemKey::Lyrics` among `tags`.
fn first_lyrics<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> Option<String> {
    tags.into_iter()
        .find_map(|tag| {
            tag.get_string(ItemKey::Lyrics)
                .filter(|lyrics| !lyrics.trim().is_empty())
        })
        .map(String::from)
}
