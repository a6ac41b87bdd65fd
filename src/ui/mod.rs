use std::time::Duration;

use eframe::egui::{self, Color32, CornerRadius, Margin, Stroke};

pub mod carousel_panel;
pub mod control_panel;
pub mod lyrics_panel;
pub mod now_playing;
pub mod tile;

const TILE_FILL: Color32 = Color32::from_rgb(0x2D, 0x2D, 0x2D);
const TILE_STROKE: Color32 = Color32::from_rgb(0x3D, 0x3D, 0x3D);
const TILE_HIGHLIGHT_STROKE: Color32 = Color32::from_rgb(0x9D, 0x9D, 0x9D);

/// Inner margin of a tile, its border is one point wide.
pub const TILE_PADDING: i8 = 8;

pub const TEXT_COLOR: Color32 = Color32::WHITE;
pub const DIMMED_TEXT_COLOR: Color32 = Color32::from_rgb(0x80, 0x80, 0x80);

/// User requests collected while drawing a frame, applied by the app after.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Play the carousel item at this index.
    PlayTile(usize),
    PlayCenter,
    Toggle,
    Play,
    Pause,
    Previous,
    Next,
    Seek(Duration),
    /// Seek to the start of this lyric line.
    SeekLyric(usize),
    SetVolume(f32),
}

/// Dark rounded box every tile is drawn in.
pub fn tile_frame(highlighted: bool) -> egui::Frame {
    egui::Frame::new()
        .fill(TILE_FILL)
        .stroke(Stroke::new(
            1.0,
            if highlighted {
                TILE_HIGHLIGHT_STROKE
            } else {
                TILE_STROKE
            },
        ))
        .corner_radius(CornerRadius::same(4))
        .inner_margin(Margin::same(TILE_PADDING))
}

/// `mm:ss`, minutes are not wrapped into hours.
pub fn format_time(seconds: f32) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0).trunc() as u64
    } else {
        0
    };

    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(62.9), "01:02");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(-3.0), "00:00");
        assert_eq!(format_time(f32::NAN), "00:00");
    }
}
