use eframe::egui::{self, RichText, Vec2};

use super::{TEXT_COLOR, TILE_PADDING, tile_frame};
use crate::{config::COVER_IMAGE_SIZE, track::Track};

/// Clickable album tile: cover art when the track has one, and its title.
///
/// Covers are looked up by [`Track::cover_uri`], the bytes must already be
/// registered with `egui::Context::include_bytes`.
pub struct AlbumTile<'a> {
    track: &'a Track,
    size: Option<Vec2>,
    highlighted: bool,
}

impl<'a> AlbumTile<'a> {
    pub fn new(track: &'a Track) -> Self {
        Self {
            track,
            size: None,
            highlighted: false,
        }
    }

    pub fn size(mut self, vec2: Vec2) -> Self {
        self.size = Some(vec2);
        self
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }
}

impl egui::Widget for AlbumTile<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let size = self.size.unwrap_or(ui.available_size());
        let inner = (size - Vec2::splat(2.0 * (f32::from(TILE_PADDING) + 1.0))).max(Vec2::ZERO);

        let frame = tile_frame(self.highlighted).show(ui, |ui| {
            ui.set_min_size(inner);
            ui.set_max_size(inner);

            ui.vertical_centered(|ui| {
                if let Some(uri) = self.track.cover_uri() {
                    ui.add(
                        egui::Image::from_uri(uri)
                            .max_size(COVER_IMAGE_SIZE.into())
                            .maintain_aspect_ratio(true),
                    );
                }

                ui.add(
                    egui::Label::new(RichText::new(self.track.display_title()).color(TEXT_COLOR))
                        .truncate(),
                );
            });
        });

        frame
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
    }
}
