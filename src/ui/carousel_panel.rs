use eframe::egui::{self, Vec2};

use super::{Action, tile::AlbumTile};
use crate::{carousel::Carousel, config::TILE_MIN_SIZE, track::Track};

const ARROW_WIDTH: f32 = 30.0;

/// Top row: the visible tiles between the ◀ and ▶ rotation buttons, with a
/// ▼ button above that plays the centered tile.
pub struct CarouselPanel<'a> {
    carousel: &'a mut Carousel<Track>,
    actions: &'a mut Vec<Action>,
}

impl<'a> CarouselPanel<'a> {
    pub fn new(carousel: &'a mut Carousel<Track>, actions: &'a mut Vec<Action>) -> Self {
        Self { carousel, actions }
    }
}

impl egui::Widget for CarouselPanel<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let rotates = self.carousel.len() > self.carousel.window_size();

        ui.vertical(|ui| {
            ui.vertical_centered(|ui| {
                let play_center = ui.add_enabled(
                    self.carousel.center().is_some_and(Track::is_playable),
                    egui::Button::new("▼").min_size(Vec2::splat(ARROW_WIDTH)),
                );

                if play_center.on_hover_text("Play").clicked() {
                    self.actions.push(Action::PlayCenter);
                }
            });

            ui.horizontal(|ui| {
                let spacing = ui.spacing().item_spacing.x;
                let window = self.carousel.window_size() as f32;
                let width = ((ui.available_width() - 2.0 * ARROW_WIDTH - (window + 1.0) * spacing)
                    / window)
                    .max(TILE_MIN_SIZE.0 / 2.0);
                let size = Vec2::new(width, TILE_MIN_SIZE.1);

                let prev = ui.add_enabled(
                    rotates,
                    egui::Button::new("◀").min_size(Vec2::new(ARROW_WIDTH, size.y)),
                );

                let center = self.carousel.center_index();

                for index in self.carousel.visible_indices() {
                    let Some(track) = self.carousel.get(index) else {
                        continue;
                    };

                    let tile = ui.add(
                        AlbumTile::new(track)
                            .size(size)
                            .highlighted(center == Some(index)),
                    );

                    if tile.clicked() && track.is_playable() {
                        self.actions.push(Action::PlayTile(index));
                    }
                }

                let next = ui.add_enabled(
                    rotates,
                    egui::Button::new("▶").min_size(Vec2::new(ARROW_WIDTH, size.y)),
                );

                if prev.clicked() {
                    self.carousel.rotate_left();
                }
                if next.clicked() {
                    self.carousel.rotate_right();
                }
            });
        })
        .response
    }
}
