use eframe::egui::{self, Color32, CornerRadius, RichText, Stroke, Vec2};

use super::{Action, TEXT_COLOR, tile_frame};
use crate::player::PlayerStatus;

const BUTTON_SIZE: Vec2 = Vec2::new(48.0, 40.0);
const BUTTON_FILL: Color32 = Color32::from_rgb(0x3D, 0x3D, 0x3D);

/// Previous / play-pause / next buttons and the volume slider.
pub struct ControlPanel<'a> {
    status: PlayerStatus,
    has_track: bool,
    volume: f32,
    actions: &'a mut Vec<Action>,
}

impl<'a> ControlPanel<'a> {
    pub fn new(
        status: PlayerStatus,
        has_track: bool,
        volume: f32,
        actions: &'a mut Vec<Action>,
    ) -> Self {
        Self {
            status,
            has_track,
            volume,
            actions,
        }
    }
}

impl egui::Widget for ControlPanel<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        tile_frame(false)
            .show(ui, |ui| {
                ui.set_min_size(ui.available_size());

                ui.vertical_centered(|ui| {
                    ui.horizontal(|ui| {
                        let button = |label: &str| {
                            egui::Button::new(RichText::new(label).size(18.0).color(TEXT_COLOR))
                                .fill(BUTTON_FILL)
                                .stroke(Stroke::NONE)
                                .corner_radius(CornerRadius::same(20))
                                .min_size(BUTTON_SIZE)
                        };

                        let previous = ui.add_enabled(self.has_track, button("⏮"));
                        let toggle = ui.add_enabled(
                            self.has_track,
                            button(if self.status == PlayerStatus::Playing {
                                "⏸"
                            } else {
                                "▶"
                            }),
                        );
                        let next = ui.add_enabled(self.has_track, button("⏭"));

                        if previous.clicked() {
                            self.actions.push(Action::Previous);
                        }
                        if toggle.clicked() {
                            self.actions.push(Action::Toggle);
                        }
                        if next.clicked() {
                            self.actions.push(Action::Next);
                        }
                    });

                    ui.add_space(10.0);

                    ui.horizontal(|ui| {
                        ui.label(RichText::new("🔊").color(TEXT_COLOR));

                        ui.spacing_mut().slider_width = 100.0;

                        let mut volume = self.volume;
                        let volume_slider = ui.add(
                            egui::Slider::new(&mut volume, 0.0..=1.0)
                                .handle_shape(egui::style::HandleShape::Rect { aspect_ratio: 0.5 })
                                .show_value(false)
                                .step_by(0.02),
                        );

                        if volume_slider.changed() {
                            self.actions.push(Action::SetVolume(volume));
                        }
                    });
                });
            })
            .response
    }
}
