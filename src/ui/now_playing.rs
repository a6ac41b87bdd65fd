use std::time::Duration;

use eframe::egui::{self, RichText};

use super::{Action, TEXT_COLOR, format_time, tile_frame};
use crate::{config::COVER_IMAGE_SIZE, player::PlayerStatus, track::Track};

const NOTHING_PLAYING: &str = "Now playing";

#[derive(Clone, Default)]
struct State {
    position: f32,
    seeking: bool,
    resume: bool,
}

impl State {
    pub fn load(ctx: &egui::Context, id: egui::Id) -> Option<Self> {
        ctx.data_mut(|d| d.get_temp(id))
    }

    pub fn store(self, ctx: &egui::Context, id: egui::Id) {
        ctx.data_mut(|d| d.insert_temp(id, self));
    }
}

/// The playing track's cover and title above a scrub bar.
///
/// Dragging the bar pauses playback and seeks, releasing it resumes if the
/// track was playing when the drag started.
pub struct NowPlaying<'a> {
    track: Option<&'a Track>,
    position: Duration,
    status: PlayerStatus,
    actions: &'a mut Vec<Action>,
}

impl<'a> NowPlaying<'a> {
    pub fn new(
        track: Option<&'a Track>,
        position: Duration,
        status: PlayerStatus,
        actions: &'a mut Vec<Action>,
    ) -> Self {
        Self {
            track,
            position,
            status,
            actions,
        }
    }
}

impl egui::Widget for NowPlaying<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let id = ui.id().with("now_playing");
        let mut state = State::load(ui.ctx(), id).unwrap_or_default();

        let stopped = self.status == PlayerStatus::Stopped;

        if !state.seeking {
            state.position = if stopped {
                0.0
            } else {
                self.position.as_secs_f32()
            };
        }

        // NOTE: Default to 1.0 so slider handle will be at the start.
        let total_duration = self
            .track
            .and_then(|track| track.duration)
            .map(|d| d.as_secs_f32())
            .filter(|d| *d > 0.0)
            .unwrap_or(1.0);

        let response = tile_frame(!stopped)
            .show(ui, |ui| {
                ui.set_min_size(ui.available_size());

                ui.vertical_centered(|ui| {
                    if let Some(uri) = self.track.and_then(Track::cover_uri) {
                        ui.add(
                            egui::Image::from_uri(uri)
                                .max_size(COVER_IMAGE_SIZE.into())
                                .maintain_aspect_ratio(true),
                        );
                    }

                    ui.add(
                        egui::Label::new(
                            RichText::new(self.track.map_or(NOTHING_PLAYING, Track::display_title))
                                .color(TEXT_COLOR),
                        )
                        .truncate(),
                    );

                    if stopped {
                        ui.label("--:-- / --:--");
                    } else {
                        ui.label(format!(
                            "{} / {}",
                            format_time(state.position),
                            format_time(total_duration)
                        ));
                    }

                    ui.spacing_mut().slider_width = ui.available_width();

                    let slider = ui.add_enabled(
                        !stopped,
                        egui::Slider::new(&mut state.position, 0.0..=total_duration)
                            .handle_shape(egui::style::HandleShape::Rect { aspect_ratio: 0.5 })
                            .show_value(false),
                    );

                    if slider.drag_started() {
                        state.seeking = true;
                        state.resume = self.status == PlayerStatus::Playing;
                        self.actions.push(Action::Pause);
                    }
                    if slider.changed() {
                        self.actions.push(Action::Seek(
                            Duration::try_from_secs_f32(state.position).unwrap_or_default(),
                        ));
                    }
                    if slider.drag_stopped() {
                        state.seeking = false;

                        if state.resume {
                            self.actions.push(Action::Play);
                        }
                    }
                });
            })
            .response;

        state.store(ui.ctx(), id);

        response
    }
}
