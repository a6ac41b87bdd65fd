use eframe::egui::{self, RichText};

use super::{Action, DIMMED_TEXT_COLOR, TEXT_COLOR, tile_frame};
use crate::lyrics::LyricTrack;

const NO_LYRICS: &str = "No lyrics";

/// Scrolling lyrics with the active line highlighted.
///
/// Clicking a line requests a seek to it. With `scroll_to_active` set the
/// active line is scrolled to the middle of the panel.
pub struct LyricsPanel<'a> {
    lyrics: &'a LyricTrack,
    scroll_to_active: bool,
    actions: &'a mut Vec<Action>,
}

impl<'a> LyricsPanel<'a> {
    pub fn new(lyrics: &'a LyricTrack, actions: &'a mut Vec<Action>) -> Self {
        Self {
            lyrics,
            scroll_to_active: false,
            actions,
        }
    }

    pub fn scroll_to_active(mut self, scroll: bool) -> Self {
        self.scroll_to_active = scroll;
        self
    }

    /// Nothing active yet, as right after a track change: back to the top.
    fn scroll_to_top(&self) -> bool {
        self.scroll_to_active && self.lyrics.active().is_none()
    }
}

impl egui::Widget for LyricsPanel<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let scroll_to_top = self.scroll_to_top();

        tile_frame(false)
            .show(ui, |ui| {
                ui.set_min_size(ui.available_size());

                if self.lyrics.is_empty() {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(NO_LYRICS).size(14.0).color(DIMMED_TEXT_COLOR));
                    });
                    return;
                }

                let heading = match (self.lyrics.header("ti"), self.lyrics.header("ar")) {
                    (Some(title), Some(artist)) => Some(format!("{title} - {artist}")),
                    (Some(title), None) => Some(title.to_owned()),
                    (None, _) => None,
                };

                if let Some(heading) = heading {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(heading).size(12.0).color(DIMMED_TEXT_COLOR));
                    });
                    ui.separator();
                }

                let mut scroll_area = egui::ScrollArea::vertical()
                    .id_salt("lyrics")
                    .auto_shrink(false);

                if scroll_to_top {
                    scroll_area = scroll_area.vertical_scroll_offset(0.0);
                }

                scroll_area.show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        for (index, line) in self.lyrics.lines().iter().enumerate() {
                            let active = self.lyrics.active() == Some(index);

                            let text = if active {
                                RichText::new(&line.text).size(16.0).strong().color(TEXT_COLOR)
                            } else {
                                RichText::new(&line.text).size(14.0).color(DIMMED_TEXT_COLOR)
                            };

                            let label = ui.add(
                                egui::Label::new(text).wrap().sense(egui::Sense::click()),
                            );

                            if active && self.scroll_to_active {
                                label.scroll_to_me(Some(egui::Align::Center));
                            }

                            if label.clicked() {
                                self.actions.push(Action::SeekLyric(index));
                            }
                        }
                    });
                });
            })
            .response
    }
}
