use std::{
    path::Path,
    sync::mpsc::{self, Receiver},
    time::Duration,
};

use eframe::egui;
use log::{debug, error, info, warn};

use crate::{
    carousel::Carousel,
    config::{self, Config},
    lyrics::LyricTrack,
    player::{MusicPlayer, PlayerEvent, PlayerStatus},
    playlist::Playlist,
    track::{self, Track},
    ui::{
        Action, carousel_panel::CarouselPanel, control_panel::ControlPanel,
        lyrics_panel::LyricsPanel, now_playing::NowPlaying,
    },
};

pub struct App {
    /// `None` when no audio device could be opened; the library still shows.
    player: Option<MusicPlayer>,
    player_rx: Receiver<PlayerEvent>,

    carousel: Carousel<Track>,
    playlist: Playlist,
    lyrics: LyricTrack,
    scroll_lyrics: bool,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &Config) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        cc.egui_ctx.set_fonts(config::get_font_definitions());

        let (player_tx, player_rx) = mpsc::channel();

        let ctx = cc.egui_ctx.clone();
        let player = match MusicPlayer::new(player_tx, move || ctx.request_repaint()) {
            Ok(player) => Some(player),
            Err(err) => {
                error!("Playback disabled: {err}");
                None
            }
        };

        let mut app = Self {
            player,
            player_rx,

            carousel: Carousel::new(),
            playlist: Playlist::default(),
            lyrics: LyricTrack::default(),
            scroll_lyrics: false,
        };

        if let Some(dir) = &config.library_dir {
            let paths = track::scan_tracks(dir);
            info!("Found {} tracks in {}", paths.len(), dir.display());

            for path in paths {
                app.add_track(&cc.egui_ctx, &path);
            }
        }

        app.carousel.push(Track::drop_target());

        app
    }

    fn add_track(&mut self, ctx: &egui::Context, path: &Path) {
        let track = track::read_track_metadata(path).unwrap_or_else(|err| {
            warn!("Cannot read tags of {}: {err}", path.display());
            Track::from_path(path)
        });

        if let (Some(uri), Some(cover)) = (track.cover_uri(), &track.cover) {
            ctx.include_bytes(uri, cover.clone());
        }

        debug!("Added {}", track.display_title());

        self.carousel.push(track);
    }

    fn handle_player_events(&mut self) {
        while let Ok(event) = self.player_rx.try_recv() {
            match event {
                PlayerEvent::Progress(position) => {
                    let millis = i64::try_from(position.as_millis()).unwrap_or(i64::MAX);

                    if self.lyrics.sync(millis) {
                        self.scroll_lyrics = true;
                    }
                }
                PlayerEvent::Ended => self.play_next(),
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());

        for path in dropped.into_iter().filter_map(|file| file.path) {
            if track::is_supported(&path) {
                self.add_track(ctx, &path);
            } else {
                info!("Ignored dropped file {}", path.display());
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        if ctx.memory(|memory| memory.focused().is_some()) {
            return;
        }

        ctx.input_mut(|input| {
            if input.consume_key(egui::Modifiers::NONE, egui::Key::Space) {
                actions.push(Action::Toggle);
            }
            if input.consume_key(egui::Modifiers::NONE, egui::Key::Enter) {
                actions.push(Action::PlayCenter);
            }
            if input.consume_key(egui::Modifiers::NONE, egui::Key::ArrowLeft) {
                self.carousel.rotate_left();
            }
            if input.consume_key(egui::Modifiers::NONE, egui::Key::ArrowRight) {
                self.carousel.rotate_right();
            }
        });
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::PlayTile(index) => self.play_tile(index),
            Action::PlayCenter => {
                if let Some(index) = self.carousel.center_index() {
                    self.play_tile(index);
                }
            }
            Action::Previous => self.play_previous(),
            Action::Next => self.play_next(),
            Action::SeekLyric(index) => match self.lyrics.seek_position(index) {
                Ok(millis) => self.seek(Duration::from_millis(millis)),
                Err(err) => warn!("Cannot seek to lyric: {err}"),
            },
            Action::Seek(position) => self.seek(position),
            Action::Toggle => {
                if let Some(player) = &mut self.player {
                    player.toggle();
                }
            }
            Action::Play => {
                if let Some(player) = &mut self.player {
                    player.play();
                }
            }
            Action::Pause => {
                if let Some(player) = &mut self.player {
                    player.pause();
                }
            }
            Action::SetVolume(volume) => {
                if let Some(player) = &mut self.player {
                    player.set_volume(volume);
                }
            }
        }
    }

    /// Loads every playable tile into the playlist and starts the one at
    /// `index`.
    fn play_tile(&mut self, index: usize) {
        let Some(track) = self.carousel.get(index).filter(|t| t.is_playable()) else {
            debug!("Tile {index} has nothing to play");
            return;
        };

        let position = self
            .carousel
            .iter()
            .filter(|t| t.is_playable())
            .position(|t| t.path == track.path)
            .unwrap_or_default();

        self.playlist
            .replace(self.carousel.iter().filter(|t| t.is_playable()).cloned().collect());

        if let Some(track) = self.playlist.select(position).cloned() {
            self.start(&track);
        }
    }

    fn play_next(&mut self) {
        if let Some(track) = self.playlist.next_track().cloned() {
            self.start(&track);
        }
    }

    fn play_previous(&mut self) {
        if let Some(track) = self.playlist.previous_track().cloned() {
            self.start(&track);
        }
    }

    fn start(&mut self, track: &Track) {
        let Some(player) = &mut self.player else {
            return;
        };

        if let Err(err) = player.play_track(track) {
            error!("{err}");
            return;
        }

        // Ticks of the replaced track.
        while self.player_rx.try_recv().is_ok() {}

        self.lyrics = LyricTrack::parse(track.lyrics.as_deref().unwrap_or_default());
        self.lyrics.sync(0);
        self.scroll_lyrics = true;

        debug!(
            "Loaded {} lyric lines for {}",
            self.lyrics.len(),
            track.display_title()
        );
    }

    fn seek(&mut self, position: Duration) {
        if let Some(player) = &mut self.player {
            player.seek(position);
        }
    }

    fn status(&self) -> PlayerStatus {
        self.player
            .as_ref()
            .map_or(PlayerStatus::Stopped, MusicPlayer::status)
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_player_events();
        self.handle_dropped_files(ctx);

        let mut actions = Vec::new();

        self.handle_keys(ctx, &mut actions);

        let status = self.status();
        let position = self
            .player
            .as_ref()
            .map_or(Duration::ZERO, MusicPlayer::position);

        egui::TopBottomPanel::top("carousel")
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.add_space(10.0);
                ui.add(CarouselPanel::new(&mut self.carousel, &mut actions));
                ui.add_space(10.0);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let track = self.player.as_ref().and_then(MusicPlayer::current_track);
            let volume = self.player.as_ref().map_or(1.0, MusicPlayer::volume);

            ui.columns(3, |columns| {
                if let [lyrics, now_playing, controls] = columns {
                    lyrics.add(
                        LyricsPanel::new(&self.lyrics, &mut actions)
                            .scroll_to_active(self.scroll_lyrics),
                    );
                    now_playing.add(NowPlaying::new(track, position, status, &mut actions));
                    controls.add(ControlPanel::new(
                        status,
                        !self.playlist.is_empty(),
                        volume,
                        &mut actions,
                    ));
                }
            });
        });

        self.scroll_lyrics = false;

        for action in actions {
            self.apply(action);
        }
    }
}
