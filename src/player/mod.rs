use std::{fs::File, path::PathBuf, sync::Arc, sync::mpsc::Sender, time::Duration};

use log::{debug, info};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Source};
use thiserror::Error;

use crate::track::Track;

mod source;
use source::{Shared, TrackSource};

/// Delivers an event from the mixer thread.
type Notify = Arc<dyn Fn(PlayerEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Playback position, sent every [`crate::config::POSITION_TICK`] of
    /// audio and right after a seek.
    Progress(Duration),
    /// The track played to its end.
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    Stopped,
    Playing,
    Paused,
}

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Audio output stream: {0}")]
    Stream(#[from] rodio::StreamError),

    #[error("Track has no audio file")]
    NoFile,

    #[error("Cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
}

/// Plays one track at a time on the default output device.
///
/// Each loaded track is added to the output mixer on its own and tagged with
/// a generation; loading the next one silences the previous.
pub struct MusicPlayer {
    stream: OutputStream,
    shared: Arc<Shared>,
    generation: u64,
    notify: Notify,

    track: Option<Track>,
}

impl MusicPlayer {
    /// Events go to `events`, each one followed by a call to `wake`.
    ///
    /// # Errors
    ///
    /// [`PlayerError::Stream`] if the default audio device cannot be opened.
    pub fn new<W>(events: Sender<PlayerEvent>, wake: W) -> Result<Self, PlayerError>
    where
        W: Fn() + Send + Sync + 'static,
    {
        let stream = OutputStreamBuilder::open_default_stream()?;

        let notify: Notify = Arc::new(move |event| {
            if events.send(event).is_ok() {
                wake();
            }
        });

        Ok(Self {
            stream,
            shared: Arc::new(Shared::new()),
            generation: source::IDLE,
            notify,

            track: None,
        })
    }

    /// Replaces whatever is playing with `track`, from the beginning.
    ///
    /// # Errors
    ///
    /// The track has no file, or the file cannot be opened or decoded. The
    /// current playback is left untouched in that case.
    pub fn play_track(&mut self, track: &Track) -> Result<(), PlayerError> {
        let decoder = open(track)?;

        self.generation += 1;
        self.shared.load(self.generation);
        self.stream.mixer().add(TrackSource::new(
            decoder,
            self.shared.clone(),
            self.generation,
            self.notify.clone(),
        ));

        info!("Playing {}", track.display_title());

        self.track = Some(track.clone());

        Ok(())
    }

    /// Resumes, or restarts the last track once it ended or was stopped.
    pub fn play(&mut self) {
        if !self.shared.is_idle() {
            self.shared.set_paused(false);
            return;
        }

        if let Some(track) = self.track.clone()
            && let Err(err) = self.play_track(&track)
        {
            debug!("Cannot restart track: {err}");
        }
    }

    #[inline]
    pub fn pause(&mut self) {
        if !self.shared.is_idle() {
            self.shared.set_paused(true);
        }
    }

    #[inline]
    pub fn stop(&mut self) {
        self.shared.stop();
    }

    #[inline]
    pub fn toggle(&mut self) {
        if self.status() == PlayerStatus::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    #[inline]
    pub fn seek(&mut self, position: Duration) {
        self.shared.request_seek(position);
    }

    /// Volume between 0.0 and 1.0.
    #[inline]
    pub fn set_volume(&mut self, value: f32) {
        self.shared.set_volume(value.clamp(0.0, 1.0));
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        self.shared.volume()
    }

    /// Position of the loaded track, as of the mixer's last controls pass.
    #[inline]
    pub fn position(&self) -> Duration {
        self.shared.position()
    }

    pub fn status(&self) -> PlayerStatus {
        if self.shared.is_idle() {
            PlayerStatus::Stopped
        } else if self.shared.is_paused() {
            PlayerStatus::Paused
        } else {
            PlayerStatus::Playing
        }
    }

    #[inline]
    pub fn current_track(&self) -> Option<&Track> {
        self.track.as_ref()
    }
}

impl Drop for MusicPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn open(track: &Track) -> Result<impl Source + Send + 'static, PlayerError> {
    let path = track.path.as_ref().ok_or(PlayerError::NoFile)?;

    let file = File::open(path).map_err(|source| PlayerError::Open {
        path: path.to_owned(),
        source,
    })?;

    Decoder::try_from(file).map_err(|source| PlayerError::Decode {
        path: path.to_owned(),
        source,
    })
}
