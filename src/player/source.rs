use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use log::warn;
use parking_lot::Mutex;
use rodio::source::{SeekError, TrackPosition};
use rodio::{ChannelCount, Sample, SampleRate, Source};

use super::{Notify, PlayerEvent};
use crate::config::POSITION_TICK;

/// How often a playing track picks up the controls, in audio time.
const CONTROLS_INTERVAL_MS: u64 = 5;

/// Generation of "no track loaded".
pub(super) const IDLE: u64 = 0;

/// Controls written by the UI thread, read by the track on the mixer thread.
pub(super) struct Shared {
    /// Generation of the audible track, [`IDLE`] once it ended or stopped.
    current: AtomicU64,
    paused: AtomicBool,
    /// `f32` bits.
    volume: AtomicU32,
    position_ms: AtomicU64,
    seek: Mutex<Option<Duration>>,
}

impl Shared {
    pub fn new() -> Self {
        Self {
            current: AtomicU64::new(IDLE),
            paused: AtomicBool::new(false),
            volume: AtomicU32::new(1.0_f32.to_bits()),
            position_ms: AtomicU64::new(0),
            seek: Mutex::new(None),
        }
    }

    /// Makes `generation` the audible track, superseding any other.
    pub fn load(&self, generation: u64) {
        *self.seek.lock() = None;
        self.position_ms.store(0, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
        self.current.store(generation, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.current.store(IDLE, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.current.load(Ordering::SeqCst) == IDLE
    }

    #[inline]
    fn is_current(&self, generation: u64) -> bool {
        self.current.load(Ordering::SeqCst) == generation
    }

    /// Marks `generation` as played out. `false` if it was already replaced.
    fn finish(&self, generation: u64) -> bool {
        self.current
            .compare_exchange(generation, IDLE, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    #[inline]
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Ordering::SeqCst))
    }

    #[inline]
    pub fn set_volume(&self, volume: f32) {
        self.volume.store(volume.to_bits(), Ordering::SeqCst);
    }

    #[inline]
    pub fn position(&self) -> Duration {
        Duration::from_millis(self.position_ms.load(Ordering::SeqCst))
    }

    #[inline]
    pub fn request_seek(&self, position: Duration) {
        *self.seek.lock() = Some(position);
    }
}

/// One loaded track as the mixer sees it.
///
/// Every few milliseconds of audio it applies pause, volume and seek requests
/// and publishes its position. It goes silent for good once another track is
/// loaded or playback is stopped, and reports [`PlayerEvent::Ended`] only when
/// the decoder itself runs dry.
pub(super) struct TrackSource<S> {
    inner: TrackPosition<S>,
    shared: Arc<Shared>,
    generation: u64,
    notify: Notify,

    /// Samples left until the controls are read again.
    countdown: usize,
    paused: bool,
    volume: f32,
    /// Position sent with the last [`PlayerEvent::Progress`].
    reported: Option<Duration>,
}

impl<S> TrackSource<S>
where
    S: Source,
{
    pub fn new(source: S, shared: Arc<Shared>, generation: u64, notify: Notify) -> Self {
        Self {
            inner: source.track_position(),
            shared,
            generation,
            notify,

            countdown: 0,
            paused: false,
            volume: 1.0,
            reported: None,
        }
    }

    /// Whole frames only, so pausing never shifts the channel order.
    fn controls_period(&self) -> usize {
        let frames = u64::from(self.inner.sample_rate()) * CONTROLS_INTERVAL_MS / 1000;
        let samples = frames.max(1) * u64::from(self.inner.channels().max(1));

        usize::try_from(samples).unwrap_or(usize::MAX)
    }

    /// `false` once this track has been replaced or stopped.
    fn apply_controls(&mut self) -> bool {
        if !self.shared.is_current(self.generation) {
            return false;
        }

        self.paused = self.shared.is_paused();
        self.volume = self.shared.volume();

        let seek = self.shared.seek.lock().take();
        if let Some(target) = seek
            && let Err(err) = self.inner.try_seek(target)
        {
            warn!("Seek to {target:?} failed: {err:?}");
        }

        let position = self.inner.get_pos();
        self.shared.position_ms.store(
            u64::try_from(position.as_millis()).unwrap_or(u64::MAX),
            Ordering::SeqCst,
        );

        let due = self.reported.is_none_or(|reported| {
            seek.is_some() || position.abs_diff(reported) >= POSITION_TICK
        });

        if due {
            self.reported = Some(position);
            (self.notify)(PlayerEvent::Progress(position));
        }

        true
    }
}

impl<S> Iterator for TrackSource<S>
where
    S: Source,
{
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.countdown == 0 {
            if !self.apply_controls() {
                return None;
            }
            self.countdown = self.controls_period();
        }
        self.countdown -= 1;

        if self.paused {
            return Some(0.0);
        }

        if let Some(sample) = self.inner.next() {
            Some(sample * self.volume)
        } else {
            if self.shared.finish(self.generation) {
                (self.notify)(PlayerEvent::Ended);
            }
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<S> Source for TrackSource<S>
where
    S: Source,
{
    #[inline]
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    #[inline]
    fn channels(&self) -> ChannelCount {
        self.inner.channels()
    }

    #[inline]
    fn sample_rate(&self) -> SampleRate {
        self.inner.sample_rate()
    }

    #[inline]
    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    #[inline]
    fn try_seek(&mut self, pos: Duration) -> Result<(), SeekError> {
        self.inner.try_seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use rodio::buffer::SamplesBuffer;

    use super::*;

    /// One second of mono audio at 1 kHz, controls are read every 5 samples.
    fn second_of(value: f32) -> SamplesBuffer {
        SamplesBuffer::new(1, 1000, vec![value; 1000])
    }

    fn track(
        value: f32,
        generation: u64,
    ) -> (TrackSource<SamplesBuffer>, Arc<Shared>, Receiver<PlayerEvent>) {
        let (tx, rx) = mpsc::channel();
        let shared = Arc::new(Shared::new());
        shared.load(generation);

        let notify: Notify = Arc::new(move |event| {
            tx.send(event).ok();
        });

        let source = TrackSource::new(second_of(value), shared.clone(), generation, notify);
        (source, shared, rx)
    }

    fn ended(events: &Receiver<PlayerEvent>) -> usize {
        events.try_iter().filter(|e| *e == PlayerEvent::Ended).count()
    }

    #[test]
    fn test_plays_out_and_reports_end_once() {
        let (mut source, shared, events) = track(0.5, 1);
        shared.set_volume(0.5);

        let samples: Vec<f32> = source.by_ref().collect();
        assert_eq!(samples.len(), 1000);
        assert!(samples.iter().all(|&s| (s - 0.25).abs() < f32::EPSILON));

        assert!(source.next().is_none());
        assert_eq!(ended(&events), 1);
        assert!(shared.is_idle());
    }

    #[test]
    fn test_progress_every_tick() {
        let (source, _shared, events) = track(0.1, 1);
        source.for_each(drop);

        let progress: Vec<Duration> = events
            .try_iter()
            .filter_map(|event| match event {
                PlayerEvent::Progress(position) => Some(position),
                PlayerEvent::Ended => None,
            })
            .collect();

        assert_eq!(progress.first(), Some(&Duration::ZERO));
        assert!(progress.len() >= 4, "{progress:?}");
        assert!(
            progress
                .windows(2)
                .all(|pair| pair[1].abs_diff(pair[0]) >= POSITION_TICK)
        );
    }

    #[test]
    fn test_paused_track_is_silent() {
        let (mut source, shared, _events) = track(0.5, 1);
        shared.set_paused(true);

        assert!(source.by_ref().take(50).all(|s| s == 0.0));
        assert_eq!(shared.position(), Duration::ZERO);

        shared.set_paused(false);
        assert!(source.by_ref().skip(5).take(5).all(|s| s > 0.0));
    }

    #[test]
    fn test_replaced_track_goes_quiet() {
        let (mut source, shared, events) = track(0.5, 1);
        assert!(source.next().is_some());

        shared.load(2);
        assert!(source.by_ref().take(10).count() < 10);
        assert!(source.next().is_none());

        assert_eq!(ended(&events), 0);
        assert!(!shared.is_idle());
    }

    #[test]
    fn test_stopped_track_does_not_end() {
        let (mut source, shared, events) = track(0.5, 1);
        shared.stop();

        assert!(source.next().is_none());
        assert_eq!(ended(&events), 0);
    }
}
