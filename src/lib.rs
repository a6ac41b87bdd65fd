//! Tile-based desktop music player.
//!
//! [`lyrics`] and [`carousel`] hold the playback-independent logic: LRC
//! parsing with position lookup, and the rotating window of album tiles. The
//! rest wires them to audio output ([`player`]), tag reading ([`track`]) and
//! the egui front-end ([`app`], [`ui`]).

pub mod app;
pub mod carousel;
pub mod config;
pub mod lyrics;
pub mod player;
pub mod playlist;
pub mod track;
pub mod ui;
