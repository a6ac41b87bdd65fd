use crate::track::Track;

/// Playback queue. Next and previous wrap around both ends.
#[derive(Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current_index: usize,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            current_index: 0,
        }
    }

    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.current_index = 0;
    }

    pub fn select(&mut self, index: usize) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }

        self.current_index = index.min(self.tracks.len() - 1);
        self.current()
    }

    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }

    pub fn next_track(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }

        self.current_index = (self.current_index + 1) % self.tracks.len();
        self.current()
    }

    pub fn previous_track(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }

        self.current_index = (self.current_index + self.tracks.len() - 1) % self.tracks.len();
        self.current()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn playlist(names: &[&str]) -> Playlist {
        Playlist::new(
            names
                .iter()
                .map(|name| Track::from_path(Path::new(name)))
                .collect(),
        )
    }

    fn title(track: Option<&Track>) -> Option<&str> {
        track.map(Track::display_title)
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut list = playlist(&["a.mp3", "b.mp3", "c.mp3"]);
        assert_eq!(title(list.current()), Some("a.mp3"));

        assert_eq!(title(list.previous_track()), Some("c.mp3"));
        assert_eq!(title(list.next_track()), Some("a.mp3"));
        assert_eq!(title(list.next_track()), Some("b.mp3"));
        assert_eq!(title(list.next_track()), Some("c.mp3"));
        assert_eq!(title(list.next_track()), Some("a.mp3"));
    }

    #[test]
    fn test_empty() {
        let mut list = Playlist::default();

        assert!(list.next_track().is_none());
        assert!(list.previous_track().is_none());
        assert!(list.select(3).is_none());
        assert!(list.current().is_none());
    }

    #[test]
    fn test_select_clamps() {
        let mut list = playlist(&["a.mp3", "b.mp3"]);

        assert_eq!(title(list.select(1)), Some("b.mp3"));
        assert_eq!(title(list.select(9)), Some("b.mp3"));
        assert_eq!(title(list.current()), Some("b.mp3"));
    }

    #[test]
    fn test_replace_resets_position() {
        let mut list = playlist(&["a.mp3", "b.mp3"]);
        list.select(1);

        list.replace(vec![
            Track::from_path(Path::new("z.wav")),
            Track::from_path(Path::new("y.wav")),
        ]);
        assert_eq!(title(list.current()), Some("z.wav"));
        assert_eq!(title(list.previous_track()), Some("y.wav"));
    }
}
