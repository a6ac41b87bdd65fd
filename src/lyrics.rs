use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricsError {
    #[error("Lyric line {index} is out of range for a track of {len} lines")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    /// Start of the line in milliseconds.
    pub timestamp: u64,
    pub text: String,
}

/// Time-ordered lyrics of a single track plus the currently active line.
///
/// A new `LyricTrack` is parsed every time the playing track changes. Lines
/// are sorted by timestamp and lines sharing a timestamp keep the order they
/// had in the source text.
#[derive(Debug, Default, Clone)]
pub struct LyricTrack {
    lines: Vec<LyricLine>,
    headers: Vec<(String, String)>,
    active: Option<usize>,
}

impl LyricTrack {
    /// Parses LRC text.
    ///
    /// Every line may start with any number of `[mm:ss.xx]` or `[mm:ss]`
    /// tags, each producing its own [`LyricLine`] with the text that follows
    /// the tags. Tags that are not valid times are skipped, ID tags such as
    /// `[ar:Artist]` are kept, see [`LyricTrack::header`].
    pub fn parse(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut headers = Vec::new();

        for line in text.lines().map(str::trim) {
            if !line.starts_with('[') {
                continue;
            }

            let mut timestamps = Vec::new();
            let mut rest = line;

            while rest.starts_with('[') {
                let Some(end) = rest.find(']') else {
                    break;
                };

                let (tag, remaining) = rest.split_at(end + 1);

                if let Some(timestamp) = parse_time(tag) {
                    timestamps.push(timestamp);
                } else if let Some(header) = parse_header(tag) {
                    headers.push(header);
                }

                rest = remaining.trim();
            }

            if rest.is_empty() {
                continue;
            }

            lines.extend(timestamps.into_iter().map(|timestamp| LyricLine {
                timestamp,
                text: rest.to_owned(),
            }));
        }

        // NOTE: `sort_by_key` is stable, equal timestamps keep source order.
        lines.sort_by_key(|line| line.timestamp);

        Self {
            lines,
            headers,
            active: None,
        }
    }

    /// Index of the last line starting at or before `position` (ms).
    ///
    /// Returns `None` for an empty track, a negative position, or a position
    /// before the first line.
    pub fn locate(&self, position: i64) -> Option<usize> {
        let position = u64::try_from(position).ok()?;

        self.lines
            .iter()
            .rposition(|line| line.timestamp <= position)
    }

    /// Moves the active line to `position` (ms) and tells whether it changed.
    pub fn sync(&mut self, position: i64) -> bool {
        let active = self.locate(position);

        if active == self.active {
            return false;
        }

        self.active = active;
        true
    }

    /// Timestamp (ms) to seek to when the user picks line `index`.
    ///
    /// # Errors
    ///
    /// [`LyricsError::OutOfRange`] if the track has no line `index`.
    pub fn seek_position(&self, index: usize) -> Result<u64, LyricsError> {
        self.lines
            .get(index)
            .map(|line| line.timestamp)
            .ok_or(LyricsError::OutOfRange {
                index,
                len: self.lines.len(),
            })
    }

    #[inline]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    #[inline]
    pub fn lines(&self) -> &[LyricLine] {
        self.lines.as_slice()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Parses a `[mm:ss.xx]` or `[mm:ss]` tag into milliseconds.
///
/// The fractional part is truncated, not rounded.
pub fn parse_time(tag: &str) -> Option<u64> {
    let inner = tag.strip_prefix('[')?.strip_suffix(']')?;
    let (minutes, seconds) = inner.split_once(':')?;

    let minutes = parse_number(minutes)?;
    let seconds = parse_number(seconds)?;

    let millis = ((minutes * 60.0 + seconds) * 1000.0).trunc();

    if !millis.is_finite() || millis > u64::MAX as f64 {
        return None;
    }

    Some(millis as u64)
}

/// Plain decimal numbers only, `f64::from_str` would also take `inf`, `1e3`
/// or a sign.
fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim();

    if value.is_empty()
        || !value.chars().all(|c| c.is_ascii_digit() || c == '.')
        || !value.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }

    value.parse().ok()
}

fn parse_header(tag: &str) -> Option<(String, String)> {
    let inner = tag.strip_prefix('[')?.strip_suffix(']')?;
    let (key, value) = inner.split_once(':')?;

    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    Some((key.to_ascii_lowercase(), value.trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(lines: &[(u64, &str)]) -> LyricTrack {
        LyricTrack {
            lines: lines
                .iter()
                .map(|&(timestamp, text)| LyricLine {
                    timestamp,
                    text: text.to_owned(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("[01:02.50]"), Some(62_500));
        assert_eq!(parse_time("[00:00.00]"), Some(0));
        assert_eq!(parse_time("[03:07]"), Some(187_000));
        assert_eq!(parse_time("[10:00.5]"), Some(600_500));
    }

    #[test]
    fn test_parse_time_rejects_malformed_tags() {
        for tag in [
            "[bad]", "[]", "[:]", "[01]", "[aa:10]", "[01:xx]", "[01:02:03]", "[-1:00]",
            "[inf:00]", "[1e2:00]", "01:02.50",
        ] {
            assert_eq!(parse_time(tag), None, "{tag} should not parse");
        }
    }

    #[test]
    fn test_multiple_tags_share_text() {
        let lyrics = LyricTrack::parse("[00:01.00][00:02.00]Hello");

        assert_eq!(
            lyrics.lines(),
            &[
                LyricLine {
                    timestamp: 1000,
                    text: "Hello".to_owned()
                },
                LyricLine {
                    timestamp: 2000,
                    text: "Hello".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_malformed_tag_only_line() {
        assert!(LyricTrack::parse("[bad]text").is_empty());
    }

    #[test]
    fn test_malformed_tag_among_valid_tags() {
        let lyrics = LyricTrack::parse("[00:03.00][bad][00:01.00] la la ");

        let stamps: Vec<_> = lyrics.lines().iter().map(|l| l.timestamp).collect();
        assert_eq!(stamps, [1000, 3000]);
        assert!(lyrics.lines().iter().all(|l| l.text == "la la"));
    }

    #[test]
    fn test_skips_blank_untagged_and_textless_lines() {
        let lyrics = LyricTrack::parse(
            "\n   \nplain text\n[00:05.00]\n[00:06.00]   \n  [00:07.00] kept  \n[00:08.00 open",
        );

        assert_eq!(lyrics.len(), 1);
        assert_eq!(lyrics.lines().first().map(|l| l.text.as_str()), Some("kept"));
    }

    #[test]
    fn test_unclosed_tag_ends_tag_list() {
        let lyrics = LyricTrack::parse("[00:01.00][00:02 broken");

        assert_eq!(lyrics.len(), 1);
        assert_eq!(
            lyrics.lines().first().map(|l| l.text.as_str()),
            Some("[00:02 broken")
        );
    }

    #[test]
    fn test_sorted_and_stable() {
        let lyrics = LyricTrack::parse(
            "[00:10.00]third\n[00:05.00]first\n[00:05.00]second\n[00:01.00][00:20.00]both",
        );

        let parsed: Vec<_> = lyrics
            .lines()
            .iter()
            .map(|l| (l.timestamp, l.text.as_str()))
            .collect();

        assert_eq!(
            parsed,
            [
                (1000, "both"),
                (5000, "first"),
                (5000, "second"),
                (10_000, "third"),
                (20_000, "both"),
            ]
        );
    }

    #[test]
    fn test_headers() {
        let lyrics = LyricTrack::parse("[ti:Song]\n[AR: Someone ]\n[offset:+200]\n[00:01.00]x");

        assert_eq!(lyrics.len(), 1);
        assert_eq!(lyrics.header("ti"), Some("Song"));
        assert_eq!(lyrics.header("ar"), Some("Someone"));
        assert_eq!(lyrics.header("offset"), Some("+200"));
        assert_eq!(lyrics.header("al"), None);
    }

    #[test]
    fn test_empty_input() {
        assert!(LyricTrack::parse("").is_empty());
        assert!(LyricTrack::parse("no tags\nat all").is_empty());
    }

    #[test]
    fn test_locate() {
        let lyrics = track(&[(0, "a"), (1000, "b"), (5000, "c")]);

        assert_eq!(lyrics.locate(-1), None);
        assert_eq!(lyrics.locate(0), Some(0));
        assert_eq!(lyrics.locate(999), Some(0));
        assert_eq!(lyrics.locate(1500), Some(1));
        assert_eq!(lyrics.locate(5000), Some(2));
        assert_eq!(lyrics.locate(i64::MAX), Some(2));
    }

    #[test]
    fn test_locate_before_first_line() {
        let lyrics = track(&[(2000, "a"), (3000, "b")]);

        assert_eq!(lyrics.locate(1999), None);
        assert_eq!(lyrics.locate(2000), Some(0));
    }

    #[test]
    fn test_locate_picks_last_of_equal_timestamps() {
        let lyrics = track(&[(1000, "a"), (1000, "b"), (2000, "c")]);

        assert_eq!(lyrics.locate(1000), Some(1));
    }

    #[test]
    fn test_locate_empty() {
        let lyrics = LyricTrack::default();

        for position in [-5, 0, 1, 60_000] {
            assert_eq!(lyrics.locate(position), None);
        }
    }

    #[test]
    fn test_locate_is_monotonic() {
        let lyrics = LyricTrack::parse(
            "[00:00.50]a\n[00:01.00]b\n[00:01.00]c\n[00:03.25]d\n[01:00.00]e",
        );

        let mut previous = lyrics.locate(-100);

        for position in (-100..70_000).step_by(50) {
            let current = lyrics.locate(position);
            assert!(current >= previous, "locate went back at {position}ms");
            previous = current;
        }
    }

    #[test]
    fn test_sync_reports_changes_only() {
        let mut lyrics = track(&[(1000, "a"), (2000, "b")]);

        assert!(!lyrics.sync(500));
        assert_eq!(lyrics.active(), None);

        assert!(lyrics.sync(1000));
        assert!(!lyrics.sync(1500));
        assert_eq!(lyrics.active(), Some(0));

        assert!(lyrics.sync(2500));
        assert_eq!(lyrics.active(), Some(1));

        assert!(lyrics.sync(0));
        assert_eq!(lyrics.active(), None);
    }

    #[test]
    fn test_seek_position() {
        let lyrics = track(&[(0, "a"), (1000, "b")]);

        assert_eq!(lyrics.seek_position(1), Ok(1000));
        assert_eq!(
            lyrics.seek_position(2),
            Err(LyricsError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            LyricTrack::default().seek_position(0),
            Err(LyricsError::OutOfRange { index: 0, len: 0 })
        );
    }
}
