pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Ordered tiles with a rotating window of visible ones.
///
/// With more items than the window holds, the window starts at `start` and
/// wraps around the end of the list. Otherwise every item is visible and
/// rotating does nothing.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    window_size: usize,
    start: usize,
}

impl<T> Default for Carousel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Carousel<T> {
    pub fn new() -> Self {
        Self::with_window_size(DEFAULT_WINDOW_SIZE)
    }

    /// A window size of zero is treated as one.
    pub fn with_window_size(window_size: usize) -> Self {
        Self {
            items: Vec::new(),
            window_size: window_size.max(1),
            start: 0,
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    #[inline]
    fn rotates(&self) -> bool {
        self.items.len() > self.window_size
    }

    /// Reveals the previous item.
    pub fn rotate_left(&mut self) {
        if !self.rotates() {
            return;
        }

        self.start = (self.start + self.items.len() - 1) % self.items.len();
    }

    /// Reveals the next item.
    pub fn rotate_right(&mut self) {
        if !self.rotates() {
            return;
        }

        self.start = (self.start + 1) % self.items.len();
    }

    /// Indices into the item list of the visible tiles, left to right.
    pub fn visible_indices(&self) -> Vec<usize> {
        if !self.rotates() {
            return (0..self.items.len()).collect();
        }

        (0..self.window_size)
            .map(|offset| (self.start + offset) % self.items.len())
            .collect()
    }

    pub fn visible(&self) -> Vec<&T> {
        self.visible_indices()
            .into_iter()
            .filter_map(|index| self.items.get(index))
            .collect()
    }

    /// Index of the tile in the middle of the window.
    ///
    /// When every item fits in the window and there are fewer items than the
    /// middle offset, the last item counts as the center.
    pub fn center_index(&self) -> Option<usize> {
        let offset = self.window_size / 2;

        if !self.rotates() {
            return match self.items.len() {
                0 => None,
                len => Some(offset.min(len - 1)),
            };
        }

        Some((self.start + offset) % self.items.len())
    }

    pub fn center(&self) -> Option<&T> {
        self.center_index().and_then(|index| self.items.get(index))
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Carousel<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for Carousel<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut carousel = Self::new();
        carousel.items.extend(iter);
        carousel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(len: usize) -> Carousel<usize> {
        (0..len).collect()
    }

    fn visible(carousel: &Carousel<usize>) -> Vec<usize> {
        carousel.visible().into_iter().copied().collect()
    }

    #[test]
    fn test_window_rotates_with_wrap_around() {
        let mut tiles = carousel(5);
        assert_eq!(visible(&tiles), [0, 1, 2]);

        tiles.rotate_right();
        assert_eq!(visible(&tiles), [1, 2, 3]);

        tiles.rotate_left();
        assert_eq!(visible(&tiles), [0, 1, 2]);

        tiles.rotate_left();
        assert_eq!(visible(&tiles), [4, 0, 1]);
        assert_eq!(tiles.start(), 4);

        for _ in 0..3 {
            tiles.rotate_right();
        }
        assert_eq!(visible(&tiles), [2, 3, 4]);

        tiles.rotate_right();
        assert_eq!(visible(&tiles), [3, 4, 0]);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut tiles = carousel(7);

        for _ in 0..7 {
            tiles.rotate_right();
        }
        assert_eq!(tiles.start(), 0);

        for _ in 0..7 {
            tiles.rotate_left();
        }
        assert_eq!(tiles.start(), 0);
    }

    #[test]
    fn test_small_carousel_does_not_rotate() {
        for len in 0..=3 {
            let mut tiles = carousel(len);
            let all: Vec<_> = (0..len).collect();

            tiles.rotate_left();
            assert_eq!(visible(&tiles), all);

            tiles.rotate_right();
            tiles.rotate_right();
            assert_eq!(visible(&tiles), all);
            assert_eq!(tiles.start(), 0);
        }
    }

    #[test]
    fn test_push_keeps_start() {
        let mut tiles = carousel(4);
        tiles.rotate_right();

        tiles.push(4);
        assert_eq!(tiles.start(), 1);
        assert_eq!(visible(&tiles), [1, 2, 3]);
    }

    #[test]
    fn test_center() {
        let mut tiles = carousel(5);
        assert_eq!(tiles.center(), Some(&1));

        tiles.rotate_left();
        assert_eq!(tiles.center(), Some(&0));

        tiles.rotate_left();
        assert_eq!(tiles.center(), Some(&4));
    }

    #[test]
    fn test_center_of_small_carousel() {
        assert_eq!(carousel(0).center(), None);
        assert_eq!(carousel(1).center(), Some(&0));
        assert_eq!(carousel(2).center(), Some(&1));
        assert_eq!(carousel(3).center(), Some(&1));
    }

    #[test]
    fn test_custom_window_size() {
        let mut tiles: Carousel<usize> = Carousel::with_window_size(0);
        assert_eq!(tiles.window_size(), 1);

        for i in 0..3 {
            tiles.push(i);
        }
        tiles.rotate_left();
        assert_eq!(visible(&tiles), [2]);
        assert_eq!(tiles.center(), Some(&2));
    }
}
