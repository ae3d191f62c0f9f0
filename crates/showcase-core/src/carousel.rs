//! Carousel navigation and windowing.
//!
//! [`Carousel`] owns the active index over a borrowed, fixed list of items
//! and derives which items to render for two layouts:
//!
//! - **wide**: the previous, active and next items (fewer when the list is
//!   shorter than three), see [`Carousel::visible_window`]
//! - **narrow**: the active item only, see [`Carousel::narrow_window`]
//!
//! Navigation wraps around both ends. Windows are recomputed from
//! `(items, active index)` on every call, so they always reflect the latest
//! navigation.
//!
//! # Example
//!
//! ```
//! use showcase_core::carousel::{Carousel, Position};
//!
//! let items = ["a", "b", "c"];
//! let mut carousel = Carousel::new(&items);
//! carousel.go_to_next();
//!
//! let window: Vec<_> = carousel
//!     .visible_window()
//!     .map(|e| (*e.item, e.index, e.position))
//!     .collect();
//! assert_eq!(
//!     window,
//!     vec![("a", 0, Position::Side), ("b", 1, Position::Center), ("c", 2, Position::Side)]
//! );
//! ```

use std::fmt;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

/// Where a window entry sits relative to the focused item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// The focused (active) item.
    Center,
    /// A neighbour of the focused item.
    Side,
}

impl Position {
    /// The lowercase tag for this position.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Side => "side",
        }
    }

    /// Whether this is the focused position.
    pub fn is_center(&self) -> bool {
        matches!(self, Self::Center)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item selected for rendering, with its index in the source list.
#[derive(Debug, PartialEq, Eq)]
pub struct WindowEntry<'a, T> {
    /// The source item.
    pub item: &'a T,
    /// Index of `item` in the source list.
    pub index: usize,
    /// Position tag.
    pub position: Position,
}

impl<T> Clone for WindowEntry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for WindowEntry<'_, T> {}

/// Navigation state over a fixed list of items.
///
/// The active index is always `0` for an empty list and in `[0, len)`
/// otherwise, provided [`set_active_index`](Self::set_active_index) is only
/// called with valid indices.
#[derive(Debug)]
pub struct Carousel<'a, T> {
    items: &'a [T],
    active: usize,
}

impl<T> Clone for Carousel<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Carousel<'_, T> {}

impl<'a, T> Carousel<'a, T> {
    /// Creates a carousel focused on the first item.
    pub fn new(items: &'a [T]) -> Self {
        Self { items, active: 0 }
    }

    /// The source items.
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the focused item.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The focused item, `None` when the list is empty.
    pub fn active_item(&self) -> Option<&'a T> {
        self.items.get(self.active)
    }

    /// Whether `index` is a valid argument for
    /// [`set_active_index`](Self::set_active_index).
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.items.len()
    }

    /// Index that [`go_to_next`](Self::go_to_next) would move to.
    pub fn next_index(&self) -> usize {
        if self.items.is_empty() || self.active + 1 == self.items.len() {
            0
        } else {
            self.active + 1
        }
    }

    /// Index that [`go_to_previous`](Self::go_to_previous) would move to.
    pub fn previous_index(&self) -> usize {
        match (self.items.len(), self.active) {
            (0, _) => 0,
            (len, 0) => len - 1,
            (_, active) => active - 1,
        }
    }

    /// Focuses the next item, wrapping to the first after the last.
    pub fn go_to_next(&mut self) {
        self.active = self.next_index();
    }

    /// Focuses the previous item, wrapping to the last before the first.
    pub fn go_to_previous(&mut self) {
        self.active = self.previous_index();
    }

    /// Focuses `index` directly.
    ///
    /// `index` must be less than [`len`](Self::len). Callers holding
    /// untrusted input check with [`contains_index`](Self::contains_index)
    /// first.
    pub fn set_active_index(&mut self, index: usize) {
        debug_assert!(
            self.contains_index(index),
            "carousel index {index} out of range for {} items",
            self.items.len()
        );
        self.active = index;
    }

    /// Items for the wide layout.
    ///
    /// | items | entries |
    /// |-------|---------|
    /// | 0 | none |
    /// | 1 | `(0, center)` |
    /// | 2 | `(active, center)`, `(other, side)` |
    /// | 3+ | `(prev, side)`, `(active, center)`, `(next, side)` |
    pub fn visible_window(&self) -> Window<'a, T> {
        let mut window = Window::empty(self.items);
        match self.items.len() {
            0 => {}
            1 => window.push(0, Position::Center),
            2 => {
                window.push(self.active, Position::Center);
                window.push(1 - self.active, Position::Side);
            }
            _ => {
                window.push(self.previous_index(), Position::Side);
                window.push(self.active, Position::Center);
                window.push(self.next_index(), Position::Side);
            }
        }
        window
    }

    /// Items for the narrow layout: the focused item alone.
    pub fn narrow_window(&self) -> Window<'a, T> {
        let mut window = Window::empty(self.items);
        if !self.items.is_empty() {
            window.push(self.active, Position::Center);
        }
        window
    }
}

/// A finite, restartable sequence of [`WindowEntry`] values.
///
/// Cloning a window restarts iteration from the clone's current position;
/// a fresh window from the carousel always starts at the first entry.
#[derive(Debug)]
pub struct Window<'a, T> {
    items: &'a [T],
    slots: [(usize, Position); 3],
    len: usize,
    next: usize,
}

impl<'a, T> Window<'a, T> {
    fn empty(items: &'a [T]) -> Self {
        Self {
            items,
            slots: [(0, Position::Side); 3],
            len: 0,
            next: 0,
        }
    }

    fn push(&mut self, index: usize, position: Position) {
        self.slots[self.len] = (index, position);
        self.len += 1;
    }
}

impl<T> Clone for Window<'_, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            slots: self.slots,
            len: self.len,
            next: self.next,
        }
    }
}

impl<'a, T> Iterator for Window<'a, T> {
    type Item = WindowEntry<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let (index, position) = self.slots[self.next];
        self.next += 1;
        Some(WindowEntry {
            item: &self.items[index],
            index,
            position,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Window<'_, T> {}

impl<T> FusedIterator for Window<'_, T> {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Item {
        id: &'static str,
        name: &'static str,
    }

    static ITEMS: [Item; 3] = [
        Item { id: "1", name: "Item 1" },
        Item { id: "2", name: "Item 2" },
        Item { id: "3", name: "Item 3" },
    ];

    fn entries<'a, T>(window: Window<'a, T>) -> Vec<(&'a T, usize, Position)> {
        window.map(|e| (e.item, e.index, e.position)).collect()
    }

    #[test]
    fn test_starts_at_zero() {
        let carousel = Carousel::new(&ITEMS);
        assert_eq!(carousel.active_index(), 0);
        assert_eq!(carousel.active_item().map(|i| i.id), Some("1"));
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut carousel = Carousel::new(&ITEMS);
        carousel.go_to_next();
        assert_eq!(carousel.active_index(), 1);
        carousel.go_to_next();
        assert_eq!(carousel.active_index(), 2);
        carousel.go_to_next();
        assert_eq!(carousel.active_index(), 0);

        carousel.go_to_previous();
        assert_eq!(carousel.active_index(), 2);
        carousel.go_to_previous();
        assert_eq!(carousel.active_index(), 1);
    }

    #[test]
    fn test_set_active_index() {
        let mut carousel = Carousel::new(&ITEMS);
        carousel.set_active_index(2);
        assert_eq!(carousel.active_index(), 2);
        assert_eq!(carousel.active_item().map(|i| i.name), Some("Item 3"));
    }

    #[test]
    fn test_contains_index() {
        let carousel = Carousel::new(&ITEMS);
        assert!(carousel.contains_index(0));
        assert!(carousel.contains_index(2));
        assert!(!carousel.contains_index(3));
    }

    #[test]
    fn test_visible_window_three_items() {
        let mut carousel = Carousel::new(&ITEMS);
        assert_eq!(
            entries(carousel.visible_window()),
            vec![
                (&ITEMS[2], 2, Position::Side),
                (&ITEMS[0], 0, Position::Center),
                (&ITEMS[1], 1, Position::Side),
            ]
        );

        carousel.go_to_next();
        assert_eq!(
            entries(carousel.visible_window()),
            vec![
                (&ITEMS[0], 0, Position::Side),
                (&ITEMS[1], 1, Position::Center),
                (&ITEMS[2], 2, Position::Side),
            ]
        );
    }

    #[test]
    fn test_visible_window_two_items() {
        let two = &ITEMS[..2];
        let mut carousel = Carousel::new(two);
        assert_eq!(
            entries(carousel.visible_window()),
            vec![(&two[0], 0, Position::Center), (&two[1], 1, Position::Side)]
        );

        carousel.go_to_next();
        assert_eq!(
            entries(carousel.visible_window()),
            vec![(&two[1], 1, Position::Center), (&two[0], 0, Position::Side)]
        );
    }

    #[test]
    fn test_visible_window_one_item() {
        let one = &ITEMS[..1];
        let mut carousel = Carousel::new(one);
        assert_eq!(
            entries(carousel.visible_window()),
            vec![(&one[0], 0, Position::Center)]
        );

        carousel.go_to_next();
        assert_eq!(carousel.active_index(), 0);
        carousel.go_to_previous();
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn test_empty_carousel() {
        let empty: [Item; 0] = [];
        let mut carousel = Carousel::new(&empty);
        assert!(carousel.is_empty());
        assert!(carousel.active_item().is_none());
        assert_eq!(carousel.visible_window().count(), 0);
        assert_eq!(carousel.narrow_window().count(), 0);

        carousel.go_to_next();
        assert_eq!(carousel.active_index(), 0);
        carousel.go_to_previous();
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn test_narrow_window_follows_active() {
        let mut carousel = Carousel::new(&ITEMS);
        assert_eq!(
            entries(carousel.narrow_window()),
            vec![(&ITEMS[0], 0, Position::Center)]
        );
        carousel.go_to_previous();
        assert_eq!(
            entries(carousel.narrow_window()),
            vec![(&ITEMS[2], 2, Position::Center)]
        );
    }

    #[test]
    fn test_window_is_restartable() {
        let carousel = Carousel::new(&ITEMS);
        let window = carousel.visible_window();
        let first: Vec<_> = window.clone().map(|e| e.index).collect();
        let second: Vec<_> = window.map(|e| e.index).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![2, 0, 1]);
    }

    #[test]
    fn test_window_exact_size() {
        let carousel = Carousel::new(&ITEMS);
        let mut window = carousel.visible_window();
        assert_eq!(window.len(), 3);
        window.next();
        assert_eq!(window.len(), 2);
        window.next();
        window.next();
        assert_eq!(window.len(), 0);
        assert!(window.next().is_none());
    }

    #[test]
    fn test_position_tags() {
        assert_eq!(Position::Center.to_string(), "center");
        assert_eq!(Position::Side.as_str(), "side");
        assert_eq!(serde_json::to_string(&Position::Center).unwrap(), "\"center\"");
        assert!(Position::Center.is_center());
        assert!(!Position::Side.is_center());
    }

    #[derive(Debug, Clone, Copy)]
    enum Nav {
        Next,
        Previous,
    }

    fn nav_strategy() -> impl Strategy<Value = Nav> {
        prop_oneof![Just(Nav::Next), Just(Nav::Previous)]
    }

    proptest! {
        #[test]
        fn prop_active_index_stays_in_range(
            len in 0usize..12,
            moves in proptest::collection::vec(nav_strategy(), 0..40),
        ) {
            let items: Vec<usize> = (0..len).collect();
            let mut carousel = Carousel::new(&items);
            for m in moves {
                match m {
                    Nav::Next => carousel.go_to_next(),
                    Nav::Previous => carousel.go_to_previous(),
                }
                if len == 0 {
                    prop_assert_eq!(carousel.active_index(), 0);
                } else {
                    prop_assert!(carousel.active_index() < len);
                }
            }
        }

        #[test]
        fn prop_next_and_previous_are_inverse(len in 1usize..12, start in 0usize..12) {
            let items: Vec<usize> = (0..len).collect();
            let start = start % len;
            let mut carousel = Carousel::new(&items);
            carousel.set_active_index(start);

            carousel.go_to_next();
            carousel.go_to_previous();
            prop_assert_eq!(carousel.active_index(), start);

            carousel.go_to_previous();
            carousel.go_to_next();
            prop_assert_eq!(carousel.active_index(), start);
        }

        #[test]
        fn prop_visible_window_shape(len in 0usize..12, start in 0usize..12) {
            let items: Vec<usize> = (0..len).collect();
            let mut carousel = Carousel::new(&items);
            if len > 0 {
                carousel.set_active_index(start % len);
            }
            let window: Vec<_> = carousel.visible_window().collect();
            prop_assert_eq!(window.len(), len.min(3));

            let centers: Vec<_> = window.iter().filter(|e| e.position.is_center()).collect();
            if len == 0 {
                prop_assert!(centers.is_empty());
            } else {
                prop_assert_eq!(centers.len(), 1);
                prop_assert_eq!(centers[0].index, carousel.active_index());
            }
            for entry in &window {
                prop_assert!(entry.index < len);
                prop_assert_eq!(*entry.item, items[entry.index]);
            }
        }

        #[test]
        fn prop_narrow_window_shape(len in 0usize..12, start in 0usize..12) {
            let items: Vec<usize> = (0..len).collect();
            let mut carousel = Carousel::new(&items);
            if len > 0 {
                carousel.set_active_index(start % len);
            }
            let window: Vec<_> = carousel.narrow_window().collect();
            prop_assert_eq!(window.len(), usize::from(len > 0));
            if let Some(entry) = window.first() {
                prop_assert_eq!(entry.position, Position::Center);
                prop_assert_eq!(entry.index, carousel.active_index());
            }
        }

        #[test]
        fn prop_set_active_index_round_trip(len in 1usize..12, index in 0usize..12) {
            let items: Vec<usize> = (0..len).collect();
            let index = index % len;
            let mut carousel = Carousel::new(&items);
            carousel.set_active_index(index);
            prop_assert_eq!(carousel.active_index(), index);
        }
    }
}
