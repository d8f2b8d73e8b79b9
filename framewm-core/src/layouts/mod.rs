//! Client arrangement algorithms for frame leaves.
//!
//! Every algorithm maps a frame rectangle and a client count to one slot
//! rectangle per client, in the leaf's insertion order. Gaps and decorations
//! are applied later, per client.

mod grid;
mod horizontal;
mod max;
mod vertical;

use serde::{Deserialize, Serialize};

use crate::models::Rect;

/// The layout algorithm of a frame leaf.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameLayout {
    #[default]
    Vertical,
    Horizontal,
    Max,
    Grid,
}

impl FrameLayout {
    /// Compute one slot per client. Returns an empty list for `count == 0`.
    #[must_use]
    pub fn arrange(self, rect: Rect, count: usize) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        match self {
            FrameLayout::Vertical => vertical::arrange(rect, count),
            FrameLayout::Horizontal => horizontal::arrange(rect, count),
            FrameLayout::Max => max::arrange(rect, count),
            FrameLayout::Grid => grid::arrange(rect, count),
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "vertical" => Some(FrameLayout::Vertical),
            "horizontal" => Some(FrameLayout::Horizontal),
            "max" => Some(FrameLayout::Max),
            "grid" => Some(FrameLayout::Grid),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_layout_yields_one_slot_per_client() {
        let rect = Rect::new(0, 0, 800, 600);
        for layout in [
            FrameLayout::Vertical,
            FrameLayout::Horizontal,
            FrameLayout::Max,
            FrameLayout::Grid,
        ] {
            for count in 0..6 {
                assert_eq!(layout.arrange(rect, count).len(), count);
            }
        }
    }

    #[test]
    fn vertical_splits_height_evenly_with_remainder_on_the_last() {
        let slots = FrameLayout::Vertical.arrange(Rect::new(0, 0, 800, 601), 3);
        assert_eq!(slots[0], Rect::new(0, 0, 800, 200));
        assert_eq!(slots[1], Rect::new(0, 200, 800, 200));
        assert_eq!(slots[2], Rect::new(0, 400, 800, 201));
    }

    #[test]
    fn horizontal_splits_width() {
        let slots = FrameLayout::Horizontal.arrange(Rect::new(10, 0, 800, 600), 2);
        assert_eq!(slots[0], Rect::new(10, 0, 400, 600));
        assert_eq!(slots[1], Rect::new(410, 0, 400, 600));
    }

    #[test]
    fn max_gives_everyone_the_full_rect() {
        let rect = Rect::new(5, 5, 300, 200);
        let slots = FrameLayout::Max.arrange(rect, 3);
        assert!(slots.iter().all(|s| *s == rect));
    }

    #[test]
    fn grid_covers_the_rect_without_overlap_for_a_square_count() {
        let slots = FrameLayout::Grid.arrange(Rect::new(0, 0, 400, 400), 4);
        assert_eq!(slots.len(), 4);
        let area: i32 = slots.iter().map(|s| s.w * s.h).sum();
        assert_eq!(area, 400 * 400);
    }
}
