//! ICCCM WM_NORMAL_HINTS and WM_HINTS as the core consumes them.
#![allow(clippy::module_name_repetitions)]
use serde::{Deserialize, Serialize};

/// The base/min/max/increment/aspect constraints a client advertises via
/// WM_NORMAL_HINTS. Zero means "not set" for every integer field, matching
/// how the hints are read off the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeHints {
    pub base_w: i32,
    pub base_h: i32,
    pub min_w: i32,
    pub min_h: i32,
    pub max_w: i32,
    pub max_h: i32,
    pub inc_w: i32,
    pub inc_h: i32,
    pub min_aspect: f32,
    pub max_aspect: f32,
}

impl SizeHints {
    /// Constrain a desired size to the advertised hints, ICCCM 4.1.2.3
    /// style: aspect limits apply to the size without the base dimensions
    /// (unless base doubles as the minimum), sizes snap down to the resize
    /// increment, and min/max bounds win last.
    #[must_use]
    pub fn constrain(&self, mut w: i32, mut h: i32) -> (i32, i32) {
        let base_is_min = self.base_w == self.min_w && self.base_h == self.min_h;
        if !base_is_min {
            // temporarily remove base dimensions
            w -= self.base_w;
            h -= self.base_h;
        }

        // adjust for aspect limits
        if self.min_aspect > 0.0 && self.max_aspect > 0.0 {
            if self.max_aspect < w as f32 / h as f32 {
                w = (h as f32 * self.max_aspect + 0.5) as i32;
            } else if self.min_aspect < h as f32 / w as f32 {
                h = (w as f32 * self.min_aspect + 0.5) as i32;
            }
        }

        if base_is_min {
            // the increment calculation requires the base removed
            w -= self.base_w;
            h -= self.base_h;
        }

        // snap to the resize increment
        if self.inc_w != 0 {
            w -= w % self.inc_w;
        }
        if self.inc_h != 0 {
            h -= h % self.inc_h;
        }

        // restore base and clamp
        w = (w + self.base_w).max(self.min_w);
        h = (h + self.base_h).max(self.min_h);
        if self.max_w > 0 {
            w = w.min(self.max_w);
        }
        if self.max_h > 0 {
            h = h.min(self.max_h);
        }
        (w, h)
    }
}

/// The subset of WM_HINTS the core reacts to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WmHints {
    /// XUrgencyHint was set.
    pub urgent: bool,
    /// The input field, if the InputHint flag was present.
    pub input: Option<bool>,
}
