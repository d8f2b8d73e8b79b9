//! Per-window client state.
#![allow(clippy::module_name_repetitions)]
use serde::{Deserialize, Serialize};
use std::fmt;
use x11_dl::xlib;

use crate::models::decoration::Decoration;
use crate::models::size_hints::SizeHints;
use crate::models::Rect;
use crate::models::SliceId;
use crate::models::TagId;

/// Hard floor for the client window size; layouts never commit anything
/// smaller.
pub const WINDOW_MIN_WIDTH: i32 = 30;
pub const WINDOW_MIN_HEIGHT: i32 = 30;

/// An X window id. The core treats it as an opaque key; only the display
/// server dereferences it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub xlib::Window);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// An adopted top-level window.
// The flag block mirrors the window-system facts we track per client, so the
// bool count is what it is.
#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Client {
    pub handle: WindowHandle,
    pub title: String,
    pub pid: Option<u32>,
    /// Keybinding mask installed while this client holds focus.
    pub keymask: Option<String>,
    /// The owning tag. Always valid once adoption completed.
    pub tag: TagId,
    /// This client's element in its tag's stack.
    pub slice: SliceId,
    pub decoration: Decoration,
    /// Geometry requested while floating.
    pub float_size: Rect,
    /// Most recently committed client-window geometry.
    pub last_size: Rect,
    pub hints: SizeHints,
    pub fullscreen: bool,
    pub ewmh_fullscreen: bool,
    pub pseudotile: bool,
    pub ewmh_requests: bool,
    pub ewmh_notify: bool,
    pub sizehints_tiling: bool,
    pub sizehints_floating: bool,
    pub urgent: bool,
    pub never_focus: bool,
    pub visible: bool,
    pub dragged: bool,
    /// Pending self-generated UnmapNotify events to swallow.
    pub ignore_unmaps: u32,
}

impl Client {
    #[must_use]
    pub fn new(handle: WindowHandle, tag: TagId, slice: SliceId, decoration: Decoration) -> Self {
        Self {
            handle,
            title: String::new(),
            pid: None,
            keymask: None,
            tag,
            slice,
            decoration,
            float_size: Rect::new(0, 0, 100, 100),
            last_size: Rect::new(0, 0, 100, 100),
            hints: SizeHints::default(),
            fullscreen: false,
            ewmh_fullscreen: false,
            pseudotile: false,
            ewmh_requests: true,
            ewmh_notify: true,
            sizehints_tiling: false,
            sizehints_floating: true,
            urgent: false,
            never_focus: false,
            visible: false,
            dragged: false,
            ignore_unmaps: 0,
        }
    }

    /// Consume one pending self-generated UnmapNotify. Returns true when the
    /// event should be swallowed.
    pub fn ignore_unmapnotify(&mut self) -> bool {
        if self.ignore_unmaps > 0 {
            self.ignore_unmaps -= 1;
            true
        } else {
            false
        }
    }

    /// Normalize a desired client-window size: floor to the hard minimum,
    /// then run the effective size-hints set, if enabled for the current
    /// layout role. Returns the size and whether it differs from the last
    /// committed one.
    #[must_use]
    pub fn apply_size_hints(&self, floated: bool, w: i32, h: i32) -> ((i32, i32), bool) {
        let mut w = w.max(1).max(WINDOW_MIN_WIDTH);
        let mut h = h.max(1).max(WINDOW_MIN_HEIGHT);
        let sizehints = if floated || self.pseudotile {
            self.sizehints_floating
        } else {
            self.sizehints_tiling
        };
        if sizehints {
            (w, h) = self.hints.constrain(w, h);
        }
        let changed = w != self.last_size.w || h != self.last_size.h;
        ((w, h), changed)
    }

    /// "0x…" form used by hooks and the command surface.
    #[must_use]
    pub fn window_id_string(&self) -> String {
        self.handle.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Client {
        Client::new(WindowHandle(0x100), 1, 0, Decoration::new(WindowHandle(0xd00)))
    }

    #[test]
    fn unmap_suppression_counts_down_and_stops_at_zero() {
        let mut c = test_client();
        c.ignore_unmaps = 2;
        assert!(c.ignore_unmapnotify());
        assert!(c.ignore_unmapnotify());
        assert!(!c.ignore_unmapnotify());
        assert_eq!(c.ignore_unmaps, 0);
    }

    #[test]
    fn tiling_hints_only_apply_when_enabled() {
        let mut c = test_client();
        c.hints.inc_w = 7;
        c.hints.inc_h = 7;
        c.hints.base_w = 4;
        c.hints.base_h = 4;
        // sizehints_tiling defaults to off: the request passes through.
        let ((w, h), _) = c.apply_size_hints(false, 100, 100);
        assert_eq!((w, h), (100, 100));

        c.sizehints_tiling = true;
        let ((w, h), _) = c.apply_size_hints(false, 100, 100);
        assert_eq!((w, h), (95, 95));
    }

    #[test]
    fn apply_size_hints_is_idempotent() {
        let mut c = test_client();
        c.sizehints_floating = true;
        c.hints.inc_w = 6;
        c.hints.inc_h = 6;
        c.hints.base_w = 4;
        c.hints.base_h = 4;
        c.hints.min_w = 10;
        c.hints.min_h = 10;
        let ((w, h), _) = c.apply_size_hints(true, 101, 103);
        c.last_size = Rect::new(0, 0, w, h);
        let ((w2, h2), changed) = c.apply_size_hints(true, w, h);
        assert_eq!((w2, h2), (w, h));
        assert!(!changed, "re-applying its own output must report unchanged");
    }

    #[test]
    fn hard_floor_applies_even_with_hints_disabled() {
        let c = test_client();
        let ((w, h), _) = c.apply_size_hints(false, 1, 1);
        assert_eq!((w, h), (WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT));
    }

    #[test]
    fn window_id_formats_as_hex() {
        let c = test_client();
        assert_eq!(c.window_id_string(), "0x100");
    }
}
