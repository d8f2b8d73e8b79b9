use serde::{Deserialize, Serialize};

use crate::models::Rect;
use crate::models::SizeHints;
use crate::models::WindowHandle;
use crate::models::WmHints;

/// Everything the external dispatcher reads off a window before asking the
/// core to adopt it. Carrying the property reads here keeps the core free of
/// server round trips.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WindowSnapshot {
    pub window: WindowHandle,
    pub geometry: Rect,
    /// EWMH name, falling back to WM_NAME, falling back to "".
    pub title: String,
    pub pid: Option<u32>,
    pub wm_hints: WmHints,
    pub size_hints: SizeHints,
}

impl WindowSnapshot {
    #[must_use]
    pub fn new(window: WindowHandle, geometry: Rect) -> Self {
        Self {
            window,
            geometry,
            title: String::new(),
            pid: None,
            wm_hints: WmHints::default(),
            size_hints: SizeHints::default(),
        }
    }
}

/// Events from the display server the core consumes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    /// A window asked to be mapped; the core decides whether to adopt it.
    WindowMapRequest(WindowSnapshot),

    /// UnmapNotify. Either a self-generated unmap to swallow or a client
    /// withdrawing itself.
    WindowUnmap(WindowHandle),

    /// DestroyNotify.
    WindowDestroy(WindowHandle),

    /// The pointer entered a window; a focus candidate.
    WindowEnter(WindowHandle),

    /// PropertyNotify for the window title.
    WindowTitleChanged(WindowHandle, String),

    /// PropertyNotify for WM_HINTS (urgency, input).
    WindowWmHintsChanged(WindowHandle, WmHints),

    /// PropertyNotify for WM_NORMAL_HINTS.
    WindowSizeHintsChanged(WindowHandle, SizeHints),

    /// ConfigureRequest; honored subject to the fullscreen/tiling rules.
    ConfigureRequest { window: WindowHandle, rect: Rect },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_survive_a_serde_round_trip() {
        let event = DisplayEvent::WindowMapRequest(WindowSnapshot::new(
            WindowHandle(0x2a),
            Rect::new(1, 2, 300, 400),
        ));
        let json = serde_json::to_string(&event).unwrap();
        let back: DisplayEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
