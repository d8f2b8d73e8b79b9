//! Monitors: a rectangle of the display showing one tag at a time.
#![allow(clippy::module_name_repetitions)]
use serde::{Deserialize, Serialize};

use crate::models::Rect;
use crate::models::SliceId;
use crate::models::TagId;
use crate::models::WindowHandle;

pub type MonitorId = usize;

/// Reserved space at the monitor edges (panels, docks).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pad {
    pub left: i32,
    pub right: i32,
    pub up: i32,
    pub down: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Monitor {
    pub id: MonitorId,
    pub name: String,
    pub rect: Rect,
    pub pad: Pad,
    /// The tag currently shown here.
    pub tag: TagId,
    /// Invisible window anchoring this monitor's windows in the global
    /// stacking order.
    pub stacking_window: WindowHandle,
    /// This monitor's element in the global monitor stack.
    pub slice: SliceId,
}

impl Monitor {
    #[must_use]
    pub fn new(
        id: MonitorId,
        name: &str,
        rect: Rect,
        tag: TagId,
        stacking_window: WindowHandle,
        slice: SliceId,
    ) -> Self {
        Self {
            id,
            name: name.to_owned(),
            rect,
            pad: Pad::default(),
            tag,
            stacking_window,
            slice,
        }
    }

    /// The rectangle available to the frame tree: the monitor minus its
    /// padding.
    #[must_use]
    pub fn effective_rect(&self) -> Rect {
        Rect::new(
            self.rect.x + self.pad.left,
            self.rect.y + self.pad.up,
            (self.rect.w - self.pad.left - self.pad.right).max(0),
            (self.rect.h - self.pad.up - self.pad.down).max(0),
        )
    }
}
