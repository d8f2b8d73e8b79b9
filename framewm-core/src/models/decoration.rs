//! Decoration schemes and per-client decoration state.
//!
//! The core never draws. It selects a scheme, computes the outline and inner
//! rectangles, records them, and hands both to the external renderer through
//! the action queue.
#![allow(clippy::module_name_repetitions)]
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::display_action::DisplayAction;
use crate::models::client::{WINDOW_MIN_HEIGHT, WINDOW_MIN_WIDTH};
use crate::models::Rect;
use crate::models::WindowHandle;

/// Which of the four scheme triples applies to a client.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeKind {
    Tiling,
    Floating,
    /// Single window in a frame with smart window surroundings on.
    Minimal,
    Fullscreen,
}

/// Which member of a triple applies to a client.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeSelector {
    Normal,
    Active,
    Urgent,
}

/// Geometry and identity of one border style. The renderer owns the actual
/// drawing; the core only needs the widths to place windows and the color to
/// pass along.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationScheme {
    pub border_width: i32,
    /// 0xRRGGBB border pixel.
    pub border_color: u32,
    /// The decoration hugs the inner rect instead of filling its slot.
    /// Set transiently for pseudotiled clients.
    pub tight_decoration: bool,
}

impl DecorationScheme {
    #[must_use]
    pub const fn new(border_width: i32, border_color: u32) -> Self {
        Self { border_width, border_color, tight_decoration: false }
    }

    #[must_use]
    pub fn inner_rect_to_outline(&self, inner: Rect) -> Rect {
        inner.grow(self.border_width)
    }

    #[must_use]
    pub fn outline_to_inner_rect(&self, outline: Rect) -> Rect {
        outline.shrink(self.border_width)
    }
}

/// Normal/active/urgent variants of one decoration style.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeTriple {
    pub normal: DecorationScheme,
    pub active: DecorationScheme,
    pub urgent: DecorationScheme,
}

impl SchemeTriple {
    #[must_use]
    pub const fn select(&self, selector: SchemeSelector) -> DecorationScheme {
        match selector {
            SchemeSelector::Normal => self.normal,
            SchemeSelector::Active => self.active,
            SchemeSelector::Urgent => self.urgent,
        }
    }

    #[must_use]
    const fn uniform(border_width: i32) -> Self {
        Self {
            normal: DecorationScheme::new(border_width, 0x45_45_45),
            active: DecorationScheme::new(border_width, 0x9f_bc_00),
            urgent: DecorationScheme::new(border_width, 0x78_11_a1),
        }
    }
}

/// The full set of scheme triples, one per decoration kind.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub tiling: SchemeTriple,
    pub floating: SchemeTriple,
    pub minimal: SchemeTriple,
    pub fullscreen: SchemeTriple,
}

impl Theme {
    #[must_use]
    pub const fn triple(&self, kind: SchemeKind) -> &SchemeTriple {
        match kind {
            SchemeKind::Tiling => &self.tiling,
            SchemeKind::Floating => &self.floating,
            SchemeKind::Minimal => &self.minimal,
            SchemeKind::Fullscreen => &self.fullscreen,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            tiling: SchemeTriple::uniform(2),
            floating: SchemeTriple::uniform(1),
            minimal: SchemeTriple::uniform(0),
            fullscreen: SchemeTriple::uniform(0),
        }
    }
}

/// Per-client decoration state: the frame window the client is reparented
/// under and the most recently committed geometry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub window: WindowHandle,
    pub last_outer_rect: Rect,
    pub last_inner_rect: Rect,
    pub last_scheme: DecorationScheme,
}

impl Decoration {
    #[must_use]
    pub fn new(window: WindowHandle) -> Self {
        Self {
            window,
            last_outer_rect: Rect::default(),
            last_inner_rect: Rect::default(),
            last_scheme: DecorationScheme::new(0, 0),
        }
    }

    /// Commit an outline rectangle under `scheme`. Records the geometry,
    /// queues the resize for the renderer and returns the inner rect the
    /// client window will occupy. The inner rect never goes below the
    /// minimum client size.
    pub fn resize_outline(
        &mut self,
        outline: Rect,
        scheme: DecorationScheme,
        actions: &mut VecDeque<DisplayAction>,
    ) -> Rect {
        let mut inner = scheme.outline_to_inner_rect(outline);
        inner.w = inner.w.max(WINDOW_MIN_WIDTH);
        inner.h = inner.h.max(WINDOW_MIN_HEIGHT);
        self.last_outer_rect = outline;
        self.last_inner_rect = inner;
        self.last_scheme = scheme;
        actions.push_back(DisplayAction::ResizeDecoration {
            decoration: self.window,
            outline,
            inner,
            scheme,
        });
        inner
    }

    /// Commit an inner rectangle; the outline is derived from the scheme.
    pub fn resize_inner(
        &mut self,
        inner: Rect,
        scheme: DecorationScheme,
        actions: &mut VecDeque<DisplayAction>,
    ) -> Rect {
        self.resize_outline(scheme.inner_rect_to_outline(inner), scheme, actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_round_trips_through_inner() {
        let scheme = DecorationScheme::new(2, 0);
        let outline = Rect::new(10, 10, 200, 100);
        let inner = scheme.outline_to_inner_rect(outline);
        assert_eq!(inner, Rect::new(12, 12, 196, 96));
        assert_eq!(scheme.inner_rect_to_outline(inner), outline);
    }

    #[test]
    fn committed_inner_rect_respects_the_client_minimum() {
        let mut dec = Decoration::new(WindowHandle(0xdec));
        let mut actions = VecDeque::new();
        let inner = dec.resize_outline(
            Rect::new(0, 0, 10, 10),
            DecorationScheme::new(2, 0),
            &mut actions,
        );
        assert!(inner.w >= WINDOW_MIN_WIDTH);
        assert!(inner.h >= WINDOW_MIN_HEIGHT);
        assert_eq!(actions.len(), 1);
    }
}
