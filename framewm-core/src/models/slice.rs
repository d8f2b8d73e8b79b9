//! Stack elements and the arena that owns them.
#![allow(clippy::module_name_repetitions)]
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::MonitorId;
use crate::models::WindowHandle;

pub type SliceId = usize;

pub const LAYER_COUNT: usize = 4;

/// Z-order buckets, top to bottom.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Focus,
    Fullscreen,
    Normal,
    Frames,
}

impl Layer {
    /// All layers, topmost first.
    pub const ALL: [Layer; LAYER_COUNT] =
        [Layer::Focus, Layer::Fullscreen, Layer::Normal, Layer::Frames];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Layer::Focus => 0,
            Layer::Fullscreen => 1,
            Layer::Normal => 2,
            Layer::Frames => 3,
        }
    }

    #[must_use]
    pub const fn mask(self) -> LayerMask {
        match self {
            Layer::Focus => LayerMask::FOCUS,
            Layer::Fullscreen => LayerMask::FULLSCREEN,
            Layer::Normal => LayerMask::NORMAL,
            Layer::Frames => LayerMask::FRAMES,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Layer::Focus => "Focus-Layer",
            Layer::Fullscreen => "Fullscreen-Layer",
            Layer::Normal => "Normal Layer",
            Layer::Frames => "Frame Layer",
        }
    }
}

bitflags! {
    /// The set of layers a slice is a member of.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LayerMask: u8 {
        const FOCUS = 1 << 0;
        const FULLSCREEN = 1 << 1;
        const NORMAL = 1 << 2;
        const FRAMES = 1 << 3;
    }
}

impl serde::Serialize for LayerMask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for LayerMask {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u8::deserialize(deserializer)?))
    }
}

/// What a stack element stands for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceKind {
    /// A managed client. The decoration window is carried here so stack
    /// flattening does not need the client table.
    Client {
        window: WindowHandle,
        decoration: WindowHandle,
    },
    /// A bare X window, e.g. a frame background.
    Window(WindowHandle),
    /// A whole monitor; used in the global monitor stack and flattened by
    /// recursing into its visible tag's stack.
    Monitor(MonitorId),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub id: SliceId,
    pub kind: SliceKind,
    pub layers: LayerMask,
}

impl Slice {
    /// A slice is shown at the position of its highest layer; lower
    /// memberships are bookkeeping only.
    #[must_use]
    pub fn highest_layer(&self) -> Option<Layer> {
        Layer::ALL.into_iter().find(|l| self.layers.contains(l.mask()))
    }
}

/// Arena owning every live slice. Ids are stable for the life of the slice,
/// so stacks and clients may hold them across tag moves.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Slices {
    next_id: SliceId,
    map: HashMap<SliceId, Slice>,
}

impl Slices {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn create(&mut self, kind: SliceKind, layers: LayerMask) -> SliceId {
        let id = self.next_id;
        self.next_id += 1;
        self.map.insert(id, Slice { id, kind, layers });
        id
    }

    pub fn create_client(&mut self, window: WindowHandle, decoration: WindowHandle) -> SliceId {
        self.create(SliceKind::Client { window, decoration }, LayerMask::NORMAL)
    }

    pub fn create_window(&mut self, window: WindowHandle) -> SliceId {
        self.create(SliceKind::Window(window), LayerMask::NORMAL)
    }

    pub fn create_frame(&mut self, window: WindowHandle) -> SliceId {
        self.create(SliceKind::Window(window), LayerMask::FRAMES)
    }

    pub fn create_monitor(&mut self, monitor: MonitorId) -> SliceId {
        self.create(SliceKind::Monitor(monitor), LayerMask::NORMAL)
    }

    /// Retire a slice id. Stacks referencing it must have dropped it first.
    pub fn destroy(&mut self, id: SliceId) {
        self.map.remove(&id);
    }

    #[must_use]
    pub fn get(&self, id: SliceId) -> Option<&Slice> {
        self.map.get(&id)
    }

    pub fn get_mut(&mut self, id: SliceId) -> Option<&mut Slice> {
        self.map.get_mut(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
