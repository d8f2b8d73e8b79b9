//! Tags: named workspaces owning a frame tree and a stack.
#![allow(clippy::module_name_repetitions)]
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::models::Frame;
use crate::models::SliceId;
use crate::models::Stack;
use crate::models::WindowHandle;

pub type TagId = usize;

bitflags! {
    /// Aggregate per-tag state, recomputed lazily behind a dirty marker.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TagFlags: u8 {
        /// At least one client lives here.
        const USED = 1 << 0;
        /// At least one client here has the urgency flag set.
        const URGENT = 1 << 1;
    }
}

impl serde::Serialize for TagFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for TagFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u8::deserialize(deserializer)?))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub frame: Frame,
    pub stack: Stack,
    /// Clients on a floating tag are positioned by their `float_size`.
    pub floating: bool,
    pub flags: TagFlags,
}

impl Tag {
    #[must_use]
    pub fn new(id: TagId, name: &str, frame_window: WindowHandle, frame_slice: SliceId) -> Self {
        Self {
            id,
            name: name.to_owned(),
            frame: Frame::new_leaf(frame_window, frame_slice),
            stack: Stack::new(),
            floating: false,
            flags: TagFlags::empty(),
        }
    }
}

/// The tag list. Ids are assigned once and stay stable across removals, so
/// clients and monitors can hold them.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Tags {
    list: Vec<Tag>,
    next_id: TagId,
}

impl Tags {
    #[must_use]
    pub fn new() -> Self {
        Self { list: Vec::new(), next_id: 1 }
    }

    /// Append a tag. The caller guarantees the name is unused.
    pub fn add_new(&mut self, name: &str, frame_window: WindowHandle, frame_slice: SliceId) -> TagId {
        let id = self.next_id;
        self.next_id += 1;
        self.list.push(Tag::new(id, name, frame_window, frame_slice));
        id
    }

    #[must_use]
    pub fn get(&self, id: TagId) -> Option<&Tag> {
        self.list.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TagId) -> Option<&mut Tag> {
        self.list.iter_mut().find(|t| t.id == id)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Tag> {
        self.list.iter().find(|t| t.name == name)
    }

    /// Detach a tag. The caller has already migrated its clients and
    /// emptied its stack.
    pub fn remove(&mut self, id: TagId) -> Option<Tag> {
        let pos = self.list.iter().position(|t| t.id == id)?;
        Some(self.list.remove(pos))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.list.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Tag> {
        self.list.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_with(names: &[&str]) -> Tags {
        let mut tags = Tags::new();
        for (i, name) in names.iter().enumerate() {
            tags.add_new(name, WindowHandle(0xf0 + i as u64), i);
        }
        tags
    }

    #[test]
    fn ids_stay_stable_across_removal() {
        let mut tags = tags_with(&["web", "term", "mail"]);
        let term = tags.find_by_name("term").unwrap().id;
        let mail = tags.find_by_name("mail").unwrap().id;
        tags.remove(term);
        assert_eq!(tags.get(mail).unwrap().name, "mail");
        assert!(tags.get(term).is_none());
        // New tags never reuse a retired id.
        let fresh = tags.add_new("irc", WindowHandle(0xff), 9);
        assert_ne!(fresh, term);
    }

    #[test]
    fn lookup_by_name() {
        let tags = tags_with(&["web", "term"]);
        assert!(tags.find_by_name("web").is_some());
        assert!(tags.find_by_name("absent").is_none());
    }
}
