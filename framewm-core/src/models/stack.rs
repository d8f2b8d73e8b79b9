//! Layered Z-order stacks.
//!
//! Each tag owns one stack; a second, global stack holds one slice per
//! monitor. Flattening the monitor stack recurses into the visible tags and
//! yields the window order for a single restack request.
#![allow(clippy::module_name_repetitions)]
use serde::{Deserialize, Serialize};

use crate::models::slice::{Layer, SliceId, SliceKind, Slices, LAYER_COUNT};
use crate::models::Monitor;
use crate::models::Tags;
use crate::models::WindowHandle;

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Stack {
    /// One ordered sequence per layer, front is topmost.
    layers: [Vec<SliceId>; LAYER_COUNT],
    dirty: bool,
}

impl Stack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn layer(&self, layer: Layer) -> &[SliceId] {
        &self.layers[layer.index()]
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Prepend `id` to every layer in its membership set.
    pub fn insert_slice(&mut self, slices: &Slices, id: SliceId) {
        let Some(slice) = slices.get(id) else { return };
        for layer in Layer::ALL {
            if slice.layers.contains(layer.mask()) {
                self.layers[layer.index()].insert(0, id);
            }
        }
        self.dirty = true;
    }

    /// Erase `id` from every layer in its membership set.
    pub fn remove_slice(&mut self, slices: &Slices, id: SliceId) {
        let Some(slice) = slices.get(id) else { return };
        for layer in Layer::ALL {
            if slice.layers.contains(layer.mask()) {
                self.layers[layer.index()].retain(|s| *s != id);
            }
        }
        self.dirty = true;
    }

    /// Move `id` to the front of every layer it is a member of, keeping the
    /// relative order of everything else.
    pub fn raise_slice(&mut self, slices: &Slices, id: SliceId) {
        let Some(slice) = slices.get(id) else { return };
        for layer in Layer::ALL {
            if !slice.layers.contains(layer.mask()) {
                continue;
            }
            let v = &mut self.layers[layer.index()];
            if let Some(pos) = v.iter().position(|s| *s == id) {
                v.remove(pos);
                v.insert(0, id);
            } else {
                tracing::warn!("slice {id} claims {} but is not stacked there", layer.name());
            }
        }
        self.dirty = true;
    }

    /// Add `id` to `layer`, on top of it. No-op when already a member.
    pub fn add_layer(&mut self, slices: &mut Slices, id: SliceId, layer: Layer) {
        let Some(slice) = slices.get_mut(id) else { return };
        if slice.layers.contains(layer.mask()) {
            return;
        }
        slice.layers |= layer.mask();
        self.layers[layer.index()].insert(0, id);
        self.dirty = true;
    }

    /// Drop `id` from `layer`. A slice missing from the sequence while
    /// claiming membership is diagnosed and repaired.
    pub fn remove_layer(&mut self, slices: &mut Slices, id: SliceId, layer: Layer) {
        let v = &mut self.layers[layer.index()];
        let before = v.len();
        v.retain(|s| *s != id);
        let Some(slice) = slices.get_mut(id) else { return };
        if slice.layers.contains(layer.mask()) {
            slice.layers -= layer.mask();
        } else if before == v.len() {
            tracing::warn!("slice {id} was not in {}", layer.name());
        }
        self.dirty = true;
    }

    #[must_use]
    pub fn is_layer_empty(&self, layer: Layer) -> bool {
        self.layers[layer.index()].is_empty()
    }

    pub fn clear_layer(&mut self, slices: &mut Slices, layer: Layer) {
        while let Some(&id) = self.layers[layer.index()].first() {
            self.remove_layer(slices, id, layer);
        }
    }

    /// The window at the very bottom of the topmost non-empty layer,
    /// recursing through monitor slices into their tag's stack.
    #[must_use]
    pub fn lowest_window(
        &self,
        slices: &Slices,
        tags: &Tags,
        monitors: &[Monitor],
    ) -> Option<WindowHandle> {
        for layer in Layer::ALL.into_iter().rev() {
            for id in self.layers[layer.index()].iter().rev() {
                let Some(slice) = slices.get(*id) else { continue };
                let window = match slice.kind {
                    SliceKind::Client { decoration, .. } => Some(decoration),
                    SliceKind::Window(w) => Some(w),
                    SliceKind::Monitor(m) => monitors
                        .get(m)
                        .and_then(|mon| tags.get(mon.tag))
                        .and_then(|tag| tag.stack.lowest_window(slices, tags, monitors)),
                };
                if window.is_some() {
                    return window;
                }
            }
        }
        None
    }

    /// Number of windows a flatten would produce. With `real_clients` the
    /// count covers client windows only; without it, decorations, bare
    /// windows and monitor anchors are included.
    #[must_use]
    pub fn window_count(
        &self,
        slices: &Slices,
        tags: &Tags,
        monitors: &[Monitor],
        real_clients: bool,
    ) -> usize {
        let mut buf = Vec::new();
        self.to_window_buf(slices, tags, monitors, real_clients, &mut buf);
        buf.len()
    }

    /// Append the Z-ordered window ids, topmost first. A slice contributes
    /// in the pass of its highest layer only; lower duplicates are skipped.
    /// Monitor slices contribute their stacking anchor and then recurse into
    /// the visible tag.
    pub fn to_window_buf(
        &self,
        slices: &Slices,
        tags: &Tags,
        monitors: &[Monitor],
        real_clients: bool,
        buf: &mut Vec<WindowHandle>,
    ) {
        for layer in Layer::ALL {
            for id in &self.layers[layer.index()] {
                let Some(slice) = slices.get(*id) else { continue };
                if slice.highest_layer() != Some(layer) {
                    continue;
                }
                match slice.kind {
                    SliceKind::Client { window, decoration } => {
                        buf.push(if real_clients { window } else { decoration });
                    }
                    SliceKind::Window(w) => {
                        if !real_clients {
                            buf.push(w);
                        }
                    }
                    SliceKind::Monitor(m) => {
                        let Some(monitor) = monitors.get(m) else { continue };
                        if !real_clients {
                            buf.push(monitor.stacking_window);
                        }
                        if let Some(tag) = tags.get(monitor.tag) {
                            tag.stack.to_window_buf(slices, tags, monitors, real_clients, buf);
                        }
                    }
                }
            }
        }
    }
}

impl Drop for Stack {
    fn drop(&mut self) {
        for layer in Layer::ALL {
            if !self.layers[layer.index()].is_empty() {
                tracing::warn!("{} of stack was not empty on destroy", layer.name());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::slice::LayerMask;

    fn no_tags() -> Tags {
        Tags::new()
    }

    #[test]
    fn a_fresh_stack_is_empty() {
        let stack = Stack::new();
        let slices = Slices::new();
        assert_eq!(stack.window_count(&slices, &no_tags(), &[], false), 0);
        assert_eq!(stack.lowest_window(&slices, &no_tags(), &[]), None);
    }

    #[test]
    fn insert_then_remove_restores_the_layer_contents() {
        let mut slices = Slices::new();
        let mut stack = Stack::new();
        let resident = slices.create_client(WindowHandle(1), WindowHandle(2));
        stack.insert_slice(&slices, resident);
        let before: Vec<_> = stack.layer(Layer::Normal).to_vec();

        let s = slices.create_client(WindowHandle(3), WindowHandle(4));
        stack.insert_slice(&slices, s);
        stack.remove_slice(&slices, s);
        assert_eq!(stack.layer(Layer::Normal), before.as_slice());
        for layer in Layer::ALL {
            if layer != Layer::Normal {
                assert!(stack.is_layer_empty(layer));
            }
        }
    }

    #[test]
    fn raise_is_idempotent() {
        let mut slices = Slices::new();
        let mut stack = Stack::new();
        let a = slices.create_client(WindowHandle(1), WindowHandle(11));
        let b = slices.create_client(WindowHandle(2), WindowHandle(12));
        let c = slices.create_client(WindowHandle(3), WindowHandle(13));
        for id in [a, b, c] {
            stack.insert_slice(&slices, id);
        }
        stack.raise_slice(&slices, b);
        let once: Vec<_> = stack.layer(Layer::Normal).to_vec();
        stack.raise_slice(&slices, b);
        assert_eq!(stack.layer(Layer::Normal), once.as_slice());
        assert_eq!(once[0], b);
    }

    #[test]
    fn a_slice_contributes_only_in_its_highest_layer() {
        let mut slices = Slices::new();
        let mut stack = Stack::new();
        let a = slices.create_client(WindowHandle(1), WindowHandle(11));
        let b = slices.create_client(WindowHandle(2), WindowHandle(12));
        stack.insert_slice(&slices, a);
        stack.insert_slice(&slices, b);
        stack.add_layer(&mut slices, a, Layer::Fullscreen);

        let mut buf = Vec::new();
        stack.to_window_buf(&slices, &no_tags(), &[], false, &mut buf);
        // a's decoration appears once, from the fullscreen pass, above b.
        assert_eq!(buf, vec![WindowHandle(11), WindowHandle(12)]);

        stack.remove_layer(&mut slices, a, Layer::Fullscreen);
        let mut buf = Vec::new();
        stack.to_window_buf(&slices, &no_tags(), &[], false, &mut buf);
        assert_eq!(buf, vec![WindowHandle(11), WindowHandle(12)]);
        assert_eq!(slices.get(a).unwrap().layers, LayerMask::NORMAL);
    }

    #[test]
    fn real_clients_skips_bare_windows_and_decorations() {
        let mut slices = Slices::new();
        let mut stack = Stack::new();
        let frame = slices.create_frame(WindowHandle(100));
        let client = slices.create_client(WindowHandle(1), WindowHandle(11));
        stack.insert_slice(&slices, frame);
        stack.insert_slice(&slices, client);

        let mut buf = Vec::new();
        stack.to_window_buf(&slices, &no_tags(), &[], true, &mut buf);
        assert_eq!(buf, vec![WindowHandle(1)]);

        let mut buf = Vec::new();
        stack.to_window_buf(&slices, &no_tags(), &[], false, &mut buf);
        assert_eq!(buf, vec![WindowHandle(11), WindowHandle(100)]);
    }

    #[test]
    fn adding_a_layer_twice_is_a_no_op() {
        let mut slices = Slices::new();
        let mut stack = Stack::new();
        let a = slices.create_client(WindowHandle(1), WindowHandle(11));
        stack.insert_slice(&slices, a);
        stack.add_layer(&mut slices, a, Layer::Fullscreen);
        stack.add_layer(&mut slices, a, Layer::Fullscreen);
        assert_eq!(stack.layer(Layer::Fullscreen).len(), 1);
    }

    #[test]
    fn lowest_window_takes_the_bottom_of_the_topmost_layers_last() {
        let mut slices = Slices::new();
        let mut stack = Stack::new();
        let frame = slices.create_frame(WindowHandle(100));
        let a = slices.create_client(WindowHandle(1), WindowHandle(11));
        stack.insert_slice(&slices, frame);
        stack.insert_slice(&slices, a);
        // Frames is the bottom layer, so the frame window is lowest.
        assert_eq!(
            stack.lowest_window(&slices, &no_tags(), &[]),
            Some(WindowHandle(100))
        );
    }
}
