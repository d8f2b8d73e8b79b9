//! The manager's world: every table, queue and marker the core mutates.
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

use crate::config::{Config, Settings};
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::errors::{CoreError, Result};
use crate::hooks::HookEvent;
use crate::models::{
    Client, Monitor, MonitorId, Rect, SchemeKind, SchemeSelector, Slices, Stack, TagFlags, TagId,
    Tags, Theme, WindowHandle, WINDOW_MIN_HEIGHT, WINDOW_MIN_WIDTH,
};

/// Where in its lifetime the manager is. During the initial sweep, adoption
/// swallows the UnmapNotify the reparenting generates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InitialSweep,
    Running,
    ShuttingDown,
}

/// Links published on the clients object for IPC introspection. At most one
/// client is ever linked per slot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectLinks {
    pub focus: Option<WindowHandle>,
    pub dragged: Option<WindowHandle>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct State {
    /// The client table, keyed by the client window id.
    pub clients: HashMap<WindowHandle, Client>,
    pub slices: Slices,
    pub tags: Tags,
    pub monitors: Vec<Monitor>,
    /// The global stack: one monitor slice per monitor, flattened into a
    /// single restack request.
    pub monitor_stack: Stack,
    pub current_monitor: MonitorId,
    /// The most recently focused client; used to detect real focus changes.
    pub last_focus: Option<WindowHandle>,
    pub objects: ObjectLinks,
    pub phase: Phase,
    pub settings: Settings,
    pub theme: Theme,
    /// Outbound requests, drained by the event loop.
    pub actions: VecDeque<DisplayAction>,
    /// Hook events, drained by the external emitter.
    pub hooks: VecDeque<HookEvent>,
    /// Some tag's aggregate flags may be stale.
    pub tag_flags_dirty: bool,
}

impl State {
    pub(crate) fn new(config: &impl Config, server: &mut impl DisplayServer) -> Self {
        let mut state = Self {
            clients: HashMap::new(),
            slices: Slices::new(),
            tags: Tags::new(),
            monitors: Vec::new(),
            monitor_stack: Stack::new(),
            current_monitor: 0,
            last_focus: None,
            objects: ObjectLinks::default(),
            phase: Phase::InitialSweep,
            settings: config.settings(),
            theme: config.theme(),
            actions: VecDeque::new(),
            hooks: VecDeque::new(),
            tag_flags_dirty: false,
        };
        let mut names = config.create_list_of_tags();
        if names.is_empty() {
            // there is always at least one tag
            names.push("1".to_owned());
        }
        for name in names {
            let window = server.create_service_window();
            if let Err(err) = state.add_tag(&name, window) {
                tracing::warn!("skipping configured tag {name:?}: {err}");
            }
        }
        state
    }

    // --- tags ---------------------------------------------------------

    /// Create a tag. The frame background window comes from the display
    /// server; its slice goes on the new stack's Frames layer.
    pub fn add_tag(&mut self, name: &str, frame_window: WindowHandle) -> Result<TagId> {
        if name.is_empty() {
            return Err(CoreError::InvalidArgument("empty tag name".to_owned()));
        }
        if self.tags.find_by_name(name).is_some() {
            return Err(CoreError::InvalidArgument(format!("tag {name:?} already exists")));
        }
        let slice = self.slices.create_frame(frame_window);
        let id = self.tags.add_new(name, frame_window, slice);
        if let Some(tag) = self.tags.get_mut(id) {
            tag.stack.insert_slice(&self.slices, slice);
        }
        self.hooks.push_back(HookEvent::TagAdded { tag: name.to_owned() });
        Ok(id)
    }

    /// The tag shown on the current monitor; before any monitor exists, the
    /// first tag.
    #[must_use]
    pub fn current_tag(&self) -> Option<TagId> {
        self.monitors
            .get(self.current_monitor)
            .map(|m| m.tag)
            .or_else(|| self.tags.iter().next().map(|t| t.id))
    }

    /// The client holding the selection cursors of the current tag.
    #[must_use]
    pub fn current_client(&self) -> Option<WindowHandle> {
        self.tags.get(self.current_tag()?)?.frame.focused_client()
    }

    #[must_use]
    pub fn monitor_showing_tag(&self, tag: TagId) -> Option<MonitorId> {
        self.monitors.iter().position(|m| m.tag == tag)
    }

    #[must_use]
    pub fn find_monitor(&self, name: &str) -> Option<MonitorId> {
        self.monitors
            .iter()
            .position(|m| m.name == name)
            .or_else(|| name.parse::<usize>().ok().filter(|i| *i < self.monitors.len()))
    }

    // --- monitors -----------------------------------------------------

    /// Register a monitor showing `tag`. The stacking anchor window comes
    /// from the display server.
    pub fn add_monitor(
        &mut self,
        name: &str,
        rect: Rect,
        tag: TagId,
        stacking_window: WindowHandle,
    ) -> MonitorId {
        let id = self.monitors.len();
        let slice = self.slices.create_monitor(id);
        self.monitors.push(Monitor::new(id, name, rect, tag, stacking_window, slice));
        self.monitor_stack.insert_slice(&self.slices, slice);
        let (clients, frames) = self.tags.get(tag).map_or((Vec::new(), Vec::new()), |t| {
            (t.frame.clients(), t.frame.leaves().iter().map(|l| l.window).collect())
        });
        for window in frames {
            self.actions.push_back(DisplayAction::MapWindow(window));
        }
        for client in clients {
            self.set_client_visible(client, true);
        }
        self.monitor_apply_layout(id);
        id
    }

    /// Switch which tag a monitor shows. Refused when the tag is already
    /// visible elsewhere.
    pub fn monitor_set_tag(&mut self, monitor: MonitorId, tag: TagId) -> bool {
        let Some(mon) = self.monitors.get(monitor) else { return false };
        let old = mon.tag;
        if old == tag {
            return true;
        }
        if self.monitor_showing_tag(tag).is_some() {
            tracing::debug!("tag is already shown on another monitor");
            return false;
        }
        let snapshot = |tags: &Tags, id: TagId| -> (Vec<WindowHandle>, Vec<WindowHandle>) {
            tags.get(id).map_or((Vec::new(), Vec::new()), |t| {
                (t.frame.clients(), t.frame.leaves().iter().map(|l| l.window).collect())
            })
        };
        let (old_clients, old_frames) = snapshot(&self.tags, old);
        let (new_clients, new_frames) = snapshot(&self.tags, tag);

        self.actions.push_back(DisplayAction::GrabServer);
        for client in old_clients {
            self.set_client_visible(client, false);
        }
        for window in old_frames {
            self.actions.push_back(DisplayAction::UnmapWindow(window));
        }
        self.monitors[monitor].tag = tag;
        for window in new_frames {
            self.actions.push_back(DisplayAction::MapWindow(window));
        }
        for client in new_clients {
            self.set_client_visible(client, true);
        }
        self.actions.push_back(DisplayAction::UngrabServer);
        self.monitor_stack.mark_dirty();
        self.monitor_apply_layout(monitor);
        let name = self.tags.get(tag).map(|t| t.name.clone()).unwrap_or_default();
        self.hooks.push_back(HookEvent::TagChanged { tag: name, monitor });
        true
    }

    // --- layout -------------------------------------------------------

    /// Recompute every geometry on one monitor and hand the current tag's
    /// focused client the input focus when the monitor is the current one.
    pub fn monitor_apply_layout(&mut self, monitor: MonitorId) {
        let Some(mon) = self.monitors.get(monitor) else { return };
        let effective = mon.effective_rect();
        let tag_id = mon.tag;
        let Some(tag) = self.tags.get(tag_id) else { return };
        let floating_tag = tag.floating;
        let plans = tag.frame.layout_plans(effective);
        let focused = tag.frame.focused_client();

        for plan in &plans {
            self.actions
                .push_back(DisplayAction::MoveResizeWindow { window: plan.window, rect: plan.rect });
        }
        if floating_tag {
            for plan in &plans {
                for client in &plan.clients {
                    self.resize_client_floating(*client, monitor);
                }
            }
        } else {
            for plan in &plans {
                let single = plan.clients.len() == 1;
                let slots = plan.layout.arrange(plan.rect, plan.clients.len());
                for (client, slot) in plan.clients.iter().zip(slots) {
                    self.resize_client_tiling(*client, slot, single, monitor);
                }
            }
        }

        if monitor == self.current_monitor {
            match focused {
                Some(handle) => self.window_focus(handle),
                None => self.window_unfocus_last(),
            }
        }
    }

    pub fn all_monitors_apply_layout(&mut self) {
        for monitor in 0..self.monitors.len() {
            self.monitor_apply_layout(monitor);
        }
    }

    fn resize_client_tiling(
        &mut self,
        handle: WindowHandle,
        mut rect: Rect,
        single_in_frame: bool,
        monitor: MonitorId,
    ) {
        let Some(monitor_rect) = self.monitors.get(monitor).map(|m| m.rect) else { return };
        let Some(client) = self.clients.get(&handle) else { return };
        let floated = self.tags.get(client.tag).is_some_and(|t| t.floating);
        let (fullscreen, pseudotile, float_size) =
            (client.fullscreen, client.pseudotile, client.float_size);
        if fullscreen {
            self.resize_client_fullscreen(handle, monitor_rect);
            return;
        }
        let smart = self.settings.smart_window_surroundings
            && single_in_frame
            && !pseudotile
            && !floated;
        if !pseudotile && !smart {
            rect.w -= self.settings.window_gap;
            rect.h -= self.settings.window_gap;
        }
        let kind = if smart { SchemeKind::Minimal } else { SchemeKind::Tiling };
        let mut scheme = self.scheme_for(handle, kind);
        if pseudotile {
            let Some(client) = self.clients.get(&handle) else { return };
            let ((w, h), _) = client.apply_size_hints(floated, float_size.w, float_size.h);
            let outline = scheme.inner_rect_to_outline(Rect::new(0, 0, w, h));
            rect.x += ((rect.w - outline.w) / 2).max(0);
            rect.y += ((rect.h - outline.h) / 2).max(0);
            rect.w = outline.w.min(rect.w);
            rect.h = outline.h.min(rect.h);
            scheme.tight_decoration = true;
        }
        self.commit_outline(handle, rect, scheme);
    }

    fn resize_client_floating(&mut self, handle: WindowHandle, monitor: MonitorId) {
        // a tag that is not shown anywhere has nothing to lay out
        let Some(mon) = self.monitors.get(monitor) else { return };
        let (monitor_rect, pad) = (mon.rect, mon.pad);
        let Some(client) = self.clients.get(&handle) else { return };
        if client.fullscreen {
            self.resize_client_fullscreen(handle, monitor_rect);
            return;
        }
        let mut rect = client.float_size;
        rect.x += monitor_rect.x + pad.left;
        rect.y += monitor_rect.y + pad.up;
        // keep at least a sliver of the window on the monitor
        let space = self.settings.monitor_float_threshold;
        rect.x = crate::models::clamp(
            rect.x,
            monitor_rect.x + pad.left - rect.w + space,
            monitor_rect.x + monitor_rect.w - pad.right - space,
        );
        rect.y = crate::models::clamp(
            rect.y,
            monitor_rect.y + pad.up - rect.h + space,
            monitor_rect.y + monitor_rect.h - pad.down - space,
        );
        let scheme = self.scheme_for(handle, SchemeKind::Floating);
        let Some(client) = self.clients.get_mut(&handle) else { return };
        let inner = client.decoration.resize_inner(rect, scheme, &mut self.actions);
        client.last_size = inner;
    }

    fn resize_client_fullscreen(&mut self, handle: WindowHandle, monitor_rect: Rect) {
        let scheme = self.scheme_for(handle, SchemeKind::Fullscreen);
        self.commit_outline(handle, monitor_rect, scheme);
    }

    fn commit_outline(
        &mut self,
        handle: WindowHandle,
        outline: Rect,
        scheme: crate::models::DecorationScheme,
    ) {
        let Some(client) = self.clients.get_mut(&handle) else { return };
        let inner = client.decoration.resize_outline(outline, scheme, &mut self.actions);
        client.last_size = inner;
    }

    /// Pick the concrete scheme for a client within a triple: active when it
    /// holds the focus, urgent when it asks for attention.
    pub(crate) fn scheme_for(
        &self,
        handle: WindowHandle,
        kind: SchemeKind,
    ) -> crate::models::DecorationScheme {
        let selector = if self.current_client() == Some(handle) {
            SchemeSelector::Active
        } else if self.clients.get(&handle).is_some_and(|c| c.urgent) {
            SchemeSelector::Urgent
        } else {
            SchemeSelector::Normal
        };
        self.theme.triple(kind).select(selector)
    }

    /// Which scheme triple a client is decorated from right now.
    #[must_use]
    pub fn scheme_kind(&self, handle: WindowHandle) -> Option<SchemeKind> {
        let client = self.clients.get(&handle)?;
        if client.fullscreen {
            return Some(SchemeKind::Fullscreen);
        }
        if self.tags.get(client.tag).is_some_and(|t| t.floating) {
            return Some(SchemeKind::Floating);
        }
        if self.needs_minimal_dec(handle) {
            return Some(SchemeKind::Minimal);
        }
        Some(SchemeKind::Tiling)
    }

    #[must_use]
    pub fn needs_minimal_dec(&self, handle: WindowHandle) -> bool {
        let Some(client) = self.clients.get(&handle) else { return false };
        if !self.settings.smart_window_surroundings || client.pseudotile {
            return false;
        }
        let Some(tag) = self.tags.get(client.tag) else { return false };
        if tag.floating {
            return false;
        }
        tag.frame.leaf_of_client(handle).is_some_and(|l| l.clients.len() == 1)
    }

    // --- visibility ---------------------------------------------------

    /// Map or withdraw a client together with its decoration. Hiding
    /// pre-increments the unmap counter so the resulting UnmapNotify is
    /// swallowed; showing brackets the maps in a server grab so the frame is
    /// mapped before the client's MapNotify.
    pub fn set_client_visible(&mut self, handle: WindowHandle, visible: bool) {
        let Some(client) = self.clients.get_mut(&handle) else { return };
        if client.visible == visible {
            return;
        }
        client.visible = visible;
        let decoration = client.decoration.window;
        if visible {
            self.actions.extend([
                DisplayAction::GrabServer,
                DisplayAction::SetWmState { window: handle, state: crate::display_action::WmState::Normal },
                DisplayAction::MapWindow(handle),
                DisplayAction::MapWindow(decoration),
                DisplayAction::UngrabServer,
            ]);
        } else {
            client.ignore_unmaps += 1;
            self.actions.extend([
                DisplayAction::UnmapWindow(decoration),
                DisplayAction::UnmapWindow(handle),
                DisplayAction::SetWmState {
                    window: handle,
                    state: crate::display_action::WmState::Withdrawn,
                },
            ]);
        }
    }

    /// Tell a client its real geometry with a synthetic ConfigureNotify.
    pub fn send_configure(&mut self, handle: WindowHandle) {
        let Some(client) = self.clients.get(&handle) else { return };
        let mut rect = client.decoration.last_inner_rect;
        rect.w = rect.w.max(WINDOW_MIN_WIDTH);
        rect.h = rect.h.max(WINDOW_MIN_HEIGHT);
        self.actions.push_back(DisplayAction::ConfigureNotify { window: handle, rect });
    }

    // --- stacking -----------------------------------------------------

    /// Bring a client to the front of every layer it is a member of, then
    /// restack immediately.
    pub fn raise_client(&mut self, handle: WindowHandle) {
        let Some(client) = self.clients.get(&handle) else { return };
        let (tag, slice) = (client.tag, client.slice);
        if let Some(t) = self.tags.get_mut(tag) {
            t.stack.raise_slice(&self.slices, slice);
        }
        self.restack();
    }

    /// Reconcile dirty state before control returns to the event loop:
    /// recompute stale tag flags, then restack once.
    pub fn reconcile(&mut self) {
        if self.tag_flags_dirty {
            self.update_tag_flags();
        }
        self.restack();
    }

    /// No-op unless some stack is dirty. Flattens the monitor stack into
    /// one restack request, publishes the EWMH stacking order and clears
    /// every dirty bit.
    pub fn restack(&mut self) {
        let dirty =
            self.monitor_stack.is_dirty() || self.tags.iter().any(|t| t.stack.is_dirty());
        if !dirty {
            return;
        }
        let mut buf = Vec::new();
        self.monitor_stack
            .to_window_buf(&self.slices, &self.tags, &self.monitors, false, &mut buf);
        if !buf.is_empty() {
            self.actions.push_back(DisplayAction::RestackWindows(buf));
        }
        let mut clients_bottom_up = Vec::new();
        self.monitor_stack
            .to_window_buf(&self.slices, &self.tags, &self.monitors, true, &mut clients_bottom_up);
        clients_bottom_up.reverse();
        self.actions
            .push_back(DisplayAction::EwmhUpdateClientListStacking(clients_bottom_up));
        self.monitor_stack.clear_dirty();
        for tag in self.tags.iter_mut() {
            tag.stack.clear_dirty();
        }
    }

    /// Recompute the per-tag occupancy and urgency aggregates.
    pub fn update_tag_flags(&mut self) {
        let mut per_tag: HashMap<TagId, TagFlags> = HashMap::new();
        for client in self.clients.values() {
            let entry = per_tag.entry(client.tag).or_insert_with(TagFlags::empty);
            *entry |= TagFlags::USED;
            if client.urgent {
                *entry |= TagFlags::URGENT;
            }
        }
        let mut changed = false;
        for tag in self.tags.iter_mut() {
            let flags = per_tag.get(&tag.id).copied().unwrap_or_else(TagFlags::empty);
            if tag.flags != flags {
                tag.flags = flags;
                changed = true;
            }
        }
        self.tag_flags_dirty = false;
        if changed {
            self.hooks.push_back(HookEvent::TagFlags);
        }
    }

    // --- lookup -------------------------------------------------------

    /// Resolve a window description: "" is the focused client, "urgent" any
    /// client asking for attention, otherwise a hexadecimal or decimal
    /// window id (which may name an unmanaged window).
    #[must_use]
    pub fn resolve_window(&self, spec: &str) -> Option<(WindowHandle, Option<&Client>)> {
        if spec.is_empty() {
            let handle = self.current_client()?;
            return Some((handle, self.clients.get(&handle)));
        }
        if spec == "urgent" {
            let client = self.clients.values().find(|c| c.urgent)?;
            return Some((client.handle, Some(client)));
        }
        let id = match spec.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16).ok()?,
            None => spec.parse::<u64>().ok()?,
        };
        let handle = WindowHandle(id);
        Some((handle, self.clients.get(&handle)))
    }

    // --- teardown -----------------------------------------------------

    /// Retire a client record: drop its slice from its tag's stack and the
    /// arena, clear any reference the focus machinery held, and have the
    /// renderer free the decoration.
    pub(crate) fn destroy_client(&mut self, handle: WindowHandle) {
        let Some(client) = self.clients.remove(&handle) else { return };
        if let Some(tag) = self.tags.get_mut(client.tag) {
            tag.stack.remove_slice(&self.slices, client.slice);
        }
        self.slices.destroy(client.slice);
        if self.last_focus == Some(handle) {
            self.last_focus = None;
        }
        if self.objects.focus == Some(handle) {
            self.objects.focus = None;
        }
        if self.objects.dragged == Some(handle) {
            self.objects.dragged = None;
        }
        self.actions.push_back(DisplayAction::DestroyWindow(client.decoration.window));
    }

    /// Release every client for manager exit: restore the requested floating
    /// geometry, reparent back to the root and map, so application windows
    /// survive. Service windows and slices are torn down afterwards.
    pub fn shutdown(&mut self) {
        self.phase = Phase::ShuttingDown;
        let handles: Vec<WindowHandle> = self.clients.keys().copied().collect();
        for handle in &handles {
            let Some(client) = self.clients.get(handle) else { continue };
            let rect = client.float_size;
            self.actions.push_back(DisplayAction::MoveResizeWindow { window: *handle, rect });
            self.actions.push_back(DisplayAction::ReparentToRoot {
                window: *handle,
                x: rect.x,
                y: rect.y,
            });
            self.actions.push_back(DisplayAction::EwmhUpdateFrameExtents {
                window: *handle,
                left: 0,
                right: 0,
                top: 0,
                bottom: 0,
            });
        }
        for handle in &handles {
            self.actions.push_back(DisplayAction::MapWindow(*handle));
        }
        for handle in handles {
            if let Some(tag) = self.clients.get(&handle).map(|c| c.tag) {
                if let Some(t) = self.tags.get_mut(tag) {
                    t.frame.remove_client(handle);
                }
            }
            self.destroy_client(handle);
        }
        // drop the frame and monitor bookkeeping so every stack ends empty
        let tag_ids: Vec<TagId> = self.tags.iter().map(|t| t.id).collect();
        for tag_id in tag_ids {
            let leaves: Vec<(WindowHandle, usize)> = self
                .tags
                .get(tag_id)
                .map(|t| t.frame.leaves().iter().map(|l| (l.window, l.slice)).collect())
                .unwrap_or_default();
            for (window, slice) in leaves {
                if let Some(t) = self.tags.get_mut(tag_id) {
                    t.stack.remove_slice(&self.slices, slice);
                }
                self.slices.destroy(slice);
                self.actions.push_back(DisplayAction::DestroyWindow(window));
            }
        }
        for monitor in std::mem::take(&mut self.monitors) {
            self.monitor_stack.remove_slice(&self.slices, monitor.slice);
            self.slices.destroy(monitor.slice);
            self.actions.push_back(DisplayAction::DestroyWindow(monitor.stacking_window));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_event::WindowSnapshot;
    use crate::models::Manager;

    type TestManager =
        Manager<crate::config::tests::TestConfig, crate::display_servers::MockDisplayServer>;

    fn manager(tags: &[&str]) -> TestManager {
        let mut manager = Manager::new_test(tags.iter().map(|t| (*t).to_owned()).collect());
        manager.monitor_created_handler(Rect::new(0, 0, 800, 600), "mon0");
        manager.end_initial_sweep();
        manager
    }

    fn manage(manager: &mut TestManager, id: u64) -> WindowHandle {
        let handle = WindowHandle(id);
        assert!(manager
            .window_created_handler(WindowSnapshot::new(handle, Rect::new(0, 0, 300, 200))));
        handle
    }

    #[test]
    fn restack_flattens_the_monitor_stack_into_one_request() {
        let mut manager = manager(&["1"]);
        let a = manage(&mut manager, 0x100);
        manager.state.actions.clear();
        manager.state.raise_client(a);

        let restacks: Vec<_> = manager
            .state
            .actions
            .iter()
            .filter_map(|action| match action {
                DisplayAction::RestackWindows(buf) => Some(buf.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(restacks.len(), 1, "one restack request per reconcile");
        let buf = &restacks[0];
        let anchor = manager.state.monitors[0].stacking_window;
        let decoration = manager.state.clients[&a].decoration.window;
        let frame = manager.state.tags.iter().next().unwrap().frame.focused_leaf().window;
        assert_eq!(buf.first(), Some(&anchor), "the monitor anchor leads its windows");
        let dec_pos = buf.iter().position(|w| *w == decoration).unwrap();
        let frame_pos = buf.iter().position(|w| *w == frame).unwrap();
        assert!(dec_pos < frame_pos, "client decorations stack above frame backgrounds");
        // the EWMH list carries real client windows, bottom to top
        assert!(manager.state.actions.iter().any(|action| matches!(
            action,
            DisplayAction::EwmhUpdateClientListStacking(list) if list == &vec![a]
        )));
    }

    #[test]
    fn raising_twice_changes_nothing_further() {
        let mut manager = manager(&["1"]);
        let a = manage(&mut manager, 0x100);
        let _ = manage(&mut manager, 0x200);
        manager.state.reconcile();
        manager.state.raise_client(a);
        let tag = manager.state.monitors[0].tag;
        let order: Vec<_> =
            manager.state.tags.get(tag).unwrap().stack.layer(crate::models::Layer::Normal).to_vec();
        manager.state.raise_client(a);
        let order_after: Vec<_> =
            manager.state.tags.get(tag).unwrap().stack.layer(crate::models::Layer::Normal).to_vec();
        assert_eq!(order, order_after);
    }

    #[test]
    fn lowest_window_recurses_through_monitor_slices() {
        let mut manager = manager(&["1"]);
        let _ = manage(&mut manager, 0x100);
        let state = &manager.state;
        let frame = state.tags.iter().next().unwrap().frame.focused_leaf().window;
        let lowest =
            state.monitor_stack.lowest_window(&state.slices, &state.tags, &state.monitors);
        assert_eq!(lowest, Some(frame), "the frame background sits at the bottom");
    }

    #[test]
    fn tag_flags_aggregate_occupancy_and_urgency() {
        let mut manager = manager(&["1", "2"]);
        let a = manage(&mut manager, 0x100);
        let b = manage(&mut manager, 0x200);
        manager.state.reconcile();
        let tag1 = manager.state.tags.find_by_name("1").unwrap().id;
        assert_eq!(manager.state.tags.get(tag1).unwrap().flags, TagFlags::USED);
        let tag2 = manager.state.tags.find_by_name("2").unwrap().id;
        assert!(manager.state.tags.get(tag2).unwrap().flags.is_empty());

        manager.state.set_urgent(b, true);
        manager.state.hooks.clear();
        manager.state.reconcile();
        assert!(manager
            .state
            .tags
            .get(tag1)
            .unwrap()
            .flags
            .contains(TagFlags::USED | TagFlags::URGENT));
        assert!(manager.state.hooks.iter().any(|h| matches!(h, HookEvent::TagFlags)));
        // a second reconcile with nothing stale stays quiet
        manager.state.hooks.clear();
        manager.state.reconcile();
        assert!(manager.state.hooks.is_empty());
        let _ = a;
    }

    #[test]
    fn monitor_set_tag_refuses_a_tag_shown_elsewhere() {
        let mut manager = manager(&["1", "2"]);
        manager.monitor_created_handler(Rect::new(800, 0, 800, 600), "mon1");
        let shown_elsewhere = manager.state.monitors[1].tag;
        assert!(!manager.state.monitor_set_tag(0, shown_elsewhere));
        assert_eq!(manager.state.monitors[0].tag, manager.state.tags.find_by_name("1").unwrap().id);
    }

    #[test]
    fn hiding_a_tag_pre_arms_unmap_suppression() {
        let mut manager = manager(&["1", "2"]);
        let a = manage(&mut manager, 0x100);
        assert!(manager.state.clients[&a].visible);
        assert_eq!(manager.state.clients[&a].ignore_unmaps, 0);

        let tag2 = manager.state.tags.find_by_name("2").unwrap().id;
        assert!(manager.state.monitor_set_tag(0, tag2));
        assert!(!manager.state.clients[&a].visible);
        assert_eq!(manager.state.clients[&a].ignore_unmaps, 1);
        // the unmap we caused is swallowed, the client stays managed
        assert!(!manager.state.window_unmap_handler(a));
        assert!(manager.state.clients.contains_key(&a));
    }

    #[test]
    fn window_specs_resolve_to_focused_urgent_and_literal() {
        let mut manager = manager(&["1"]);
        let a = manage(&mut manager, 0x100);
        let b = manage(&mut manager, 0x200);
        manager.state.focus_client(a);
        manager.state.set_urgent(b, true);

        assert_eq!(manager.state.resolve_window("").map(|r| r.0), Some(a));
        assert_eq!(manager.state.resolve_window("urgent").map(|r| r.0), Some(b));
        assert_eq!(manager.state.resolve_window("0x200").map(|r| r.0), Some(b));
        assert_eq!(manager.state.resolve_window("512").map(|r| r.0), Some(b));
        let (unmanaged, client) = manager.state.resolve_window("0xdead").unwrap();
        assert_eq!(unmanaged, WindowHandle(0xdead));
        assert!(client.is_none());
        assert!(manager.state.resolve_window("nonsense").is_none());
    }
}
