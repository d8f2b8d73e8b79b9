//! Client adoption, release, and per-client property changes.
use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_event::WindowSnapshot;
use crate::display_servers::DisplayServer;
use crate::hooks::HookEvent;
use crate::models::{Client, Decoration, Layer, Manager, Rect, TagId, Theme, WindowHandle};
use crate::state::{Phase, State};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Adopt a window, or decide not to. Returns false when the window is
    /// left unmanaged, with no state mutated.
    pub fn window_created_handler(&mut self, snapshot: WindowSnapshot) -> bool {
        let window = snapshot.window;
        if self.display_server.owns_window(window) {
            // ignore our own windows
            return false;
        }
        if self.state.clients.contains_key(&window) {
            return false;
        }

        let changes = self.config.changes_for(&snapshot);

        // tag resolution: rule tag, else the rule monitor's tag, else the
        // current monitor's tag
        let mut tag: Option<TagId> = changes
            .tag_name
            .as_deref()
            .and_then(|name| self.state.tags.find_by_name(name))
            .map(|t| t.id);
        if let Some(monitor) = changes.monitor_name.as_deref().and_then(|n| self.state.find_monitor(n))
        {
            match tag {
                // no tag rule matched; use the target monitor's tag
                None => tag = Some(self.state.monitors[monitor].tag),
                // a tag was found; display it on the target monitor, but
                // only if switchtag is set
                Some(t) if changes.switchtag => {
                    self.state.monitor_set_tag(monitor, t);
                }
                Some(_) => {}
            }
        }

        if !changes.manage {
            tracing::debug!("rules leave {window} unmanaged");
            // map it, just to be sure
            self.state.actions.push_back(DisplayAction::MapWindow(window));
            return false;
        }

        let Some(tag) = tag.or_else(|| self.state.current_tag()) else {
            tracing::warn!("no tag available to adopt {window}");
            return false;
        };

        let decoration_window = self.display_server.setup_decoration(window, snapshot.geometry);
        let slice = self.state.slices.create_client(window, decoration_window);
        let mut client = Client::new(window, tag, slice, Decoration::new(decoration_window));
        client.title = snapshot.title.clone();
        client.pid = snapshot.pid;
        client.keymask = changes.keymask.clone();
        client.float_size = snapshot.geometry;
        client.last_size = snapshot.geometry;
        client.hints = snapshot.size_hints;
        fuzzy_fix_initial_position(&mut client.float_size, &self.state.theme);
        if self.state.phase == Phase::InitialSweep {
            // swallow the UnmapNotify the reparenting below generates
            client.ignore_unmaps += 1;
        }
        self.state.clients.insert(window, client);

        let state = &mut self.state;
        if let Some(t) = state.tags.get_mut(tag) {
            t.stack.insert_slice(&state.slices, slice);
            t.frame.lookup_mut(&changes.tree_index).insert_client(window);
            if changes.focus {
                t.frame.focus_client(window);
            }
        }

        self.state.update_wm_hints(window, snapshot.wm_hints);

        let tag_name = self.state.tags.get(tag).map(|t| t.name.clone()).unwrap_or_default();
        self.state
            .actions
            .push_back(DisplayAction::EwmhSetWindowTag { window, tag: tag_name });
        self.state.tag_flags_dirty = true;
        self.state.set_fullscreen(window, changes.fullscreen);
        let fullscreen = self.state.clients[&window].fullscreen;
        self.state
            .actions
            .push_back(DisplayAction::EwmhUpdateWindowState { window, fullscreen });
        // publish after the tag property is set, so a panel reading the
        // client list sees a consistent window
        self.state.actions.push_back(DisplayAction::EwmhAddClient(window));

        self.state
            .actions
            .push_back(DisplayAction::SetBorderWidth { window, width: 0 });
        self.state.actions.push_back(DisplayAction::ReparentToDecoration {
            window,
            decoration: decoration_window,
        });
        self.state.actions.push_back(DisplayAction::SelectClientEvents(window));

        if let Some(monitor) = self.state.monitor_showing_tag(tag) {
            if monitor != self.state.current_monitor && changes.focus && changes.switchtag {
                let current = self.state.current_monitor;
                self.state.monitor_set_tag(current, tag);
            }
            if let Some(monitor) = self.state.monitor_showing_tag(tag) {
                self.state.monitor_apply_layout(monitor);
            }
            self.state.set_client_visible(window, true);
        } else if changes.focus && changes.switchtag {
            let current = self.state.current_monitor;
            self.state.monitor_set_tag(current, tag);
            self.state.set_client_visible(window, true);
        }

        self.state.send_configure(window);
        self.state
            .actions
            .push_back(DisplayAction::GrabButtons { window, focused: false });
        true
    }
}

impl State {
    /// Release a client: DestroyNotify, or an UnmapNotify nobody asked for.
    pub fn window_destroyed_handler(&mut self, handle: WindowHandle) -> bool {
        let Some(client) = self.clients.get(&handle) else { return false };
        let (dragged, tag, decoration, visible) =
            (client.dragged, client.tag, client.decoration.window, client.visible);
        if dragged {
            self.set_dragged(handle, false);
            self.actions.push_back(DisplayAction::StopDrag);
        }
        if let Some(t) = self.tags.get_mut(tag) {
            t.frame.remove_client(handle);
        }
        // ignore further events from it, then give the window back
        self.actions.push_back(DisplayAction::DeselectEvents(handle));
        self.actions.push_back(DisplayAction::UnmapWindow(decoration));
        self.actions
            .push_back(DisplayAction::ReparentToRoot { window: handle, x: 0, y: 0 });
        // clear our properties so the client knows it may map itself again
        self.actions.push_back(DisplayAction::EwmhClearClientProperties(handle));
        self.actions.push_back(DisplayAction::ClearWmState(handle));
        self.destroy_client(handle);
        self.tag_update_focus_layer(tag);
        if let Some(monitor) = self.monitor_showing_tag(tag) {
            self.monitor_apply_layout(monitor);
        }
        self.actions.push_back(DisplayAction::EwmhRemoveClient(handle));
        self.tag_flags_dirty = true;
        visible
    }

    /// UnmapNotify: swallow self-generated ones, release the client on a
    /// real withdrawal.
    pub fn window_unmap_handler(&mut self, handle: WindowHandle) -> bool {
        let Some(client) = self.clients.get_mut(&handle) else { return false };
        if client.ignore_unmapnotify() {
            return false;
        }
        self.window_destroyed_handler(handle)
    }

    /// ConfigureRequest: floating clients get what they ask for (size
    /// hints permitting); tiled clients are re-told their real geometry.
    pub fn configure_request_handler(&mut self, window: WindowHandle, rect: Rect) -> bool {
        let Some(client) = self.clients.get(&window) else {
            // not ours; honor it
            self.actions.push_back(DisplayAction::MoveResizeWindow { window, rect });
            return false;
        };
        let floated = self.tags.get(client.tag).is_some_and(|t| t.floating);
        if floated || client.pseudotile {
            let ((w, h), _) = client.apply_size_hints(floated, rect.w, rect.h);
            let tag = client.tag;
            if let Some(client) = self.clients.get_mut(&window) {
                client.float_size = Rect::new(rect.x, rect.y, w, h);
            }
            if let Some(monitor) = self.monitor_showing_tag(tag) {
                self.monitor_apply_layout(monitor);
                return true;
            }
            false
        } else {
            self.send_configure(window);
            false
        }
    }

    /// PropertyNotify told us the title changed.
    pub fn update_title(&mut self, handle: WindowHandle, title: String) {
        let focused = self.current_client() == Some(handle);
        let Some(client) = self.clients.get_mut(&handle) else { return };
        let changed = client.title != title;
        client.title = title.clone();
        if changed && focused {
            self.hooks
                .push_back(HookEvent::WindowTitleChanged { window: handle, title });
        }
    }

    /// PropertyNotify told us WM_NORMAL_HINTS changed.
    pub fn update_size_hints(&mut self, handle: WindowHandle, hints: crate::models::SizeHints) {
        if let Some(client) = self.clients.get_mut(&handle) {
            client.hints = hints;
        }
    }

    /// Enter or leave fullscreen. The slice moves in and out of the
    /// Fullscreen layer, the tag re-layouts, and the hook fires, but only on
    /// a real change.
    pub fn set_fullscreen(&mut self, handle: WindowHandle, state: bool) {
        let Some(client) = self.clients.get_mut(&handle) else { return };
        if client.fullscreen == state {
            return;
        }
        client.fullscreen = state;
        if client.ewmh_notify {
            client.ewmh_fullscreen = state;
        }
        let (tag, slice) = (client.tag, client.slice);
        if let Some(t) = self.tags.get_mut(tag) {
            if state {
                t.stack.add_layer(&mut self.slices, slice, Layer::Fullscreen);
            } else {
                t.stack.remove_layer(&mut self.slices, slice, Layer::Fullscreen);
            }
        }
        self.tag_update_focus_layer(tag);
        if let Some(monitor) = self.monitor_showing_tag(tag) {
            self.monitor_apply_layout(monitor);
        }
        self.actions
            .push_back(DisplayAction::EwmhUpdateWindowState { window: handle, fullscreen: state });
        self.hooks.push_back(HookEvent::Fullscreen { on: state, window: handle });
    }

    pub fn set_pseudotile(&mut self, handle: WindowHandle, state: bool) {
        let Some(client) = self.clients.get_mut(&handle) else { return };
        if client.pseudotile == state {
            return;
        }
        client.pseudotile = state;
        let tag = client.tag;
        if let Some(monitor) = self.monitor_showing_tag(tag) {
            self.monitor_apply_layout(monitor);
        }
    }

    /// Toggle the tiling size-hints set. Re-layouts only when that set is
    /// the one currently applied to the client.
    pub fn set_sizehints_tiling(&mut self, handle: WindowHandle, state: bool) {
        let Some(client) = self.clients.get_mut(&handle) else { return };
        client.sizehints_tiling = state;
        let (tag, pseudotile) = (client.tag, client.pseudotile);
        let floated = self.tags.get(tag).is_some_and(|t| t.floating);
        if !floated && !pseudotile {
            if let Some(monitor) = self.monitor_showing_tag(tag) {
                self.monitor_apply_layout(monitor);
            }
        }
    }

    /// Toggle the floating size-hints set. Re-layouts only when that set is
    /// the one currently applied to the client.
    pub fn set_sizehints_floating(&mut self, handle: WindowHandle, state: bool) {
        let Some(client) = self.clients.get_mut(&handle) else { return };
        client.sizehints_floating = state;
        let (tag, pseudotile) = (client.tag, client.pseudotile);
        let floated = self.tags.get(tag).is_some_and(|t| t.floating);
        if floated || pseudotile {
            if let Some(monitor) = self.monitor_showing_tag(tag) {
                self.monitor_apply_layout(monitor);
            }
        }
    }

    /// The pointer-drag subsystem marks and unmarks its victim here.
    pub fn set_dragged(&mut self, handle: WindowHandle, state: bool) {
        let Some(client) = self.clients.get_mut(&handle) else { return };
        if client.dragged == state {
            return;
        }
        client.dragged = state;
        self.objects.dragged = state.then_some(handle);
    }

    /// Move a client to another tag, carrying its slice (and every layer
    /// membership) along.
    pub fn move_client_to_tag(&mut self, handle: WindowHandle, target: TagId) {
        let Some(client) = self.clients.get(&handle) else { return };
        let (old, slice) = (client.tag, client.slice);
        if old == target || self.tags.get(target).is_none() {
            return;
        }
        if let Some(t) = self.tags.get_mut(old) {
            t.frame.remove_client(handle);
            t.stack.remove_slice(&self.slices, slice);
        }
        if let Some(client) = self.clients.get_mut(&handle) {
            client.tag = target;
        }
        if let Some(t) = self.tags.get_mut(target) {
            t.frame.insert_client(handle);
            t.stack.insert_slice(&self.slices, slice);
        }
        let old_monitor = self.monitor_showing_tag(old);
        let new_monitor = self.monitor_showing_tag(target);
        self.set_client_visible(handle, new_monitor.is_some());
        self.tag_update_focus_layer(old);
        self.tag_update_focus_layer(target);
        if let Some(monitor) = old_monitor {
            self.monitor_apply_layout(monitor);
        }
        if let Some(monitor) = new_monitor {
            self.monitor_apply_layout(monitor);
        }
        self.tag_flags_dirty = true;
    }
}

/// Nudge the requested floating position so the widest possible floating
/// decoration still starts on the screen.
fn fuzzy_fix_initial_position(float_size: &mut Rect, theme: &Theme) {
    let triple = &theme.floating;
    let border = triple
        .normal
        .border_width
        .max(triple.active.border_width)
        .max(triple.urgent.border_width);
    if float_size.x - border < 0 {
        float_size.x += border - float_size.x;
    }
    if float_size.y - border < 0 {
        float_size.y += border - float_size.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Layer, SliceKind};

    type TestManager =
        Manager<crate::config::tests::TestConfig, crate::display_servers::MockDisplayServer>;

    fn manager_with_monitor() -> TestManager {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.monitor_created_handler(Rect::new(0, 0, 800, 600), "mon0");
        manager.end_initial_sweep();
        manager
    }

    fn snapshot(id: u64, rect: Rect) -> WindowSnapshot {
        WindowSnapshot::new(WindowHandle(id), rect)
    }

    #[test]
    fn adoption_populates_every_table() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.monitor_created_handler(Rect::new(0, 0, 800, 600), "mon0");
        // still in the initial sweep
        assert!(manager.window_created_handler(snapshot(0x100, Rect::new(10, 10, 400, 300))));

        let handle = WindowHandle(0x100);
        assert_eq!(manager.state.clients.len(), 1);
        let client = &manager.state.clients[&handle];
        assert_eq!(client.float_size, Rect::new(10, 10, 400, 300));
        assert_eq!(client.ignore_unmaps, 1, "the initial sweep swallows the reparent unmap");

        let tag = manager.state.tags.get(client.tag).unwrap();
        assert!(tag.frame.contains(handle));
        // exactly one slice names this client, in the Normal layer
        let normal = tag.stack.layer(Layer::Normal);
        assert_eq!(normal.len(), 1);
        let slice = manager.state.slices.get(normal[0]).unwrap();
        assert!(matches!(slice.kind, SliceKind::Client { window, .. } if window == handle));

        let decoration = client.decoration.window;
        assert!(manager.state.actions.iter().any(|a| matches!(
            a,
            DisplayAction::ReparentToDecoration { window, decoration: d }
                if *window == handle && *d == decoration
        )));
    }

    #[test]
    fn adopting_a_known_window_changes_nothing() {
        let mut manager = manager_with_monitor();
        assert!(manager.window_created_handler(snapshot(0x100, Rect::new(0, 0, 100, 100))));
        let clients_before = manager.state.clients.len();
        let slices_before = manager.state.slices.len();
        assert!(!manager.window_created_handler(snapshot(0x100, Rect::new(0, 0, 100, 100))));
        assert_eq!(manager.state.clients.len(), clients_before);
        assert_eq!(manager.state.slices.len(), slices_before);
    }

    #[test]
    fn the_managers_own_windows_are_never_adopted() {
        let mut manager = manager_with_monitor();
        let own = manager.display_server.create_service_window();
        assert!(!manager.window_created_handler(snapshot(own.0, Rect::new(0, 0, 50, 50))));
        assert!(manager.state.clients.is_empty());
    }

    #[test]
    fn rule_rejected_windows_are_mapped_and_forgotten() {
        let mut manager = manager_with_monitor();
        let handle = WindowHandle(0x100);
        manager.config.changes.insert(
            handle,
            crate::config::ClientChanges { manage: false, ..Default::default() },
        );
        assert!(!manager.window_created_handler(snapshot(0x100, Rect::new(0, 0, 100, 100))));
        assert!(manager.state.clients.is_empty());
        assert!(manager
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::MapWindow(w) if *w == handle)));
    }

    #[test]
    fn rule_tag_places_the_client_on_a_hidden_tag() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        manager.monitor_created_handler(Rect::new(0, 0, 800, 600), "mon0");
        let handle = WindowHandle(0x100);
        manager.config.changes.insert(
            handle,
            crate::config::ClientChanges {
                tag_name: Some("2".to_owned()),
                ..Default::default()
            },
        );
        assert!(manager.window_created_handler(snapshot(0x100, Rect::new(0, 0, 100, 100))));
        let tag2 = manager.state.tags.find_by_name("2").unwrap();
        assert!(tag2.frame.contains(handle));
        // tag 2 is not on the monitor, so the client stays hidden
        assert!(!manager.state.clients[&handle].visible);
    }

    #[test]
    fn unmap_suppression_counts_down_before_releasing() {
        let mut manager = manager_with_monitor();
        assert!(manager.window_created_handler(snapshot(0x100, Rect::new(0, 0, 100, 100))));
        let handle = WindowHandle(0x100);
        manager.state.clients.get_mut(&handle).unwrap().ignore_unmaps = 2;

        assert!(!manager.state.window_unmap_handler(handle));
        assert_eq!(manager.state.clients[&handle].ignore_unmaps, 1);
        assert!(!manager.state.window_unmap_handler(handle));
        assert_eq!(manager.state.clients[&handle].ignore_unmaps, 0);
        manager.state.window_unmap_handler(handle);
        assert!(!manager.state.clients.contains_key(&handle), "third unmap releases");
    }

    #[test]
    fn release_returns_the_window_and_cleans_every_table() {
        let mut manager = manager_with_monitor();
        assert!(manager.window_created_handler(snapshot(0x100, Rect::new(0, 0, 100, 100))));
        assert!(manager.window_created_handler(snapshot(0x200, Rect::new(0, 0, 100, 100))));
        let handle = WindowHandle(0x100);
        let slices_before = manager.state.slices.len();

        assert!(manager.state.window_destroyed_handler(handle));
        assert!(!manager.state.clients.contains_key(&handle));
        assert_eq!(manager.state.slices.len(), slices_before - 1);
        let tag = manager.state.tags.iter().next().unwrap();
        assert!(!tag.frame.contains(handle));
        assert!(manager
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::ReparentToRoot { window, .. } if *window == handle)));
        // the survivor is focused now
        assert_eq!(manager.state.last_focus, Some(WindowHandle(0x200)));
    }

    #[test]
    fn fullscreen_toggle_tracks_the_layer_and_hook_exactly_once() {
        let mut manager = manager_with_monitor();
        assert!(manager.window_created_handler(snapshot(0x100, Rect::new(0, 0, 100, 100))));
        let handle = WindowHandle(0x100);
        let slice = manager.state.clients[&handle].slice;
        let tag_id = manager.state.clients[&handle].tag;
        manager.state.hooks.clear();

        manager.state.set_fullscreen(handle, true);
        let tag = manager.state.tags.get(tag_id).unwrap();
        assert!(tag.stack.layer(Layer::Fullscreen).contains(&slice));
        assert_eq!(
            manager
                .state
                .hooks
                .iter()
                .filter(|h| matches!(h, HookEvent::Fullscreen { on: true, .. }))
                .count(),
            1
        );

        // second call: no hook, no stack change
        manager.state.hooks.clear();
        manager.state.set_fullscreen(handle, true);
        assert!(manager.state.hooks.is_empty());
        let tag = manager.state.tags.get(tag_id).unwrap();
        assert_eq!(tag.stack.layer(Layer::Fullscreen).len(), 1);

        manager.state.set_fullscreen(handle, false);
        let tag = manager.state.tags.get(tag_id).unwrap();
        assert!(tag.stack.layer(Layer::Fullscreen).is_empty());
        assert!(manager
            .state
            .hooks
            .iter()
            .any(|h| matches!(h, HookEvent::Fullscreen { on: false, .. })));
    }

    #[test]
    fn moving_a_client_keeps_its_single_slice_and_memberships() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        manager.monitor_created_handler(Rect::new(0, 0, 800, 600), "mon0");
        manager.end_initial_sweep();
        assert!(manager.window_created_handler(snapshot(0x100, Rect::new(0, 0, 100, 100))));
        let handle = WindowHandle(0x100);
        manager.state.set_fullscreen(handle, true);
        let slice = manager.state.clients[&handle].slice;
        let target = manager.state.tags.find_by_name("2").unwrap().id;

        manager.state.move_client_to_tag(handle, target);
        let old = manager.state.tags.find_by_name("1").unwrap();
        assert!(!old.stack.layer(Layer::Normal).contains(&slice));
        assert!(old.stack.layer(Layer::Fullscreen).is_empty());
        let new = manager.state.tags.get(target).unwrap();
        assert!(new.stack.layer(Layer::Normal).contains(&slice));
        assert!(new.stack.layer(Layer::Fullscreen).contains(&slice), "fullscreen membership moves");
        assert!(!manager.state.clients[&handle].visible, "hidden tag hides the client");
    }

    #[test]
    fn shutdown_restores_floating_geometry_and_maps_survivors() {
        let mut manager = manager_with_monitor();
        assert!(manager.window_created_handler(snapshot(0x100, Rect::new(50, 60, 400, 300))));
        let handle = WindowHandle(0x100);
        // a layout pass has since parked the window elsewhere
        assert_ne!(
            manager.state.clients[&handle].last_size,
            Rect::new(50, 60, 400, 300)
        );
        manager.state.actions.clear();

        manager.state.shutdown();
        let restored = Rect::new(50, 60, 400, 300);
        assert!(manager.state.actions.iter().any(|a| matches!(
            a,
            DisplayAction::MoveResizeWindow { window, rect } if *window == handle && *rect == restored
        )));
        assert!(manager.state.actions.iter().any(|a| matches!(
            a,
            DisplayAction::ReparentToRoot { window, x: 50, y: 60 } if *window == handle
        )));
        assert!(manager
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::MapWindow(w) if *w == handle)));
        assert!(manager.state.clients.is_empty());
        assert!(manager.state.slices.is_empty(), "every slice is retired on shutdown");
    }

    #[test]
    fn configure_requests_are_honored_only_while_floating() {
        let mut manager = manager_with_monitor();
        assert!(manager.window_created_handler(snapshot(0x100, Rect::new(0, 0, 100, 100))));
        let handle = WindowHandle(0x100);

        // tiled: the request is answered with the real geometry
        manager.state.actions.clear();
        manager.state.configure_request_handler(handle, Rect::new(5, 5, 640, 480));
        assert!(manager
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::ConfigureNotify { window, .. } if *window == handle)));
        assert_ne!(manager.state.clients[&handle].float_size, Rect::new(5, 5, 640, 480));

        // floating: the request lands in float_size
        let tag = manager.state.clients[&handle].tag;
        manager.state.tags.get_mut(tag).unwrap().floating = true;
        manager.state.configure_request_handler(handle, Rect::new(5, 5, 640, 480));
        assert_eq!(manager.state.clients[&handle].float_size, Rect::new(5, 5, 640, 480));
    }
}
