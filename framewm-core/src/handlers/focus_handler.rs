//! The focus and urgency state machine.
//!
//! Exactly one client across all monitors holds keyboard focus, or none.
//! `State::last_focus` tracks the previous holder so hooks only fire on real
//! changes.
use crate::display_action::DisplayAction;
use crate::hooks::HookEvent;
use crate::layouts::FrameLayout;
use crate::models::{Layer, TagId, WindowHandle};
use crate::state::State;

impl State {
    /// Hand the input focus to a client, following the ICCCM rules: clients
    /// with the input hint cleared get WM_TAKE_FOCUS instead of a real
    /// XSetInputFocus.
    pub fn window_focus(&mut self, handle: WindowHandle) {
        let Some(client) = self.clients.get(&handle) else { return };
        let (never_focus, keymask, title) =
            (client.never_focus, client.keymask.clone(), client.title.clone());

        if never_focus {
            self.actions.push_back(DisplayAction::SendTakeFocus(handle));
        } else {
            self.actions.push_back(DisplayAction::SetInputFocus(handle));
        }

        if self.last_focus != Some(handle) {
            // only emit the hook if the focus really changes
            if let Some(previous) = self.last_focus {
                self.actions
                    .push_back(DisplayAction::GrabButtons { window: previous, focused: false });
            }
            self.objects.focus = Some(handle);
            self.actions.push_back(DisplayAction::EwmhSetActiveWindow(Some(handle)));
            self.tag_update_each_focus_layer();
            self.hooks.push_back(HookEvent::FocusChanged { window: Some(handle), title });
        }
        self.last_focus = Some(handle);

        // specials for the max layout
        let is_max_layout = self.current_tag().and_then(|t| self.tags.get(t)).is_some_and(|t| {
            !t.floating
                && t.frame.focused_client() == Some(handle)
                && t.frame.focused_leaf().layout == FrameLayout::Max
        });
        if self.settings.raise_on_focus || is_max_layout {
            self.raise_client(handle);
        }
        if let Some(tag) = self.current_tag() {
            self.tag_update_focus_layer(tag);
        }
        self.actions.push_back(DisplayAction::GrabButtons { window: handle, focused: true });
        self.actions.push_back(DisplayAction::SetKeymask(keymask));
        self.set_urgent(handle, false);
    }

    /// Drop the focus back to the root window.
    pub fn window_unfocus_last(&mut self) {
        if let Some(previous) = self.last_focus {
            self.actions
                .push_back(DisplayAction::GrabButtons { window: previous, focused: false });
        }
        self.objects.focus = None;
        self.actions.push_back(DisplayAction::FocusRoot);
        if self.last_focus.take().is_some() {
            self.hooks
                .push_back(HookEvent::FocusChanged { window: None, title: String::new() });
            self.actions.push_back(DisplayAction::EwmhSetActiveWindow(None));
            self.tag_update_each_focus_layer();
            // enable all keys in the root window
            self.actions.push_back(DisplayAction::SetKeymask(None));
        }
    }

    /// Focus a client wherever it is: switch to its monitor when its tag is
    /// visible, otherwise pull the tag onto the current monitor.
    pub fn focus_client(&mut self, handle: WindowHandle) {
        let Some(client) = self.clients.get(&handle) else { return };
        let tag = client.tag;
        match self.monitor_showing_tag(tag) {
            Some(monitor) => self.current_monitor = monitor,
            None => {
                let current = self.current_monitor;
                if !self.monitor_set_tag(current, tag) {
                    return;
                }
            }
        }
        if let Some(t) = self.tags.get_mut(tag) {
            t.frame.focus_client(handle);
        }
        self.window_focus(handle);
    }

    /// EnterNotify made this window a focus candidate.
    pub fn window_enter_handler(&mut self, handle: WindowHandle) -> bool {
        if !self.settings.focus_follows_mouse {
            return false;
        }
        let Some(client) = self.clients.get(&handle) else { return false };
        if client.never_focus || !client.visible {
            return false;
        }
        let tag = client.tag;
        let Some(monitor) = self.monitor_showing_tag(tag) else { return false };
        self.current_monitor = monitor;
        if let Some(t) = self.tags.get_mut(tag) {
            t.frame.focus_client(handle);
        }
        self.window_focus(handle);
        true
    }

    /// Rebuild one tag's focus layer: the tag's focused client shadows its
    /// normal position whenever something fullscreen is around, the client
    /// itself is fullscreen, or the setting asks for it.
    pub fn tag_update_focus_layer(&mut self, tag: TagId) {
        let Some(t) = self.tags.get(tag) else { return };
        let focused = t.frame.focused_client();
        let fullscreen_present = !t.stack.is_layer_empty(Layer::Fullscreen);
        let slice_info =
            focused.and_then(|h| self.clients.get(&h).map(|c| (c.slice, c.fullscreen)));
        let raise_temporarily = self.settings.raise_on_focus_temporarily;
        let Some(t) = self.tags.get_mut(tag) else { return };
        t.stack.clear_layer(&mut self.slices, Layer::Focus);
        if let Some((slice, client_fullscreen)) = slice_info {
            if fullscreen_present || raise_temporarily || client_fullscreen {
                t.stack.add_layer(&mut self.slices, slice, Layer::Focus);
            }
        }
    }

    pub fn tag_update_each_focus_layer(&mut self) {
        let ids: Vec<TagId> = self.tags.iter().map(|t| t.id).collect();
        for id in ids {
            self.tag_update_focus_layer(id);
        }
    }

    /// Flip the urgency flag. No-op when the flag already matches.
    pub fn set_urgent(&mut self, handle: WindowHandle, state: bool) {
        let Some(client) = self.clients.get(&handle) else { return };
        if client.urgent == state {
            return;
        }
        self.set_urgent_force(handle, state);
    }

    pub(crate) fn set_urgent_force(&mut self, handle: WindowHandle, state: bool) {
        self.hooks.push_back(HookEvent::Urgent { on: state, window: handle });
        if let Some(client) = self.clients.get_mut(&handle) {
            client.urgent = state;
        }
        let focused = self.current_client() == Some(handle);
        self.setup_border(handle, focused);
        self.actions.push_back(DisplayAction::SetUrgencyHint { window: handle, urgent: state });
        self.tag_flags_dirty = true;
    }

    /// Repaint a client's border under the scheme its state selects.
    pub fn setup_border(&mut self, handle: WindowHandle, focused: bool) {
        let Some(kind) = self.scheme_kind(handle) else { return };
        let urgent = self.clients.get(&handle).is_some_and(|c| c.urgent);
        let selector = if focused {
            crate::models::SchemeSelector::Active
        } else if urgent {
            crate::models::SchemeSelector::Urgent
        } else {
            crate::models::SchemeSelector::Normal
        };
        let scheme = self.theme.triple(kind).select(selector);
        let Some(client) = self.clients.get_mut(&handle) else { return };
        client.decoration.last_scheme = scheme;
        let decoration = client.decoration.window;
        self.actions
            .push_back(DisplayAction::ChangeDecorationScheme { decoration, scheme });
    }

    /// React to a WM_HINTS change: adopt urgency, except that a focused
    /// window never keeps the urgency hint, and track the input hint as
    /// `never_focus`.
    pub fn update_wm_hints(&mut self, handle: WindowHandle, hints: crate::models::WmHints) {
        let Some(client) = self.clients.get(&handle) else { return };
        let focused = self.current_client() == Some(handle);
        if focused && hints.urgent {
            // remove the urgency hint if the window is focused
            self.actions.push_back(DisplayAction::SetUrgencyHint { window: handle, urgent: false });
        } else if hints.urgent != client.urgent {
            self.hooks.push_back(HookEvent::Urgent { on: hints.urgent, window: handle });
            if let Some(client) = self.clients.get_mut(&handle) {
                client.urgent = hints.urgent;
            }
            self.setup_border(handle, focused);
            self.tag_flags_dirty = true;
        }
        if let Some(client) = self.clients.get_mut(&handle) {
            client.never_focus = match hints.input {
                Some(input) => !input,
                None => false,
            };
        }
    }
}
