//! Routes display-server events into the core.
use crate::config::Config;
use crate::display_event::DisplayEvent;
use crate::display_servers::DisplayServer;
use crate::models::Manager;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Process one event and reconcile dirty state before handing control
    /// back to the event loop. Returns true when something visible changed.
    pub fn display_event_handler(&mut self, event: DisplayEvent) -> bool {
        let update_needed = match event {
            DisplayEvent::WindowMapRequest(snapshot) => self.window_created_handler(snapshot),
            DisplayEvent::WindowUnmap(handle) => self.state.window_unmap_handler(handle),
            DisplayEvent::WindowDestroy(handle) => self.state.window_destroyed_handler(handle),
            DisplayEvent::WindowEnter(handle) => self.state.window_enter_handler(handle),
            DisplayEvent::WindowTitleChanged(handle, title) => {
                self.state.update_title(handle, title);
                false
            }
            DisplayEvent::WindowWmHintsChanged(handle, hints) => {
                self.state.update_wm_hints(handle, hints);
                false
            }
            DisplayEvent::WindowSizeHintsChanged(handle, hints) => {
                self.state.update_size_hints(handle, hints);
                false
            }
            DisplayEvent::ConfigureRequest { window, rect } => {
                self.state.configure_request_handler(window, rect)
            }
        };
        self.state.reconcile();
        update_needed
    }
}
