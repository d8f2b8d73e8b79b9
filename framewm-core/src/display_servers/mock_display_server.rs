use super::DisplayServer;
use crate::config::Config;
use crate::models::Rect;
use crate::models::WindowHandle;

/// Window ids handed out by the mock start here, far away from anything a
/// test would use for a client window.
const MOCK_WINDOW_BASE: u64 = 0x00de_c000;

#[derive(Clone, Default)]
pub struct MockDisplayServer {
    created: Vec<WindowHandle>,
}

impl DisplayServer for MockDisplayServer {
    fn new(_: &impl Config) -> Self {
        Self::default()
    }

    fn setup_decoration(&mut self, _client: WindowHandle, _outline: Rect) -> WindowHandle {
        self.create_service_window()
    }

    fn create_service_window(&mut self) -> WindowHandle {
        let handle = WindowHandle(MOCK_WINDOW_BASE + self.created.len() as u64);
        self.created.push(handle);
        handle
    }

    fn owns_window(&self, window: WindowHandle) -> bool {
        self.created.contains(&window)
    }
}
