use crate::config::Config;
use crate::models::Rect;
use crate::models::WindowHandle;

#[cfg(test)]
mod mock_display_server;

#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;

/// The synchronous services the core needs from a display server. All other
/// outbound traffic goes through the [`DisplayAction`](crate::DisplayAction)
/// queue; only window creation has to return an id the core can stack and
/// reparent under right away.
pub trait DisplayServer {
    fn new(config: &impl Config) -> Self;

    /// Create the decoration frame for a freshly adopted client and return
    /// its window.
    fn setup_decoration(&mut self, client: WindowHandle, outline: Rect) -> WindowHandle;

    /// Create an invisible helper window (frame backgrounds, monitor
    /// stacking anchors).
    fn create_service_window(&mut self) -> WindowHandle;

    /// Whether the window belongs to the manager itself. Own windows are
    /// never adopted.
    fn owns_window(&self, window: WindowHandle) -> bool;
}
