use serde::{Deserialize, Serialize};

use crate::models::DecorationScheme;
use crate::models::Rect;
use crate::models::WindowHandle;

/// WM_STATE values the core publishes on client windows.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WmState {
    Normal,
    Withdrawn,
}

/// Requests from the core toward the display server. The event loop drains
/// these after every handler; the core itself never talks to the X server.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum DisplayAction {
    /// XSetInputFocus on a client window.
    SetInputFocus(WindowHandle),

    /// XSetInputFocus back to the root window.
    FocusRoot,

    /// Send the WM_TAKE_FOCUS client message (clients with the input hint
    /// cleared get this instead of a real focus change).
    SendTakeFocus(WindowHandle),

    /// Nicely ask a window to close via WM_DELETE_WINDOW.
    SendDelete(WindowHandle),

    /// Synthetic ConfigureNotify telling the client its real geometry.
    ConfigureNotify { window: WindowHandle, rect: Rect },

    /// Plain XMoveResizeWindow; used for frame backgrounds and for windows
    /// the core does not manage.
    MoveResizeWindow { window: WindowHandle, rect: Rect },

    /// Commit a decoration geometry: the renderer moves the decoration to
    /// `outline` and the client window to `inner` within it.
    ResizeDecoration {
        decoration: WindowHandle,
        outline: Rect,
        inner: Rect,
        scheme: DecorationScheme,
    },

    /// Repaint a decoration border under a new scheme without moving it.
    ChangeDecorationScheme {
        decoration: WindowHandle,
        scheme: DecorationScheme,
    },

    MapWindow(WindowHandle),
    UnmapWindow(WindowHandle),

    /// Reparent a client window under its decoration and add it to the save
    /// set so it survives manager death.
    ReparentToDecoration {
        window: WindowHandle,
        decoration: WindowHandle,
    },

    /// Reparent a client window back to the root at the given position.
    ReparentToRoot { window: WindowHandle, x: i32, y: i32 },

    /// Destroy a window the core created (decorations, service windows).
    DestroyWindow(WindowHandle),

    /// Select the core event mask on a client window.
    SelectClientEvents(WindowHandle),

    /// Stop listening to a window entirely.
    DeselectEvents(WindowHandle),

    /// XSetWindowBorderWidth; the server-side border is cleared on adoption.
    SetBorderWidth { window: WindowHandle, width: i32 },

    /// One XRestackWindows call, topmost first.
    RestackWindows(Vec<WindowHandle>),

    /// XRaiseWindow on a window outside the managed stacking order.
    RaiseWindow(WindowHandle),

    /// Bracket for sequences that must be atomic against other X clients.
    GrabServer,
    UngrabServer,

    /// Install the passive button grabs appropriate for a focused or
    /// unfocused client.
    GrabButtons { window: WindowHandle, focused: bool },

    /// Install a keybinding mask; `None` enables all keys.
    SetKeymask(Option<String>),

    SetWmState { window: WindowHandle, state: WmState },

    /// Delete WM_STATE from an unmanaged window.
    ClearWmState(WindowHandle),

    /// Write or clear XUrgencyHint in the client's WM_HINTS.
    SetUrgencyHint { window: WindowHandle, urgent: bool },

    /// Abort an in-progress pointer drag.
    StopDrag,

    // EWMH publications, executed by the external bridge.
    EwmhSetActiveWindow(Option<WindowHandle>),
    EwmhUpdateWindowState { window: WindowHandle, fullscreen: bool },
    EwmhAddClient(WindowHandle),
    EwmhRemoveClient(WindowHandle),
    EwmhUpdateClientListStacking(Vec<WindowHandle>),
    EwmhSetWindowTag { window: WindowHandle, tag: String },
    EwmhClearClientProperties(WindowHandle),
    EwmhUpdateFrameExtents { window: WindowHandle, left: i32, right: i32, top: i32, bottom: i32 },
}
