use serde::{Deserialize, Serialize};

/// What the rules engine wants done with a window about to be adopted.
///
/// The engine may inspect the window's properties but never mutates core
/// state; everything it decides comes back through this record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientChanges {
    /// Put the client on this tag, if it resolves.
    pub tag_name: Option<String>,
    /// Fallback monitor whose tag is used when `tag_name` does not resolve.
    pub monitor_name: Option<String>,
    /// Keybinding mask to install while the client is focused.
    pub keymask: Option<String>,
    /// Frame address within the tag's tree ("" is the focused frame).
    pub tree_index: String,
    /// `false` leaves the window unmanaged entirely.
    pub manage: bool,
    /// Give the client focus after adoption.
    pub focus: bool,
    /// Bring the client's tag to a monitor instead of adopting silently.
    pub switchtag: bool,
    pub fullscreen: bool,
}

impl Default for ClientChanges {
    fn default() -> Self {
        Self {
            tag_name: None,
            monitor_name: None,
            keymask: None,
            tree_index: String::new(),
            manage: true,
            focus: false,
            switchtag: false,
            fullscreen: false,
        }
    }
}
