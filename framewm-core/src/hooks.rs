//! Hook events for the external IPC emitter.
//!
//! The core queues these; the emitter turns them into `name + args` strings
//! for whoever is listening. The core never inspects the handler's result.
use serde::{Deserialize, Serialize};

use crate::models::MonitorId;
use crate::models::WindowHandle;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    /// Keyboard focus moved; `window` is `None` when focus fell back to the
    /// root window.
    FocusChanged {
        window: Option<WindowHandle>,
        title: String,
    },
    Urgent {
        on: bool,
        window: WindowHandle,
    },
    Fullscreen {
        on: bool,
        window: WindowHandle,
    },
    WindowTitleChanged {
        window: WindowHandle,
        title: String,
    },
    /// Some tag's aggregate flags changed.
    TagFlags,
    /// A monitor switched its visible tag.
    TagChanged {
        tag: String,
        monitor: MonitorId,
    },
    TagAdded {
        tag: String,
    },
    TagRenamed {
        old: String,
        new: String,
    },
    TagRemoved {
        tag: String,
        target: String,
    },
}

impl HookEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            HookEvent::FocusChanged { .. } => "focus_changed",
            HookEvent::Urgent { .. } => "urgent",
            HookEvent::Fullscreen { .. } => "fullscreen",
            HookEvent::WindowTitleChanged { .. } => "window_title_changed",
            HookEvent::TagFlags => "tag_flags",
            HookEvent::TagChanged { .. } => "tag_changed",
            HookEvent::TagAdded { .. } => "tag_added",
            HookEvent::TagRenamed { .. } => "tag_renamed",
            HookEvent::TagRemoved { .. } => "tag_removed",
        }
    }

    #[must_use]
    pub fn args(&self) -> Vec<String> {
        fn onoff(on: bool) -> String {
            if on { "on".to_owned() } else { "off".to_owned() }
        }
        match self {
            HookEvent::FocusChanged { window, title } => {
                let id = window.map_or_else(|| "0x0".to_owned(), |w| w.to_string());
                vec![id, title.clone()]
            }
            HookEvent::Urgent { on, window } | HookEvent::Fullscreen { on, window } => {
                vec![onoff(*on), window.to_string()]
            }
            HookEvent::WindowTitleChanged { window, title } => {
                vec![window.to_string(), title.clone()]
            }
            HookEvent::TagFlags => vec![],
            HookEvent::TagChanged { tag, monitor } => vec![tag.clone(), monitor.to_string()],
            HookEvent::TagAdded { tag } => vec![tag.clone()],
            HookEvent::TagRenamed { old, new } => vec![old.clone(), new.clone()],
            HookEvent::TagRemoved { tag, target } => vec![tag.clone(), target.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_loss_reports_the_null_window() {
        let hook = HookEvent::FocusChanged { window: None, title: String::new() };
        assert_eq!(hook.name(), "focus_changed");
        assert_eq!(hook.args(), vec!["0x0".to_owned(), String::new()]);
    }

    #[test]
    fn fullscreen_args_are_state_then_window() {
        let hook = HookEvent::Fullscreen { on: true, window: WindowHandle(0x2a) };
        assert_eq!(hook.args(), vec!["on".to_owned(), "0x2a".to_owned()]);
    }
}
