use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, Result};

/// The reactive settings store. Values are read at the moment of use, so a
/// runtime `set` takes effect on the very next layout pass.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Pixels removed from each tiled client's width and height.
    pub window_gap: i32,
    /// Snap distance for the external drag subsystem.
    pub snap_gap: i32,
    /// Raise a client whenever it takes focus.
    pub raise_on_focus: bool,
    /// Keep the focused client on its tag's focus layer.
    pub raise_on_focus_temporarily: bool,
    /// EnterNotify moves the focus.
    pub focus_follows_mouse: bool,
    /// Drop the decoration for single-client frames.
    pub smart_window_surroundings: bool,
    /// Minimum pixels of a floating client kept on its monitor per axis.
    pub monitor_float_threshold: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_gap: 0,
            snap_gap: 5,
            raise_on_focus: false,
            raise_on_focus_temporarily: false,
            focus_follows_mouse: true,
            smart_window_surroundings: false,
            monitor_float_threshold: 24,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(CoreError::InvalidArgument(format!("no boolean: {value}"))),
    }
}

fn parse_int(value: &str) -> Result<i32> {
    value
        .parse()
        .map_err(|_| CoreError::InvalidArgument(format!("no integer: {value}")))
}

impl Settings {
    /// Write one setting by name. Returns whether the change affects
    /// committed geometry, in which case the caller re-layouts everything.
    pub fn set(&mut self, name: &str, value: &str) -> Result<bool> {
        match name {
            "window_gap" => {
                self.window_gap = parse_int(value)?;
                Ok(true)
            }
            "snap_gap" => {
                self.snap_gap = parse_int(value)?;
                Ok(false)
            }
            "raise_on_focus" => {
                self.raise_on_focus = parse_bool(value)?;
                Ok(false)
            }
            "raise_on_focus_temporarily" => {
                self.raise_on_focus_temporarily = parse_bool(value)?;
                Ok(false)
            }
            "focus_follows_mouse" => {
                self.focus_follows_mouse = parse_bool(value)?;
                Ok(false)
            }
            "smart_window_surroundings" => {
                self.smart_window_surroundings = parse_bool(value)?;
                Ok(true)
            }
            "monitor_float_threshold" => {
                self.monitor_float_threshold = parse_int(value)?;
                Ok(true)
            }
            _ => Err(CoreError::NotFound(format!("setting \"{name}\""))),
        }
    }
}
