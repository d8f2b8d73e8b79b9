//! The textual command surface.
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, Result};
use crate::models::SplitAlign;

/// Client properties the `set_property` command can flip.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientProperty {
    Fullscreen,
    Pseudotile,
}

impl ClientProperty {
    fn parse(name: &str) -> Result<Self> {
        match name {
            "fullscreen" => Ok(ClientProperty::Fullscreen),
            "pseudotile" => Ok(ClientProperty::Pseudotile),
            _ => Err(CoreError::InvalidArgument(format!("no such property: {name}"))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleArg {
    On,
    Off,
    Toggle,
}

impl ToggleArg {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "on" | "true" | "1" => Ok(ToggleArg::On),
            "off" | "false" | "0" => Ok(ToggleArg::Off),
            "toggle" => Ok(ToggleArg::Toggle),
            _ => Err(CoreError::InvalidArgument(format!("no such value: {value}"))),
        }
    }

    #[must_use]
    pub fn apply(self, current: bool) -> bool {
        match self {
            ToggleArg::On => true,
            ToggleArg::Off => false,
            ToggleArg::Toggle => !current,
        }
    }
}

/// `floating` additionally answers a status query.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatingArg {
    Set(ToggleArg),
    Status,
}

impl FloatingArg {
    fn parse(value: &str) -> Result<Self> {
        if value == "status" {
            Ok(FloatingArg::Status)
        } else {
            ToggleArg::parse(value).map(FloatingArg::Set)
        }
    }
}

/// A parsed command. Window arguments stay as window-spec strings and are
/// resolved at execution time against the then-current state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Command {
    /// Ask a window to close via WM_DELETE_WINDOW.
    Close { window: String },
    /// Flip a property of the focused client.
    SetProperty { property: ClientProperty, value: ToggleArg },
    /// Raise a window within its tag's stack.
    Raise { window: String },
    /// Focus a window, switching monitor or tag as needed.
    JumpTo { window: String },
    AddTag { name: String },
    RenameTag { from: String, to: String },
    /// Remove a tag, migrating its clients into `target` (default: the
    /// focused tag).
    MergeTag { name: String, target: Option<String> },
    /// Move the focused client to a tag.
    MoveToTag { name: String },
    /// Read or write a tag's floating flag (default: the focused tag).
    Floating { tag: Option<String>, value: FloatingArg },
    /// Split the focused frame.
    Split { align: SplitAlign, fraction: f32 },
    /// Write a setting in the reactive store.
    Set { name: String, value: String },
}

impl Command {
    /// Parse an argv into a command. The first element names the command.
    pub fn parse(argv: &[&str]) -> Result<Command> {
        let missing = |what: &str| CoreError::InvalidArgument(format!("missing argument: {what}"));
        let name = *argv.first().ok_or_else(|| missing("command"))?;
        match name {
            "close" => Ok(Command::Close {
                window: (*argv.get(1).unwrap_or(&"")).to_owned(),
            }),
            "set_property" => {
                let property = ClientProperty::parse(argv.get(1).ok_or_else(|| missing("property"))?)?;
                let value = ToggleArg::parse(argv.get(2).unwrap_or(&"toggle"))?;
                Ok(Command::SetProperty { property, value })
            }
            "raise" => Ok(Command::Raise {
                window: (*argv.get(1).unwrap_or(&"")).to_owned(),
            }),
            "jumpto" => Ok(Command::JumpTo {
                window: (*argv.get(1).unwrap_or(&"")).to_owned(),
            }),
            "add" => Ok(Command::AddTag {
                name: (*argv.get(1).ok_or_else(|| missing("tag name"))?).to_owned(),
            }),
            "rename" => Ok(Command::RenameTag {
                from: (*argv.get(1).ok_or_else(|| missing("tag name"))?).to_owned(),
                to: (*argv.get(2).ok_or_else(|| missing("new name"))?).to_owned(),
            }),
            "merge_tag" => Ok(Command::MergeTag {
                name: (*argv.get(1).ok_or_else(|| missing("tag name"))?).to_owned(),
                target: argv.get(2).map(|s| (*s).to_owned()),
            }),
            "move" => Ok(Command::MoveToTag {
                name: (*argv.get(1).ok_or_else(|| missing("tag name"))?).to_owned(),
            }),
            "floating" => match argv.len() {
                1 => Ok(Command::Floating { tag: None, value: FloatingArg::Set(ToggleArg::Toggle) }),
                2 => Ok(Command::Floating { tag: None, value: FloatingArg::parse(argv[1])? }),
                _ => Ok(Command::Floating {
                    tag: Some(argv[1].to_owned()),
                    value: FloatingArg::parse(argv[2])?,
                }),
            },
            "split" => {
                let align = argv
                    .get(1)
                    .and_then(|s| SplitAlign::parse(s))
                    .ok_or_else(|| CoreError::InvalidArgument("no such split align".to_owned()))?;
                let fraction = match argv.get(2) {
                    Some(s) => s
                        .parse::<f32>()
                        .map_err(|_| CoreError::InvalidArgument(format!("no fraction: {s}")))?,
                    None => 0.5,
                };
                Ok(Command::Split { align, fraction })
            }
            "set" => Ok(Command::Set {
                name: (*argv.get(1).ok_or_else(|| missing("setting"))?).to_owned(),
                value: (*argv.get(2).ok_or_else(|| missing("value"))?).to_owned(),
            }),
            _ => Err(CoreError::InvalidArgument(format!("unknown command: {name}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_property_defaults_to_toggle() {
        let cmd = Command::parse(&["set_property", "fullscreen"]).unwrap();
        assert_eq!(
            cmd,
            Command::SetProperty { property: ClientProperty::Fullscreen, value: ToggleArg::Toggle }
        );
    }

    #[test]
    fn unknown_property_is_an_invalid_argument() {
        let err = Command::parse(&["set_property", "sticky"]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn close_without_a_spec_targets_the_focused_client() {
        assert_eq!(
            Command::parse(&["close"]).unwrap(),
            Command::Close { window: String::new() }
        );
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert!(Command::parse(&["selfdestruct"]).is_err());
        assert!(Command::parse(&[]).is_err());
    }

    #[test]
    fn toggle_arg_applies_against_the_current_value() {
        assert!(ToggleArg::On.apply(false));
        assert!(!ToggleArg::Off.apply(true));
        assert!(ToggleArg::Toggle.apply(false));
        assert!(!ToggleArg::Toggle.apply(true));
    }
}
