//! The core state machine of the framewm manual tiling window manager.
//!
//! Application windows adopted from the display are arranged into binary
//! split trees of frames, grouped by tags spread across monitors, with a
//! layered Z-order stack per tag and a single-focus discipline. The X
//! transport, decoration renderer, rules engine, EWMH bridge and hook
//! emitter are external collaborators behind the [`DisplayServer`] trait,
//! the [`DisplayAction`] queue and the [`HookEvent`] queue.
#![warn(clippy::pedantic)]
// Each of these lints is globally allowed because they otherwise make a lot
// of noise in geometry and table code.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::default_trait_access
)]
pub mod command;
pub mod config;
mod display_action;
mod display_event;
pub mod display_servers;
pub mod errors;
mod handlers;
pub mod hooks;
pub mod layouts;
pub mod models;
pub mod state;

pub use command::Command;
pub use config::Config;
pub use display_action::{DisplayAction, WmState};
pub use display_event::{DisplayEvent, WindowSnapshot};
pub use display_servers::DisplayServer;
pub use errors::{CoreError, Result};
pub use hooks::HookEvent;
pub use models::Manager;
pub use state::{ObjectLinks, Phase, State};
