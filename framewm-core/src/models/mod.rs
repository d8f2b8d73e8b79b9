//! Data types the window manager core is built from.
mod client;
mod decoration;
mod frame;
mod manager;
mod monitor;
mod rect;
mod size_hints;
mod slice;
mod stack;
mod tag;

pub use client::Client;
pub use client::WindowHandle;
pub use client::{WINDOW_MIN_HEIGHT, WINDOW_MIN_WIDTH};
pub use decoration::Decoration;
pub use decoration::DecorationScheme;
pub use decoration::SchemeKind;
pub use decoration::SchemeSelector;
pub use decoration::SchemeTriple;
pub use decoration::Theme;
pub use frame::Frame;
pub use frame::LeafFrame;
pub use frame::LeafPlan;
pub use frame::SplitAlign;
pub use frame::SplitFrame;
pub use manager::Manager;
pub use monitor::Monitor;
pub use monitor::MonitorId;
pub use monitor::Pad;
pub use rect::clamp;
pub use rect::Rect;
pub use size_hints::SizeHints;
pub use size_hints::WmHints;
pub use slice::Layer;
pub use slice::LayerMask;
pub use slice::Slice;
pub use slice::SliceId;
pub use slice::SliceKind;
pub use slice::Slices;
pub use slice::LAYER_COUNT;
pub use stack::Stack;
pub use tag::Tag;
pub use tag::TagFlags;
pub use tag::TagId;
pub use tag::Tags;
