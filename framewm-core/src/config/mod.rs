mod changes;
mod settings;

pub use changes::ClientChanges;
pub use settings::Settings;

use crate::display_event::WindowSnapshot;
use crate::models::Theme;

/// Everything the embedding binary decides for the core: the initial tag
/// list, the decoration theme, the initial settings, and the rules engine
/// consulted once per adoption.
pub trait Config {
    fn create_list_of_tags(&self) -> Vec<String>;

    fn settings(&self) -> Settings {
        Settings::default()
    }

    fn theme(&self) -> Theme {
        Theme::default()
    }

    /// The rules-engine bridge: called exactly once per window about to be
    /// adopted.
    fn changes_for(&self, _window: &WindowSnapshot) -> ClientChanges {
        ClientChanges::default()
    }
}
