use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::errors::Result;
use crate::models::{MonitorId, Rect, TagId};
use crate::state::{Phase, State};

/// Owns the world state, the embedder's configuration and the display
/// server the core gets its helper windows from.
pub struct Manager<C, SERVER> {
    pub state: State,
    pub config: C,
    pub display_server: SERVER,
}

impl<C, SERVER> Manager<C, SERVER>
where
    C: Config,
    SERVER: DisplayServer,
{
    pub fn new(config: C) -> Self {
        let mut display_server = SERVER::new(&config);
        let state = State::new(&config, &mut display_server);
        Self { state, config, display_server }
    }

    /// The adoption sweep over pre-existing windows is over; UnmapNotify
    /// suppression for reparenting stops being pre-armed.
    pub fn end_initial_sweep(&mut self) {
        self.state.phase = Phase::Running;
    }

    /// Create a tag with a fresh frame background window.
    pub fn add_tag(&mut self, name: &str) -> Result<TagId> {
        let window = self.display_server.create_service_window();
        match self.state.add_tag(name, window) {
            Ok(id) => Ok(id),
            Err(err) => {
                self.state.actions.push_back(DisplayAction::DestroyWindow(window));
                Err(err)
            }
        }
    }

    /// Register a monitor. It shows the first tag no other monitor shows,
    /// creating one when every tag is taken.
    pub fn monitor_created_handler(&mut self, rect: Rect, name: &str) -> MonitorId {
        let free = self
            .state
            .tags
            .iter()
            .map(|t| t.id)
            .find(|id| self.state.monitor_showing_tag(*id).is_none());
        let tag = match free {
            Some(id) => id,
            None => {
                let mut counter = self.state.tags.len() + 1;
                let label = loop {
                    let candidate = counter.to_string();
                    if self.state.tags.find_by_name(&candidate).is_none() {
                        break candidate;
                    }
                    counter += 1;
                };
                match self.add_tag(&label) {
                    Ok(id) => id,
                    // the name was free; keep going on the first tag
                    Err(_) => self.state.tags.iter().next().map_or(1, |t| t.id),
                }
            }
        };
        let anchor = self.display_server.create_service_window();
        let id = self.state.add_monitor(name, rect, tag, anchor);
        self.state.reconcile();
        id
    }

    /// Shut the manager down, releasing every client window back to the
    /// root so applications survive.
    pub fn shutdown(&mut self) {
        self.state.shutdown();
        self.state.reconcile();
    }
}

#[cfg(test)]
impl Manager<crate::config::tests::TestConfig, crate::display_servers::MockDisplayServer> {
    pub fn new_test(tags: Vec<String>) -> Self {
        use crate::config::tests::TestConfig;
        Self::new(TestConfig { tags, ..TestConfig::default() })
    }
}
