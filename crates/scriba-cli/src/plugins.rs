//! Built-in plugins. These go through the same contract external plugins
//! use: `init` with the host and settings, lifecycle events afterwards.

use scriba_plugin_api::{Plugin, PluginEvent, PluginHost};
use serde_json::Value;

/// Tracks how many pages the project has and reports changes to the console.
#[derive(Default)]
pub struct PageStatsPlugin {
    open_pages: usize,
}

impl Plugin for PageStatsPlugin {
    fn name(&self) -> &str {
        "page-stats"
    }

    fn init(&mut self, host: &mut dyn PluginHost, _settings: &Value) -> bool {
        host.add_to_navbar("Statistics", "page-stats");
        true
    }

    fn on_event(&mut self, host: &mut dyn PluginHost, event: &PluginEvent) {
        match event {
            PluginEvent::NewFile { .. } => {
                self.open_pages += 1;
                host.log(&format!("Project now has {} page(s).", self.open_pages));
            }
            PluginEvent::PageWasDeleted { .. } => {
                self.open_pages = self.open_pages.saturating_sub(1);
                host.log(&format!("Project now has {} page(s).", self.open_pages));
            }
            PluginEvent::ActivePageChanged { .. } => {}
        }
    }
}
