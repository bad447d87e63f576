//! Contract between the Scriba editor and its plugins.
//!
//! A plugin is handed a [`PluginHost`] and the editor settings (as JSON)
//! during initialization. Returning `false` from [`Plugin::init`] marks the
//! plugin disabled; its setup is skipped and it receives no further calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A lifecycle notification forwarded to plugins after each registry change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PluginEvent {
    NewFile { name: String, content: String },
    PageWasDeleted { name: String },
    ActivePageChanged { name: String },
}

/// A top-bar menu section registered by a plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuSection {
    /// User-visible menu title.
    pub title: String,
    /// Stable identifier the plugin uses to address its own section.
    pub id: String,
}

/// Editor facilities a plugin may use during `init` and event delivery.
pub trait PluginHost {
    /// Register a menu section for this plugin in the top bar.
    fn add_to_navbar(&mut self, title: &str, id: &str);

    /// Append a message to the editor console.
    fn log(&mut self, text: &str);
}

pub trait Plugin {
    fn name(&self) -> &str;

    /// Set up the plugin. Returning `false` disables it.
    fn init(&mut self, host: &mut dyn PluginHost, settings: &Value) -> bool;

    /// Called for every lifecycle event while the plugin is enabled.
    fn on_event(&mut self, host: &mut dyn PluginHost, event: &PluginEvent) {
        let _ = (host, event);
    }
}
