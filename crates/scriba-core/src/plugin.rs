//! Host side of the plugin contract: runs each plugin's `init`, skips the
//! ones that decline, records their navbar sections, and forwards lifecycle
//! events to the survivors.

use scriba_plugin_api::{MenuSection, Plugin, PluginEvent, PluginHost};

use crate::config::Settings;
use crate::console::Console;
use crate::events::Event;

struct HostContext<'a> {
    menu: &'a mut Vec<MenuSection>,
    console: &'a mut Console,
}

impl PluginHost for HostContext<'_> {
    fn add_to_navbar(&mut self, title: &str, id: &str) {
        self.menu.push(MenuSection {
            title: title.to_string(),
            id: id.to_string(),
        });
    }

    fn log(&mut self, text: &str) {
        self.console.log(text);
    }
}

struct Entry {
    plugin: Box<dyn Plugin>,
    enabled: bool,
}

#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Entry>,
    menu: Vec<MenuSection>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(Entry {
            plugin,
            enabled: false,
        });
    }

    /// Call `init` on every registered plugin. A plugin returning `false` is
    /// marked disabled and skipped from then on.
    pub fn init_all(&mut self, settings: &Settings, console: &mut Console) {
        let settings_json = serde_json::to_value(settings).unwrap_or_default();
        for entry in &mut self.plugins {
            let mut host = HostContext {
                menu: &mut self.menu,
                console: &mut *console,
            };
            entry.enabled = entry.plugin.init(&mut host, &settings_json);
            if !entry.enabled {
                tracing::debug!(plugin = entry.plugin.name(), "plugin declined init; disabled");
            }
        }
    }

    /// Forward a lifecycle event to every enabled plugin.
    pub fn dispatch(&mut self, event: &Event, console: &mut Console) {
        let plugin_event = to_plugin_event(event);
        for entry in &mut self.plugins {
            if !entry.enabled {
                continue;
            }
            let mut host = HostContext {
                menu: &mut self.menu,
                console: &mut *console,
            };
            entry.plugin.on_event(&mut host, &plugin_event);
        }
    }

    /// Navbar sections registered so far, in registration order.
    pub fn menu(&self) -> &[MenuSection] {
        &self.menu
    }

    pub fn enabled_count(&self) -> usize {
        self.plugins.iter().filter(|e| e.enabled).count()
    }
}

fn to_plugin_event(event: &Event) -> PluginEvent {
    match event {
        Event::NewFile { name, content } => PluginEvent::NewFile {
            name: name.clone(),
            content: content.clone(),
        },
        Event::PageWasDeleted { name } => PluginEvent::PageWasDeleted { name: name.clone() },
        Event::ActivePageChanged { name } => PluginEvent::ActivePageChanged { name: name.clone() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    struct Recorder {
        accept: bool,
        events_seen: std::rc::Rc<std::cell::RefCell<usize>>,
    }

    impl Plugin for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn init(&mut self, host: &mut dyn PluginHost, _settings: &Value) -> bool {
            if self.accept {
                host.add_to_navbar("Recorder", "recorder");
            }
            self.accept
        }

        fn on_event(&mut self, _host: &mut dyn PluginHost, _event: &PluginEvent) {
            *self.events_seen.borrow_mut() += 1;
        }
    }

    #[test]
    fn test_declined_plugin_is_disabled_and_skipped() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(0));
        let mut manager = PluginManager::new();
        manager.register(Box::new(Recorder {
            accept: false,
            events_seen: seen.clone(),
        }));

        let mut console = Console::new();
        manager.init_all(&Settings::default(), &mut console);

        assert_eq!(manager.enabled_count(), 0);
        assert!(manager.menu().is_empty());

        manager.dispatch(
            &Event::PageWasDeleted { name: "x".into() },
            &mut console,
        );
        assert_eq!(*seen.borrow(), 0);
    }

    #[test]
    fn test_enabled_plugin_gets_navbar_and_events() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(0));
        let mut manager = PluginManager::new();
        manager.register(Box::new(Recorder {
            accept: true,
            events_seen: seen.clone(),
        }));

        let mut console = Console::new();
        manager.init_all(&Settings::default(), &mut console);

        assert_eq!(manager.enabled_count(), 1);
        assert_eq!(manager.menu().len(), 1);
        assert_eq!(manager.menu()[0].title, "Recorder");

        manager.dispatch(
            &Event::NewFile {
                name: "a".into(),
                content: String::new(),
            },
            &mut console,
        );
        assert_eq!(*seen.borrow(), 1);
    }
}
