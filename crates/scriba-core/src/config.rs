use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub ui: UiSettings,
    pub editor: EditorSettings,
    pub console: ConsoleSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Color theme name.
    pub theme: String,
    /// Title shown in the top bar.
    pub page_title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Syntax mode applied to new sessions.
    pub mode: String,
    pub tab_width: u8,
    pub show_line_numbers: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Initial console pane height in rows.
    pub height: u16,
    /// Post the startup greeting to the console.
    pub greeting: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ui: UiSettings {
                theme: "dark".to_string(),
                page_title: "Scriba".to_string(),
            },
            editor: EditorSettings {
                mode: "xml".to_string(),
                tab_width: 4,
                show_line_numbers: true,
            },
            console: ConsoleSettings {
                height: 8,
                greeting: true,
            },
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scriba")
            .join("config.toml")
    }

    pub fn load() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
                tracing::warn!("unreadable config at {}; using defaults", config_path.display());
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<(), crate::error::ScribaError> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::ScribaError::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
