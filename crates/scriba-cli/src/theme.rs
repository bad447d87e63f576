use ratatui::style::Color;
use scriba_core::Severity;

#[derive(Clone)]
pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub tab_active: Color,
    pub tab_inactive: Color,
    pub border: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            bg: Color::Rgb(30, 30, 30),
            fg: Color::Rgb(220, 220, 220),
            accent: Color::Rgb(122, 162, 247),
            muted: Color::Rgb(100, 100, 100),
            success: Color::Rgb(158, 206, 106),
            error: Color::Rgb(247, 118, 142),
            warning: Color::Rgb(224, 175, 104),
            tab_active: Color::Rgb(122, 162, 247),
            tab_inactive: Color::Rgb(100, 100, 100),
            border: Color::Rgb(60, 60, 60),
        }
    }

    pub fn tokyo_night() -> Self {
        Self {
            name: "tokyo-night",
            bg: Color::Rgb(26, 27, 38),
            fg: Color::Rgb(169, 177, 214),
            accent: Color::Rgb(122, 162, 247),
            muted: Color::Rgb(86, 95, 137),
            success: Color::Rgb(158, 206, 106),
            error: Color::Rgb(247, 118, 142),
            warning: Color::Rgb(224, 175, 104),
            tab_active: Color::Rgb(122, 162, 247),
            tab_inactive: Color::Rgb(86, 95, 137),
            border: Color::Rgb(52, 53, 74),
        }
    }

    pub fn dracula() -> Self {
        Self {
            name: "dracula",
            bg: Color::Rgb(40, 42, 54),
            fg: Color::Rgb(248, 248, 242),
            accent: Color::Rgb(255, 121, 198),
            muted: Color::Rgb(98, 114, 164),
            success: Color::Rgb(80, 250, 123),
            error: Color::Rgb(255, 85, 85),
            warning: Color::Rgb(241, 250, 140),
            tab_active: Color::Rgb(139, 233, 253),
            tab_inactive: Color::Rgb(98, 114, 164),
            border: Color::Rgb(68, 71, 90),
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "tokyo-night" => Self::tokyo_night(),
            "dracula" => Self::dracula(),
            _ => Self::dark(),
        }
    }

    pub fn all_names() -> &'static [&'static str] {
        &["dark", "tokyo-night", "dracula"]
    }

    /// Color the console flash and entry text by message severity.
    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Log => self.success,
            Severity::Warn => self.warning,
            Severity::Error => self.error,
            Severity::Neutral => self.muted,
        }
    }
}
