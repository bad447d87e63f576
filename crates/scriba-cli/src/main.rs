use anyhow::Result;
use clap::Parser;

mod app;
mod commands;
mod editor;
mod plugins;
mod theme;

#[derive(Parser)]
#[command(name = "scriba")]
#[command(about = "Scriba - terminal multi-tab text editor")]
#[command(version)]
struct Cli {
    /// Files to open, one page per file
    files: Vec<std::path::PathBuf>,

    /// Color theme (dark, tokyo-night, dracula)
    #[arg(long)]
    theme: Option<String>,

    /// Syntax mode tag for new pages (e.g. xml, text)
    #[arg(long)]
    mode: Option<String>,

    /// Title shown in the top bar
    #[arg(long)]
    title: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut settings = scriba_core::Settings::load();

    if let Some(theme) = cli.theme {
        settings.ui.theme = theme;
    }
    if let Some(mode) = cli.mode {
        settings.editor.mode = mode;
    }
    if let Some(title) = cli.title {
        settings.ui.page_title = title;
    }

    app::run_tui(settings, &cli.files)
}
