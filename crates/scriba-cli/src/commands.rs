/// Result of processing a slash command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Display a message in the console.
    Message(String),
    /// Quit the application.
    Quit,
    /// Open a new blank page, optionally with a chosen name.
    NewPage(Option<String>),
    /// Read a file from disk into a new page.
    OpenFile(String),
    /// Rename the active page.
    RenameActive(String),
    /// Close a page (the active one when no name is given); asks first.
    ClosePage(Option<String>),
    /// Jump the active page's cursor to a 1-based line.
    Goto(usize),
    /// Change the color theme.
    ThemeChanged(String),
    /// List the open pages in the console.
    ListPages,
    /// Not a command - plain text typed into the command line.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,

        // Page commands
        "/new" => {
            if arg.is_empty() {
                CommandResult::NewPage(None)
            } else {
                CommandResult::NewPage(Some(arg.to_string()))
            }
        }
        "/open" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /open <path>".into())
            } else {
                CommandResult::OpenFile(arg.to_string())
            }
        }
        "/rename" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /rename <new-name>".into())
            } else {
                CommandResult::RenameActive(arg.to_string())
            }
        }
        "/close" => {
            if arg.is_empty() {
                CommandResult::ClosePage(None)
            } else {
                CommandResult::ClosePage(Some(arg.to_string()))
            }
        }
        "/goto" => match arg.parse::<usize>() {
            Ok(line) if line > 0 => CommandResult::Goto(line),
            _ => CommandResult::Message("Usage: /goto <line-number>".into()),
        },
        "/pages" => CommandResult::ListPages,

        // Display commands
        "/theme" => {
            if arg.is_empty() {
                let themes = crate::theme::Theme::all_names().join(", ");
                CommandResult::Message(format!(
                    "Available themes: {themes}\nUsage: /theme <theme-name>"
                ))
            } else {
                CommandResult::ThemeChanged(arg.to_string())
            }
        }

        "/version" => CommandResult::Message(format!("Scriba v{}", env!("CARGO_PKG_VERSION"))),

        // Unknown command
        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

fn show_help() -> CommandResult {
    let help_text = "\
╭─ Scriba Commands ──────────────────────────────────────────────╮

  PAGES
    /new [name]               Open a blank page (untitled when unnamed)
    /open <path>              Read a file into a new page
    /rename <new-name>        Rename the active page
    /close [name]             Close a page (asks for confirmation)
    /goto <line>              Jump to a line in the active page
    /pages                    List open pages

  DISPLAY
    /theme <name>             Change color theme (dark, tokyo-night, dracula)

  OTHER
    /help, /h                 Show this help message
    /version                  Show version information
    /exit, /quit, /q          Quit the editor

  KEYS
    Esc                       Toggle the command line
    Ctrl-N / Ctrl-W           New page / close page
    Ctrl-R                    Rename the active page
    Ctrl-G                    Toggle a mark on the current line
    Alt-Left / Alt-Right      Previous / next tab   (Alt-1..9 jumps)
    Drag the console border   Resize the console

╰────────────────────────────────────────────────────────────────╯";

    CommandResult::Message(help_text.into())
}
