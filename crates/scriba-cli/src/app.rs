use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEvent,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Terminal,
};
use scriba_core::{
    events::{Event as LifecycleEvent, EventKind},
    layout::compute_panes,
    registry::Removal,
    Decoration, DragState, EditorSession, PageRegistry, PluginManager, ScribaError, Settings,
};
use std::io;
use std::path::Path;
use std::sync::mpsc;

use crate::commands::{self, CommandResult};
use crate::editor::TextAreaSession;
use crate::plugins::PageStatsPlugin;
use crate::theme::Theme;

/// Rows above the editor pane: title bar plus tab bar.
const TOPBAR_ROWS: u16 = 2;

#[derive(Clone, Copy, PartialEq, Eq)]
enum InputMode {
    /// Keys go to the active page's text area.
    Edit,
    /// Keys go to the command line.
    Command,
    /// Keys edit the pending rename value.
    Rename,
    /// A removal waits for yes/no.
    ConfirmRemove,
}

struct AppState {
    registry: PageRegistry<TextAreaSession>,
    plugins: PluginManager,
    plugin_events: mpsc::Receiver<LifecycleEvent>,

    mode: InputMode,
    command_input: String,
    command_cursor: usize,

    // Console view
    console_scroll: usize,
    console_total_lines: usize,
    console_visible: usize,
    last_console_len: usize,

    // Layout
    console_height: u16,
    drag: DragState,
    frame_height: u16,
    tabs_area: Rect,
    editor_area: Rect,
    console_area: Rect,

    theme: Theme,
    status_text: String,
    should_quit: bool,
    settings: Settings,
}

impl AppState {
    fn new(settings: Settings) -> Self {
        let editor_settings = settings.editor.clone();
        let mut registry: PageRegistry<TextAreaSession> = PageRegistry::new(Box::new(
            move |content: &str| TextAreaSession::new(content, &editor_settings),
        ));

        // Forward lifecycle events out of the bus so plugins are driven from
        // the main loop rather than from inside registry mutations.
        let (tx, rx) = mpsc::channel();
        for kind in [
            EventKind::NewFile,
            EventKind::PageWasDeleted,
            EventKind::ActivePageChanged,
        ] {
            let tx = tx.clone();
            registry.events_mut().subscribe(
                kind,
                Box::new(move |e| {
                    let _ = tx.send(e.clone());
                }),
            );
        }

        let mut plugins = PluginManager::new();
        plugins.register(Box::new(PageStatsPlugin::default()));
        plugins.init_all(&settings, registry.console_mut());

        if settings.console.greeting {
            registry.console_mut().message("Console loaded!");
        }

        Self {
            registry,
            plugins,
            plugin_events: rx,

            mode: InputMode::Edit,
            command_input: String::new(),
            command_cursor: 0,

            console_scroll: usize::MAX,
            console_total_lines: 0,
            console_visible: 0,
            last_console_len: 0,

            console_height: settings.console.height,
            drag: DragState::default(),
            frame_height: 0,
            tabs_area: Rect::default(),
            editor_area: Rect::default(),
            console_area: Rect::default(),

            theme: Theme::by_name(&settings.ui.theme),
            status_text: "Ready".into(),
            should_quit: false,
            settings,
        }
    }

    fn drain_plugin_events(&mut self) {
        while let Ok(ev) = self.plugin_events.try_recv() {
            self.plugins.dispatch(&ev, self.registry.console_mut());
        }
    }

    /// Rows not belonging to the editor/console split in the current mode.
    fn chrome_rows(&self) -> u16 {
        TOPBAR_ROWS + if self.mode == InputMode::Command { 3 } else { 1 }
    }

    fn console_scroll_up(&mut self) {
        let max = self.console_total_lines.saturating_sub(self.console_visible);
        let current = if self.console_scroll == usize::MAX {
            max
        } else {
            self.console_scroll.min(max)
        };
        self.console_scroll = current.saturating_sub(1);
    }

    fn console_scroll_down(&mut self) {
        if self.console_scroll == usize::MAX {
            return;
        }
        let max = self.console_total_lines.saturating_sub(self.console_visible);
        self.console_scroll += 1;
        if self.console_scroll >= max {
            self.console_scroll = usize::MAX;
        }
    }
}

// ── Event loop ──────────────────────────────────────────────────────────

pub fn run_tui(settings: Settings, files: &[std::path::PathBuf]) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = AppState::new(settings);

    // Pages named on the command line; a blank untitled page otherwise.
    for path in files {
        open_file(&mut state, path);
    }
    if state.registry.is_empty() {
        state.registry.add_default_page("")?;
    }
    state.drain_plugin_events();

    loop {
        state.registry.console_mut().tick();
        terminal.draw(|f| draw_ui(f, &mut state))?;

        if event::poll(std::time::Duration::from_millis(33))? {
            match event::read()? {
                TermEvent::Key(key) => handle_key(&mut state, key),
                TermEvent::Mouse(mouse) => handle_mouse(&mut state, mouse),
                // A resize is picked up by the next draw; pane heights are
                // re-clamped there.
                _ => {}
            }
        }
        state.drain_plugin_events();

        if state.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}

fn open_file(state: &mut AppState, path: &Path) {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            if let Err(e) = state.registry.add_page(&content, &name) {
                state
                    .registry
                    .console_mut()
                    .error(format!("Could not open {}: {e}", path.display()));
            }
        }
        Err(e) => state
            .registry
            .console_mut()
            .error(format!("Could not open {}: {e}", path.display())),
    }
}

// ── Key handling ────────────────────────────────────────────────────────

fn handle_key(state: &mut AppState, key: KeyEvent) {
    match state.mode {
        InputMode::Edit => handle_edit_key(state, key),
        InputMode::Command => handle_command_key(state, key),
        InputMode::Rename => handle_rename_key(state, key),
        InputMode::ConfirmRemove => handle_confirm_key(state, key),
    }
}

fn handle_edit_key(state: &mut AppState, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('q'))
        | (KeyModifiers::CONTROL, KeyCode::Char('c')) => state.should_quit = true,

        (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
            if let Err(e) = state.registry.add_default_page("") {
                state.registry.console_mut().error(e.to_string());
            }
        }

        (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
            if let Some(name) = state.registry.active_name().map(String::from) {
                match state.registry.remove_page(&name, false) {
                    Ok(Removal::AwaitingConfirmation) => state.mode = InputMode::ConfirmRemove,
                    Ok(Removal::Removed) => {}
                    Err(e) => state.registry.console_mut().error(e.to_string()),
                }
            }
        }

        (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
            if let Some(name) = state.registry.active_name().map(String::from) {
                if state.registry.begin_rename(&name).is_ok() {
                    state.mode = InputMode::Rename;
                }
            }
        }

        (KeyModifiers::CONTROL, KeyCode::Char('g')) => toggle_mark(state),

        (KeyModifiers::ALT, KeyCode::Left) => state.registry.activate_prev(),
        (KeyModifiers::ALT, KeyCode::Right) => state.registry.activate_next(),
        (KeyModifiers::ALT, KeyCode::Char(c)) if ('1'..='9').contains(&c) => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(name) = state.registry.page_names().get(idx).map(|s| s.to_string()) {
                let _ = state.registry.set_active(&name);
            }
        }

        (KeyModifiers::ALT, KeyCode::Up) => state.console_scroll_up(),
        (KeyModifiers::ALT, KeyCode::Down) => state.console_scroll_down(),

        (_, KeyCode::Esc) => {
            state.mode = InputMode::Command;
        }

        _ => {
            if let Some(page) = state.registry.active_page_mut() {
                page.session_mut().input(key);
            }
        }
    }
}

fn toggle_mark(state: &mut AppState) {
    let Some(name) = state.registry.active_name().map(String::from) else {
        return;
    };
    let row = state
        .registry
        .active_page()
        .map(|p| p.session().cursor().0)
        .unwrap_or(0);
    match state.registry.toggle_decoration(&name, row, Decoration::Info) {
        Ok(true) => state.status_text = format!("Marked line {}", row + 1),
        Ok(false) => state.status_text = format!("Unmarked line {}", row + 1),
        Err(e) => state.registry.console_mut().error(e.to_string()),
    }
}

fn handle_command_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.mode = InputMode::Edit;
            state.command_input.clear();
            state.command_cursor = 0;
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut state.command_input);
            state.command_cursor = 0;
            state.mode = InputMode::Edit;
            let result = commands::handle_command(&input);
            apply_command(state, result);
        }
        KeyCode::Char(c) => {
            state.command_input.insert(state.command_cursor, c);
            state.command_cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            if let Some(prev) = state.command_input[..state.command_cursor].chars().last() {
                state.command_cursor -= prev.len_utf8();
                state.command_input.remove(state.command_cursor);
            }
        }
        KeyCode::Left => {
            if let Some(prev) = state.command_input[..state.command_cursor].chars().last() {
                state.command_cursor -= prev.len_utf8();
            }
        }
        KeyCode::Right => {
            if let Some(next) = state.command_input[state.command_cursor..].chars().next() {
                state.command_cursor += next.len_utf8();
            }
        }
        KeyCode::Home => state.command_cursor = 0,
        KeyCode::End => state.command_cursor = state.command_input.len(),
        _ => {}
    }
}

fn handle_rename_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.registry.cancel_rename();
            state.mode = InputMode::Edit;
        }
        KeyCode::Enter => {
            state.mode = InputMode::Edit;
            match state.registry.commit_rename() {
                Ok(Some(new_name)) => state.status_text = format!("Renamed to {new_name}"),
                Ok(None) => {}
                // Validation failures were already posted to the console.
                Err(_) => state.status_text = "Rename failed".into(),
            }
        }
        KeyCode::Char(c) => {
            if let Some(value) = state.registry.rename_input_mut() {
                value.push(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(value) = state.registry.rename_input_mut() {
                value.pop();
            }
        }
        _ => {}
    }
}

fn handle_confirm_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            state.mode = InputMode::Edit;
            match state.registry.confirm_pending_removal() {
                Ok(name) => state.status_text = format!("Removed {name}"),
                Err(e) => state.registry.console_mut().error(e.to_string()),
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.registry.cancel_pending_removal();
            state.mode = InputMode::Edit;
        }
        _ => {}
    }
}

fn apply_command(state: &mut AppState, result: CommandResult) {
    match result {
        CommandResult::Message(m) => state.registry.console_mut().message(m),
        CommandResult::Quit => state.should_quit = true,

        CommandResult::NewPage(None) => {
            if let Err(e) = state.registry.add_default_page("") {
                state.registry.console_mut().error(e.to_string());
            }
        }
        CommandResult::NewPage(Some(name)) => {
            if let Err(e) = state.registry.add_page("", &name) {
                state.registry.console_mut().error(e.to_string());
            }
        }
        CommandResult::OpenFile(path) => {
            let path = std::path::PathBuf::from(path);
            open_file(state, &path);
        }
        CommandResult::RenameActive(new_name) => {
            let Some(name) = state.registry.active_name().map(String::from) else {
                return;
            };
            match state.registry.rename_page(&name, &new_name) {
                Ok(Some(_)) => state.status_text = "Renamed".into(),
                Ok(None) => {}
                Err(ScribaError::PageNotFound(_)) => {
                    state.registry.console_mut().error(format!("No page named {name} is open."))
                }
                // The registry posted the validation error already.
                Err(_) => state.status_text = "Rename failed".into(),
            }
        }
        CommandResult::ClosePage(name) => {
            let target = name.or_else(|| state.registry.active_name().map(String::from));
            let Some(target) = target else { return };
            match state.registry.remove_page(&target, false) {
                Ok(Removal::AwaitingConfirmation) => state.mode = InputMode::ConfirmRemove,
                Ok(Removal::Removed) => {}
                Err(e) => state.registry.console_mut().error(e.to_string()),
            }
        }
        CommandResult::Goto(line) => {
            if let Some(page) = state.registry.active_page_mut() {
                page.session_mut().set_cursor(line - 1, 0);
                state.status_text = format!("Line {line}");
            }
        }
        CommandResult::ThemeChanged(name) => {
            state.theme = Theme::by_name(&name);
            let applied = state.theme.name;
            state.registry.console_mut().message(format!("Theme set to {applied}."));
        }
        CommandResult::ListPages => {
            let names = state.registry.page_names().join(", ");
            state.registry.console_mut().message(format!("Open pages: {names}"));
        }
        CommandResult::NotACommand => state
            .registry
            .console_mut()
            .message("Commands start with /. Type /help for a list."),
    }
}

// ── Mouse handling ──────────────────────────────────────────────────────

fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row == state.console_area.y {
                // Grabbing the console's top border starts a divider drag.
                state.drag.begin(mouse.row);
            } else if mouse.row == state.tabs_area.y {
                if let Some(name) = tab_at_column(state, mouse.column) {
                    let _ = state.registry.set_active(&name);
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if state.drag.is_dragging() {
                let chrome = state.chrome_rows();
                if let Some(sizes) =
                    state
                        .drag
                        .drag_to(mouse.row, state.frame_height, chrome, TOPBAR_ROWS)
                {
                    state.console_height = sizes.console;
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => state.drag.end(),

        MouseEventKind::ScrollUp if state.console_area.contains(position_of(&mouse)) => {
            state.console_scroll_up();
        }
        MouseEventKind::ScrollDown if state.console_area.contains(position_of(&mouse)) => {
            state.console_scroll_down();
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            if state.editor_area.contains(position_of(&mouse)) {
                if let Some(page) = state.registry.active_page_mut() {
                    page.session_mut().input(mouse);
                }
            }
        }
        _ => {}
    }
}

fn position_of(mouse: &MouseEvent) -> ratatui::layout::Position {
    ratatui::layout::Position::new(mouse.column, mouse.row)
}

/// Which tab sits under column `x` of the tab bar. Mirrors the `Tabs` widget
/// layout: one space of padding either side of each title, one divider cell
/// between tabs.
fn tab_at_column(state: &AppState, x: u16) -> Option<String> {
    let mut col = state.tabs_area.x;
    for page in state.registry.pages() {
        let width = page.name().chars().count() as u16 + 2;
        if x >= col && x < col + width {
            return Some(page.name().to_string());
        }
        col += width + 1;
    }
    None
}

// ── Drawing ─────────────────────────────────────────────────────────────

fn draw_ui(f: &mut ratatui::Frame, state: &mut AppState) {
    let theme = state.theme.clone();
    let area = f.area();
    state.frame_height = area.height;

    // The console view follows new entries.
    if state.registry.console().len() != state.last_console_len {
        state.last_console_len = state.registry.console().len();
        state.console_scroll = usize::MAX;
    }

    let bottom_height: u16 = if state.mode == InputMode::Command { 3 } else { 1 };
    let sizes = compute_panes(area.height, TOPBAR_ROWS + bottom_height, state.console_height);
    state.console_height = sizes.console;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // title bar
            Constraint::Length(1),             // tab bar
            Constraint::Length(sizes.editor),  // editor pane
            Constraint::Length(sizes.console), // console
            Constraint::Length(bottom_height), // status or command line
        ])
        .split(area);

    state.tabs_area = chunks[1];
    state.editor_area = chunks[2];
    state.console_area = chunks[3];

    draw_topbar(f, chunks[0], state, &theme);
    draw_tabs(f, chunks[1], state, &theme);
    draw_editor(f, chunks[2], state, &theme);
    draw_console(f, chunks[3], state, &theme);

    if state.mode == InputMode::Command {
        draw_command_input(f, chunks[4], state, &theme);
    } else {
        draw_status_bar(f, chunks[4], state, &theme);
    }

    match state.mode {
        InputMode::ConfirmRemove => draw_confirm_modal(f, state, &theme),
        InputMode::Rename => draw_rename_popup(f, state, &theme),
        _ => {}
    }
}

fn draw_topbar(f: &mut ratatui::Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans = vec![Span::styled(
        format!(" {} ", state.settings.ui.page_title),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    for section in state.plugins.menu() {
        spans.push(Span::styled("│ ", Style::default().fg(theme.muted)));
        spans.push(Span::styled(
            format!("{} ", section.title),
            Style::default().fg(theme.muted),
        ));
    }
    spans.push(Span::styled(
        "│ /help for commands",
        Style::default().fg(theme.muted).add_modifier(Modifier::DIM),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_tabs(f: &mut ratatui::Frame, area: Rect, state: &AppState, theme: &Theme) {
    let titles: Vec<Line> = state
        .registry
        .pages()
        .map(|p| Line::from(p.name().to_string()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.registry.active_index().unwrap_or(0))
        .style(Style::default().fg(theme.tab_inactive))
        .highlight_style(
            Style::default()
                .fg(theme.tab_active)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");
    f.render_widget(tabs, area);
}

fn draw_editor(f: &mut ratatui::Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let Some(title) = state
        .registry
        .active_page()
        .map(|p| format!(" {} [{}] ", p.name(), p.session().mode()))
    else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme.border));

    if let Some(page) = state.registry.active_page_mut() {
        page.session_mut().textarea_mut().set_block(block);
        f.render_widget(page.session().textarea(), area);
    }
}

fn draw_console(f: &mut ratatui::Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let mut lines: Vec<Line> = Vec::new();
    for entry in state.registry.console().entries() {
        let color = theme.severity_color(entry.severity);
        let prefix = format!("{}> ", entry.timestamp);
        for (i, raw_line) in entry.text.lines().enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(
                        prefix.clone(),
                        Style::default().fg(theme.muted).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(raw_line.to_string(), Style::default().fg(color)),
                ]));
            } else {
                lines.push(Line::from(vec![
                    Span::raw(" ".repeat(prefix.len())),
                    Span::styled(raw_line.to_string(), Style::default().fg(color)),
                ]));
            }
        }
    }

    let total_lines = lines.len();
    state.console_total_lines = total_lines;
    let visible_height = area.height.saturating_sub(2) as usize;
    state.console_visible = visible_height;

    let max_scroll = total_lines.saturating_sub(visible_height);
    if state.console_scroll == usize::MAX || state.console_scroll > max_scroll {
        state.console_scroll = max_scroll;
    }
    let scroll = state.console_scroll;
    if scroll == max_scroll {
        // Stay stuck to the newest entry on the next append.
        state.console_scroll = usize::MAX;
    }

    // The border flashes with the severity of the newest entry.
    let border_color = state
        .registry
        .console()
        .highlight()
        .map(|h| theme.severity_color(h.severity))
        .unwrap_or(theme.border);

    let console = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Console ")
                .border_style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    f.render_widget(console, area);
}

fn draw_command_input(f: &mut ratatui::Frame, area: Rect, state: &AppState, theme: &Theme) {
    let border = if state.command_input.starts_with('/') {
        theme.accent
    } else {
        theme.border
    };
    let input = Paragraph::new(state.command_input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Command  Esc to close ")
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(input, area);

    let cursor_x = area.x + state.command_cursor as u16 + 1;
    let max_x = area.x + area.width.saturating_sub(2);
    f.set_cursor_position((cursor_x.min(max_x), area.y + 1));
}

fn draw_status_bar(f: &mut ratatui::Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (cursor_str, marks) = state
        .registry
        .active_page()
        .map(|p| {
            let (row, col) = p.session().cursor();
            (format!("Ln {}, Col {} ", row + 1, col + 1), p.decorations().len())
        })
        .unwrap_or_else(|| (String::new(), 0));

    let marks_str = if marks > 0 {
        format!("| {marks} marked ")
    } else {
        String::new()
    };

    let status_spans = vec![
        Span::styled(
            format!(" {} ", state.registry.active_name().unwrap_or("-")),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| {} page(s) ", state.registry.len()),
            Style::default().fg(theme.accent),
        ),
        Span::styled(format!("| {cursor_str}"), Style::default().fg(theme.muted)),
        Span::styled(marks_str, Style::default().fg(theme.warning)),
        Span::styled("| ", Style::default().fg(theme.muted)),
        Span::styled(&state.status_text, Style::default().fg(theme.muted)),
        Span::styled(
            format!("  {} ", theme.name),
            Style::default().fg(theme.muted).add_modifier(Modifier::DIM),
        ),
    ];
    f.render_widget(Paragraph::new(Line::from(status_spans)), area);
}

fn draw_confirm_modal(f: &mut ratatui::Frame, state: &AppState, theme: &Theme) {
    let Some(name) = state.registry.pending_removal() else {
        return;
    };

    let area = centered_rect(f.area(), 56, 4);
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            format!(" Remove \"{name}\" from this project?"),
            Style::default().fg(theme.fg),
        )),
        Line::from(Span::styled(
            " [y] Remove  [n] Keep",
            Style::default().fg(theme.accent),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Remove file ")
        .border_style(Style::default().fg(theme.warning));
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_rename_popup(f: &mut ratatui::Frame, state: &AppState, theme: &Theme) {
    let Some(pending) = state.registry.pending_rename() else {
        return;
    };

    let area = centered_rect(f.area(), 48, 3);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Rename {} ", pending.page()))
        .border_style(Style::default().fg(theme.accent));
    f.render_widget(Paragraph::new(pending.value.as_str()).block(block), area);

    let cursor_x = area.x + 1 + pending.value.chars().count() as u16;
    let max_x = area.x + area.width.saturating_sub(2);
    f.set_cursor_position((cursor_x.min(max_x), area.y + 1));
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
