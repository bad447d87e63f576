//! Pane-height arithmetic for the editor/console split. The UI calls in on
//! every resize, tab switch, divider drag, and initial draw; nothing here is
//! persisted.

/// Minimum rows the console keeps, whatever the divider does.
pub const MIN_CONSOLE_HEIGHT: u16 = 3;

/// Minimum rows the editor pane keeps.
pub const MIN_EDITOR_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneSizes {
    pub editor: u16,
    pub console: u16,
}

/// Split the rows left after fixed chrome (tab bar, status bar) between the
/// editor pane and the console. `console` is the requested console height;
/// the editor takes the remainder. Both panes are clamped to their minimums,
/// with the console never taking less than the leftover below the editor.
pub fn compute_panes(total: u16, chrome: u16, console: u16) -> PaneSizes {
    let workable = total.saturating_sub(chrome);
    if workable <= MIN_CONSOLE_HEIGHT + MIN_EDITOR_HEIGHT {
        // Degenerate terminal; give the editor what little exists.
        let console = workable.min(MIN_CONSOLE_HEIGHT);
        return PaneSizes {
            editor: workable - console,
            console,
        };
    }

    let console = console
        .max(MIN_CONSOLE_HEIGHT)
        .min(workable - MIN_EDITOR_HEIGHT);
    PaneSizes {
        editor: workable - console,
        console,
    }
}

/// Transient state of a divider drag. Holds only the anchor row so that
/// pointer moves on an unchanged row are ignored.
#[derive(Debug, Default)]
pub struct DragState {
    anchor: Option<u16>,
}

impl DragState {
    pub fn begin(&mut self, row: u16) {
        self.anchor = Some(row);
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Recompute pane sizes for a pointer at `row`. Returns `None` when no
    /// drag is active or the pointer has not left its previous row.
    /// `topbar` is the number of rows above the editor pane.
    pub fn drag_to(&mut self, row: u16, total: u16, chrome: u16, topbar: u16) -> Option<PaneSizes> {
        let anchor = self.anchor?;
        if anchor == row {
            return None;
        }
        self.anchor = Some(row);

        let editor = row.saturating_sub(topbar);
        // The console takes whatever the editor leaves; compute_panes clamps
        // it to no less than the leftover height.
        let workable = total.saturating_sub(chrome);
        let console = workable.saturating_sub(editor);
        Some(compute_panes(total, chrome, console))
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }
}
