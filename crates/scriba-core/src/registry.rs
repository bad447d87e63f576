//! The page registry: the authoritative ordered mapping from page name to
//! editor session. Tab order, the active page, pending rename/removal state,
//! and per-page gutter decorations all live here; UI identifiers are derived
//! from the registry, never the other way around.

use std::collections::BTreeMap;

use crate::console::Console;
use crate::error::{Result, ScribaError};
use crate::events::{Event, EventBus};
use crate::session::{EditorSession, SessionFactory};

/// A gutter decoration attached to one line of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    Error,
    Warning,
    Info,
}

/// Strip a page name down to its identifier-safe form: ASCII alphanumerics
/// and underscores only.
pub fn slugify(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// One open page: a unique display name, the session holding its text, and
/// its gutter decorations. The slug mirrors the name for identifier use.
pub struct Page<S> {
    name: String,
    slug: String,
    session: S,
    decorations: BTreeMap<usize, Decoration>,
}

impl<S> Page<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn decorations(&self) -> &BTreeMap<usize, Decoration> {
        &self.decorations
    }
}

/// Transient state of an in-progress rename: the page it targets and the
/// editable value, alive until committed or cancelled.
#[derive(Debug, Clone)]
pub struct PendingRename {
    page: String,
    pub value: String,
}

impl PendingRename {
    pub fn page(&self) -> &str {
        &self.page
    }
}

/// Outcome of [`PageRegistry::remove_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Removal {
    Removed,
    AwaitingConfirmation,
}

pub struct PageRegistry<S: EditorSession> {
    pages: Vec<Page<S>>,
    /// Index of the active page; `usize::MAX` while the registry is empty.
    active: usize,
    pending_removal: Option<String>,
    pending_rename: Option<PendingRename>,
    factory: SessionFactory<S>,
    events: EventBus,
    console: Console,
}

impl<S: EditorSession> PageRegistry<S> {
    pub fn new(factory: SessionFactory<S>) -> Self {
        Self {
            pages: Vec::new(),
            active: usize::MAX,
            pending_removal: None,
            pending_rename: None,
            factory,
            events: EventBus::new(),
            console: Console::new(),
        }
    }

    // ── Lookup ──────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Page<S>> {
        self.pages.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Page<S>> {
        self.pages.iter_mut().find(|p| p.name == name)
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page<S>> {
        self.pages.iter()
    }

    pub fn page_names(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.name.as_str()).collect()
    }

    /// Raw texts of every open page, in tab order.
    pub fn all_texts(&self) -> Vec<(String, Vec<String>)> {
        self.pages
            .iter()
            .map(|p| (p.name.clone(), p.session.lines()))
            .collect()
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    // ── Active page ─────────────────────────────────────────────────────

    pub fn active_index(&self) -> Option<usize> {
        (self.active < self.pages.len()).then_some(self.active)
    }

    pub fn active_name(&self) -> Option<&str> {
        self.pages.get(self.active).map(|p| p.name.as_str())
    }

    pub fn active_page(&self) -> Option<&Page<S>> {
        self.pages.get(self.active)
    }

    pub fn active_page_mut(&mut self) -> Option<&mut Page<S>> {
        self.pages.get_mut(self.active)
    }

    pub fn set_active(&mut self, name: &str) -> Result<()> {
        let idx = self
            .position(name)
            .ok_or_else(|| ScribaError::PageNotFound(name.to_string()))?;
        self.activate_index(idx);
        Ok(())
    }

    pub fn activate_next(&mut self) {
        if let Some(idx) = self.active_index() {
            self.activate_index((idx + 1) % self.pages.len());
        }
    }

    pub fn activate_prev(&mut self) {
        if let Some(idx) = self.active_index() {
            self.activate_index((idx + self.pages.len() - 1) % self.pages.len());
        }
    }

    /// Make the page at `idx` active. Switching away cancels an open rename
    /// editor and announces the change.
    fn activate_index(&mut self, idx: usize) {
        let prev = self.pages.get(self.active).map(|p| p.name.clone());
        self.active = idx;
        let name = self.pages[idx].name.clone();
        if prev.as_deref() != Some(name.as_str()) {
            self.pending_rename = None;
            self.events.publish(&Event::ActivePageChanged { name });
        }
    }

    // ── Adding pages ────────────────────────────────────────────────────

    /// Open a new page and make it active. Page names are unique; a
    /// colliding name is rejected with the registry unchanged. If the only
    /// existing page is an untouched untitled page, it is dropped once the
    /// real page lands.
    pub fn add_page(&mut self, content: &str, name: &str) -> Result<()> {
        if self.contains(name) {
            return Err(ScribaError::NameTaken(name.to_string()));
        }

        let swallow_untitled = self.pages.len() == 1
            && self.pages[0].name == "untitled"
            && self.pages[0].session.is_empty();

        self.pages.push(Page {
            name: name.to_string(),
            slug: slugify(name),
            session: (self.factory)(content),
            decorations: BTreeMap::new(),
        });
        self.activate_index(self.pages.len() - 1);

        if swallow_untitled {
            self.remove_now("untitled")?;
        }

        self.console.log(format!("Added {name} to project."));
        self.events.publish(&Event::NewFile {
            name: name.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }

    /// Open a page under the next unused name in the sequence `untitled`,
    /// `untitled2`, `untitled3`, …
    pub fn add_default_page(&mut self, content: &str) -> Result<()> {
        let mut title = "untitled".to_string();
        let mut suffix = 1;
        while self.contains(&title) {
            suffix += 1;
            title = format!("untitled{suffix}");
        }
        self.add_page(content, &title)
    }

    // ── Removal ─────────────────────────────────────────────────────────

    /// Remove `name`, or park it as the single pending removal until
    /// [`confirm_pending_removal`](Self::confirm_pending_removal) resumes it.
    /// A second call before confirmation replaces the parked name.
    pub fn remove_page(&mut self, name: &str, skip_confirmation: bool) -> Result<Removal> {
        if !self.contains(name) {
            return Err(ScribaError::PageNotFound(name.to_string()));
        }
        if skip_confirmation {
            self.remove_now(name)?;
            Ok(Removal::Removed)
        } else {
            self.pending_removal = Some(name.to_string());
            Ok(Removal::AwaitingConfirmation)
        }
    }

    pub fn pending_removal(&self) -> Option<&str> {
        self.pending_removal.as_deref()
    }

    /// Resume the parked removal. Errors when nothing awaits confirmation.
    pub fn confirm_pending_removal(&mut self) -> Result<String> {
        let name = self
            .pending_removal
            .take()
            .ok_or(ScribaError::NoPendingRemoval)?;
        self.remove_now(&name)?;
        Ok(name)
    }

    pub fn cancel_pending_removal(&mut self) -> Option<String> {
        self.pending_removal.take()
    }

    fn remove_now(&mut self, name: &str) -> Result<()> {
        let idx = self
            .position(name)
            .ok_or_else(|| ScribaError::PageNotFound(name.to_string()))?;
        let was_active = idx == self.active;

        // Pick the replacement tab before the entry disappears: left
        // neighbor, right neighbor when removing the leftmost, first tab
        // when two or fewer would remain.
        let next_active = if was_active {
            let remaining = self.pages.len() - 1;
            if remaining == 0 {
                None
            } else if remaining <= 2 || idx == 0 {
                Some(0)
            } else {
                Some(idx - 1)
            }
        } else {
            None
        };

        let page = self.pages.remove(idx);
        if !was_active && self.active < usize::MAX && self.active > idx {
            self.active -= 1;
        }
        if self.pages.is_empty() {
            self.active = usize::MAX;
        }
        if self.pending_rename.as_ref().is_some_and(|r| r.page == name) {
            self.pending_rename = None;
        }
        if self.pending_removal.as_deref() == Some(name) {
            self.pending_removal = None;
        }

        // The removed page was active, so whichever tab takes over is a real
        // switch; announce it directly rather than via activate_index, whose
        // previous-name check would see the already-shifted list.
        if let Some(next) = next_active {
            self.active = next;
            self.pending_rename = None;
            let name = self.pages[next].name.clone();
            self.events.publish(&Event::ActivePageChanged { name });
        }

        self.events.publish(&Event::PageWasDeleted {
            name: page.name.clone(),
        });
        self.console.log(format!("Removed {} from the project.", page.name));

        // A project is never left without a page.
        if self.pages.is_empty() {
            self.add_default_page("")?;
        }
        Ok(())
    }

    // ── Renaming ────────────────────────────────────────────────────────

    /// Open a rename editor for `name`, prefilled with the current name.
    /// Only one rename is in flight at a time; a new one replaces it.
    pub fn begin_rename(&mut self, name: &str) -> Result<()> {
        if !self.contains(name) {
            return Err(ScribaError::PageNotFound(name.to_string()));
        }
        self.pending_rename = Some(PendingRename {
            page: name.to_string(),
            value: name.to_string(),
        });
        Ok(())
    }

    pub fn pending_rename(&self) -> Option<&PendingRename> {
        self.pending_rename.as_ref()
    }

    /// Editable value of the in-flight rename.
    pub fn rename_input_mut(&mut self) -> Option<&mut String> {
        self.pending_rename.as_mut().map(|r| &mut r.value)
    }

    pub fn cancel_rename(&mut self) -> Option<PendingRename> {
        self.pending_rename.take()
    }

    /// Commit the in-flight rename. Validation short-circuits on the first
    /// failure; every failure leaves the registry unchanged, restores the
    /// display (the pending state is discarded either way) and posts exactly
    /// one console error. Committing the unchanged name is a silent no-op.
    /// Returns the new name on an actual rename.
    pub fn commit_rename(&mut self) -> Result<Option<String>> {
        let Some(pending) = self.pending_rename.take() else {
            return Ok(None);
        };
        let (old, new) = (pending.page, pending.value);

        if new == old {
            return Ok(None);
        }
        if self.contains(&new) {
            self.console.error(format!(
                "Error in renaming {old}: this page name already exists in this project. Please choose another."
            ));
            return Err(ScribaError::NameTaken(new));
        }
        let slug = slugify(&new);
        if slug.is_empty() {
            self.console.error(format!(
                "Error in renaming {old}: please choose a name that contains alphanumeric characters."
            ));
            return Err(ScribaError::EmptyName(new));
        }
        if let Some(other) = self.pages.iter().find(|p| p.name != old && p.slug == slug) {
            let existing = other.name.clone();
            self.console.error(format!(
                "Error in renaming {old}: this name is too similar to one already open in this project. Please close the other or choose a different name."
            ));
            return Err(ScribaError::SlugTaken { new, existing });
        }

        let idx = self
            .position(&old)
            .ok_or_else(|| ScribaError::PageNotFound(old.clone()))?;
        self.pages[idx].name = new.clone();
        self.pages[idx].slug = slug;
        self.console.log(format!("Renamed {old} to {new}."));
        Ok(Some(new))
    }

    /// Non-interactive rename: begin, fill, commit in one step.
    pub fn rename_page(&mut self, name: &str, new_name: &str) -> Result<Option<String>> {
        self.begin_rename(name)?;
        if let Some(value) = self.rename_input_mut() {
            *value = new_name.to_string();
        }
        self.commit_rename()
    }

    // ── Gutter decorations ──────────────────────────────────────────────

    pub fn decorate_line(&mut self, name: &str, line: usize, deco: Decoration) -> Result<()> {
        let page = self
            .get_mut(name)
            .ok_or_else(|| ScribaError::PageNotFound(name.to_string()))?;
        if line >= page.session.lines().len() {
            return Err(ScribaError::LineOutOfRange {
                page: name.to_string(),
                line,
            });
        }
        page.decorations.insert(line, deco);
        Ok(())
    }

    pub fn undecorate_line(&mut self, name: &str, line: usize) -> Result<Option<Decoration>> {
        let page = self
            .get_mut(name)
            .ok_or_else(|| ScribaError::PageNotFound(name.to_string()))?;
        Ok(page.decorations.remove(&line))
    }

    /// Decorate `line`, or clear it when already decorated. Returns whether
    /// the line is decorated afterwards.
    pub fn toggle_decoration(&mut self, name: &str, line: usize, deco: Decoration) -> Result<bool> {
        if self.undecorate_line(name, line)?.is_some() {
            Ok(false)
        } else {
            self.decorate_line(name, line, deco)?;
            Ok(true)
        }
    }
}
