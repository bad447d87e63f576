use std::cell::RefCell;
use std::rc::Rc;

use scriba_core::config::Settings;
use scriba_core::registry::Removal;
use scriba_core::{
    BufferSession, Decoration, EditorSession, Event, EventKind, PageRegistry, ScribaError, Severity,
};
use tempfile::TempDir;

fn new_registry() -> PageRegistry<BufferSession> {
    PageRegistry::new(Box::new(BufferSession::new))
}

// ========================================================================
// Page Registry Tests (registry.rs)
// ========================================================================

#[test]
fn test_add_page_registers_content_and_activates() {
    let mut registry = new_registry();

    registry.add_page("<score/>", "piece1").unwrap();
    registry.add_page("text", "notes").unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.page_names(), vec!["piece1", "notes"]);
    assert_eq!(registry.active_name(), Some("notes"));
    assert_eq!(registry.get("piece1").unwrap().session().text(), "<score/>");
}

#[test]
fn test_add_page_rejects_duplicate_name() {
    let mut registry = new_registry();
    registry.add_page("a", "page").unwrap();

    let err = registry.add_page("b", "page").unwrap_err();
    assert!(matches!(err, ScribaError::NameTaken(_)));

    // Registry unchanged: still one page, original content.
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("page").unwrap().session().text(), "a");
}

#[test]
fn test_distinct_adds_keep_original_contents() {
    let mut registry = new_registry();
    for i in 0..5 {
        registry
            .add_page(&format!("content-{i}"), &format!("page-{i}"))
            .unwrap();
    }

    assert_eq!(registry.len(), 5);
    for i in 0..5 {
        assert_eq!(
            registry.get(&format!("page-{i}")).unwrap().session().text(),
            format!("content-{i}")
        );
    }
}

#[test]
fn test_add_default_page_names_have_no_gaps() {
    let mut registry = new_registry();

    for _ in 0..4 {
        registry.add_default_page("").unwrap();
    }

    assert_eq!(
        registry.page_names(),
        vec!["untitled", "untitled2", "untitled3", "untitled4"]
    );
}

#[test]
fn test_add_default_page_reuses_freed_name() {
    let mut registry = new_registry();
    registry.add_default_page("").unwrap();
    registry.add_default_page("x").unwrap(); // untitled2, not blank
    registry.remove_page("untitled", true).unwrap();

    registry.add_default_page("").unwrap();
    assert!(registry.contains("untitled"));
}

#[test]
fn test_blank_untitled_is_swallowed_by_first_real_page() {
    let mut registry = new_registry();
    registry.add_default_page("").unwrap();
    assert_eq!(registry.page_names(), vec!["untitled"]);

    registry.add_page("<score/>", "piece1").unwrap();

    assert_eq!(registry.page_names(), vec!["piece1"]);
    assert_eq!(registry.get("piece1").unwrap().session().text(), "<score/>");
    assert_eq!(registry.active_name(), Some("piece1"));
}

#[test]
fn test_untitled_with_content_is_not_swallowed() {
    let mut registry = new_registry();
    registry.add_default_page("draft text").unwrap();

    registry.add_page("<score/>", "piece1").unwrap();

    assert_eq!(registry.page_names(), vec!["untitled", "piece1"]);
}

#[test]
fn test_remove_active_page_selects_left_neighbor() {
    let mut registry = new_registry();
    registry.add_page("", "a").unwrap();
    registry.add_page("", "b").unwrap();
    registry.add_page("", "c").unwrap();
    registry.set_active("b").unwrap();

    let outcome = registry.remove_page("b", true).unwrap();

    assert_eq!(outcome, Removal::Removed);
    assert_eq!(registry.page_names(), vec!["a", "c"]);
    assert_eq!(registry.active_name(), Some("a"));
}

#[test]
fn test_remove_leftmost_active_page_selects_right_neighbor() {
    let mut registry = new_registry();
    registry.add_page("", "a").unwrap();
    registry.add_page("", "b").unwrap();
    registry.add_page("", "c").unwrap();
    registry.add_page("", "d").unwrap();
    registry.set_active("a").unwrap();

    registry.remove_page("a", true).unwrap();

    assert_eq!(registry.active_name(), Some("b"));
}

#[test]
fn test_remove_inactive_page_keeps_active_selection() {
    let mut registry = new_registry();
    registry.add_page("", "a").unwrap();
    registry.add_page("", "b").unwrap();
    registry.add_page("", "c").unwrap();
    registry.add_page("", "d").unwrap();
    registry.set_active("d").unwrap();

    registry.remove_page("b", true).unwrap();

    assert_eq!(registry.active_name(), Some("d"));
    assert_eq!(registry.page_names(), vec!["a", "c", "d"]);
}

#[test]
fn test_remove_last_page_respawns_default() {
    let mut registry = new_registry();
    registry.add_page("only content", "only").unwrap();

    registry.remove_page("only", true).unwrap();

    // Never zero pages: a fresh untitled page takes over.
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.page_names(), vec!["untitled"]);
    assert_eq!(registry.active_name(), Some("untitled"));
    assert!(registry.get("untitled").unwrap().session().is_empty());
}

#[test]
fn test_remove_unknown_page_is_not_found() {
    let mut registry = new_registry();
    registry.add_page("", "a").unwrap();

    let err = registry.remove_page("ghost", true).unwrap_err();
    assert!(matches!(err, ScribaError::PageNotFound(_)));
    assert_eq!(registry.len(), 1);
}

// ========================================================================
// Removal Confirmation Flow
// ========================================================================

#[test]
fn test_removal_waits_for_confirmation() {
    let mut registry = new_registry();
    registry.add_page("", "keep").unwrap();
    registry.add_page("", "doomed").unwrap();

    let outcome = registry.remove_page("doomed", false).unwrap();
    assert_eq!(outcome, Removal::AwaitingConfirmation);
    assert_eq!(registry.pending_removal(), Some("doomed"));
    // Nothing removed until the confirmation lands.
    assert_eq!(registry.len(), 2);

    let removed = registry.confirm_pending_removal().unwrap();
    assert_eq!(removed, "doomed");
    assert_eq!(registry.page_names(), vec!["keep"]);
    assert!(registry.pending_removal().is_none());
}

#[test]
fn test_cancel_discards_pending_removal() {
    let mut registry = new_registry();
    registry.add_page("", "a").unwrap();
    let _ = registry.remove_page("a", false).unwrap();

    assert_eq!(registry.cancel_pending_removal(), Some("a".to_string()));
    assert_eq!(registry.len(), 1);

    let err = registry.confirm_pending_removal().unwrap_err();
    assert!(matches!(err, ScribaError::NoPendingRemoval));
}

#[test]
fn test_second_request_replaces_pending_removal() {
    let mut registry = new_registry();
    registry.add_page("", "a").unwrap();
    registry.add_page("", "b").unwrap();

    let _ = registry.remove_page("a", false).unwrap();
    let _ = registry.remove_page("b", false).unwrap();

    assert_eq!(registry.pending_removal(), Some("b"));
    registry.confirm_pending_removal().unwrap();
    assert_eq!(registry.page_names(), vec!["a"]);
}

// ========================================================================
// Rename Flow
// ========================================================================

#[test]
fn test_rename_updates_key_and_keeps_content() {
    let mut registry = new_registry();
    registry.add_page("<score/>", "old").unwrap();
    registry.add_page("", "other").unwrap();

    let renamed = registry.rename_page("old", "new").unwrap();

    assert_eq!(renamed, Some("new".to_string()));
    assert!(!registry.contains("old"));
    assert_eq!(registry.get("new").unwrap().session().text(), "<score/>");
    // Tab order preserved.
    assert_eq!(registry.page_names(), vec!["new", "other"]);
}

#[test]
fn test_rename_to_existing_name_is_rejected() {
    let mut registry = new_registry();
    registry.add_page("a", "first").unwrap();
    registry.add_page("b", "second").unwrap();
    let errors_before = count_errors(&registry);

    let err = registry.rename_page("first", "second").unwrap_err();

    assert!(matches!(err, ScribaError::NameTaken(_)));
    assert_eq!(registry.page_names(), vec!["first", "second"]);
    assert_eq!(count_errors(&registry), errors_before + 1);
}

#[test]
fn test_rename_to_unchanged_name_is_silent_noop() {
    let mut registry = new_registry();
    registry.add_page("", "same").unwrap();
    let errors_before = count_errors(&registry);

    let renamed = registry.rename_page("same", "same").unwrap();

    assert_eq!(renamed, None);
    assert!(registry.contains("same"));
    assert_eq!(count_errors(&registry), errors_before);
}

#[test]
fn test_rename_to_empty_identifier_form_is_rejected() {
    let mut registry = new_registry();
    registry.add_page("", "page").unwrap();
    let errors_before = count_errors(&registry);

    let err = registry.rename_page("page", "!!! ???").unwrap_err();

    assert!(matches!(err, ScribaError::EmptyName(_)));
    assert_eq!(registry.page_names(), vec!["page"]);
    assert_eq!(count_errors(&registry), errors_before + 1);
}

#[test]
fn test_rename_to_colliding_slug_is_rejected() {
    let mut registry = new_registry();
    registry.add_page("", "my file").unwrap();
    registry.add_page("", "other").unwrap();

    // "my-file" strips to "myfile", the same slug as "my file".
    let err = registry.rename_page("other", "my-file").unwrap_err();

    assert!(matches!(err, ScribaError::SlugTaken { .. }));
    assert_eq!(registry.page_names(), vec!["my file", "other"]);
}

#[test]
fn test_interactive_rename_cancel_restores_display() {
    let mut registry = new_registry();
    registry.add_page("", "page").unwrap();

    registry.begin_rename("page").unwrap();
    *registry.rename_input_mut().unwrap() = "half-typed".to_string();
    let cancelled = registry.cancel_rename().unwrap();

    assert_eq!(cancelled.page(), "page");
    assert_eq!(cancelled.value, "half-typed");
    assert!(registry.contains("page"));
    assert!(registry.pending_rename().is_none());
}

#[test]
fn test_switching_tabs_cancels_open_rename() {
    let mut registry = new_registry();
    registry.add_page("", "a").unwrap();
    registry.add_page("", "b").unwrap();

    registry.begin_rename("b").unwrap();
    registry.set_active("a").unwrap();

    assert!(registry.pending_rename().is_none());
}

#[test]
fn test_removing_rename_target_clears_pending_rename() {
    let mut registry = new_registry();
    registry.add_page("", "a").unwrap();
    registry.add_page("", "b").unwrap();

    registry.begin_rename("b").unwrap();
    registry.remove_page("b", true).unwrap();

    assert!(registry.pending_rename().is_none());
}

// ========================================================================
// Event Bus Wiring (registry-level)
// ========================================================================

#[test]
fn test_add_page_publishes_new_file() {
    let mut registry = new_registry();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = seen.clone();
    registry.events_mut().subscribe(
        EventKind::NewFile,
        Box::new(move |e| {
            if let Event::NewFile { name, content } = e {
                sink.borrow_mut().push((name.clone(), content.clone()));
            }
        }),
    );

    registry.add_page("<score/>", "piece1").unwrap();

    assert_eq!(
        seen.borrow().as_slice(),
        [("piece1".to_string(), "<score/>".to_string())]
    );
}

#[test]
fn test_remove_page_publishes_page_was_deleted() {
    let mut registry = new_registry();
    registry.add_page("", "a").unwrap();
    registry.add_page("", "b").unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    registry.events_mut().subscribe(
        EventKind::PageWasDeleted,
        Box::new(move |e| sink.borrow_mut().push(e.page_name().to_string())),
    );

    registry.remove_page("a", true).unwrap();
    assert_eq!(seen.borrow().as_slice(), ["a"]);
}

#[test]
fn test_tab_switch_publishes_active_page_changed() {
    let mut registry = new_registry();
    registry.add_page("", "a").unwrap();
    registry.add_page("", "b").unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    registry.events_mut().subscribe(
        EventKind::ActivePageChanged,
        Box::new(move |e| sink.borrow_mut().push(e.page_name().to_string())),
    );

    registry.set_active("a").unwrap();
    registry.set_active("a").unwrap(); // no-op: already active

    assert_eq!(seen.borrow().as_slice(), ["a"]);
}

#[test]
fn test_publish_after_full_unsubscribe_invokes_nothing() {
    let mut registry = new_registry();
    let count = Rc::new(RefCell::new(0));

    let c1 = count.clone();
    let handle = registry.events_mut().subscribe(
        EventKind::NewFile,
        Box::new(move |_| *c1.borrow_mut() += 1),
    );
    let c2 = count.clone();
    registry.events_mut().subscribe(
        EventKind::NewFile,
        Box::new(move |_| *c2.borrow_mut() += 1),
    );

    registry.events_mut().unsubscribe(handle, true);
    registry.add_page("", "quiet").unwrap();

    assert_eq!(*count.borrow(), 0);
}

// ========================================================================
// Console Logging (registry side effects)
// ========================================================================

fn count_errors(registry: &PageRegistry<BufferSession>) -> usize {
    registry
        .console()
        .entries()
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .count()
}

#[test]
fn test_lifecycle_operations_log_to_console() {
    let mut registry = new_registry();
    registry.add_page("", "piece").unwrap();
    registry.rename_page("piece", "movement").unwrap();
    registry.remove_page("movement", true).unwrap();

    let texts: Vec<&str> = registry
        .console()
        .entries()
        .iter()
        .map(|e| e.text.as_str())
        .collect();

    assert!(texts.contains(&"Added piece to project."));
    assert!(texts.contains(&"Renamed piece to movement."));
    assert!(texts.contains(&"Removed movement from the project."));
    // The respawned default page logs too.
    assert!(texts.contains(&"Added untitled to project."));
}

// ========================================================================
// Gutter Decorations
// ========================================================================

#[test]
fn test_decoration_toggle_round_trip() {
    let mut registry = new_registry();
    registry.add_page("line one\nline two", "page").unwrap();

    assert!(registry.toggle_decoration("page", 1, Decoration::Error).unwrap());
    assert_eq!(
        registry.get("page").unwrap().decorations().get(&1),
        Some(&Decoration::Error)
    );

    assert!(!registry.toggle_decoration("page", 1, Decoration::Error).unwrap());
    assert!(registry.get("page").unwrap().decorations().is_empty());
}

#[test]
fn test_decorating_out_of_range_line_fails() {
    let mut registry = new_registry();
    registry.add_page("only line", "page").unwrap();

    let err = registry
        .decorate_line("page", 10, Decoration::Warning)
        .unwrap_err();
    assert!(matches!(err, ScribaError::LineOutOfRange { .. }));
}

// ========================================================================
// all_texts
// ========================================================================

#[test]
fn test_all_texts_returns_lines_in_tab_order() {
    let mut registry = new_registry();
    registry.add_page("a1\na2", "a").unwrap();
    registry.add_page("b1", "b").unwrap();

    let texts = registry.all_texts();

    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0].0, "a");
    assert_eq!(texts[0].1, vec!["a1", "a2"]);
    assert_eq!(texts[1].0, "b");
    assert_eq!(texts[1].1, vec!["b1"]);
}

// ========================================================================
// Settings Tests (config.rs)
// ========================================================================

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();

    assert_eq!(settings.ui.theme, "dark");
    assert_eq!(settings.ui.page_title, "Scriba");
    assert_eq!(settings.editor.mode, "xml");
    assert_eq!(settings.editor.tab_width, 4);
    assert!(settings.editor.show_line_numbers);
    assert_eq!(settings.console.height, 8);
    assert!(settings.console.greeting);
}

#[test]
fn test_settings_toml_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut settings = Settings::default();
    settings.ui.theme = "dracula".to_string();
    settings.editor.mode = "text".to_string();
    settings.console.height = 12;

    let content = toml::to_string_pretty(&settings).unwrap();
    std::fs::write(&config_path, content).unwrap();

    let loaded: Settings = toml::from_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap();

    assert_eq!(loaded.ui.theme, "dracula");
    assert_eq!(loaded.editor.mode, "text");
    assert_eq!(loaded.console.height, 12);
}
