//! Workspace tests: category switching, event-name prefill, generation
//! gates, and the idle-purging store.

mod common;

use std::time::Duration;

use chrono::NaiveDate;

use eventscript::models::program::{EventItem, ProgramError};
use eventscript::models::template::{EventCategory, MANUAL_TEMPLATE};
use eventscript::models::workspace::{Workspace, WorkspaceStore};

use common::{ENTRANCE_LABELS, labels};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
}

#[test]
fn test_new_workspace_starts_on_entrance_ceremony() {
    let ws = Workspace::new(today());
    assert_eq!(ws.category(), EventCategory::School);
    assert_eq!(ws.program.active_template_key(), "입학식");
    assert_eq!(labels(ws.program.items()), ENTRANCE_LABELS.to_vec());
    assert_eq!(ws.metadata.name, "입학식");
    assert_eq!(ws.metadata.date, today());
    assert!(ws.script.is_none());
}

#[test]
fn test_category_switch_reinitializes_from_default_template() {
    let mut ws = Workspace::new(today());
    ws.program.add_item(EventItem::new("추가", 5, "")).expect("add");

    assert!(ws.select_category(EventCategory::EducationOffice));
    let default = EventCategory::EducationOffice.default_template();
    assert_eq!(ws.program.active_template_key(), default.key);
    assert_eq!(ws.program.len(), default.items.len());
    assert_eq!(ws.metadata.name, default.key);

    // Same category again changes nothing.
    let before = ws.program.clone();
    assert!(!ws.select_category(EventCategory::EducationOffice));
    assert_eq!(ws.program, before);
}

#[test]
fn test_template_change_follows_prefilled_name() {
    let mut ws = Workspace::new(today());
    assert!(ws.select_template("졸업식").expect("select"));
    assert_eq!(ws.metadata.name, "졸업식");

    assert!(ws.select_template(MANUAL_TEMPLATE).expect("select"));
    assert_eq!(ws.metadata.name, "");
    assert!(ws.program.is_empty());

    // An empty name is refilled by the next named template.
    assert!(ws.select_template("체육대회").expect("select"));
    assert_eq!(ws.metadata.name, "체육대회");
}

#[test]
fn test_template_change_keeps_typed_name() {
    let mut ws = Workspace::new(today());
    ws.metadata.name = "2025학년도 신입생 입학식".to_string();

    assert!(ws.select_template("졸업식").expect("select"));
    assert_eq!(ws.metadata.name, "2025학년도 신입생 입학식");
}

#[test]
fn test_unknown_template_is_rejected() {
    let mut ws = Workspace::new(today());
    // Office templates are not selectable while the school category is active.
    let err = ws.select_template("교육청 연수").unwrap_err();
    assert_eq!(err, ProgramError::UnknownTemplate("교육청 연수".to_string()));
    assert_eq!(ws.program.active_template_key(), "입학식");
}

#[test]
fn test_reselecting_active_template_is_noop() {
    let mut ws = Workspace::new(today());
    ws.program.remove_item(0).expect("remove");
    assert!(!ws.select_template("입학식").expect("select"));
    assert_eq!(ws.program.len(), 5);
}

#[test]
fn test_generation_gates() {
    let mut ws = Workspace::new(today());
    assert!(ws.can_generate());

    ws.metadata.name = "   ".to_string();
    assert!(!ws.can_generate());

    ws.metadata.name = "입학식".to_string();
    ws.program.replace_items(Vec::new());
    assert!(!ws.can_generate());
}

// ────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────

#[test]
fn test_store_create_and_mutate() {
    let store = WorkspaceStore::new();
    let id = store.create(today());
    assert_eq!(id.len(), 64);
    assert!(store.contains(&id));

    let len = store.with(&id, |ws| {
        ws.program.remove_item(0).expect("remove");
        ws.program.len()
    });
    assert_eq!(len, Some(5));
    assert_eq!(store.get(&id).expect("workspace").program.len(), 5);

    assert!(store.with("missing", |_| ()).is_none());
    assert!(store.get("missing").is_none());
}

#[test]
fn test_store_ids_are_distinct() {
    let store = WorkspaceStore::new();
    let a = store.create(today());
    let b = store.create(today());
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_store_discard() {
    let store = WorkspaceStore::new();
    let id = store.create(today());
    assert!(store.discard(&id));
    assert!(!store.discard(&id));
    assert!(store.is_empty());
}

#[test]
fn test_store_purges_idle_workspaces() {
    let store = WorkspaceStore::new();
    store.create(today());
    store.create(today());

    assert_eq!(store.purge_idle(Duration::from_secs(3600)), 0);
    assert_eq!(store.len(), 2);

    std::thread::sleep(Duration::from_millis(5));
    assert_eq!(store.purge_idle(Duration::ZERO), 2);
    assert!(store.is_empty());
}
