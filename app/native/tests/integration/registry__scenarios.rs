//! Save registry scenarios: creating, switching and rejecting slots.

use std::fs;
use std::time::Duration;

use iconstash_lib::Error;
use iconstash_lib::desktop::Point;
use iconstash_lib::registry::SwitchState;
use serde_json::json;

use crate::common::{Desk, icon};

#[test]
fn test_fresh_root_starts_with_default() {
    let desk = Desk::new(0);
    let registry = desk.registry();

    assert_eq!(registry.list(), vec!["Default"]);
    assert_eq!(registry.active().unwrap().name(), "Default");
    assert_eq!(registry.state(), SwitchState::Idle);
    assert_eq!(
        desk.read_json("saves.json"),
        json!({ "active_desktop": "Default", "saves": ["Default"] })
    );
    assert!(desk.data_root().join("saves").join("Default").join("icons").is_dir());
    assert_eq!(desk.read_json("saves/Default/locations.json"), json!({ "icons": [] }));
}

#[test]
fn test_create_stores_current_desktop() {
    let desk = Desk::new(2);
    desk.place("Notes.txt", 10, 20);
    let mut registry = desk.registry();

    let report = registry.create("Work").unwrap();

    assert_eq!(report.locations.icons, vec![icon("Notes.txt", 10, 20)]);
    assert_eq!(
        desk.read_json("saves/Default/locations.json"),
        json!({ "icons": [{ "name": "Notes.txt", "location": [10, 20] }] })
    );
    assert_eq!(desk.stored_files("Default"), vec!["Notes.txt"]);
    assert!(desk.desktop_files().is_empty());
    assert!(desk.stored_files("Work").is_empty());

    assert_eq!(registry.list(), vec!["Default", "Work"]);
    assert_eq!(registry.active_name(), "Work");
    assert_eq!(
        desk.read_json("saves.json"),
        json!({ "active_desktop": "Work", "saves": ["Default", "Work"] })
    );
}

#[test]
fn test_switching_brings_each_layout_back() {
    let desk = Desk::new(1);
    desk.place("a.txt", 0, 0);
    desk.place("b.txt", 100, 40);
    let mut registry = desk.registry();

    registry.create("Work").unwrap();
    desk.place("report.docx", 300, 200);

    let switched = registry.activate("Default").unwrap();
    assert_eq!(switched.captured.locations.icons, vec![icon("report.docx", 300, 200)]);
    assert_eq!(switched.restored.positioned, 2);
    assert!(switched.restored.unmatched.is_empty());
    assert_eq!(desk.shell.layout(), vec![icon("a.txt", 0, 0), icon("b.txt", 100, 40)]);
    assert_eq!(desk.stored_files("Work"), vec!["report.docx"]);

    registry.activate("Work").unwrap();
    assert_eq!(desk.shell.layout(), vec![icon("report.docx", 300, 200)]);
    assert_eq!(desk.stored_files("Default"), vec!["a.txt", "b.txt"]);
    assert_eq!(registry.active_name(), "Work");
    assert_eq!(registry.state(), SwitchState::Idle);
}

#[test]
fn test_unknown_slot_changes_nothing() {
    let desk = Desk::new(0);
    desk.place("Notes.txt", 10, 20);
    let mut registry = desk.registry();
    let saves_before = fs::read(desk.data_root().join("saves.json")).unwrap();

    let result = registry.activate("Missing");

    assert!(matches!(result, Err(Error::UnknownSlot(name)) if name == "Missing"));
    assert_eq!(fs::read(desk.data_root().join("saves.json")).unwrap(), saves_before);
    assert_eq!(desk.desktop_files(), vec!["Notes.txt"]);
    assert_eq!(desk.read_json("saves/Default/locations.json"), json!({ "icons": [] }));
    assert!(!desk.data_root().join("saves/Missing").exists());
}

#[test]
fn test_activating_the_active_slot_is_rejected() {
    let desk = Desk::new(0);
    desk.place("Notes.txt", 10, 20);
    let mut registry = desk.registry();

    assert!(matches!(registry.activate("Default"), Err(Error::AlreadyActive(_))));
    assert_eq!(desk.desktop_files(), vec!["Notes.txt"]);
    assert_eq!(desk.shell.refresh_requests(), 0);
}

#[test]
fn test_duplicate_create_is_rejected() {
    let desk = Desk::new(0);
    let mut registry = desk.registry();
    registry.create("Work").unwrap();

    assert!(matches!(registry.create("Default"), Err(Error::NameTaken(_))));
    assert!(matches!(registry.create("Work"), Err(Error::NameTaken(_))));
    assert_eq!(registry.list(), vec!["Default", "Work"]);
    assert_eq!(registry.active_name(), "Work");
}

#[test]
fn test_unreachable_shell_aborts_create() {
    let desk = Desk::new(0);
    desk.place("Notes.txt", 10, 20);
    let mut registry = desk.registry();
    let _unavailable = desk.shell.clone().unavailable();

    let result = registry.create("Work");

    assert!(matches!(result, Err(Error::ActiveSlotInvalid { .. })));
    assert_eq!(registry.list(), vec!["Default"]);
    assert_eq!(registry.active_name(), "Default");
    assert_eq!(desk.desktop_files(), vec!["Notes.txt"]);
    assert!(!desk.data_root().join("saves/Work").exists());
}

#[test]
fn test_failed_restore_keeps_pointer() {
    let desk = Desk::new(0);
    desk.place("a.txt", 5, 5);
    let mut registry = desk.registry();
    registry.create("Work").unwrap();
    fs::remove_file(desk.data_root().join("saves/Default/icons/a.txt")).unwrap();

    let result = registry.activate("Default");

    assert!(matches!(result, Err(Error::WaitTimeout { .. })));
    assert_eq!(registry.active_name(), "Work");
    assert_eq!(registry.state(), SwitchState::Idle);
    assert_eq!(desk.read_json("saves.json")["active_desktop"], json!("Work"));
}

#[test]
fn test_reopened_registry_resumes_pointer() {
    let desk = Desk::new(0);
    desk.place("a.txt", 5, 5);
    {
        let mut registry = desk.registry();
        registry.create("Work").unwrap();
        registry.create("Games").unwrap();
        registry.activate("Default").unwrap();
    }

    let mut registry = desk.registry();
    assert_eq!(registry.list(), vec!["Default", "Work", "Games"]);
    assert_eq!(registry.active_name(), "Default");

    registry.activate("Games").unwrap();
    assert!(desk.desktop_files().is_empty());
    assert_eq!(desk.stored_files("Default"), vec!["a.txt"]);
}

#[test]
fn test_create_on_desktop_with_only_unlisted_files() {
    let desk = Desk::new(u32::MAX);
    let _recycle_bin = desk.shell.clone().with_virtual_item("Recycle Bin", Point::new(0, 0));
    desk.shell.place_hidden_file("desktop.ini");
    let mut registry = desk.registry();

    let report = registry.create("Work").unwrap();

    assert_eq!(report.locations.icons, vec![icon("Recycle Bin", 0, 0)]);
    assert_eq!(desk.stored_files("Default"), vec!["desktop.ini"]);
    assert_eq!(desk.clock.elapsed(), Duration::ZERO);
    assert_eq!(registry.active_name(), "Work");
}
