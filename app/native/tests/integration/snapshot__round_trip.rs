//! Capture followed by restore against the simulated shell.

use std::fs;
use std::time::Duration;

use iconstash_lib::Error;
use iconstash_lib::desktop::{FolderFlags, Point};
use iconstash_lib::snapshot::{Slot, Snapshotter};
use serde_json::json;

use crate::common::{Desk, icon};

#[test]
fn test_empty_desktop_captures_empty_list() {
    let desk = Desk::new(4);
    let slot = Slot::open(&desk.data_root(), "Default").unwrap();

    let report = desk.engine().capture(&slot).unwrap();

    assert!(report.locations.is_empty());
    assert_eq!(report.moves.moved_count(), 0);
    assert_eq!(desk.read_json("saves/Default/locations.json"), json!({ "icons": [] }));
    assert_eq!(desk.clock.elapsed(), Duration::ZERO);
    assert_eq!(desk.shell.refresh_requests(), 0);
}

#[test]
fn test_layout_survives_round_trip() {
    let desk = Desk::new(3);
    desk.place("Budget.xlsx", 96, 0);
    desk.place("Notes.txt", 10, 20);
    desk.place("Photos", 0, 480);
    let original = desk.shell.layout();
    let slot = Slot::open(&desk.data_root(), "Default").unwrap();
    let engine = desk.engine();

    let captured = engine.capture(&slot).unwrap();
    assert_eq!(captured.moves.moved_count(), 3);
    assert!(desk.desktop_files().is_empty());
    assert!(desk.shell.layout().is_empty());

    let restored = engine.restore(&slot).unwrap();
    assert_eq!(restored.positioned, 3);
    assert!(restored.unmatched.is_empty());
    assert_eq!(desk.shell.layout(), original);
    assert!(desk.clock.elapsed() > Duration::ZERO);
}

#[test]
fn test_restore_leaves_configured_flags() {
    let desk = Desk::new(0);
    desk.place("Notes.txt", 10, 20);
    let slot = Slot::open(&desk.data_root(), "Default").unwrap();
    let flags = FolderFlags {
        auto_arrange: true,
        snap_to_grid: false,
    };
    let engine = desk.engine().with_final_flags(flags);

    engine.capture(&slot).unwrap();
    engine.restore(&slot).unwrap();

    assert_eq!(desk.shell.flags(), flags);
    assert_eq!(desk.shell.position_of("Notes.txt"), Some(Point::new(10, 20)));
}

#[test]
fn test_restore_reports_records_without_icons() {
    let desk = Desk::new(0);
    desk.place("a.txt", 1, 2);
    let slot = Slot::open(&desk.data_root(), "Default").unwrap();
    let engine = desk.engine();
    engine.capture(&slot).unwrap();

    let locations = json!({
        "icons": [
            { "name": "a.txt", "location": [1, 2] },
            { "name": "gone.txt", "location": [50, 60] }
        ]
    });
    fs::write(slot.locations_path(), locations.to_string()).unwrap();
    desk.place("extra.txt", 200, 200);

    let restored = engine.restore(&slot).unwrap();

    assert_eq!(restored.positioned, 1);
    assert_eq!(restored.unmatched, vec![icon("gone.txt", 50, 60)]);
    assert_eq!(desk.shell.position_of("a.txt"), Some(Point::new(1, 2)));
}

#[test]
fn test_corrupt_locations_keep_icons_stored() {
    let desk = Desk::new(0);
    desk.place("a.txt", 1, 2);
    let slot = Slot::open(&desk.data_root(), "Default").unwrap();
    let engine = desk.engine();
    engine.capture(&slot).unwrap();
    fs::write(slot.locations_path(), "{ not json").unwrap();

    let result = engine.restore(&slot);

    assert!(matches!(result, Err(Error::MalformedLocations { .. })));
    assert_eq!(desk.stored_files("Default"), vec!["a.txt"]);
    assert!(desk.desktop_files().is_empty());
}
