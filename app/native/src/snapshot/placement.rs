//! Joining stored icon records with the live desktop items.
//!
//! The display name is the only join key. Each stored record is consumed by
//! the first live item it matches, so a record is applied at most once and a
//! stale coordinate can never be replayed onto a second same-named item.
//!
//! Matching runs in two passes:
//! 1. exact display name
//! 2. display name with the file extension stripped on either side, for shells
//!    that started or stopped hiding known extensions since the capture

use std::path::Path;

use crate::desktop::{IconRecord, Point};

/// Positions to apply, plus the records nothing matched.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Placement {
    /// Live item name and the position it should move to.
    pub moves: Vec<(String, Point)>,
    /// Stored records with no live counterpart.
    pub unmatched: Vec<IconRecord>,
}

/// Pairs every live item with at most one stored record.
#[must_use]
pub fn plan(live: &[IconRecord], records: Vec<IconRecord>) -> Placement {
    let mut pending = records;
    let mut placed = vec![false; live.len()];
    let mut moves = Vec::new();

    for (index, item) in live.iter().enumerate() {
        if let Some(found) = pending.iter().position(|record| record.name == item.name) {
            let record = pending.remove(found);
            moves.push((item.name.clone(), record.position));
            placed[index] = true;
        }
    }

    for (index, item) in live.iter().enumerate() {
        if placed[index] {
            continue;
        }
        let found = pending.iter().position(|record| loosely_equal(&record.name, &item.name));
        if let Some(found) = found {
            let record = pending.remove(found);
            tracing::debug!(live = %item.name, stored = %record.name, "matched ignoring extension");
            moves.push((item.name.clone(), record.position));
        }
    }

    Placement { moves, unmatched: pending }
}

/// Counts the backing files that the shell listed as icons.
///
/// A file is shown when an icon has its exact name or its name with the
/// extension stripped on either side. Each icon accounts for one file at most.
/// Files such as `desktop.ini` exist in the folder but are never listed.
#[must_use]
pub fn count_shown(files: &[String], icons: &[IconRecord]) -> usize {
    let mut taken = vec![false; icons.len()];
    let mut shown = 0;

    for file in files {
        let found = icons.iter().enumerate().position(|(index, icon)| {
            !taken[index] && (icon.name == *file || loosely_equal(file, &icon.name))
        });
        if let Some(found) = found {
            taken[found] = true;
            shown += 1;
        }
    }

    shown
}

fn loosely_equal(stored: &str, live: &str) -> bool {
    stem(stored).is_some_and(|s| s == live) || stem(live).is_some_and(|l| l == stored)
}

fn stem(name: &str) -> Option<&str> {
    let path = Path::new(name);
    path.extension()?;
    path.file_stem().and_then(|stem| stem.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(name: &str, x: i32, y: i32) -> IconRecord { IconRecord::new(name, Point::new(x, y)) }

    #[test]
    fn test_exact_names_are_matched() {
        let live = vec![icon("a.txt", 0, 0), icon("b.txt", 0, 75)];
        let records = vec![icon("b.txt", 200, 10), icon("a.txt", 100, 10)];

        let placement = plan(&live, records);

        assert_eq!(placement.moves, vec![
            ("a.txt".to_string(), Point::new(100, 10)),
            ("b.txt".to_string(), Point::new(200, 10)),
        ]);
        assert!(placement.unmatched.is_empty());
    }

    #[test]
    fn test_each_record_is_applied_once() {
        let live = vec![icon("dup", 0, 0), icon("dup", 0, 75)];
        let records = vec![icon("dup", 5, 5)];

        let placement = plan(&live, records);

        assert_eq!(placement.moves.len(), 1);
        assert_eq!(placement.moves[0].1, Point::new(5, 5));
    }

    #[test]
    fn test_prefix_names_do_not_collide() {
        let live = vec![icon("Report", 0, 0), icon("Report 2", 0, 75)];
        let records = vec![icon("Report 2", 20, 20), icon("Report", 10, 10)];

        let placement = plan(&live, records);

        assert_eq!(placement.moves, vec![
            ("Report".to_string(), Point::new(10, 10)),
            ("Report 2".to_string(), Point::new(20, 20)),
        ]);
    }

    #[test]
    fn test_hidden_extension_is_matched_in_second_pass() {
        let live = vec![icon("Notes", 0, 0), icon("Notes.txt", 0, 75)];
        let records = vec![icon("Notes.txt", 30, 30), icon("Budget.xlsx", 40, 40)];

        let placement = plan(&live, records);

        assert_eq!(placement.moves, vec![("Notes.txt".to_string(), Point::new(30, 30))]);
        assert_eq!(placement.unmatched, vec![icon("Budget.xlsx", 40, 40)]);
    }

    #[test]
    fn test_stored_name_without_extension() {
        let live = vec![icon("Budget.xlsx", 0, 0)];
        let records = vec![icon("Budget", 40, 40)];

        let placement = plan(&live, records);

        assert_eq!(placement.moves, vec![("Budget.xlsx".to_string(), Point::new(40, 40))]);
    }

    #[test]
    fn test_count_shown_skips_unlisted_files() {
        let icons = vec![icon("Recycle Bin", 0, 0), icon("Notes", 0, 75), icon("a.txt", 0, 150)];
        let files: Vec<String> =
            ["desktop.ini", "Notes.txt", "a.txt"].iter().map(ToString::to_string).collect();

        assert_eq!(count_shown(&files, &icons), 2);
        assert_eq!(count_shown(&files[..1], &icons), 0);
        assert_eq!(count_shown(&[], &icons), 0);
    }

    #[test]
    fn test_count_shown_uses_each_icon_once() {
        let icons = vec![icon("Notes", 0, 0)];
        let files = vec!["Notes".to_string(), "Notes.txt".to_string()];

        assert_eq!(count_shown(&files, &icons), 1);
    }

    #[test]
    fn test_records_without_live_items_are_unmatched() {
        let placement = plan(&[], vec![icon("gone.txt", 1, 1)]);
        assert!(placement.moves.is_empty());
        assert_eq!(placement.unmatched.len(), 1);
    }
}
