//! Tests for table state, selection and observers.

mod common;

use std::sync::{Arc, Mutex};

use common::{Person, ids, roster, two_rows};
use roster_table::prelude::*;

fn recorder(table: &Table<Person>) -> Arc<Mutex<Vec<Vec<i64>>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    table.subscribe(move |ids: &[i64]| sink.lock().unwrap().push(ids.to_vec()));
    seen
}

#[test]
fn test_selection_survives_filtering() {
    let table = two_rows();
    table.toggle_row_selection("1").unwrap();
    table.toggle_row_selection("2").unwrap();

    table.set_column_filter("groups", ["10"]).unwrap();
    assert_eq!(table.visible_count(), 1);
    assert_eq!(table.selected_ids(), vec!["1", "2"]);
    assert!(table.is_selected("2"));

    table.clear_filters();
    assert_eq!(table.selected_ids(), vec!["1", "2"]);
}

#[test]
fn test_selection_survives_sorting() {
    let table = roster();
    table.toggle_row_selection("4").unwrap();
    table.toggle_sort("name").unwrap();
    table.toggle_sort("name").unwrap();
    assert_eq!(table.selected_ids(), vec!["4"]);
}

#[test]
fn test_toggle_unknown_row_is_rejected() {
    let table = two_rows();
    assert_eq!(
        table.toggle_row_selection("99"),
        Err(TableError::UnknownRow("99".to_string()))
    );
    assert!(table.selected_ids().is_empty());
}

#[test]
fn test_select_all_visible_only() {
    let table = roster();
    table.set_column_filter("role", ["STUDENT"]).unwrap();

    let added = table.select_all(true);
    assert_eq!(added, vec!["3", "1"]);
    assert_eq!(table.selected_ids(), vec!["3", "1"]);

    let added = table.select_all(false);
    assert_eq!(added, vec!["4", "2", "12"]);
    assert_eq!(table.summary().selected_total, 5);
}

#[test]
fn test_clear_selection_returns_removed() {
    let table = two_rows();
    table.select_all(false);
    let mut removed = table.clear_selection();
    removed.sort();
    assert_eq!(removed, vec!["1", "2"]);
    assert!(table.clear_selection().is_empty());
}

#[test]
fn test_summary_counts_visible_selection() {
    let table = roster();
    table.toggle_row_selection("1").unwrap();
    table.toggle_row_selection("2").unwrap();
    table.set_column_filter("role", ["STUDENT"]).unwrap();

    let summary = table.summary();
    assert_eq!(summary.selected_visible, 1);
    assert_eq!(summary.visible, 2);
    assert_eq!(summary.selected_total, 2);
    assert_eq!(summary.total, 5);
    assert_eq!(summary.to_string(), "1 of 2 row(s) selected.");
}

#[test]
fn test_observer_gets_current_selection_on_subscribe() {
    let table = two_rows();
    table.toggle_row_selection("2").unwrap();
    let seen = recorder(&table);
    assert_eq!(*seen.lock().unwrap(), vec![vec![2]]);
}

#[test]
fn test_observer_includes_hidden_rows_in_insertion_order() {
    let table = roster();
    let seen = recorder(&table);

    table.toggle_row_selection("12").unwrap();
    table.set_column_filter("role", ["STUDENT"]).unwrap();
    table.toggle_row_selection("3").unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.last(), Some(&vec![3, 12]));
    // Subscribe, then two selection changes; the filter change publishes nothing.
    assert_eq!(seen.len(), 3);
}

#[test]
fn test_selected_ids_sink_tracks_latest_snapshot() {
    let table = two_rows();
    let selected = SelectedIds::<i64>::new();
    table.subscribe(selected.clone());

    table.select_all(false);
    assert_eq!(selected.get(), vec![1, 2]);

    table.toggle_row_selection("1").unwrap();
    assert_eq!(selected.get(), vec![2]);
    assert_eq!(selected.revision(), 3);
}

#[test]
fn test_concurrent_toggles_publish_final_selection_last() {
    for _ in 0..500 {
        let table = roster();
        let selected = SelectedIds::<i64>::new();
        table.subscribe(selected.clone());

        std::thread::scope(|scope| {
            for id in ["1", "3"] {
                let table = table.clone();
                scope.spawn(move || {
                    for _ in 0..3 {
                        table.toggle_row_selection(id).unwrap();
                    }
                });
            }
        });

        assert_eq!(selected.get(), table.selected_native_ids());
        assert_eq!(selected.get(), vec![3, 1]);
        assert_eq!(selected.revision(), 7);
    }
}

#[test]
fn test_observer_can_read_table_during_notification() {
    let table = two_rows();
    let reader = table.clone();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    table.subscribe(move |ids: &[i64]| {
        sink.lock().unwrap().push((ids.len(), reader.summary().selected_total));
    });

    table.toggle_row_selection("2").unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![(0, 0), (1, 1)]);
}

#[test]
fn test_non_numeric_ids_are_not_published() {
    let table = Table::with_rows(
        common::columns(),
        vec![
            Person::new("x-1", "Xavier", "STUDENT", &[]),
            Person::new("7", "Yara", "STUDENT", &[]),
        ],
    );
    table.select_all(false);
    assert_eq!(table.selected_native_ids(), vec![7]);
    assert_eq!(table.selected_ids(), vec!["x-1", "7"]);
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let table = two_rows();
    let seen = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&seen);
    let sub = table.subscribe(move |_: &[i64]| *sink.lock().unwrap() += 1);

    assert!(table.unsubscribe(sub));
    assert!(!table.unsubscribe(sub));
    table.select_all(false);
    assert_eq!(*seen.lock().unwrap(), 1);
}

#[test]
fn test_set_rows_prunes_vanished_selection() {
    let table = roster();
    let seen = recorder(&table);
    table.toggle_row_selection("1").unwrap();
    table.toggle_row_selection("4").unwrap();
    table.set_global_filter("ada");

    let mut rows = table.rows();
    rows.retain(|p| p.id != "4");
    table.set_rows(rows);

    assert_eq!(table.selected_ids(), vec!["1"]);
    assert_eq!(table.total_count(), 4);
    assert_eq!(table.global_filter(), "ada");
    assert_eq!(ids(&table.visible_rows()), vec!["1", "12"]);
    assert_eq!(seen.lock().unwrap().last(), Some(&vec![1]));
}

#[test]
fn test_set_rows_keeps_selection_without_publishing() {
    let table = two_rows();
    let seen = recorder(&table);
    table.toggle_row_selection("2").unwrap();

    table.set_rows(table.rows());
    assert_eq!(seen.lock().unwrap().len(), 2);
    assert!(table.is_selected("2"));
}

#[test]
fn test_unknown_column_leaves_state_untouched() {
    let table = roster();
    table.set_global_filter("a");
    table.toggle_sort("name").unwrap();
    let filters = table.filters();
    let sort = table.sort();

    assert_eq!(
        table.set_column_filter("nope", ["x"]),
        Err(TableError::UnknownColumn("nope".to_string()))
    );
    assert_eq!(
        table.set_column_filter("name", ["x"]),
        Err(TableError::NotFilterable("name".to_string()))
    );
    assert_eq!(
        table.toggle_sort("groups"),
        Err(TableError::NotSortable("groups".to_string()))
    );
    assert_eq!(
        table.set_sort_specs(vec![SortSpec::ascending("role"), SortSpec::ascending("id")]),
        Err(TableError::NotSortable("id".to_string()))
    );
    assert_eq!(
        table.set_sort("nope", None),
        Err(TableError::UnknownColumn("nope".to_string()))
    );

    assert_eq!(table.filters(), filters);
    assert_eq!(table.sort(), sort);
}

#[test]
fn test_seeded_column_filter_is_overridable() {
    let table = roster().with_column_filter("groups", ["10"]).unwrap();
    assert_eq!(ids(&table.visible_rows()), vec!["3", "1"]);

    table.set_column_filter("groups", ["30"]).unwrap();
    assert_eq!(ids(&table.visible_rows()), vec!["2", "12"]);
}

#[test]
fn test_option_counts_cover_all_rows() {
    let table = roster();
    table.set_global_filter("nobody");
    let counts = table.option_counts("groups").unwrap();
    assert_eq!(counts.get("10"), Some(&2));
    assert_eq!(counts.get("20"), Some(&2));
    assert_eq!(counts.get("30"), Some(&2));
}

#[test]
fn test_dirty_flag_tracks_changes() {
    let table = two_rows();
    assert!(table.is_dirty());
    table.clear_dirty();
    assert!(!table.is_dirty());

    table.set_global_filter("ada");
    assert!(table.is_dirty());
}

#[test]
fn test_clones_share_state() {
    let table = two_rows();
    let other = table.clone();
    other.toggle_row_selection("1").unwrap();
    assert!(table.is_selected("1"));
    assert_eq!(table.id(), other.id());
}
