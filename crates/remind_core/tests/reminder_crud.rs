use remind_core::{
    Column, Reminder, ReminderFilter, ReminderStore, SqliteReminderStore, StoreHandle,
    FULL_PROJECTION,
};

fn store() -> SqliteReminderStore {
    SqliteReminderStore::new(StoreHandle::open_in_memory().unwrap())
}

#[test]
fn create_then_read_returns_exact_values() {
    let store = store();
    let id = store.create("Buy milk", 1_700_000_000_000).unwrap();

    let loaded = store.get_reminder(id).unwrap().unwrap();
    assert_eq!(loaded, Reminder::new(id, "Buy milk", 1_700_000_000_000));
}

#[test]
fn ids_are_monotonic_and_not_reused_after_delete() {
    let store = store();
    let first = store.create("first", 1).unwrap();
    let second = store.create("second", 2).unwrap();
    assert!(second > first);

    assert_eq!(store.delete_by_id(second).unwrap(), 1);
    let third = store.create("third", 3).unwrap();
    assert!(third > second);
}

#[test]
fn update_with_same_values_twice_reports_one_affected_row_both_times() {
    let store = store();
    let id = store.create("draft", 10).unwrap();

    assert_eq!(store.update(id, "final", 20).unwrap(), 1);
    assert_eq!(store.update(id, "final", 20).unwrap(), 1);

    let loaded = store.get_reminder(id).unwrap().unwrap();
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.time, 20);
}

#[test]
fn update_of_missing_id_reports_zero_affected_rows() {
    let store = store();
    assert_eq!(store.update(999, "nobody home", 1).unwrap(), 0);
}

#[test]
fn delete_removes_exactly_one_row() {
    let store = store();
    let first = store.create("keep a", 1).unwrap();
    let doomed = store.create("remove", 2).unwrap();
    let second = store.create("keep b", 3).unwrap();

    assert_eq!(store.delete_by_id(doomed).unwrap(), 1);

    let remaining: Vec<_> = store
        .list_reminders()
        .unwrap()
        .into_iter()
        .map(|reminder| reminder.id)
        .collect();
    assert_eq!(remaining, vec![first, second]);

    // Deleting the same id again is a no-op, not an error.
    assert_eq!(store.delete_by_id(doomed).unwrap(), 0);
}

#[test]
fn delete_all_empties_the_table() {
    let store = store();
    store.create("one", 1).unwrap();
    store.create("two", 2).unwrap();

    assert_eq!(store.delete_all().unwrap(), 2);
    assert!(store.list_reminders().unwrap().is_empty());
}

#[test]
fn query_of_missing_id_returns_none() {
    let store = store();
    assert!(store.get_reminder(12_345).unwrap().is_none());
}

#[test]
fn projection_limits_populated_columns() {
    let store = store();
    let id = store.create("projected", 42).unwrap();

    let rows = store.query_all(&[Column::Title], None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title.as_deref(), Some("projected"));
    assert_eq!(rows[0].id, None);
    assert_eq!(rows[0].time, None);

    let row = store
        .query_by_id(id, &[Column::Time, Column::Id])
        .unwrap()
        .unwrap();
    assert_eq!(row.time, Some(42));
    assert_eq!(row.id, Some(id));
    assert_eq!(row.title, None);
}

#[test]
fn empty_projection_falls_back_to_full_projection() {
    let store = store();
    let id = store.create("full", 7).unwrap();

    let rows = store.query_all(&[], None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].clone().into_reminder().unwrap(),
        Reminder::new(id, "full", 7)
    );
}

#[test]
fn query_all_with_id_filter_returns_single_row() {
    let store = store();
    let first = store.create("one", 1).unwrap();
    store.create("two", 2).unwrap();

    let rows = store
        .query_all(FULL_PROJECTION, Some(ReminderFilter::ById(first)))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, Some(first));
}

#[test]
fn listing_is_ordered_by_time_then_id() {
    let store = store();
    let late = store.create("late", 200).unwrap();
    let early_a = store.create("early a", 100).unwrap();
    let early_b = store.create("early b", 100).unwrap();

    let ids: Vec<_> = store
        .list_reminders()
        .unwrap()
        .into_iter()
        .map(|reminder| reminder.id)
        .collect();
    assert_eq!(ids, vec![early_a, early_b, late]);
}
