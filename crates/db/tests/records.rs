mod support;

use chrono::{DateTime, Utc};
use quota_core::{RecordId, RecordSource};
use rusqlite::Connection;
use support::{insert_transactions, insert_trips, make_transaction, make_trip, setup_db, setup_tenant};

fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("timestamp")
        .with_timezone(&Utc)
}

#[test]
fn count_records_is_zero_for_empty_tenant() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    setup_tenant(db, "acme", "free");
    assert_eq!(db.count_records("acme", RecordSource::Transactions).expect("count"), 0);
    assert_eq!(db.count_records("acme", RecordSource::ReceiptTrips).expect("count"), 0);
    assert_eq!(db.count_records("ghost", RecordSource::Transactions).expect("count"), 0);
}

#[test]
fn count_records_is_scoped_per_tenant_and_source() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_transactions(
        db,
        "acme",
        vec![
            make_transaction(None, "2025-01-01T00:00:00Z"),
            make_transaction(None, "2025-01-02T00:00:00Z"),
        ],
    );
    insert_transactions(db, "other", vec![make_transaction(None, "2025-01-01T00:00:00Z")]);
    insert_trips(db, "acme", vec![make_trip("t-1", "2025-01-03T00:00:00Z")]);

    assert_eq!(db.count_records("acme", RecordSource::Transactions).expect("count"), 2);
    assert_eq!(db.count_records("acme", RecordSource::ReceiptTrips).expect("count"), 1);
    assert_eq!(db.count_records("other", RecordSource::Transactions).expect("count"), 1);
    assert_eq!(db.count_records("other", RecordSource::ReceiptTrips).expect("count"), 0);
}

#[test]
fn insert_receipt_trips_skips_existing_ids() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let first = insert_trips(db, "acme", vec![make_trip("t-1", "2025-01-01T00:00:00Z")]);
    let second = insert_trips(
        db,
        "acme",
        vec![
            make_trip("t-1", "2025-01-01T00:00:00Z"),
            make_trip("t-2", "2025-01-02T00:00:00Z"),
        ],
    );
    assert_eq!(first, 1);
    assert_eq!(second, 1);
}

#[test]
fn timestamps_are_stored_in_utc_millis() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let ids = insert_transactions(db, "acme", vec![make_transaction(None, "2025-01-01T02:00:00+02:00")]);

    let conn = Connection::open(&test_db.path).expect("open conn");
    let stored: String = conn
        .query_row(
            "SELECT ts FROM bank_transaction WHERE id = ?1",
            [ids[0]],
            |row| row.get(0),
        )
        .expect("stored ts");
    assert_eq!(stored, "2025-01-01T00:00:00.000Z");
}

#[test]
fn insert_rejects_malformed_timestamp() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let result = db.insert_bank_transactions("acme", &[make_transaction(None, "yesterday")]);
    assert!(matches!(result, Err(quota_db::DbError::TimeParse(_))));
    assert_eq!(db.count_records("acme", RecordSource::Transactions).expect("count"), 0);
}

#[test]
fn oldest_records_orders_by_timestamp_then_id() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_transactions(
        db,
        "acme",
        vec![
            make_transaction(Some(10), "2025-01-01T00:00:00Z"),
            make_transaction(Some(5), "2025-01-01T00:00:00Z"),
            make_transaction(Some(1), "2025-01-05T00:00:00Z"),
            make_transaction(Some(7), "2024-12-31T23:00:00-02:00"),
        ],
    );

    let oldest = db
        .oldest_records("acme", RecordSource::Transactions, 3)
        .expect("oldest");
    let ids: Vec<RecordId> = oldest.iter().map(|c| c.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            RecordId::Transactions(5),
            RecordId::Transactions(10),
            RecordId::Transactions(7),
        ]
    );
    assert_eq!(oldest[2].timestamp, ts("2025-01-01T01:00:00Z"));
}

#[test]
fn oldest_records_returns_string_ids_for_trips() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    insert_trips(
        db,
        "acme",
        vec![
            make_trip("b", "2025-02-01T00:00:00Z"),
            make_trip("a", "2025-02-01T00:00:00Z"),
            make_trip("c", "2025-01-01T00:00:00Z"),
        ],
    );
    let oldest = db
        .oldest_records("acme", RecordSource::ReceiptTrips, 10)
        .expect("oldest");
    let ids: Vec<RecordId> = oldest.into_iter().map(|c| c.id).collect();
    assert_eq!(
        ids,
        vec![
            RecordId::ReceiptTrips("c".to_string()),
            RecordId::ReceiptTrips("a".to_string()),
            RecordId::ReceiptTrips("b".to_string()),
        ]
    );
    assert!(db
        .oldest_records("acme", RecordSource::ReceiptTrips, 0)
        .expect("empty")
        .is_empty());
}

#[test]
fn delete_records_reports_rows_actually_removed() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let ids = insert_transactions(
        db,
        "acme",
        vec![
            make_transaction(None, "2025-01-01T00:00:00Z"),
            make_transaction(None, "2025-01-02T00:00:00Z"),
        ],
    );

    let targets = vec![
        RecordId::Transactions(ids[0]),
        RecordId::Transactions(ids[1]),
        RecordId::Transactions(9_999),
    ];
    let deleted = db
        .delete_records("acme", RecordSource::Transactions, &targets)
        .expect("delete");
    assert_eq!(deleted, 2);

    let again = db
        .delete_records("acme", RecordSource::Transactions, &targets)
        .expect("delete again");
    assert_eq!(again, 0);
}

#[test]
fn delete_records_never_crosses_tenant_or_source() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let other_ids = insert_transactions(db, "other", vec![make_transaction(None, "2025-01-01T00:00:00Z")]);
    insert_trips(db, "acme", vec![make_trip("shared", "2025-01-01T00:00:00Z")]);

    let deleted = db
        .delete_records("acme", RecordSource::Transactions, &[RecordId::Transactions(other_ids[0])])
        .expect("delete");
    assert_eq!(deleted, 0);

    let mismatched = db
        .delete_records(
            "acme",
            RecordSource::Transactions,
            &[RecordId::ReceiptTrips("shared".to_string())],
        )
        .expect("delete");
    assert_eq!(mismatched, 0);
    assert_eq!(db.count_records("other", RecordSource::Transactions).expect("count"), 1);
    assert_eq!(db.count_records("acme", RecordSource::ReceiptTrips).expect("count"), 1);
}
