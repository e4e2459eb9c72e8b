#![allow(dead_code)]

use std::path::PathBuf;

use quota_core::{PlanTier, Tenant};
use quota_db::{Db, NewBankTransaction, NewReceiptTrip};
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn setup_tenant(db: &mut Db, tenant_id: &str, plan: &str) -> Tenant {
    db.upsert_tenant(tenant_id, &PlanTier::new(plan))
        .expect("tenant")
}

pub fn make_transaction(id: Option<i64>, ts: &str) -> NewBankTransaction {
    NewBankTransaction {
        id,
        ts: ts.to_string(),
        description: Some("coffee".to_string()),
        amount_cents: -450,
    }
}

pub fn make_trip(id: &str, ts: &str) -> NewReceiptTrip {
    NewReceiptTrip {
        id: id.to_string(),
        ts: ts.to_string(),
        merchant: Some("grocer".to_string()),
        total_cents: 2_599,
    }
}

pub fn insert_transactions(db: &mut Db, tenant_id: &str, rows: Vec<NewBankTransaction>) -> Vec<i64> {
    db.insert_bank_transactions(tenant_id, &rows)
        .expect("insert transactions")
}

pub fn insert_trips(db: &mut Db, tenant_id: &str, rows: Vec<NewReceiptTrip>) -> usize {
    db.insert_receipt_trips(tenant_id, &rows)
        .expect("insert trips")
}
