use quota_core::{RecordSource, UsageSnapshot};
use tracing::debug;

use crate::error::Result;
use crate::store::RecordStore;

/// Sums record counts across both sources for one tenant.
pub struct UsageCounter<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> UsageCounter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn get_usage(&self, tenant_id: &str) -> Result<UsageSnapshot> {
        let bank_transactions = self.store.count(tenant_id, RecordSource::Transactions)?;
        let receipt_trips = self.store.count(tenant_id, RecordSource::ReceiptTrips)?;
        let snapshot = UsageSnapshot::new(bank_transactions, receipt_trips);
        debug!(
            tenant_id,
            bank_transactions = snapshot.bank_transactions,
            receipt_trips = snapshot.receipt_trips,
            total = snapshot.total,
            "usage counted"
        );
        Ok(snapshot)
    }
}
