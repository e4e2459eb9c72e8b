use serde::{Deserialize, Serialize};

use crate::records::RecordSource;

/// Record counts for one tenant across both sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub bank_transactions: u64,
    pub receipt_trips: u64,
    pub total: u64,
}

impl UsageSnapshot {
    pub fn new(bank_transactions: u64, receipt_trips: u64) -> Self {
        Self {
            bank_transactions,
            receipt_trips,
            total: bank_transactions.saturating_add(receipt_trips),
        }
    }

    pub fn count_for(&self, source: RecordSource) -> u64 {
        match source {
            RecordSource::Transactions => self.bank_transactions,
            RecordSource::ReceiptTrips => self.receipt_trips,
        }
    }
}

/// How far a tenant sits above a target cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapDecision {
    pub current_total: u64,
    pub target_cap: u64,
    pub to_delete: u64,
    pub would_exceed: bool,
}

impl CapDecision {
    pub fn compute(current_total: u64, target_cap: u64) -> Self {
        Self {
            current_total,
            target_cap,
            to_delete: current_total.saturating_sub(target_cap),
            would_exceed: current_total > target_cap,
        }
    }

    /// Decision for a rejected (non-positive) target: nothing to delete.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTally {
    pub transactions: u64,
    pub receipt_trips: u64,
}

impl SourceTally {
    pub fn record(&mut self, source: RecordSource, deleted: u64) {
        match source {
            RecordSource::Transactions => {
                self.transactions = self.transactions.saturating_add(deleted)
            }
            RecordSource::ReceiptTrips => {
                self.receipt_trips = self.receipt_trips.saturating_add(deleted)
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.transactions.saturating_add(self.receipt_trips)
    }
}

/// Outcome of an eviction run. `deleted` always equals the table sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforcementResult {
    pub deleted: u64,
    pub tables: SourceTally,
    pub remaining: u64,
}

impl EnforcementResult {
    /// Nothing was deleted; `remaining` is the headroom under the target.
    pub fn unchanged(decision: &CapDecision) -> Self {
        Self {
            deleted: 0,
            tables: SourceTally::default(),
            remaining: decision.target_cap.saturating_sub(decision.current_total),
        }
    }

    pub fn from_tally(decision: &CapDecision, tables: SourceTally) -> Self {
        let deleted = tables.total();
        let left = decision.current_total.saturating_sub(deleted);
        Self {
            deleted,
            tables,
            remaining: decision.target_cap.saturating_sub(left),
        }
    }
}
