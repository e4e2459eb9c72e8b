use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two record origins that count against one quota.
///
/// Declaration order is the tie-break between sources when two candidates
/// carry the same timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordSource {
    Transactions,
    ReceiptTrips,
}

impl RecordSource {
    pub const ALL: [RecordSource; 2] = [RecordSource::Transactions, RecordSource::ReceiptTrips];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::Transactions => "transactions",
            RecordSource::ReceiptTrips => "receiptTrips",
        }
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a stored record, typed by the source it belongs to.
///
/// Bank transactions are keyed by integer row ids, receipt trips by opaque
/// strings. The two are never coerced into one representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", content = "id", rename_all = "camelCase")]
pub enum RecordId {
    Transactions(i64),
    ReceiptTrips(String),
}

impl RecordId {
    pub fn source(&self) -> RecordSource {
        match self {
            RecordId::Transactions(_) => RecordSource::Transactions,
            RecordId::ReceiptTrips(_) => RecordSource::ReceiptTrips,
        }
    }
}

impl Ord for RecordId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RecordId::Transactions(a), RecordId::Transactions(b)) => a.cmp(b),
            // Byte order, same as SQLite's BINARY collation.
            (RecordId::ReceiptTrips(a), RecordId::ReceiptTrips(b)) => a.as_bytes().cmp(b.as_bytes()),
            _ => self.source().cmp(&other.source()),
        }
    }
}

impl PartialOrd for RecordId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Transactions(id) => write!(f, "transactions:{id}"),
            RecordId::ReceiptTrips(id) => write!(f, "receiptTrips:{id}"),
        }
    }
}

/// A record that may be evicted, serialized as `{source, id, timestamp}`.
///
/// Ordering is oldest first, then source, then id within the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvictionCandidate {
    #[serde(flatten)]
    pub id: RecordId,
    pub timestamp: DateTime<Utc>,
}

impl EvictionCandidate {
    pub fn transaction(id: i64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::Transactions(id),
            timestamp,
        }
    }

    pub fn receipt_trip(id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::ReceiptTrips(id.into()),
            timestamp,
        }
    }

    pub fn source(&self) -> RecordSource {
        self.id.source()
    }
}

impl Ord for EvictionCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for EvictionCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Merges two candidate streams into the `limit` oldest entries overall.
///
/// Inputs do not need to be pre-sorted; the result is the same whichever
/// stream is passed first.
pub fn merge_oldest(
    mut left: Vec<EvictionCandidate>,
    mut right: Vec<EvictionCandidate>,
    limit: usize,
) -> Vec<EvictionCandidate> {
    left.sort();
    right.sort();
    let mut merged = Vec::with_capacity(limit.min(left.len() + right.len()));
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while merged.len() < limit {
        let next = match (left.peek(), right.peek()) {
            (Some(a), Some(b)) => {
                if a <= b {
                    left.next()
                } else {
                    right.next()
                }
            }
            (Some(_), None) => left.next(),
            (None, Some(_)) => right.next(),
            (None, None) => None,
        };
        match next {
            Some(candidate) => merged.push(candidate),
            None => break,
        }
    }
    merged
}

/// Splits candidates into per-source id batches, keeping candidate order.
pub fn partition_by_source(candidates: &[EvictionCandidate]) -> Vec<(RecordSource, Vec<RecordId>)> {
    RecordSource::ALL
        .iter()
        .map(|source| {
            let ids = candidates
                .iter()
                .filter(|candidate| candidate.source() == *source)
                .map(|candidate| candidate.id.clone())
                .collect::<Vec<_>>();
            (*source, ids)
        })
        .filter(|(_, ids)| !ids.is_empty())
        .collect()
}
