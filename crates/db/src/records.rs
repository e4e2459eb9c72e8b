use quota_core::{EvictionCandidate, RecordId, RecordSource};
use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::Result;
use crate::helpers::{normalize_ts, parse_ts, table_for};
use crate::types::{NewBankTransaction, NewReceiptTrip};

impl Db {
    /// Inserts bank transactions and returns their row ids in input order.
    pub fn insert_bank_transactions(
        &mut self,
        tenant_id: &str,
        rows: &[NewBankTransaction],
    ) -> Result<Vec<i64>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(rows.len());
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO bank_transaction (id, tenant_id, ts, description, amount_cents)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for row in rows {
                let ts = normalize_ts(&row.ts)?;
                stmt.execute(params![
                    row.id,
                    tenant_id,
                    ts,
                    row.description,
                    row.amount_cents
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;
        Ok(ids)
    }

    /// Inserts receipt trips, skipping ids that already exist.
    pub fn insert_receipt_trips(&mut self, tenant_id: &str, rows: &[NewReceiptTrip]) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO receipt_trip (id, tenant_id, ts, merchant, total_cents)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for row in rows {
                let ts = normalize_ts(&row.ts)?;
                let changed = stmt.execute(params![
                    row.id,
                    tenant_id,
                    ts,
                    row.merchant,
                    row.total_cents
                ])?;
                if changed > 0 {
                    inserted += 1;
                }
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    pub fn count_records(&self, tenant_id: &str, source: RecordSource) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE tenant_id = ?1",
            table_for(source)
        );
        let count = self
            .conn
            .query_row(&sql, params![tenant_id], |row| row.get::<_, Option<i64>>(0))
            .optional()?
            .flatten()
            .unwrap_or(0);
        Ok(count.max(0) as u64)
    }

    /// Oldest records of one source, ordered `ts ASC, id ASC`.
    pub fn oldest_records(
        &self,
        tenant_id: &str,
        source: RecordSource,
        limit: usize,
    ) -> Result<Vec<EvictionCandidate>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let sql = format!(
            r#"
            SELECT id, ts
            FROM {}
            WHERE tenant_id = ?1
            ORDER BY ts ASC, id ASC
            LIMIT ?2
            "#,
            table_for(source)
        );
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = match source {
            RecordSource::Transactions => stmt
                .query_map(params![tenant_id, limit], |row| {
                    Ok((RecordId::Transactions(row.get(0)?), row.get::<_, String>(1)?))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?,
            RecordSource::ReceiptTrips => stmt
                .query_map(params![tenant_id, limit], |row| {
                    Ok((RecordId::ReceiptTrips(row.get(0)?), row.get::<_, String>(1)?))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?,
        };
        rows.into_iter()
            .map(|(id, ts)| -> Result<EvictionCandidate> {
                Ok(EvictionCandidate {
                    id,
                    timestamp: parse_ts(&ts)?,
                })
            })
            .collect()
    }

    /// Deletes the given ids of one source in a single transaction and
    /// returns how many rows were actually removed. Ids of the other source
    /// or belonging to another tenant are not touched.
    pub fn delete_records(
        &self,
        tenant_id: &str,
        source: RecordSource,
        ids: &[RecordId],
    ) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let sql = format!(
            "DELETE FROM {} WHERE tenant_id = ?1 AND id = ?2",
            table_for(source)
        );
        let tx = self.conn.unchecked_transaction()?;
        let mut deleted = 0u64;
        {
            let mut stmt = tx.prepare(&sql)?;
            for id in ids {
                let changed = match (source, id) {
                    (RecordSource::Transactions, RecordId::Transactions(id)) => {
                        stmt.execute(params![tenant_id, id])?
                    }
                    (RecordSource::ReceiptTrips, RecordId::ReceiptTrips(id)) => {
                        stmt.execute(params![tenant_id, id])?
                    }
                    _ => 0,
                };
                deleted += changed as u64;
            }
        }
        tx.commit()?;
        Ok(deleted)
    }
}
