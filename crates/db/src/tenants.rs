use quota_core::{PlanTier, Tenant};
use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::{DbError, Result};
use crate::helpers::{now_ts, row_to_tenant};

impl Db {
    /// Creates the tenant or moves it to `plan`. Called by the billing side,
    /// never by quota enforcement.
    pub fn upsert_tenant(&self, tenant_id: &str, plan: &PlanTier) -> Result<Tenant> {
        let now = now_ts();
        self.conn.execute(
            r#"
            INSERT INTO tenant (id, plan, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET plan = excluded.plan
            "#,
            params![tenant_id, plan.as_str(), now],
        )?;
        self.get_tenant(tenant_id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    pub fn get_tenant(&self, tenant_id: &str) -> Result<Option<Tenant>> {
        self.conn
            .query_row(
                r#"
                SELECT id, plan, created_at
                FROM tenant
                WHERE id = ?1
                "#,
                params![tenant_id],
                row_to_tenant,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn tenant_plan(&self, tenant_id: &str) -> Result<Option<PlanTier>> {
        Ok(self.get_tenant(tenant_id)?.map(|tenant| tenant.plan))
    }
}
