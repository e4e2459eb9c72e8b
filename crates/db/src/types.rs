/// Bank transaction row to insert. `id` is assigned by SQLite when absent.
#[derive(Debug, Clone)]
pub struct NewBankTransaction {
    pub id: Option<i64>,
    pub ts: String,
    pub description: Option<String>,
    pub amount_cents: i64,
}

/// Receipt trip row to insert, keyed by an opaque external id.
#[derive(Debug, Clone)]
pub struct NewReceiptTrip {
    pub id: String,
    pub ts: String,
    pub merchant: Option<String>,
    pub total_cents: i64,
}
