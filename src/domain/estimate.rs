use chrono::NaiveDateTime;

use crate::domain::money::sanitize_amount;

/// A priced proposal linked to exactly one repair. Created once when staff
/// triggers the send; never updated in place.
#[derive(Debug, Clone)]
pub struct CostEstimate {
    pub id: i64,
    pub repair_id: i64,
    pub work_description: String,
    pub labor_cost: f64,
    pub parts_cost: f64,
    /// Snapshot of labor + parts taken at creation. Aggregation and message
    /// composition recompute instead of trusting this column.
    pub total: f64,
    pub sent: bool,
    pub sent_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}

impl CostEstimate {
    /// Labor + parts as they stand now, ignoring the stored snapshot.
    pub fn computed_total(&self) -> f64 {
        sanitize_amount(self.labor_cost) + sanitize_amount(self.parts_cost)
    }
}

/// Estimate form payload. The stored `total` column is derived from it
/// exactly once, at insert time.
#[derive(Debug, Clone)]
pub struct NewEstimate {
    pub repair_id: i64,
    pub work_description: String,
    pub labor_cost: f64,
    pub parts_cost: f64,
}

impl NewEstimate {
    pub fn total(&self) -> f64 {
        sanitize_amount(self.labor_cost) + sanitize_amount(self.parts_cost)
    }
}
