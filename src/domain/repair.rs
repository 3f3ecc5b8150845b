use chrono::NaiveDateTime;

/// A customer's repair intake, as stored in the `repairs` table.
///
/// `ready_for_pickup` and `pickup_notified_at` are set together: the flag is
/// never true without the timestamp of the moment it was flipped.
#[derive(Debug, Clone)]
pub struct RepairJob {
    pub id: i64,
    pub created_at: Option<NaiveDateTime>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub make: String,
    pub displacement: String,
    pub notes: String,
    pub user_id: Option<i64>,
    pub ready_for_pickup: bool,
    pub pickup_notified_at: Option<NaiveDateTime>,
    pub private_notes: Option<String>,
}

impl RepairJob {
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn bike_label(&self) -> String {
        format!("{} {}", self.make, self.displacement)
    }
}

/// Intake form payload. Id and creation time are assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewRepairJob {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub make: String,
    pub displacement: String,
    pub notes: String,
    pub user_id: Option<i64>,
}
