use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Record is a single timestamped entry stored in the `records` table.
///
#[derive(FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i32,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
