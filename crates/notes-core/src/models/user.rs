//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated account, read-only from the client's side
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
