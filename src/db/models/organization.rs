use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

/// Tenant boundary grouping users, courses and payments.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
