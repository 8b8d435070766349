use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub package_id: Uuid,
    pub amount: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub payment_date: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct PaymentPackage {
    pub id: Uuid,
    pub student_id: Uuid,
    pub courses_bought: i32,
    pub courses_booked: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl PaymentPackage {
    /// Remaining credits: purchased minus consumed.
    pub fn credits_remaining(&self) -> i32 {
        self.courses_bought - self.courses_booked
    }
}

/// One allowance restricting which kind of course a package may book.
/// Marked used once consumed.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct PaymentPackageAllowance {
    pub id: Uuid,
    pub payment_package_id: Uuid,
    pub course_permitted: String,
    pub used: bool,
}
