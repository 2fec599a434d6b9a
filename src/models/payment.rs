use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Settlement record shadowing a transaction, created in the same storage
/// transaction as its `UcTransaction` and only ever mutated as a side effect
/// of that transaction's status change.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: i64,
    pub user_id: i64,
    pub transaction_id: i64,
    pub amount: f64,
    pub payment_method: String,
    pub status: PaymentStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i64,
    pub user_id: i64,
    pub transaction_id: i64,
    pub amount: f64,
    pub payment_method: String,
    pub status: PaymentStatus,
    pub created_at: NaiveDateTime,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            user_id: payment.user_id,
            transaction_id: payment.transaction_id,
            amount: payment.amount,
            payment_method: payment.payment_method,
            status: payment.status,
            created_at: payment.created_at,
        }
    }
}
