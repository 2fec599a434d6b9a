use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Approved => write!(f, "approved"),
            TransactionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// One purchase order. `uc_amount` and `price` are snapshots taken from the
/// package at order time; later package edits never touch placed orders.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UcTransaction {
    pub id: i64,
    pub user_id: i64,
    pub game_account_id: String,
    pub uc_amount: i64,
    pub price: f64,
    pub status: TransactionStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    #[schema(example = "player12345")]
    pub game_account_id: String,
    #[schema(example = 1)]
    pub package_id: i64,
    #[schema(example = "Zaad")]
    pub payment_method: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceOrderResponse {
    pub transaction_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i64,
    pub user_id: i64,
    pub game_account_id: String,
    pub uc_amount: i64,
    pub price: f64,
    pub status: TransactionStatus,
    pub created_at: NaiveDateTime,
}

impl From<UcTransaction> for TransactionResponse {
    fn from(transaction: UcTransaction) -> Self {
        Self {
            id: transaction.id,
            user_id: transaction.user_id,
            game_account_id: transaction.game_account_id,
            uc_amount: transaction.uc_amount,
            price: transaction.price,
            status: transaction.status,
            created_at: transaction.created_at,
        }
    }
}
