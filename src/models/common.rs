use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{TransactionResponse, UserResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminPanelResponse {
    pub pending_transactions: Vec<TransactionResponse>,
    pub users: Vec<UserResponse>,
    pub total_earnings: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub total_users: i64,
    pub pending_orders: i64,
    /// Sum of completed payment amounts
    pub total_earnings: f64,
    pub completed_orders: i64,
}
