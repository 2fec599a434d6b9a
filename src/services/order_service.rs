use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use regex::Regex;

#[derive(Clone)]
pub struct OrderService {
    pool: DbPool,
}

impl OrderService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Place an order for a UC package. The transaction and its payment are
    /// written in one storage transaction; both land or neither does.
    pub async fn place_order(&self, user_id: i64, request: PlaceOrderRequest) -> AppResult<i64> {
        let account_id_format = Regex::new(r"^[A-Za-z0-9]{6,20}$").unwrap();
        if !account_id_format.is_match(&request.game_account_id) {
            return Err(AppError::ValidationError(
                "Game account id must be 6-20 alphanumeric characters".to_string(),
            ));
        }

        if request.payment_method.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Payment method is required".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let package = sqlx::query_as::<_, UcPackage>(
            "SELECT id, name, uc_amount, price, is_active FROM uc_packages \
             WHERE id = ? AND is_active = 1",
        )
        .bind(request.package_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found or inactive".to_string()))?;

        // uc_amount and price are snapshots; later package edits must not
        // retroactively change placed orders
        let transaction_id = sqlx::query(
            r#"
            INSERT INTO uc_transactions (user_id, game_account_id, uc_amount, price)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&request.game_account_id)
        .bind(package.uc_amount)
        .bind(package.price)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        sqlx::query(
            r#"
            INSERT INTO payments (user_id, transaction_id, amount, payment_method)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(transaction_id)
        .bind(package.price)
        .bind(&request.payment_method)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        log::info!(
            "User {user_id} placed order {transaction_id} for package {}",
            package.id
        );

        Ok(transaction_id)
    }

    /// Caller's order history, newest first.
    pub async fn get_user_transactions(&self, user_id: i64) -> AppResult<Vec<TransactionResponse>> {
        let transactions = sqlx::query_as::<_, UcTransaction>(
            r#"
            SELECT id, user_id, game_account_id, uc_amount, price, status, created_at
            FROM uc_transactions
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect())
    }
}
