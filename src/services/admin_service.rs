use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;

#[derive(Clone)]
pub struct AdminService {
    pool: DbPool,
}

impl AdminService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn approve(&self, admin_id: i64, transaction_id: i64) -> AppResult<()> {
        self.transition(
            admin_id,
            transaction_id,
            TransactionStatus::Approved,
            PaymentStatus::Completed,
        )
        .await
    }

    pub async fn reject(&self, admin_id: i64, transaction_id: i64) -> AppResult<()> {
        self.transition(
            admin_id,
            transaction_id,
            TransactionStatus::Rejected,
            PaymentStatus::Failed,
        )
        .await
    }

    /// pending -> approved/rejected, exactly once. The status change is a
    /// guarded UPDATE conditional on the current status, so two concurrent
    /// approvals cannot both apply; the linked payment moves in the same
    /// storage transaction.
    async fn transition(
        &self,
        admin_id: i64,
        transaction_id: i64,
        to: TransactionStatus,
        payment_to: PaymentStatus,
    ) -> AppResult<()> {
        self.ensure_admin(admin_id).await?;

        let mut tx = self.pool.begin().await?;

        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM uc_transactions WHERE id = ?")
            .bind(transaction_id)
            .fetch_one(&mut *tx)
            .await?;
        if exists == 0 {
            return Err(AppError::NotFound("Transaction not found".to_string()));
        }

        let updated = sqlx::query(
            "UPDATE uc_transactions SET status = ? WHERE id = ? AND status = 'pending'",
        )
        .bind(to)
        .bind(transaction_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AppError::InvalidTransition(format!(
                "Transaction {transaction_id} is not pending"
            )));
        }

        sqlx::query("UPDATE payments SET status = ? WHERE transaction_id = ?")
            .bind(payment_to)
            .bind(transaction_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        log::info!("Admin {admin_id} moved transaction {transaction_id} to {to}");

        Ok(())
    }

    /// The web facade gates admin routes; the service still refuses
    /// non-admin callers.
    async fn ensure_admin(&self, admin_id: i64) -> AppResult<()> {
        let is_admin: Option<bool> = sqlx::query_scalar("SELECT is_admin FROM users WHERE id = ?")
            .bind(admin_id)
            .fetch_optional(&self.pool)
            .await?;

        match is_admin {
            Some(true) => Ok(()),
            _ => Err(AppError::Forbidden),
        }
    }

    pub async fn pending_transactions(&self) -> AppResult<Vec<TransactionResponse>> {
        let transactions = sqlx::query_as::<_, UcTransaction>(
            r#"
            SELECT id, user_id, game_account_id, uc_amount, price, status, created_at
            FROM uc_transactions
            WHERE status = 'pending'
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect())
    }

    pub async fn total_earnings(&self) -> AppResult<f64> {
        let total: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0.0) FROM payments WHERE status = 'completed'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    pub async fn stats(&self) -> AppResult<StatsResponse> {
        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let pending_orders: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM uc_transactions WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await?;

        let completed_orders: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM uc_transactions WHERE status = 'approved'")
                .fetch_one(&self.pool)
                .await?;

        Ok(StatsResponse {
            total_users,
            pending_orders,
            total_earnings: self.total_earnings().await?,
            completed_orders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::test_pool;
    use crate::services::{AuthService, OrderService};
    use crate::utils::JwtService;

    async fn seed_user(pool: &DbPool, email: &str, phone: &str, is_admin: bool) -> i64 {
        sqlx::query(
            "INSERT INTO users (email, password_hash, name, phone_number, is_admin) \
             VALUES (?, 'hash', 'Test', ?, ?)",
        )
        .bind(email)
        .bind(phone)
        .bind(is_admin)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    async fn seed_order(pool: &DbPool, user_id: i64, price: f64) -> i64 {
        let package_id: i64 =
            sqlx::query("INSERT INTO uc_packages (name, uc_amount, price) VALUES ('325 UC', 325, ?)")
                .bind(price)
                .execute(pool)
                .await
                .unwrap()
                .last_insert_rowid();

        OrderService::new(pool.clone())
            .place_order(
                user_id,
                PlaceOrderRequest {
                    game_account_id: "player12345".to_string(),
                    package_id,
                    payment_method: "Zaad".to_string(),
                },
            )
            .await
            .unwrap()
    }

    async fn payment_status(pool: &DbPool, transaction_id: i64) -> PaymentStatus {
        sqlx::query_scalar("SELECT status FROM payments WHERE transaction_id = ?")
            .bind(transaction_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_approve_completes_payment() {
        let pool = test_pool().await;
        let admin_id = seed_user(&pool, "admin@example.com", "+252631111111", true).await;
        let buyer_id = seed_user(&pool, "b@example.com", "+252632222222", false).await;
        let transaction_id = seed_order(&pool, buyer_id, 4.99).await;
        let admin = AdminService::new(pool.clone());

        admin.approve(admin_id, transaction_id).await.unwrap();

        let status: TransactionStatus =
            sqlx::query_scalar("SELECT status FROM uc_transactions WHERE id = ?")
                .bind(transaction_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(status, TransactionStatus::Approved);
        assert_eq!(
            payment_status(&pool, transaction_id).await,
            PaymentStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_reject_fails_payment() {
        let pool = test_pool().await;
        let admin_id = seed_user(&pool, "admin@example.com", "+252631111111", true).await;
        let buyer_id = seed_user(&pool, "b@example.com", "+252632222222", false).await;
        let transaction_id = seed_order(&pool, buyer_id, 4.99).await;
        let admin = AdminService::new(pool.clone());

        admin.reject(admin_id, transaction_id).await.unwrap();

        assert_eq!(
            payment_status(&pool, transaction_id).await,
            PaymentStatus::Failed
        );
    }

    #[tokio::test]
    async fn test_second_approval_is_invalid_transition() {
        let pool = test_pool().await;
        let admin_id = seed_user(&pool, "admin@example.com", "+252631111111", true).await;
        let buyer_id = seed_user(&pool, "b@example.com", "+252632222222", false).await;
        let transaction_id = seed_order(&pool, buyer_id, 4.99).await;
        let admin = AdminService::new(pool.clone());

        admin.approve(admin_id, transaction_id).await.unwrap();
        let err = admin.approve(admin_id, transaction_id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));

        // payment keeps the state from the first approval
        assert_eq!(
            payment_status(&pool, transaction_id).await,
            PaymentStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_reject_after_approve_is_invalid_transition() {
        let pool = test_pool().await;
        let admin_id = seed_user(&pool, "admin@example.com", "+252631111111", true).await;
        let buyer_id = seed_user(&pool, "b@example.com", "+252632222222", false).await;
        let transaction_id = seed_order(&pool, buyer_id, 4.99).await;
        let admin = AdminService::new(pool.clone());

        admin.approve(admin_id, transaction_id).await.unwrap();
        let err = admin.reject(admin_id, transaction_id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn test_unknown_transaction_not_found() {
        let pool = test_pool().await;
        let admin_id = seed_user(&pool, "admin@example.com", "+252631111111", true).await;
        let admin = AdminService::new(pool);

        let err = admin.approve(admin_id, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_non_admin_caller_forbidden() {
        let pool = test_pool().await;
        let buyer_id = seed_user(&pool, "b@example.com", "+252632222222", false).await;
        let transaction_id = seed_order(&pool, buyer_id, 4.99).await;
        let admin = AdminService::new(pool.clone());

        let err = admin.approve(buyer_id, transaction_id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
        assert_eq!(
            payment_status(&pool, transaction_id).await,
            PaymentStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_stats_track_approvals() {
        let pool = test_pool().await;
        let admin_id = seed_user(&pool, "admin@example.com", "+252631111111", true).await;
        let buyer_id = seed_user(&pool, "b@example.com", "+252632222222", false).await;
        let first = seed_order(&pool, buyer_id, 4.99).await;
        let second = seed_order(&pool, buyer_id, 0.99).await;
        let admin = AdminService::new(pool);

        let stats = admin.stats().await.unwrap();
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.pending_orders, 2);
        assert_eq!(stats.completed_orders, 0);
        assert_eq!(stats.total_earnings, 0.0);

        admin.approve(admin_id, first).await.unwrap();
        admin.reject(admin_id, second).await.unwrap();

        let stats = admin.stats().await.unwrap();
        assert_eq!(stats.pending_orders, 0);
        assert_eq!(stats.completed_orders, 1);
        // only completed payments count toward earnings
        assert_eq!(stats.total_earnings, 4.99);
    }

    #[tokio::test]
    async fn test_full_purchase_flow() {
        let pool = test_pool().await;
        let admin_id = seed_user(&pool, "admin@example.com", "+252639999999", true).await;
        let auth = AuthService::new(pool.clone(), JwtService::new("test-secret", 3600, 7200));

        auth.register(RegisterRequest {
            email: "buyer@example.com".to_string(),
            password: "p1".to_string(),
            confirm_password: "p1".to_string(),
            name: "Buyer".to_string(),
            phone_number: "0631111111".to_string(),
        })
        .await
        .unwrap();

        // same number, different spacing
        let login = auth
            .login(LoginRequest {
                phone_number: "63 1111111".to_string(),
                password: "p1".to_string(),
            })
            .await
            .unwrap();

        let package_id: i64 =
            sqlx::query("INSERT INTO uc_packages (name, uc_amount, price) VALUES ('325 UC', 325, 4.99)")
                .execute(&pool)
                .await
                .unwrap()
                .last_insert_rowid();

        let orders = OrderService::new(pool.clone());
        let transaction_id = orders
            .place_order(
                login.user.id,
                PlaceOrderRequest {
                    game_account_id: "player12345".to_string(),
                    package_id,
                    payment_method: "Zaad".to_string(),
                },
            )
            .await
            .unwrap();

        let placed = &orders.get_user_transactions(login.user.id).await.unwrap()[0];
        assert_eq!(placed.status, TransactionStatus::Pending);
        assert_eq!(placed.uc_amount, 325);

        let payment = sqlx::query_as::<_, Payment>(
            "SELECT id, user_id, transaction_id, amount, payment_method, status, created_at \
             FROM payments WHERE transaction_id = ?",
        )
        .bind(transaction_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(payment.amount, 4.99);
        assert_eq!(payment.status, PaymentStatus::Pending);

        let admin = AdminService::new(pool.clone());
        admin.approve(admin_id, transaction_id).await.unwrap();

        let approved = &orders.get_user_transactions(login.user.id).await.unwrap()[0];
        assert_eq!(approved.status, TransactionStatus::Approved);
        assert_eq!(
            payment_status(&pool, transaction_id).await,
            PaymentStatus::Completed
        );

        let stats = admin.stats().await.unwrap();
        assert_eq!(stats.total_earnings, 4.99);
        assert_eq!(stats.completed_orders, 1);
    }
}
