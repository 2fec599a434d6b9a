use crate::config::BootstrapConfig;
use crate::database::DbPool;
use crate::error::AppResult;
use crate::utils::{hash_password, normalize_somali_phone};

const DEFAULT_PACKAGES: [(&str, i64, f64); 6] = [
    ("60 UC", 60, 0.99),
    ("325 UC", 325, 4.99),
    ("660 UC", 660, 9.99),
    ("1800 UC", 1800, 24.99),
    ("3850 UC", 3850, 49.99),
    ("8100 UC", 8100, 99.99),
];

/// Idempotent first-run seeding: the bootstrap admin and the default UC
/// packages are created once, keyed on the configured admin email. Runs at
/// process start, outside the domain services.
pub async fn seed_initial_data(pool: &DbPool, bootstrap: &BootstrapConfig) -> AppResult<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(&bootstrap.admin_email)
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        return Ok(());
    }

    let phone_number = normalize_somali_phone(&bootstrap.admin_phone);
    let password_hash = hash_password(&bootstrap.admin_password)?;

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO users (email, password_hash, name, phone_number, phone_verified, is_admin)
        VALUES (?, ?, ?, ?, 1, 1)
        "#,
    )
    .bind(&bootstrap.admin_email)
    .bind(&password_hash)
    .bind(&bootstrap.admin_name)
    .bind(&phone_number)
    .execute(&mut *tx)
    .await?;

    for (name, uc_amount, price) in DEFAULT_PACKAGES {
        sqlx::query("INSERT INTO uc_packages (name, uc_amount, price) VALUES (?, ?, ?)")
            .bind(name)
            .bind(uc_amount)
            .bind(price)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    log::info!("Seeded bootstrap admin and default UC packages");

    Ok(())
}
