use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;

#[derive(Clone)]
pub struct PackageService {
    pool: DbPool,
}

impl PackageService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Packages offered to buyers. Retired packages are deactivated, never
    /// deleted, so they stay out of this listing but keep their ids.
    pub async fn list_active(&self) -> AppResult<Vec<PackageResponse>> {
        let packages = sqlx::query_as::<_, UcPackage>(
            "SELECT id, name, uc_amount, price, is_active FROM uc_packages \
             WHERE is_active = 1 ORDER BY price ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(packages.into_iter().map(PackageResponse::from).collect())
    }

    pub async fn list_all(&self) -> AppResult<Vec<PackageResponse>> {
        let packages = sqlx::query_as::<_, UcPackage>(
            "SELECT id, name, uc_amount, price, is_active FROM uc_packages ORDER BY price ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(packages.into_iter().map(PackageResponse::from).collect())
    }

    pub async fn create(&self, request: CreatePackageRequest) -> AppResult<PackageResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Package name is required".to_string(),
            ));
        }
        if request.uc_amount <= 0 {
            return Err(AppError::ValidationError(
                "UC amount must be positive".to_string(),
            ));
        }
        if request.price <= 0.0 {
            return Err(AppError::ValidationError(
                "Price must be positive".to_string(),
            ));
        }

        let package_id =
            sqlx::query("INSERT INTO uc_packages (name, uc_amount, price) VALUES (?, ?, ?)")
                .bind(&request.name)
                .bind(request.uc_amount)
                .bind(request.price)
                .execute(&self.pool)
                .await?
                .last_insert_rowid();

        let package = sqlx::query_as::<_, UcPackage>(
            "SELECT id, name, uc_amount, price, is_active FROM uc_packages WHERE id = ?",
        )
        .bind(package_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(PackageResponse::from(package))
    }

    pub async fn deactivate(&self, package_id: i64) -> AppResult<()> {
        let updated = sqlx::query("UPDATE uc_packages SET is_active = 0 WHERE id = ?")
            .bind(package_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound("Package not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::test_pool;

    fn create_request(name: &str, uc_amount: i64, price: f64) -> CreatePackageRequest {
        CreatePackageRequest {
            name: name.to_string(),
            uc_amount,
            price,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let packages = PackageService::new(test_pool().await);

        packages
            .create(create_request("60 UC", 60, 0.99))
            .await
            .unwrap();
        packages
            .create(create_request("325 UC", 325, 4.99))
            .await
            .unwrap();

        let active = packages.list_active().await.unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].name, "60 UC");
        assert!(active.iter().all(|p| p.is_active));
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_values() {
        let packages = PackageService::new(test_pool().await);

        assert!(matches!(
            packages.create(create_request("bad", 0, 1.0)).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            packages.create(create_request("bad", 60, 0.0)).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            packages.create(create_request("  ", 60, 1.0)).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_deactivated_package_leaves_active_listing() {
        let packages = PackageService::new(test_pool().await);

        let package = packages
            .create(create_request("60 UC", 60, 0.99))
            .await
            .unwrap();
        packages.deactivate(package.id).await.unwrap();

        assert!(packages.list_active().await.unwrap().is_empty());
        assert_eq!(packages.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deactivate_missing_package() {
        let packages = PackageService::new(test_pool().await);
        assert!(matches!(
            packages.deactivate(99).await,
            Err(AppError::NotFound(_))
        ));
    }
}
