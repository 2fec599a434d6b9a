use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UcPackage {
    pub id: i64,
    pub name: String,
    pub uc_amount: i64,
    pub price: f64,
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePackageRequest {
    #[schema(example = "325 UC")]
    pub name: String,
    #[schema(example = 325)]
    pub uc_amount: i64,
    #[schema(example = 4.99)]
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackageResponse {
    pub id: i64,
    pub name: String,
    pub uc_amount: i64,
    pub price: f64,
    pub is_active: bool,
}

impl From<UcPackage> for PackageResponse {
    fn from(package: UcPackage) -> Self {
        Self {
            id: package.id,
            name: package.name,
            uc_amount: package.uc_amount,
            price: package.price,
            is_active: package.is_active,
        }
    }
}
