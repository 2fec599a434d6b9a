use crate::services::PackageService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/",
    tag = "packages",
    responses(
        (status = 200, description = "Active UC packages")
    )
)]
pub async fn index(package_service: web::Data<PackageService>) -> Result<HttpResponse> {
    match package_service.list_active().await {
        Ok(packages) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": packages
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn packages_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}
