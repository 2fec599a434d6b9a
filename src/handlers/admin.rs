use crate::error::{AppError, AppResult};
use crate::handlers::get_user_id_from_request;
use crate::models::*;
use crate::services::{AdminService, PackageService, UserService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

/// Facade-level admin gate; the admin service re-checks the caller itself.
async fn require_admin(user_service: &UserService, req: &HttpRequest) -> AppResult<i64> {
    let user_id = get_user_id_from_request(req)
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))?;

    let user = user_service.get_user_by_id(user_id).await?;
    if !user.is_admin {
        return Err(AppError::Forbidden);
    }

    Ok(user_id)
}

async fn load_panel(
    admin_service: &AdminService,
    user_service: &UserService,
) -> AppResult<AdminPanelResponse> {
    Ok(AdminPanelResponse {
        pending_transactions: admin_service.pending_transactions().await?,
        users: user_service.list_users().await?,
        total_earnings: admin_service.total_earnings().await?,
    })
}

#[utoipa::path(
    get,
    path = "/admin",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending transactions, all users and total earnings", body = AdminPanelResponse),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn admin_panel(
    admin_service: web::Data<AdminService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&user_service, &req).await {
        return Ok(e.error_response());
    }

    match load_panel(&admin_service, &user_service).await {
        Ok(panel) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": panel
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/approve_transaction/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction approved, payment completed"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Transaction not found"),
        (status = 409, description = "Transaction is no longer pending")
    )
)]
pub async fn approve_transaction(
    admin_service: web::Data<AdminService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let admin_id = match require_admin(&user_service, &req).await {
        Ok(admin_id) => admin_id,
        Err(e) => return Ok(e.error_response()),
    };

    match admin_service.approve(admin_id, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Transaction approved!"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/reject_transaction/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction rejected, payment failed"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Transaction not found"),
        (status = 409, description = "Transaction is no longer pending")
    )
)]
pub async fn reject_transaction(
    admin_service: web::Data<AdminService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let admin_id = match require_admin(&user_service, &req).await {
        Ok(admin_id) => admin_id,
        Err(e) => return Ok(e.error_response()),
    };

    match admin_service.reject(admin_id, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Transaction rejected!"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/packages",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All packages, active and retired"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_packages(
    package_service: web::Data<PackageService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&user_service, &req).await {
        return Ok(e.error_response());
    }

    match package_service.list_all().await {
        Ok(packages) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": packages
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/packages",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = CreatePackageRequest,
    responses(
        (status = 200, description = "Package created", body = PackageResponse),
        (status = 400, description = "Invalid package fields"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn create_package(
    package_service: web::Data<PackageService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
    request: web::Json<CreatePackageRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&user_service, &req).await {
        return Ok(e.error_response());
    }

    match package_service.create(request.into_inner()).await {
        Ok(package) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": package,
            "message": "Package added successfully!"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/packages/{id}/deactivate",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Package id")),
    responses(
        (status = 200, description = "Package retired from the storefront"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Package not found")
    )
)]
pub async fn deactivate_package(
    package_service: web::Data<PackageService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&user_service, &req).await {
        return Ok(e.error_response());
    }

    match package_service.deactivate(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Package deactivated"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Marketplace statistics", body = StatsResponse),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn api_stats(
    admin_service: web::Data<AdminService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&user_service, &req).await {
        return Ok(e.error_response());
    }

    match admin_service.stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(stats)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("", web::get().to(admin_panel))
            .route("/approve_transaction/{id}", web::get().to(approve_transaction))
            .route("/reject_transaction/{id}", web::get().to(reject_transaction))
            .route("/packages", web::get().to(list_packages))
            .route("/packages", web::post().to(create_package))
            .route("/packages/{id}/deactivate", web::post().to(deactivate_package)),
    )
    .route("/api/stats", web::get().to(api_stats));
}
