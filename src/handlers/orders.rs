use crate::handlers::get_user_id_from_request;
use crate::models::*;
use crate::services::{OrderService, PackageService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's transactions, newest first"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn dashboard(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match order_service.get_user_transactions(user_id).await {
        Ok(transactions) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": transactions
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/buy_uc",
    tag = "orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active packages available to order"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn buy_uc_form(package_service: web::Data<PackageService>) -> Result<HttpResponse> {
    match package_service.list_active().await {
        Ok(packages) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": packages
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/buy_uc",
    tag = "orders",
    security(("bearer_auth" = [])),
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Order placed, waiting for approval", body = PlaceOrderResponse),
        (status = 400, description = "Invalid game account id or payment method"),
        (status = 404, description = "Package not found or inactive")
    )
)]
pub async fn buy_uc(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    request: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match order_service.place_order(user_id, request.into_inner()).await {
        Ok(transaction_id) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": PlaceOrderResponse { transaction_id },
            "message": "UC order placed successfully! Waiting for approval."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn orders_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard))
        .route("/buy_uc", web::get().to(buy_uc_form))
        .route("/buy_uc", web::post().to(buy_uc));
}
