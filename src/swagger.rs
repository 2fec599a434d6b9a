use actix_web::{HttpResponse, web};
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::refresh,
        handlers::packages::index,
        handlers::orders::dashboard,
        handlers::orders::buy_uc_form,
        handlers::orders::buy_uc,
        handlers::admin::admin_panel,
        handlers::admin::approve_transaction,
        handlers::admin::reject_transaction,
        handlers::admin::list_packages,
        handlers::admin::create_package,
        handlers::admin::deactivate_package,
        handlers::admin::api_stats,
    ),
    components(
        schemas(
            User,
            UserResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UcPackage,
            PackageResponse,
            CreatePackageRequest,
            UcTransaction,
            TransactionStatus,
            TransactionResponse,
            PlaceOrderRequest,
            PlaceOrderResponse,
            Payment,
            PaymentStatus,
            PaymentResponse,
            AdminPanelResponse,
            StatsResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "packages", description = "UC package storefront"),
        (name = "orders", description = "Order placement and history"),
        (name = "admin", description = "Admin approval panel"),
    ),
    info(
        title = "UC Marketplace API",
        version = "1.0.0",
        description = "Marketplace backend for purchasing in-game UC"
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api-docs/openapi.json", web::get().to(openapi_json));
}
