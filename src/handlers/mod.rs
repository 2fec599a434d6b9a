use actix_web::{HttpMessage, HttpRequest};

pub mod admin;
pub mod auth;
pub mod orders;
pub mod packages;

pub use admin::admin_config;
pub use auth::auth_config;
pub use orders::orders_config;
pub use packages::packages_config;

/// User id stashed in the request extensions by the auth middleware.
pub(crate) fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}
