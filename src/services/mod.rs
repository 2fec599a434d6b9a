pub mod admin_service;
pub mod auth_service;
pub mod order_service;
pub mod package_service;
pub mod user_service;

pub use admin_service::*;
pub use auth_service::*;
pub use order_service::*;
pub use package_service::*;
pub use user_service::*;
