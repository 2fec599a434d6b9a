pub mod common;
pub mod package;
pub mod payment;
pub mod transaction;
pub mod user;

pub use common::*;
pub use package::*;
pub use payment::*;
pub use transaction::*;
pub use user::*;
