/// HTTP request handlers (REST API)
pub mod auth;
pub mod health;

pub use auth::{login, register, user_id, validate};
pub use health::{health, ping};
