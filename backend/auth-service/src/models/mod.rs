/// Data models for authentication
pub mod user;

pub use user::{
    LoginRequest, LoginResponse, RegisterRequest, User, UserIdRequest, UserIdResponse,
    UserResponse, ValidateRequest, ValidateResponse,
};
