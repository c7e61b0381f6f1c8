//! Web API 层。
//!
//! 提供 Axum 路由，将 HTTP 请求委托给应用层的用例服务。
//! 请求者身份从 Bearer 令牌中解析，以显式参数传给服务。

mod auth;
mod error;
mod routes;
mod state;

pub use auth::{Claims, JwtService, LoginResponse};
pub use config::JwtConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
