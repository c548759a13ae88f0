pub mod auth;
pub mod panic;

pub use auth::{api_key_middleware, ApiKeyGate};
pub use panic::handle_panic;
