// handlers/public/mod.rs - Public handlers (no API key required)
//
// Landing payloads, health reporting and the generated API documentation.

pub mod docs;
pub mod health;
pub mod home;

pub use docs::{docs_ui, openapi_json};
pub use health::health;
pub use home::{root, users};
