// handlers/protected/mod.rs - Handlers behind the shared API key
//
// Route Prefix: /tasks, /goals
// Middleware: middleware::auth::api_key_middleware (route layer, matched routes only)

pub mod resource;

pub use resource::{collection_get, collection_post, record_delete, record_get, routes, SharedRepository};
