use std::sync::Arc;

use axum::{handler::HandlerWithoutStateExt, http::HeaderValue, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::models::ResourceKind;
use crate::database::{MemoryResourceRepository, PgResourceRepository};
use crate::handlers::{self, protected::SharedRepository, public};
use crate::middleware::{handle_panic, ApiKeyGate};

/// Everything the router needs: one repository per collection plus the key gate.
#[derive(Clone)]
pub struct AppState {
    pub tasks: SharedRepository,
    pub goals: SharedRepository,
    pub gate: ApiKeyGate,
}

impl AppState {
    pub fn new(tasks: SharedRepository, goals: SharedRepository, gate: ApiKeyGate) -> Self {
        Self { tasks, goals, gate }
    }

    /// Fresh, empty in-process collections. Used by tests and `STORE_BACKEND=memory`.
    pub fn in_memory(api_key: Option<String>) -> Self {
        Self::new(
            Arc::new(MemoryResourceRepository::new(ResourceKind::Task)),
            Arc::new(MemoryResourceRepository::new(ResourceKind::Goal)),
            ApiKeyGate::new(api_key),
        )
    }

    pub fn postgres(pool: sqlx::PgPool, api_key: Option<String>) -> Self {
        Self::new(
            Arc::new(PgResourceRepository::new(ResourceKind::Task, pool.clone())),
            Arc::new(PgResourceRepository::new(ResourceKind::Goal, pool)),
            ApiKeyGate::new(api_key),
        )
    }

    pub fn repositories(&self) -> [&SharedRepository; 2] {
        [&self.tasks, &self.goals]
    }
}

/// Compose the full HTTP surface.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let static_files = ServeDir::new(&config.server.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(handlers::not_found.into_service());

    let router = Router::new()
        // Public
        .merge(public_routes(state.clone()))
        // Protected: the gate runs only for matched /tasks and /goals routes
        .merge(handlers::protected::routes(state.tasks.clone(), state.gate.clone()))
        .merge(handlers::protected::routes(state.goals.clone(), state.gate.clone()))
        // Static files, then the JSON 404
        .fallback_service(static_files)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(config));

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn public_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(public::root))
        .route("/users", get(public::users))
        .route("/health", get(public::health))
        .route("/api-docs", get(public::docs_ui))
        .route("/api-docs/openapi.json", get(public::openapi_json))
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.security.enable_cors {
        return CorsLayer::new();
    }
    if config.security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
