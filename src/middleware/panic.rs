use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Terminal handler for `CatchPanicLayer`: a panicking handler still answers with JSON.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!("Handler panicked: {}", detail);
    ApiError::internal_with_detail("Internal Server Error", detail).into_response()
}
