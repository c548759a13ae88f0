use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;

/// Shared-secret gate in front of the protected resource groups.
///
/// The `Authorization` header carries the bare key. A `Bearer ` prefix is not
/// stripped, so `Bearer <key>` is rejected as an invalid key.
#[derive(Clone, Debug)]
pub struct ApiKeyGate {
    secret: Option<Arc<str>>,
}

impl ApiKeyGate {
    /// An empty secret counts as unset.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()).map(Arc::from),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Decide whether a request with these headers may proceed.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let header = headers.get(AUTHORIZATION).ok_or_else(|| {
            tracing::warn!("Rejected request without Authorization header");
            ApiError::api_key_required()
        })?;

        let secret = self.secret.as_deref().ok_or_else(|| {
            tracing::error!("API_KEY is not configured; protected routes are unavailable");
            ApiError::ServerMisconfiguration
        })?;

        let token = extract_token(header.as_bytes());
        if token.is_empty() {
            tracing::warn!("Rejected request with empty Authorization header");
            return Err(ApiError::api_key_required());
        }

        if token != secret.as_bytes() {
            tracing::warn!("Rejected request with invalid API key");
            return Err(ApiError::invalid_api_key());
        }

        Ok(())
    }
}

/// Header value with surrounding whitespace removed. Raw bytes are compared so
/// non-UTF-8 values fall through to the mismatch case.
fn extract_token(raw: &[u8]) -> &[u8] {
    let start = raw
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(raw.len());
    let end = raw
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &raw[start..end]
}

/// Axum middleware wrapping [`ApiKeyGate::check`]
pub async fn api_key_middleware(
    State(gate): State<ApiKeyGate>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate.check(request.headers())?;
    tracing::debug!("API key accepted for {} {}", request.method(), request.uri().path());
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    fn headers(value: &'static [u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(value).unwrap());
        headers
    }

    fn status(result: Result<(), ApiError>) -> Option<StatusCode> {
        result.err().map(|e| e.status_code())
    }

    #[test]
    fn missing_header_is_unauthorized_even_without_secret() {
        let gate = ApiKeyGate::new(None);
        assert_eq!(status(gate.check(&HeaderMap::new())), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn unset_secret_fails_closed() {
        let gate = ApiKeyGate::new(Some(String::new()));
        assert!(!gate.is_configured());

        let err = gate.check(&headers(b"anything")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Server configuration error.");
    }

    #[test]
    fn blank_header_is_unauthorized() {
        let gate = ApiKeyGate::new(Some("KEY".into()));
        assert_eq!(status(gate.check(&headers(b"   "))), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn exact_key_passes_and_anything_else_is_forbidden() {
        let gate = ApiKeyGate::new(Some("SuA_Chave".into()));

        assert!(gate.check(&headers(b"SuA_Chave")).is_ok());
        assert_eq!(status(gate.check(&headers(b"sua_chave"))), Some(StatusCode::FORBIDDEN));
        assert_eq!(status(gate.check(&headers(b"WRONG_KEY"))), Some(StatusCode::FORBIDDEN));
        assert_eq!(
            status(gate.check(&headers(b"Bearer SuA_Chave"))),
            Some(StatusCode::FORBIDDEN)
        );
        assert_eq!(status(gate.check(&headers(b"\xffSuA"))), Some(StatusCode::FORBIDDEN));
    }
}
