//! Bearer-token gate. Every request outside a small public allow-list must
//! carry a valid `Authorization: Bearer <jwt>` header; the verified claims
//! are attached to the request as a [`Principal`] extension.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::auth::{Principal, TOKEN_PREFIX};
use crate::error::DomainError;
use crate::middleware::RequestId;
use crate::state::AppState;

/// Paths reachable without a token. Matching is by case-insensitive
/// whole-path equality, never by prefix.
const PUBLIC_PATHS: &[&str] = &[
    "/api/login",
    "/api/logout",
    "/api/refresh",
    "/api/account",
    "/health",
];

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|p| path.eq_ignore_ascii_case(p))
}

pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    match authenticate(&state, &request) {
        Ok(principal) => {
            debug!(account_id = principal.account_id, "token accepted");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(err) => err.with_request_id(request_id).into_response(),
    }
}

fn authenticate(state: &AppState, request: &Request) -> Result<Principal, DomainError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(DomainError::MissingToken)?;

    let token = header
        .strip_prefix(TOKEN_PREFIX)
        .ok_or(DomainError::MissingToken)?;

    let claims = state.signer.verify(token)?;
    Ok(Principal::from(claims))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_paths_match_case_insensitively() {
        assert!(is_public("/api/login"));
        assert!(is_public("/API/Login"));
        assert!(is_public("/health"));
    }

    #[test]
    fn public_match_is_whole_path_only() {
        assert!(!is_public("/api/login/extra"));
        assert!(!is_public("/api/account/1/device/list"));
        assert!(!is_public("/api"));
    }
}
