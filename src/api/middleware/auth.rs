//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use sha2::{Digest, Sha256};

use crate::{error::AppError, state::AppState};

/// Authenticates requests against the configured owner token.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// The comparison goes through SHA-256 digests so mismatched tokens take
/// the same time regardless of where they diverge.
///
/// # Errors
///
/// Returns `401 Unauthorized` (with a `WWW-Authenticate: Bearer` header
/// per RFC 6750) if the Authorization header is missing, malformed, or
/// carries the wrong token.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let req = Request::from_parts(parts, body);

    if !token_matches(&token, &st.config.admin_token) {
        return Err(AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({"reason": "Invalid token"}),
        ));
    }

    Ok(next.run(req).await)
}

fn token_matches(provided: &str, expected: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_matches_identical() {
        assert!(token_matches("secret-token", "secret-token"));
    }

    #[test]
    fn test_token_matches_rejects_different() {
        assert!(!token_matches("secret-token", "other-token"));
        assert!(!token_matches("", "secret-token"));
        assert!(!token_matches("secret-token2", "secret-token"));
    }
}
