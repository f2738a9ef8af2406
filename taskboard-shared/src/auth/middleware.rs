/// Session authentication middleware for Axum
///
/// This module provides the authorization guard applied to all resource
/// routes. It extracts the opaque session token from the request's cookie
/// header, validates it against the server-side session store, and adds
/// the authenticated identity to request extensions.
///
/// Access is binary: a request either carries a valid unexpired session
/// and proceeds with an [`AuthContext`] attached, or it is rejected with
/// 401 before reaching any handler.
///
/// # Example
///
/// ```no_run
/// use axum::{Extension, Json, Router, middleware, routing::get};
/// use sqlx::PgPool;
/// use taskboard_shared::auth::middleware::{session_auth_middleware, AuthContext};
///
/// async fn protected_handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}!", auth.username)
/// }
///
/// fn router(pool: PgPool) -> Router {
///     let cookie_name = "taskboard_session".to_string();
///     Router::new()
///         .route("/api/projects", get(protected_handler))
///         .layer(middleware::from_fn(move |req, next| {
///             session_auth_middleware(pool.clone(), cookie_name.clone(), req, next)
///         }))
/// }
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;

use super::token::{hash_session_token, validate_session_token_format};
use crate::models::session::Session;

/// Authenticated identity attached to request extensions
///
/// Mirrors the identity snapshot bound to the session at login. Handlers
/// extract it with Axum's `Extension` extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Session row backing this request (used by logout)
    pub session_id: i64,

    /// Authenticated user ID
    pub user_id: i64,

    /// Username snapshot from login
    pub username: String,

    /// Email snapshot from login
    pub email: String,
}

impl AuthContext {
    /// Creates auth context from a validated session
    pub fn from_session(session: &Session) -> Self {
        Self {
            session_id: session.id,
            user_id: session.user_id,
            username: session.username.clone(),
            email: session.email.clone(),
        }
    }
}

/// Error type for the authorization guard
#[derive(Debug)]
pub enum AuthError {
    /// No session cookie, malformed token, unknown token, or expired session
    Unauthorized,

    /// Session store lookup failed
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Unauthorized" })),
            )
                .into_response(),
            AuthError::DatabaseError(msg) => {
                tracing::error!("Session lookup failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Extracts the session token from a request's Cookie header
///
/// Cookie pairs are separated by `; ` per RFC 6265; the first pair whose
/// name matches `cookie_name` wins.
pub fn extract_session_token(req: &Request, cookie_name: &str) -> Option<String> {
    let cookie_header = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?;

    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == cookie_name {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Session authentication middleware
///
/// Validates the session cookie and injects [`AuthContext`] into request
/// extensions.
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - The cookie header or session cookie is missing
/// - The token format is invalid
/// - No unexpired session matches the token hash
pub async fn session_auth_middleware(
    pool: PgPool,
    cookie_name: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_session_token(&req, &cookie_name).ok_or(AuthError::Unauthorized)?;

    if !validate_session_token_format(&token) {
        return Err(AuthError::Unauthorized);
    }

    let session = Session::find_valid_by_token_hash(&pool, &hash_session_token(&token))
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?
        .ok_or(AuthError::Unauthorized)?;

    let auth_context = AuthContext::from_session(&session);
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use chrono::Utc;

    fn request_with_cookie(cookie: &str) -> Request {
        Request::builder()
            .uri("/api/projects")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_extract_session_token_single_cookie() {
        let req = request_with_cookie("taskboard_session=sess_abc123");
        let token = extract_session_token(&req, "taskboard_session");
        assert_eq!(token.as_deref(), Some("sess_abc123"));
    }

    #[test]
    fn test_extract_session_token_multiple_cookies() {
        let req = request_with_cookie("theme=dark; taskboard_session=sess_abc123; lang=en");
        let token = extract_session_token(&req, "taskboard_session");
        assert_eq!(token.as_deref(), Some("sess_abc123"));
    }

    #[test]
    fn test_extract_session_token_missing() {
        let req = request_with_cookie("theme=dark");
        assert!(extract_session_token(&req, "taskboard_session").is_none());

        let req = Request::builder()
            .uri("/api/projects")
            .body(Body::empty())
            .unwrap();
        assert!(extract_session_token(&req, "taskboard_session").is_none());
    }

    #[test]
    fn test_auth_context_from_session() {
        let session = Session {
            id: 5,
            token_hash: "a".repeat(64),
            user_id: 2,
            username: "jane_smith".to_string(),
            email: "jane@example.com".to_string(),
            expires_at: Utc::now(),
            created_at: Utc::now(),
        };

        let context = AuthContext::from_session(&session);
        assert_eq!(context.session_id, 5);
        assert_eq!(context.user_id, 2);
        assert_eq!(context.username, "jane_smith");
        assert_eq!(context.email, "jane@example.com");
    }

    #[test]
    fn test_auth_error_into_response() {
        let response = AuthError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::DatabaseError("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
