/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login (establishes the server-side session and sets the cookie)
/// - Logout (destroys the session)
///
/// # Endpoints
///
/// - `POST /api/register` - Register new user
/// - `POST /api/login` - Login and receive the session cookie
/// - `POST /api/logout` - Logout (session required)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{
        middleware::AuthContext,
        password,
        token::generate_session_token,
    },
    models::{
        session::{CreateSession, Session},
        user::{CreateUser, User},
    },
};
use validator::Validate;

/// Register request
///
/// Fields default to empty strings when absent so that a missing field is
/// reported as a 400 validation error rather than a body-decode failure.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Email address
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Password
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Register response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Human-readable confirmation
    pub message: String,

    /// ID of the newly created user
    pub user_id: i64,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Password
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Message-only response (login, logout, deletes)
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/register
/// Content-Type: application/json
///
/// {
///   "username": "john_doe",
///   "email": "john@example.com",
///   "password": "pw123"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "User registered successfully",
///   "userId": 1
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing field, or email already in use
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate()?;

    // Explicit duplicate check; the unique constraint on email is the
    // backstop for a concurrent register with the same address.
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already in use".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Login endpoint
///
/// Verifies credentials and establishes a server-side session bound to
/// the user's `{id, username, email}`. The opaque session token is
/// returned only in the Set-Cookie header.
///
/// The error for an unknown email and for a wrong password is the same
/// generic message, so the response body does not reveal which part
/// was wrong.
///
/// # Endpoint
///
/// ```text
/// POST /api/login
/// Content-Type: application/json
///
/// {
///   "email": "john@example.com",
///   "password": "pw123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing field
/// - `401 Unauthorized`: Invalid email or password
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let (token, token_hash) = generate_session_token();
    let ttl_seconds = state.config.session.ttl_seconds();

    Session::create(
        &state.db,
        CreateSession {
            token_hash,
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            ttl_seconds,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User logged in");

    let cookie = session_cookie(
        state.session_cookie_name(),
        &token,
        ttl_seconds,
        state.config.api.production,
    )?;

    let mut response = Json(MessageResponse {
        message: "Login successful".to_string(),
    })
    .into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);

    Ok(response)
}

/// Logout endpoint
///
/// Destroys the current session and expires the cookie. Requires a valid
/// session (the authorization guard runs before this handler).
///
/// # Endpoint
///
/// ```text
/// POST /api/logout
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `500 Internal Server Error`: Session store delete failed
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Response> {
    let deleted = Session::delete(&state.db, auth.session_id).await?;
    if !deleted {
        return Err(ApiError::InternalError("Logout failed".to_string()));
    }

    tracing::info!(user_id = auth.user_id, "User logged out");

    // Max-Age=0 tells the client to drop the cookie immediately
    let cookie = session_cookie(
        state.session_cookie_name(),
        "",
        0,
        state.config.api.production,
    )?;

    let mut response = Json(MessageResponse {
        message: "Logout successful".to_string(),
    })
    .into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);

    Ok(response)
}

/// Builds the session cookie header value
///
/// HttpOnly keeps the token away from scripts; SameSite=Lax limits
/// cross-site sends; Secure is added in production (HTTPS).
fn session_cookie(
    name: &str,
    token: &str,
    max_age_seconds: i64,
    secure: bool,
) -> Result<HeaderValue, ApiError> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name, token, max_age_seconds
    );
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::InternalError(format!("Invalid cookie value: {}", e)))
}
