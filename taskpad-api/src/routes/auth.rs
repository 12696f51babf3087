/// Authentication endpoints
///
/// This module provides the session lifecycle endpoints:
///
/// - `POST /api/register` - Register, then log straight in
/// - `POST /api/login` - Log in
/// - `GET /api/logout` - Destroy the session
/// - `GET /api/check-session` - Report who is logged in
///
/// Registration and login both end with an established session: the
/// session id is cycled, the safe user projection is written to the
/// store, and the cookie goes out with the response. Nothing is returned
/// to the client before those writes complete.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use validator::Validate;

use taskpad_shared::auth::{credentials, password, session as auth_session};
use taskpad_shared::models::user::{CreateUser, SafeUser, User};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::MessageResponse,
};

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username
    #[validate(length(min = 1, message = "Username and password cannot be empty"))]
    pub username: String,

    /// Password (stored only as an Argon2id hash)
    #[validate(length(min = 1, message = "Username and password cannot be empty"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username
    #[validate(length(min = 1, message = "Username and password cannot be empty"))]
    pub username: String,

    /// Password
    #[validate(length(min = 1, message = "Username and password cannot be empty"))]
    pub password: String,
}

/// Response for register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Human-readable outcome
    pub message: String,

    /// Safe user projection (id and username, never the hash)
    pub user: SafeUser,
}

/// Response for check-session
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckSessionResponse {
    /// Whether the requesting session is authenticated
    #[serde(rename = "loggedIn")]
    pub logged_in: bool,

    /// The authenticated user, when logged in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<auth_session::SessionUser>,

    /// Explanation, when not logged in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Register a new user
///
/// Creates the account and establishes an authenticated session in one
/// step (auto-login), so a freshly registered client is immediately
/// logged in.
///
/// # Errors
///
/// - `400 Bad Request`: empty username or password, or username taken
/// - `500 Internal Server Error`: hash or store failure
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    // Application-side uniqueness check; the unique index backs it up
    // against races
    if User::find_by_username(&state.db, &req.username).await?.is_some() {
        tracing::debug!(username = %req.username, "Registration rejected: username taken");
        return Err(ApiError::Conflict(
            "username already exists, try logging in".to_string(),
        ));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            password_hash,
        },
    )
    .await?;

    auth_session::establish(&session, &user).await?;
    tracing::info!(user_id = %user.id, "Registered and logged in");

    Ok(Json(AuthResponse {
        message: "Registered & logged in".to_string(),
        user: SafeUser::from(&user),
    }))
}

/// Login
///
/// Verifies credentials and establishes the session. The two rejection
/// cases (unknown username, wrong password) carry distinct messages but
/// the same status code.
///
/// # Errors
///
/// - `400 Bad Request`: empty fields or bad credentials
/// - `500 Internal Server Error`: hash or store failure
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    let user = credentials::verify_credentials(&state.db, &req.username, &req.password).await?;

    User::update_last_login(&state.db, user.id).await?;

    auth_session::establish(&session, &user).await?;
    tracing::info!(user_id = %user.id, "Logged in");

    Ok(Json(AuthResponse {
        message: "Logged in".to_string(),
        user: SafeUser::from(&user),
    }))
}

/// Logout
///
/// Destroys the session record and clears the cookie. A store failure is
/// a 500, not a silent success.
pub async fn logout(session: Session) -> ApiResult<Json<MessageResponse>> {
    auth_session::clear(&session).await?;

    Ok(Json(MessageResponse::new("Logged out")))
}

/// Check session
///
/// Reports the authenticated user for the requesting session, or 401
/// with `loggedIn: false` when there is none. Clients call this on
/// focus/navigation to re-validate their login state.
pub async fn check_session(session: Session) -> ApiResult<Response> {
    let response = match auth_session::current(&session).await? {
        Some(user) => (
            StatusCode::OK,
            Json(CheckSessionResponse {
                logged_in: true,
                user: Some(user),
                message: None,
            }),
        ),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(CheckSessionResponse {
                logged_in: false,
                user: None,
                message: Some("Not logged in".to_string()),
            }),
        ),
    };

    Ok(response.into_response())
}
