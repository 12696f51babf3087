/// Session authentication guard
///
/// Routes layered with [`require_login`] reject requests whose session
/// carries no authenticated user. On success the [`SessionUser`] payload
/// is inserted into the request extensions for handlers that want the
/// caller's identity.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware::from_fn, routing::get, Router};
/// use taskpad_api::middleware::auth::require_login;
///
/// let guarded: Router = Router::new()
///     .route("/projects", get(|| async { "..." }))
///     .layer(from_fn(require_login));
/// ```

use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::Session;

use taskpad_shared::auth::session as auth_session;

use crate::error::ApiError;

/// Rejects the request with 401 unless the session is authenticated
///
/// Any authenticated session passes: authorization beyond "logged in" is
/// deliberately flat.
pub async fn require_login(
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = auth_session::current(&session)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Not logged in".to_string()))?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
