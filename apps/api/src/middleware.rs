use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use portaria_core::{AdminIdentity, AppError};
use tower_sessions::Session;

use crate::error::ApiResult;
use crate::handlers::auth::SESSION_ADMIN_KEY;
use crate::state::AppState;

/// Gate for the admin routes.
///
/// A missing or expired session redirects to the login page instead of
/// answering 401; the panel is browser-first. A surviving session is not
/// trusted by itself: the account row is re-checked on every request so a
/// demoted or deleted admin loses access immediately.
pub async fn require_admin(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session
        .get::<AdminIdentity>(SESSION_ADMIN_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?;

    let Some(identity) = identity else {
        return Ok(Redirect::to("/login").into_response());
    };

    if !state.auth_service.verify_admin(identity.username()).await? {
        return Ok(Redirect::to("/login").into_response());
    }

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
