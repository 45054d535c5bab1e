use axum::Json;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use portaria_core::AppError;
use tower_sessions::Session;

use crate::dto::{GenericMessageResponse, LoginRequest};
use crate::error::{ApiError, ApiResult};
use crate::extract::Payload;
use crate::pages;
use crate::state::AppState;

/// Session key holding the authenticated [`portaria_core::AdminIdentity`].
pub const SESSION_ADMIN_KEY: &str = "admin_identity";

/// `GET /login`.
pub async fn login_page_handler() -> Html<String> {
    Html(pages::login(None))
}

/// `POST /login` — authenticates an administrator.
///
/// Accepts form or JSON credentials. JSON callers get status codes
/// (401 bad credentials, 403 non-admin account); browser callers get the
/// form re-rendered with the error inline, or a redirect to the report on
/// success. Either way the credential lives in the HTTP-only session
/// cookie, never in the response body.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    payload: Payload<LoginRequest>,
) -> ApiResult<Response> {
    let is_json = payload.is_json();
    let credentials = payload.into_inner();

    match state
        .auth_service
        .login(&credentials.usuario, &credentials.senha)
        .await
    {
        Ok(identity) => {
            // Fresh session id on privilege change.
            session.cycle_id().await.map_err(|error| {
                AppError::Internal(format!("failed to cycle session id: {error}"))
            })?;
            session
                .insert(SESSION_ADMIN_KEY, &identity)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to persist session identity: {error}"))
                })?;

            if is_json {
                Ok(Json(GenericMessageResponse {
                    msg: "Login efetuado.".to_owned(),
                })
                .into_response())
            } else {
                Ok(Redirect::to("/relatorio").into_response())
            }
        }
        Err(error @ (AppError::Unauthorized(_) | AppError::Forbidden(_))) => {
            if is_json {
                Err(ApiError(error))
            } else {
                let message = match &error {
                    AppError::Unauthorized(message) | AppError::Forbidden(message) => {
                        message.clone()
                    }
                    _ => error.to_string(),
                };
                Ok(Html(pages::login(Some(&message))).into_response())
            }
        }
        Err(error) => Err(error.into()),
    }
}

/// `GET /logout` — drops the session and its cookie.
pub async fn logout_handler(session: Session) -> ApiResult<Redirect> {
    session
        .flush()
        .await
        .map_err(|error| AppError::Internal(format!("failed to clear session: {error}")))?;
    Ok(Redirect::to("/login"))
}
