use axum::Form;
use axum::extract::State;
use axum::response::Html;

use portaria_application::SubmitAccessParams;

use crate::dto::AccessFormRequest;
use crate::error::ApiResult;
use crate::pages;
use crate::state::AppState;

/// `GET /` — the public submission form.
pub async fn index_handler() -> Html<String> {
    Html(pages::index(None))
}

/// `POST /` — decide admission, record the attempt, re-render the form
/// with the outcome.
pub async fn submit_access_handler(
    State(state): State<AppState>,
    Form(payload): Form<AccessFormRequest>,
) -> ApiResult<Html<String>> {
    let decision = state
        .access_service
        .submit(SubmitAccessParams {
            name: payload.nome,
            ticket_code: payload.ingresso,
            cpf: payload.cpf,
        })
        .await?;

    Ok(Html(pages::index(Some(&decision))))
}
