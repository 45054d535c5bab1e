use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use chrono::NaiveDateTime;

use portaria_core::{AppError, AppResult};
use portaria_domain::{EventId, NewEvent};

use crate::dto::CreateEventRequest;
use crate::error::ApiResult;
use crate::pages;
use crate::state::AppState;

/// Format of the HTML `datetime-local` input.
const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// `GET /controle` — event list.
pub async fn controle_handler(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let events = state.event_service.list().await?;
    Ok(Html(pages::controle(&events, chrono::Utc::now())))
}

/// `GET /evento/criar` — creation form.
pub async fn create_event_page_handler() -> Html<String> {
    Html(pages::create_event())
}

/// `POST /evento/criar` — creates the event and returns to the list.
pub async fn create_event_handler(
    State(state): State<AppState>,
    Form(payload): Form<CreateEventRequest>,
) -> ApiResult<Redirect> {
    let event = NewEvent::new(
        payload.nome,
        parse_datetime_local(&payload.data_inicio)?,
        parse_datetime_local(&payload.data_fim)?,
        payload.local,
        payload.descricao,
    )?;

    state.event_service.create(event).await?;
    Ok(Redirect::to("/controle"))
}

/// `POST /evento/{id}/apagar` — deletes one event.
pub async fn delete_event_handler(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> ApiResult<Redirect> {
    state.event_service.delete(EventId::new(event_id)).await?;
    Ok(Redirect::to("/controle"))
}

/// `GET /evento/{id}` — report scoped to one event.
pub async fn event_report_handler(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> ApiResult<Html<String>> {
    let event_id = EventId::new(event_id);
    let event = state.event_service.get(event_id).await?;
    let report = state.report_service.event_report(event_id).await?;

    Ok(Html(pages::report(&report, Some(&event))))
}

fn parse_datetime_local(value: &str) -> AppResult<chrono::DateTime<chrono::Utc>> {
    NaiveDateTime::parse_from_str(value, DATETIME_LOCAL_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|error| AppError::Validation(format!("invalid datetime '{value}': {error}")))
}

#[cfg(test)]
mod tests {
    use super::parse_datetime_local;

    #[test]
    fn parses_datetime_local_input() {
        let parsed = parse_datetime_local("2026-08-29T20:30");
        assert!(parsed.is_ok());
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_datetime_local("2026-08-29 20:30").is_err());
        assert!(parse_datetime_local("").is_err());
    }
}
