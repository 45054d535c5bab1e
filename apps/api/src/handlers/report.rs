use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};

use portaria_application::ReportFilter;

use crate::dto::ReportQuery;
use crate::error::ApiResult;
use crate::pages;
use crate::state::AppState;

/// `GET /relatorio?status=` — report table with aggregates.
pub async fn report_handler(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Html<String>> {
    let report = state
        .report_service
        .report(ReportFilter {
            status: query.status,
        })
        .await?;

    Ok(Html(pages::report(&report, None)))
}

/// `GET /exportar_csv` — CSV download of every recorded attempt.
pub async fn export_csv_handler(State(state): State<AppState>) -> ApiResult<Response> {
    let bytes = state.report_service.export_csv().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=relatorio_acessos.csv",
            ),
        ],
        bytes,
    )
        .into_response())
}

/// `POST /limpar_registros` — deletes every recorded attempt.
pub async fn clear_records_handler(State(state): State<AppState>) -> ApiResult<Redirect> {
    state.report_service.clear().await?;
    Ok(Redirect::to("/relatorio"))
}
