use portaria_application::{AccessService, AuthService, EventService, ReportService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_service: AccessService,
    pub report_service: ReportService,
    pub event_service: EventService,
    pub auth_service: AuthService,
}
