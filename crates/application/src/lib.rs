//! Application services and ports.

#![forbid(unsafe_code)]

mod access_service;
mod auth_service;
mod event_service;
mod report_service;

pub use access_service::{
    AccessListing, AccessLogRepository, AccessRecord, AccessService, SubmitAccessParams,
};
pub use auth_service::{AdminRecord, AdminRepository, AuthService, PasswordHasher};
pub use event_service::{EventRepository, EventService};
pub use report_service::{AccessReport, ReportFilter, ReportService};
