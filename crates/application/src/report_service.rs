//! Report aggregation and CSV export over the access log.

use std::sync::Arc;

use portaria_core::{AppError, AppResult};
use portaria_domain::EventId;

use crate::access_service::{AccessListing, AccessLogRepository, AccessRecord};

/// CSV header, canonical column order. "Motivo" is appended only when the
/// deployment resolved a reason column.
const CSV_HEADERS: [&str; 4] = ["Nome", "CPF", "Data", "Status"];

/// Optional restrictions on a report query.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Exact status value to keep ("Liberado" / "Negado").
    pub status: Option<String>,
}

/// Report rows plus the aggregate counters shown on the admin panel.
#[derive(Debug, Clone)]
pub struct AccessReport {
    /// Matching rows.
    pub records: Vec<AccessRecord>,
    /// Whether rows carry a denial-reason column.
    pub includes_reason: bool,
    /// Row count.
    pub total: usize,
    /// Rows with status "Liberado".
    pub admitted: usize,
    /// Rows with status "Negado".
    pub denied: usize,
}

impl AccessReport {
    fn from_listing(listing: AccessListing) -> Self {
        let admitted = listing
            .records
            .iter()
            .filter(|r| r.status == "Liberado")
            .count();
        let denied = listing
            .records
            .iter()
            .filter(|r| r.status == "Negado")
            .count();

        Self {
            total: listing.records.len(),
            admitted,
            denied,
            includes_reason: listing.includes_reason,
            records: listing.records,
        }
    }
}

/// Builds admin reports and exports from persisted attempts.
#[derive(Clone)]
pub struct ReportService {
    repository: Arc<dyn AccessLogRepository>,
}

impl ReportService {
    /// Creates the service over the access-log repository.
    #[must_use]
    pub fn new(repository: Arc<dyn AccessLogRepository>) -> Self {
        Self { repository }
    }

    /// Returns the filtered rows and their aggregate counts.
    pub async fn report(&self, filter: ReportFilter) -> AppResult<AccessReport> {
        let listing = self.repository.list(filter.status.as_deref()).await?;
        Ok(AccessReport::from_listing(listing))
    }

    /// Returns the rows recorded against one event, with aggregates.
    pub async fn event_report(&self, event_id: EventId) -> AppResult<AccessReport> {
        let records = self.repository.list_for_event(event_id).await?;
        Ok(AccessReport::from_listing(AccessListing {
            records,
            includes_reason: false,
        }))
    }

    /// Serializes every persisted attempt as CSV: one header row, then one
    /// line per record, columns in canonical order.
    pub async fn export_csv(&self) -> AppResult<Vec<u8>> {
        let listing = self.repository.list(None).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut headers: Vec<&str> = CSV_HEADERS.to_vec();
        if listing.includes_reason {
            headers.push("Motivo");
        }
        writer
            .write_record(&headers)
            .map_err(|error| AppError::Internal(format!("failed to write csv header: {error}")))?;

        for record in &listing.records {
            let mut row = vec![
                record.name.as_str(),
                record.cpf.as_str(),
                record.timestamp.as_str(),
                record.status.as_str(),
            ];
            if listing.includes_reason {
                row.push(record.reason.as_deref().unwrap_or(""));
            }
            writer
                .write_record(&row)
                .map_err(|error| AppError::Internal(format!("failed to write csv row: {error}")))?;
        }

        writer
            .into_inner()
            .map_err(|error| AppError::Internal(format!("failed to flush csv buffer: {error}")))
    }

    /// Deletes every recorded attempt.
    pub async fn clear(&self) -> AppResult<()> {
        self.repository.clear_all().await
    }
}
