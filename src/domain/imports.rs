use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

crate::text_enum!(ImportType {
    Properties => "properties",
    Owners => "owners",
    Ownerships => "ownerships",
    Mortgages => "mortgages",
    PlotInfo => "plot-info",
});

crate::text_enum!(ImportStatus {
    Success => "success",
    Partial => "partial",
    Failed => "failed",
});

impl ImportStatus {
    pub fn from_counts(successful: usize, failed: usize) -> Self {
        if successful == 0 {
            ImportStatus::Failed
        } else if failed == 0 {
            ImportStatus::Success
        } else {
            ImportStatus::Partial
        }
    }
}

/// Spreadsheet-style row number: data starts on line 2 below the header.
pub fn row_number(index: usize) -> usize {
    index + 2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImportRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub import_type: ImportType,
    pub status: ImportStatus,
    pub total_rows: usize,
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<RowError>,
    pub imported_record_ids: Vec<Uuid>,
    pub rolled_back: bool,
    pub created_at: DateTime<Utc>,
}

impl ImportRecord {
    pub fn new(
        account_id: Uuid,
        import_type: ImportType,
        total_rows: usize,
        errors: Vec<RowError>,
        imported_record_ids: Vec<Uuid>,
    ) -> Self {
        let successful = imported_record_ids.len();
        let failed = errors.len();
        Self {
            id: Uuid::new_v4(),
            account_id,
            import_type,
            status: ImportStatus::from_counts(successful, failed),
            total_rows,
            successful,
            failed,
            errors,
            imported_record_ids,
            rolled_back: false,
            created_at: Utc::now(),
        }
    }
}
