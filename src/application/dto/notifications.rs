use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::notifications::{Notification, NotificationStatus, NotificationType};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationFilter {
    pub status: Option<NotificationStatus>,
    pub notification_type: Option<NotificationType>,
    pub lease_id: Option<Uuid>,
}

/// A notification with the lease context a recipient needs.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationRecord {
    #[serde(flatten)]
    pub notification: Notification,
    pub tenant_name: String,
    pub tenant_email: Option<String>,
    pub property_address: String,
    pub apartment_number: String,
    pub lease_end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ProcessResult {
    pub processed: usize,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BulkRetryResult {
    pub retried: usize,
    pub result: ProcessResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationSettings {
    pub days_before_expiration: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GenerateResult {
    pub created: usize,
}
