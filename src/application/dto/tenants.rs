use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::leases::Lease;
use crate::domain::tenants::Tenant;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TenantDetail {
    #[serde(flatten)]
    pub tenant: Tenant,
    pub leases: Vec<Lease>,
}
