use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::application::dto::leases::{LeaseFilter, LeaseRecord};
use crate::application::dto::pagination::PageRequest;
use crate::domain::leases::{Lease, LeaseFields, LeaseStatus};

#[async_trait]
pub trait LeaseRepository: Send + Sync {
    async fn list(
        &self,
        account_id: Uuid,
        filter: &LeaseFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<LeaseRecord>, i64)>;
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<LeaseRecord>>;
    async fn list_for_tenant(&self, account_id: Uuid, tenant_id: Uuid) -> anyhow::Result<Vec<Lease>>;
    async fn list_for_units(
        &self,
        account_id: Uuid,
        unit_ids: &[Uuid],
        statuses: &[LeaseStatus],
    ) -> anyhow::Result<Vec<Lease>>;
    /// FUTURE or ACTIVE leases of the unit sharing at least one day with the period.
    async fn find_overlapping(
        &self,
        account_id: Uuid,
        unit_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Vec<Uuid>>;
    async fn count_open_for_tenant(&self, account_id: Uuid, tenant_id: Uuid) -> anyhow::Result<i64>;
    /// Every lease whose status the calendar may still change.
    async fn list_refreshable(&self, account_id: Uuid) -> anyhow::Result<Vec<Lease>>;
    /// FUTURE or ACTIVE leases ending on or before `until`, soonest first.
    async fn list_expiring(
        &self,
        account_id: Uuid,
        until: NaiveDate,
    ) -> anyhow::Result<Vec<LeaseRecord>>;
    /// FUTURE or ACTIVE leases ending exactly on `date`.
    async fn list_ending_on(&self, account_id: Uuid, date: NaiveDate) -> anyhow::Result<Vec<Lease>>;
    async fn insert(
        &self,
        account_id: Uuid,
        fields: &LeaseFields,
        status: LeaseStatus,
    ) -> anyhow::Result<Lease>;
    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &LeaseFields,
        status: LeaseStatus,
    ) -> anyhow::Result<Option<Lease>>;
    async fn set_status(
        &self,
        account_id: Uuid,
        id: Uuid,
        status: LeaseStatus,
    ) -> anyhow::Result<bool>;
    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
}
