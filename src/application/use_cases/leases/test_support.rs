use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::application::dto::leases::{LeaseFilter, LeaseRecord};
use crate::application::dto::pagination::PageRequest;
use crate::application::dto::units::{UnitFilter, UnitRecord};
use crate::application::ports::lease_repository::LeaseRepository;
use crate::application::ports::tenant_repository::TenantRepository;
use crate::application::ports::unit_repository::UnitRepository;
use crate::domain::leases::{Lease, LeaseFields, LeaseStatus, periods_overlap};
use crate::domain::tenants::{Tenant, TenantFields};
use crate::domain::units::{Unit, UnitFields};

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn lease_fields(unit_id: Uuid, tenant_id: Uuid, start: &str, end: &str) -> LeaseFields {
    LeaseFields {
        unit_id,
        tenant_id,
        start_date: d(start),
        end_date: d(end),
        monthly_rent: dec!(5200),
        payment_to: "Owner".into(),
        notes: None,
    }
}

#[derive(Default)]
pub struct MemLeases {
    rows: Mutex<Vec<Lease>>,
}

impl MemLeases {
    pub fn seed(&self, account_id: Uuid, unit_id: Uuid, start: &str, end: &str, status: LeaseStatus) -> Uuid {
        let lease = Lease {
            id: Uuid::new_v4(),
            account_id,
            fields: lease_fields(unit_id, Uuid::new_v4(), start, end),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = lease.id;
        self.rows.lock().unwrap().push(lease);
        id
    }

    pub fn status_of(&self, id: Uuid) -> LeaseStatus {
        self.rows.lock().unwrap().iter().find(|l| l.id == id).unwrap().status
    }

    fn record(lease: Lease) -> LeaseRecord {
        LeaseRecord {
            lease,
            apartment_number: "1".into(),
            property_id: Uuid::nil(),
            property_address: "הרצל 1".into(),
            tenant_name: "Dana Levi".into(),
        }
    }

    fn matching(&self, pred: impl Fn(&Lease) -> bool) -> Vec<Lease> {
        self.rows.lock().unwrap().iter().filter(|l| pred(l)).cloned().collect()
    }
}

#[async_trait]
impl LeaseRepository for MemLeases {
    async fn list(
        &self,
        account_id: Uuid,
        _filter: &LeaseFilter,
        _page: PageRequest,
    ) -> anyhow::Result<(Vec<LeaseRecord>, i64)> {
        let rows: Vec<LeaseRecord> = self
            .matching(|l| l.account_id == account_id)
            .into_iter()
            .map(Self::record)
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<LeaseRecord>> {
        Ok(self
            .matching(|l| l.account_id == account_id && l.id == id)
            .into_iter()
            .next()
            .map(Self::record))
    }

    async fn list_for_tenant(&self, account_id: Uuid, tenant_id: Uuid) -> anyhow::Result<Vec<Lease>> {
        Ok(self.matching(|l| l.account_id == account_id && l.fields.tenant_id == tenant_id))
    }

    async fn list_for_units(
        &self,
        account_id: Uuid,
        unit_ids: &[Uuid],
        statuses: &[LeaseStatus],
    ) -> anyhow::Result<Vec<Lease>> {
        Ok(self.matching(|l| {
            l.account_id == account_id
                && unit_ids.contains(&l.fields.unit_id)
                && statuses.contains(&l.status)
        }))
    }

    async fn find_overlapping(
        &self,
        account_id: Uuid,
        unit_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Vec<Uuid>> {
        Ok(self
            .matching(|l| {
                l.account_id == account_id
                    && l.fields.unit_id == unit_id
                    && l.status.is_open()
                    && Some(l.id) != exclude
                    && periods_overlap(l.fields.start_date, l.fields.end_date, start, end)
            })
            .into_iter()
            .map(|l| l.id)
            .collect())
    }

    async fn count_open_for_tenant(&self, account_id: Uuid, tenant_id: Uuid) -> anyhow::Result<i64> {
        Ok(self
            .matching(|l| l.account_id == account_id && l.fields.tenant_id == tenant_id && l.status.is_open())
            .len() as i64)
    }

    async fn list_refreshable(&self, account_id: Uuid) -> anyhow::Result<Vec<Lease>> {
        Ok(self.matching(|l| l.account_id == account_id && l.status != LeaseStatus::Terminated))
    }

    async fn list_expiring(&self, account_id: Uuid, until: NaiveDate) -> anyhow::Result<Vec<LeaseRecord>> {
        let mut rows =
            self.matching(|l| l.account_id == account_id && l.status.is_open() && l.fields.end_date <= until);
        rows.sort_by_key(|l| l.fields.end_date);
        Ok(rows.into_iter().map(Self::record).collect())
    }

    async fn list_ending_on(&self, account_id: Uuid, date: NaiveDate) -> anyhow::Result<Vec<Lease>> {
        Ok(self.matching(|l| l.account_id == account_id && l.status.is_open() && l.fields.end_date == date))
    }

    async fn insert(&self, account_id: Uuid, fields: &LeaseFields, status: LeaseStatus) -> anyhow::Result<Lease> {
        let lease = Lease {
            id: Uuid::new_v4(),
            account_id,
            fields: fields.clone(),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(lease.clone());
        Ok(lease)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &LeaseFields,
        status: LeaseStatus,
    ) -> anyhow::Result<Option<Lease>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(l) = rows.iter_mut().find(|l| l.account_id == account_id && l.id == id) else {
            return Ok(None);
        };
        l.fields = fields.clone();
        l.status = status;
        Ok(Some(l.clone()))
    }

    async fn set_status(&self, account_id: Uuid, id: Uuid, status: LeaseStatus) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|l| l.account_id == account_id && l.id == id) {
            Some(l) => {
                l.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|l| !(l.account_id == account_id && l.id == id));
        Ok(rows.len() != before)
    }
}

/// Units and tenants that exist only as ids.
#[derive(Default)]
pub struct KnownIds(pub Vec<Uuid>);

#[async_trait]
impl UnitRepository for KnownIds {
    async fn list(&self, _account_id: Uuid, _filter: &UnitFilter) -> anyhow::Result<Vec<UnitRecord>> {
        Ok(Vec::new())
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<UnitRecord>> {
        if !self.0.contains(&id) {
            return Ok(None);
        }
        let fields: UnitFields = serde_json::from_value(serde_json::json!({
            "property_id": Uuid::nil(),
            "apartment_number": "1",
        }))?;
        Ok(Some(UnitRecord {
            unit: Unit {
                id,
                account_id,
                fields,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            property_address: "הרצל 1".into(),
        }))
    }

    async fn find_by_number(
        &self,
        _account_id: Uuid,
        _property_id: Uuid,
        _apartment_number: &str,
        _exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>> {
        Ok(None)
    }

    async fn insert(&self, _account_id: Uuid, _fields: &UnitFields) -> anyhow::Result<Unit> {
        anyhow::bail!("read-only")
    }

    async fn update(&self, _account_id: Uuid, _id: Uuid, _fields: &UnitFields) -> anyhow::Result<Option<Unit>> {
        anyhow::bail!("read-only")
    }

    async fn delete(&self, _account_id: Uuid, _id: Uuid) -> anyhow::Result<bool> {
        anyhow::bail!("read-only")
    }

    async fn count_leases(&self, _account_id: Uuid, _id: Uuid) -> anyhow::Result<i64> {
        Ok(0)
    }
}

#[async_trait]
impl TenantRepository for KnownIds {
    async fn search(&self, _account_id: Uuid, _search: Option<&str>) -> anyhow::Result<Vec<Tenant>> {
        Ok(Vec::new())
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Tenant>> {
        Ok(self.0.contains(&id).then(|| Tenant {
            id,
            account_id,
            fields: TenantFields {
                name: "Dana Levi".into(),
                email: None,
                phone: None,
                notes: None,
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }))
    }

    async fn find_by_email(
        &self,
        _account_id: Uuid,
        _email: &str,
        _exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>> {
        Ok(None)
    }

    async fn insert(&self, _account_id: Uuid, _fields: &TenantFields) -> anyhow::Result<Tenant> {
        anyhow::bail!("read-only")
    }

    async fn update(&self, _account_id: Uuid, _id: Uuid, _fields: &TenantFields) -> anyhow::Result<Option<Tenant>> {
        anyhow::bail!("read-only")
    }

    async fn delete(&self, _account_id: Uuid, _id: Uuid) -> anyhow::Result<bool> {
        anyhow::bail!("read-only")
    }
}
