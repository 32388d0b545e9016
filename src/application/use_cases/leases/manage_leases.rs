use chrono::NaiveDate;
use uuid::Uuid;

use crate::application::dto::leases::{LeaseFilter, LeaseRecord};
use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::lease_repository::LeaseRepository;
use crate::application::ports::tenant_repository::TenantRepository;
use crate::application::ports::unit_repository::UnitRepository;
use crate::domain::leases::{LeaseFields, LeasePatch, LeaseStatus};

pub(crate) const ENTITY: &str = "Lease";

pub struct ListLeases<'a, R: LeaseRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LeaseRepository + ?Sized> ListLeases<'a, R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        filter: &LeaseFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<LeaseRecord>> {
        let (rows, total) = self.repo.list(account_id, filter, page).await?;
        Ok(Page::new(rows, total, page))
    }
}

pub struct GetLease<'a, R: LeaseRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LeaseRepository + ?Sized> GetLease<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<LeaseRecord> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)
    }
}

pub struct CreateLease<'a, R, U, T>
where
    R: LeaseRepository + ?Sized,
    U: UnitRepository + ?Sized,
    T: TenantRepository + ?Sized,
{
    pub repo: &'a R,
    pub units: &'a U,
    pub tenants: &'a T,
}

impl<'a, R, U, T> CreateLease<'a, R, U, T>
where
    R: LeaseRepository + ?Sized,
    U: UnitRepository + ?Sized,
    T: TenantRepository + ?Sized,
{
    pub async fn execute(
        &self,
        account_id: Uuid,
        fields: LeaseFields,
        today: NaiveDate,
    ) -> ServiceResult<LeaseRecord> {
        fields.validate()?;
        self.units.get(account_id, fields.unit_id).await?.or_not_found("Unit")?;
        self.tenants
            .get(account_id, fields.tenant_id)
            .await?
            .or_not_found("Tenant")?;
        ensure_unit_free(self.repo, account_id, &fields, None).await?;

        let status = LeaseStatus::for_dates(fields.start_date, fields.end_date, today);
        let lease = self.repo.insert(account_id, &fields, status).await?;
        self.repo.get(account_id, lease.id).await?.or_not_found(ENTITY)
    }
}

pub struct UpdateLease<'a, R, U, T>
where
    R: LeaseRepository + ?Sized,
    U: UnitRepository + ?Sized,
    T: TenantRepository + ?Sized,
{
    pub repo: &'a R,
    pub units: &'a U,
    pub tenants: &'a T,
}

impl<'a, R, U, T> UpdateLease<'a, R, U, T>
where
    R: LeaseRepository + ?Sized,
    U: UnitRepository + ?Sized,
    T: TenantRepository + ?Sized,
{
    pub async fn execute(
        &self,
        account_id: Uuid,
        id: Uuid,
        patch: LeasePatch,
        today: NaiveDate,
    ) -> ServiceResult<LeaseRecord> {
        let current = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?.lease;
        if current.status == LeaseStatus::Terminated {
            return Err(ServiceError::bad_request("Cannot update a terminated lease"));
        }

        let mut fields = current.fields.clone();
        patch.apply(&mut fields);
        fields.validate()?;
        if fields.unit_id != current.fields.unit_id {
            self.units.get(account_id, fields.unit_id).await?.or_not_found("Unit")?;
        }
        if fields.tenant_id != current.fields.tenant_id {
            self.tenants
                .get(account_id, fields.tenant_id)
                .await?
                .or_not_found("Tenant")?;
        }
        ensure_unit_free(self.repo, account_id, &fields, Some(id)).await?;

        let status = current.status.refreshed(fields.start_date, fields.end_date, today);
        self.repo
            .update(account_id, id, &fields, status)
            .await?
            .or_not_found(ENTITY)?;
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)
    }
}

pub struct TerminateLease<'a, R: LeaseRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LeaseRepository + ?Sized> TerminateLease<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<LeaseRecord> {
        let updated = self
            .repo
            .set_status(account_id, id, LeaseStatus::Terminated)
            .await?;
        if !updated {
            return Err(ServiceError::not_found(ENTITY));
        }
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)
    }
}

pub struct DeleteLease<'a, R: LeaseRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LeaseRepository + ?Sized> DeleteLease<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        if self.repo.delete(account_id, id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found(ENTITY))
        }
    }
}

async fn ensure_unit_free<R: LeaseRepository + ?Sized>(
    repo: &R,
    account_id: Uuid,
    fields: &LeaseFields,
    exclude: Option<Uuid>,
) -> ServiceResult<()> {
    let clashes = repo
        .find_overlapping(account_id, fields.unit_id, fields.start_date, fields.end_date, exclude)
        .await?;
    if clashes.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::conflict(
            "Unit already has an active or future lease overlapping these dates",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::leases::test_support::{KnownIds, MemLeases, d, lease_fields};

    struct World {
        leases: MemLeases,
        refs: KnownIds,
        account: Uuid,
        unit: Uuid,
        tenant: Uuid,
    }

    impl World {
        fn new() -> Self {
            let unit = Uuid::new_v4();
            let tenant = Uuid::new_v4();
            Self {
                leases: MemLeases::default(),
                refs: KnownIds(vec![unit, tenant]),
                account: Uuid::new_v4(),
                unit,
                tenant,
            }
        }

        async fn create(&self, start: &str, end: &str) -> ServiceResult<LeaseRecord> {
            CreateLease {
                repo: &self.leases,
                units: &self.refs,
                tenants: &self.refs,
            }
            .execute(
                self.account,
                lease_fields(self.unit, self.tenant, start, end),
                d("2024-06-15"),
            )
            .await
        }

        async fn update(&self, id: Uuid, patch: serde_json::Value) -> ServiceResult<LeaseRecord> {
            UpdateLease {
                repo: &self.leases,
                units: &self.refs,
                tenants: &self.refs,
            }
            .execute(self.account, id, serde_json::from_value(patch).unwrap(), d("2024-06-15"))
            .await
        }
    }

    #[tokio::test]
    async fn status_is_derived_on_create() {
        let world = World::new();
        let current = world.create("2024-01-01", "2024-12-31").await.unwrap();
        assert_eq!(current.lease.status, LeaseStatus::Active);
        let upcoming = world.create("2025-01-01", "2025-12-31").await.unwrap();
        assert_eq!(upcoming.lease.status, LeaseStatus::Future);
    }

    #[tokio::test]
    async fn overlapping_and_touching_periods_conflict() {
        let world = World::new();
        world.create("2024-01-01", "2024-12-31").await.unwrap();
        let overlapping = world.create("2024-06-01", "2025-05-31").await.unwrap_err();
        assert!(matches!(overlapping, ServiceError::Conflict(_)));
        let touching = world.create("2024-12-31", "2025-12-31").await.unwrap_err();
        assert!(matches!(touching, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn terminated_leases_free_the_unit_and_cannot_be_edited() {
        let world = World::new();
        let lease = world.create("2024-01-01", "2024-12-31").await.unwrap();
        TerminateLease { repo: &world.leases }
            .execute(world.account, lease.lease.id)
            .await
            .unwrap();

        world.create("2024-07-01", "2025-06-30").await.unwrap();
        let err = world
            .update(lease.lease.id, serde_json::json!({"monthly_rent": "6000"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn update_does_not_clash_with_itself() {
        let world = World::new();
        let lease = world.create("2024-01-01", "2024-12-31").await.unwrap();
        let updated = world
            .update(lease.lease.id, serde_json::json!({"end_date": "2025-03-31"}))
            .await
            .unwrap();
        assert_eq!(updated.lease.fields.end_date, d("2025-03-31"));
    }

    #[tokio::test]
    async fn unknown_unit_or_reversed_dates_are_rejected() {
        let world = World::new();
        let err = CreateLease {
            repo: &world.leases,
            units: &world.refs,
            tenants: &world.refs,
        }
        .execute(
            world.account,
            lease_fields(Uuid::new_v4(), world.tenant, "2024-01-01", "2024-12-31"),
            d("2024-06-15"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Unit not found"));

        let err = world.create("2024-12-31", "2024-01-01").await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn deleting_a_missing_lease_is_not_found() {
        let world = World::new();
        let err = DeleteLease { repo: &world.leases }
            .execute(world.account, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
