use uuid::Uuid;

use crate::application::dto::tenants::TenantDetail;
use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::lease_repository::LeaseRepository;
use crate::application::ports::tenant_repository::TenantRepository;
use crate::domain::tenants::{Tenant, TenantFields, TenantPatch};

const ENTITY: &str = "Tenant";

pub struct SearchTenants<'a, R: TenantRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TenantRepository + ?Sized> SearchTenants<'a, R> {
    pub async fn execute(&self, account_id: Uuid, search: Option<&str>) -> ServiceResult<Vec<Tenant>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        Ok(self.repo.search(account_id, search).await?)
    }
}

pub struct GetTenant<'a, R, L>
where
    R: TenantRepository + ?Sized,
    L: LeaseRepository + ?Sized,
{
    pub repo: &'a R,
    pub leases: &'a L,
}

impl<'a, R, L> GetTenant<'a, R, L>
where
    R: TenantRepository + ?Sized,
    L: LeaseRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<TenantDetail> {
        let tenant = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let leases = self.leases.list_for_tenant(account_id, id).await?;
        Ok(TenantDetail { tenant, leases })
    }
}

pub struct CreateTenant<'a, R: TenantRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TenantRepository + ?Sized> CreateTenant<'a, R> {
    pub async fn execute(&self, account_id: Uuid, fields: TenantFields) -> ServiceResult<Tenant> {
        fields.validate()?;
        ensure_email_free(self.repo, account_id, &fields, None).await?;
        Ok(self.repo.insert(account_id, &fields).await?)
    }
}

pub struct UpdateTenant<'a, R: TenantRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TenantRepository + ?Sized> UpdateTenant<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid, patch: TenantPatch) -> ServiceResult<Tenant> {
        let mut fields = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?.fields;
        patch.apply(&mut fields);
        fields.validate()?;
        ensure_email_free(self.repo, account_id, &fields, Some(id)).await?;
        self.repo
            .update(account_id, id, &fields)
            .await?
            .or_not_found(ENTITY)
    }
}

pub struct DeleteTenant<'a, R, L>
where
    R: TenantRepository + ?Sized,
    L: LeaseRepository + ?Sized,
{
    pub repo: &'a R,
    pub leases: &'a L,
}

impl<'a, R, L> DeleteTenant<'a, R, L>
where
    R: TenantRepository + ?Sized,
    L: LeaseRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let open = self.leases.count_open_for_tenant(account_id, id).await?;
        if open > 0 {
            return Err(ServiceError::conflict(
                "Cannot delete tenant with active or future leases",
            ));
        }
        self.repo.delete(account_id, id).await?;
        Ok(())
    }
}

async fn ensure_email_free<R: TenantRepository + ?Sized>(
    repo: &R,
    account_id: Uuid,
    fields: &TenantFields,
    exclude: Option<Uuid>,
) -> ServiceResult<()> {
    let Some(email) = fields.email.as_deref() else {
        return Ok(());
    };
    if repo.find_by_email(account_id, email, exclude).await?.is_some() {
        return Err(ServiceError::conflict(format!(
            "Tenant with email {email} already exists"
        )));
    }
    Ok(())
}
