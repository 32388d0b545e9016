use uuid::Uuid;

use crate::application::dto::owners::{OwnerListItem, OwnershipRecord};
use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::owner_repository::OwnerRepository;
use crate::application::ports::ownership_repository::OwnershipRepository;
use crate::domain::owners::{Owner, OwnerFields, OwnerPatch};

pub(crate) const ENTITY: &str = "Owner";

pub struct ListOwners<'a, R: OwnerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OwnerRepository + ?Sized> ListOwners<'a, R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        search: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Page<OwnerListItem>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let (rows, total) = self.repo.list(account_id, search, page).await?;
        Ok(Page::new(rows, total, page))
    }
}

pub struct GetOwner<'a, R: OwnerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OwnerRepository + ?Sized> GetOwner<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<Owner> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)
    }
}

pub struct CreateOwner<'a, R: OwnerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OwnerRepository + ?Sized> CreateOwner<'a, R> {
    pub async fn execute(&self, account_id: Uuid, fields: OwnerFields) -> ServiceResult<Owner> {
        fields.validate()?;
        ensure_email_free(self.repo, account_id, &fields, None).await?;
        Ok(self.repo.insert(account_id, &fields).await?)
    }
}

pub struct UpdateOwner<'a, R: OwnerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OwnerRepository + ?Sized> UpdateOwner<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid, patch: OwnerPatch) -> ServiceResult<Owner> {
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

pub struct DeleteOwner<'a, R: OwnerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OwnerRepository + ?Sized> DeleteOwner<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let shares = self.repo.count_ownerships(account_id, id).await?;
        if shares > 0 {
            return Err(ServiceError::conflict(format!(
                "Cannot delete owner with {shares} ownership record(s)"
            )));
        }
        self.repo.delete(account_id, id).await?;
        Ok(())
    }
}

/// The owner's shares, labelled with the property address.
pub struct ListOwnerProperties<'a, R, S>
where
    R: OwnerRepository + ?Sized,
    S: OwnershipRepository + ?Sized,
{
    pub repo: &'a R,
    pub ownerships: &'a S,
}

impl<'a, R, S> ListOwnerProperties<'a, R, S>
where
    R: OwnerRepository + ?Sized,
    S: OwnershipRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<Vec<OwnershipRecord>> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        Ok(self.ownerships.list_for_owner(account_id, id).await?)
    }
}

pub(crate) async fn ensure_email_free<R: OwnerRepository + ?Sized>(
    repo: &R,
    account_id: Uuid,
    fields: &OwnerFields,
    exclude: Option<Uuid>,
) -> ServiceResult<()> {
    let Some(email) = fields.email.as_deref() else {
        return Ok(());
    };
    if repo.find_by_email(account_id, email, exclude).await?.is_some() {
        return Err(ServiceError::conflict(format!(
            "Owner with email {email} already exists"
        )));
    }
    Ok(())
}
