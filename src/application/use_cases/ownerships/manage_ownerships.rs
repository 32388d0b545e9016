use chrono::NaiveDate;
use uuid::Uuid;

use crate::application::dto::owners::OwnershipRecord;
use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::owner_repository::OwnerRepository;
use crate::application::ports::ownership_repository::OwnershipRepository;
use crate::application::ports::property_repository::PropertyRepository;
use crate::domain::ownerships::{Ownership, OwnershipFields, OwnershipPatch, OwnershipSummary};

const ENTITY: &str = "Ownership";

pub struct ListPropertyOwnerships<'a, R, P>
where
    R: OwnershipRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
}

impl<'a, R, P> ListPropertyOwnerships<'a, R, P>
where
    R: OwnershipRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, property_id: Uuid) -> ServiceResult<Vec<OwnershipRecord>> {
        self.properties
            .get(account_id, property_id)
            .await?
            .or_not_found("Property")?;
        Ok(self.repo.list_for_property(account_id, property_id).await?)
    }
}

/// Reports how the current shares of a property add up. Over-allocation is
/// flagged, never rejected.
pub struct GetOwnershipSummary<'a, R, P>
where
    R: OwnershipRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
}

impl<'a, R, P> GetOwnershipSummary<'a, R, P>
where
    R: OwnershipRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub async fn execute(
        &self,
        account_id: Uuid,
        property_id: Uuid,
        today: NaiveDate,
    ) -> ServiceResult<OwnershipSummary> {
        self.properties
            .get(account_id, property_id)
            .await?
            .or_not_found("Property")?;
        let records = self.repo.list_for_property(account_id, property_id).await?;
        Ok(OwnershipSummary::from_shares(
            records.iter().map(|r| &r.ownership.fields),
            today,
        ))
    }
}

pub struct GetOwnership<'a, R: OwnershipRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OwnershipRepository + ?Sized> GetOwnership<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<Ownership> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)
    }
}

pub struct CreateOwnership<'a, R, P, O>
where
    R: OwnershipRepository + ?Sized,
    P: PropertyRepository + ?Sized,
    O: OwnerRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
    pub owners: &'a O,
}

impl<'a, R, P, O> CreateOwnership<'a, R, P, O>
where
    R: OwnershipRepository + ?Sized,
    P: PropertyRepository + ?Sized,
    O: OwnerRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, fields: OwnershipFields) -> ServiceResult<Ownership> {
        fields.validate()?;
        self.properties
            .get(account_id, fields.property_id)
            .await?
            .or_not_found("Property")?;
        self.owners
            .get(account_id, fields.owner_id)
            .await?
            .or_not_found("Owner")?;
        Ok(self.repo.insert(account_id, &fields).await?)
    }
}

pub struct UpdateOwnership<'a, R: OwnershipRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OwnershipRepository + ?Sized> UpdateOwnership<'a, R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        id: Uuid,
        patch: OwnershipPatch,
    ) -> ServiceResult<Ownership> {
        let mut fields = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?.fields;
        patch.apply(&mut fields);
        fields.validate()?;
        self.repo
            .update(account_id, id, &fields)
            .await?
            .or_not_found(ENTITY)
    }
}

pub struct DeleteOwnership<'a, R: OwnershipRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OwnershipRepository + ?Sized> DeleteOwnership<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        if self.repo.delete(account_id, id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found(ENTITY))
        }
    }
}
