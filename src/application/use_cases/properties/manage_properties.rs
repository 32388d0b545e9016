use uuid::Uuid;

use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::dto::properties::{PropertyFilter, PropertyListItem};
use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::investment_company_repository::InvestmentCompanyRepository;
use crate::application::ports::property_repository::PropertyRepository;
use crate::domain::properties::{Property, PropertyFields, PropertyPatch};

pub(crate) const ENTITY: &str = "Property";

pub struct ListProperties<'a, R: PropertyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PropertyRepository + ?Sized> ListProperties<'a, R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<PropertyListItem>> {
        let (items, total) = self.repo.list(account_id, filter, page).await?;
        Ok(Page::new(items, total, page))
    }
}

pub struct GetProperty<'a, R: PropertyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PropertyRepository + ?Sized> GetProperty<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<PropertyListItem> {
        let property = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let unit_count = self.repo.count_units(account_id, id).await?;
        Ok(PropertyListItem {
            property,
            unit_count,
        })
    }
}

pub struct CreateProperty<'a, R, C>
where
    R: PropertyRepository + ?Sized,
    C: InvestmentCompanyRepository + ?Sized,
{
    pub repo: &'a R,
    pub companies: &'a C,
}

impl<'a, R, C> CreateProperty<'a, R, C>
where
    R: PropertyRepository + ?Sized,
    C: InvestmentCompanyRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, fields: PropertyFields) -> ServiceResult<Property> {
        fields.validate()?;
        ensure_company(self.companies, account_id, fields.investment_company_id).await?;
        Ok(self.repo.insert(account_id, &fields).await?)
    }
}

pub struct UpdateProperty<'a, R, C>
where
    R: PropertyRepository + ?Sized,
    C: InvestmentCompanyRepository + ?Sized,
{
    pub repo: &'a R,
    pub companies: &'a C,
}

impl<'a, R, C> UpdateProperty<'a, R, C>
where
    R: PropertyRepository + ?Sized,
    C: InvestmentCompanyRepository + ?Sized,
{
    pub async fn execute(
        &self,
        account_id: Uuid,
        id: Uuid,
        patch: PropertyPatch,
    ) -> ServiceResult<Property> {
        let mut fields = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?.fields;
        let company_changed = patch.investment_company_id.is_provided();
        patch.apply(&mut fields);
        fields.validate()?;
        if company_changed {
            ensure_company(self.companies, account_id, fields.investment_company_id).await?;
        }
        self.repo
            .update(account_id, id, &fields)
            .await?
            .or_not_found(ENTITY)
    }
}

pub struct DeleteProperty<'a, R: PropertyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PropertyRepository + ?Sized> DeleteProperty<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let units = self.repo.count_units(account_id, id).await?;
        if units > 0 {
            return Err(ServiceError::conflict(format!(
                "Cannot delete property with {units} unit(s); delete the units first"
            )));
        }
        self.repo.delete(account_id, id).await?;
        Ok(())
    }
}

async fn ensure_company<C: InvestmentCompanyRepository + ?Sized>(
    companies: &C,
    account_id: Uuid,
    company_id: Option<Uuid>,
) -> ServiceResult<()> {
    if let Some(company_id) = company_id {
        companies
            .get(account_id, company_id)
            .await?
            .or_not_found("Investment company")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{MemProperties, NoLinks};

    #[tokio::test]
    async fn property_with_units_cannot_be_deleted() {
        let repo = MemProperties::default();
        let account = Uuid::new_v4();
        let id = repo.seed(account, "הרצל 10, תל אביב");
        repo.set_unit_count(id, 2);

        let err = DeleteProperty { repo: &repo }.execute(account, id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m.contains("2 unit(s)")));
        assert_eq!(repo.count(), 1);

        repo.set_unit_count(id, 0);
        DeleteProperty { repo: &repo }.execute(account, id).await.unwrap();
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn unknown_investment_company_is_not_found() {
        let repo = MemProperties::default();
        let mut fields = PropertyFields::new("הרצל 10, תל אביב");
        fields.investment_company_id = Some(Uuid::new_v4());
        let err = CreateProperty { repo: &repo, companies: &NoLinks }
            .execute(Uuid::new_v4(), fields)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(repo.count(), 0);
    }
}
