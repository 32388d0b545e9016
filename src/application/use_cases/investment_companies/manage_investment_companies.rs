use uuid::Uuid;

use crate::application::dto::investment_companies::{
    InvestmentCompanyDetail, InvestmentCompanyListItem,
};
use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::investment_company_repository::InvestmentCompanyRepository;
use crate::application::ports::property_repository::PropertyRepository;
use crate::domain::investment_companies::{
    InvestmentCompany, InvestmentCompanyFields, InvestmentCompanyPatch,
};

pub(crate) const ENTITY: &str = "Investment company";

pub struct ListInvestmentCompanies<'a, R: InvestmentCompanyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: InvestmentCompanyRepository + ?Sized> ListInvestmentCompanies<'a, R> {
    pub async fn execute(&self, account_id: Uuid) -> ServiceResult<Vec<InvestmentCompanyListItem>> {
        let rows = self.repo.list(account_id).await?;
        Ok(rows
            .into_iter()
            .map(|(company, property_count)| InvestmentCompanyListItem {
                company,
                property_count,
            })
            .collect())
    }
}

pub struct GetInvestmentCompany<'a, R, P>
where
    R: InvestmentCompanyRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
}

impl<'a, R, P> GetInvestmentCompany<'a, R, P>
where
    R: InvestmentCompanyRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<InvestmentCompanyDetail> {
        let company = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let properties = self
            .properties
            .list_all(account_id)
            .await?
            .into_iter()
            .filter(|p| p.fields.investment_company_id == Some(id))
            .collect();
        Ok(InvestmentCompanyDetail { company, properties })
    }
}

pub struct CreateInvestmentCompany<'a, R: InvestmentCompanyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: InvestmentCompanyRepository + ?Sized> CreateInvestmentCompany<'a, R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        fields: InvestmentCompanyFields,
    ) -> ServiceResult<InvestmentCompany> {
        fields.validate()?;
        ensure_name_free(self.repo, account_id, &fields.name, None).await?;
        Ok(self.repo.insert(account_id, &fields).await?)
    }
}

pub struct UpdateInvestmentCompany<'a, R: InvestmentCompanyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: InvestmentCompanyRepository + ?Sized> UpdateInvestmentCompany<'a, R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        id: Uuid,
        patch: InvestmentCompanyPatch,
    ) -> ServiceResult<InvestmentCompany> {
        let mut fields = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?.fields;
        patch.apply(&mut fields);
        fields.validate()?;
        ensure_name_free(self.repo, account_id, &fields.name, Some(id)).await?;
        self.repo
            .update(account_id, id, &fields)
            .await?
            .or_not_found(ENTITY)
    }
}

pub struct DeleteInvestmentCompany<'a, R: InvestmentCompanyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: InvestmentCompanyRepository + ?Sized> DeleteInvestmentCompany<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let linked = self.repo.count_properties(account_id, id).await?;
        if linked > 0 {
            return Err(ServiceError::conflict(format!(
                "Cannot delete investment company linked to {linked} propert(ies)"
            )));
        }
        self.repo.delete(account_id, id).await?;
        Ok(())
    }
}

async fn ensure_name_free<R: InvestmentCompanyRepository + ?Sized>(
    repo: &R,
    account_id: Uuid,
    name: &str,
    exclude: Option<Uuid>,
) -> ServiceResult<()> {
    if repo.find_by_name(account_id, name, exclude).await?.is_some() {
        return Err(ServiceError::conflict(format!(
            "Investment company {name} already exists"
        )));
    }
    Ok(())
}
