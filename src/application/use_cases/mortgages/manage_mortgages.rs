use std::collections::BTreeSet;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::application::dto::mortgages::{MortgageDetail, MortgageFilter};
use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::bank_account_repository::BankAccountRepository;
use crate::application::ports::mortgage_repository::MortgageRepository;
use crate::application::ports::property_repository::PropertyRepository;
use crate::domain::mortgages::{
    Mortgage, MortgageFields, MortgagePatch, MortgageSummary, remaining_balance,
};

pub(crate) const ENTITY: &str = "Mortgage";

pub struct ListMortgages<'a, R: MortgageRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MortgageRepository + ?Sized> ListMortgages<'a, R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        filter: &MortgageFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<Mortgage>> {
        let (rows, total) = self.repo.list(account_id, filter, page).await?;
        Ok(Page::new(rows, total, page))
    }
}

/// Mortgages paid from one bank account.
pub struct ListBankAccountMortgages<'a, R, B>
where
    R: MortgageRepository + ?Sized,
    B: BankAccountRepository + ?Sized,
{
    pub repo: &'a R,
    pub bank_accounts: &'a B,
}

impl<'a, R, B> ListBankAccountMortgages<'a, R, B>
where
    R: MortgageRepository + ?Sized,
    B: BankAccountRepository + ?Sized,
{
    pub async fn execute(
        &self,
        account_id: Uuid,
        bank_account_id: Uuid,
        page: PageRequest,
    ) -> ServiceResult<Page<Mortgage>> {
        self.bank_accounts
            .get(account_id, bank_account_id)
            .await?
            .or_not_found("Bank account")?;
        let filter = MortgageFilter {
            bank_account_id: Some(bank_account_id),
            ..MortgageFilter::default()
        };
        ListMortgages { repo: self.repo }
            .execute(account_id, &filter, page)
            .await
    }
}

pub struct GetMortgage<'a, R: MortgageRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MortgageRepository + ?Sized> GetMortgage<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<MortgageDetail> {
        let mortgage = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let payments = self.repo.list_payments(account_id, id).await?;
        let principal_paid: Decimal = payments
            .iter()
            .filter_map(|p| p.fields.principal)
            .sum();
        Ok(MortgageDetail {
            remaining_balance: remaining_balance(mortgage.fields.loan_amount, principal_paid),
            mortgage,
            payments,
        })
    }
}

pub struct GetMortgageSummary<'a, R: MortgageRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MortgageRepository + ?Sized> GetMortgageSummary<'a, R> {
    pub async fn execute(&self, account_id: Uuid) -> ServiceResult<MortgageSummary> {
        let items: Vec<(MortgageFields, Decimal)> = self
            .repo
            .list_with_principal_paid(account_id)
            .await?
            .into_iter()
            .map(|(m, paid)| (m.fields, paid))
            .collect();
        Ok(MortgageSummary::compute(&items))
    }
}

pub struct CreateMortgage<'a, R, P, B>
where
    R: MortgageRepository + ?Sized,
    P: PropertyRepository + ?Sized,
    B: BankAccountRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
    pub bank_accounts: &'a B,
}

impl<'a, R, P, B> CreateMortgage<'a, R, P, B>
where
    R: MortgageRepository + ?Sized,
    P: PropertyRepository + ?Sized,
    B: BankAccountRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, mut fields: MortgageFields) -> ServiceResult<Mortgage> {
        fields.validate()?;
        self.properties
            .get(account_id, fields.property_id)
            .await?
            .or_not_found("Property")?;
        check_references(self.properties, self.bank_accounts, account_id, &mut fields).await?;
        Ok(self.repo.insert(account_id, &fields).await?)
    }
}

pub struct UpdateMortgage<'a, R, P, B>
where
    R: MortgageRepository + ?Sized,
    P: PropertyRepository + ?Sized,
    B: BankAccountRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
    pub bank_accounts: &'a B,
}

impl<'a, R, P, B> UpdateMortgage<'a, R, P, B>
where
    R: MortgageRepository + ?Sized,
    P: PropertyRepository + ?Sized,
    B: BankAccountRepository + ?Sized,
{
    pub async fn execute(
        &self,
        account_id: Uuid,
        id: Uuid,
        patch: MortgagePatch,
    ) -> ServiceResult<Mortgage> {
        let mut fields = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?.fields;
        patch.apply(&mut fields);
        fields.validate()?;
        check_references(self.properties, self.bank_accounts, account_id, &mut fields).await?;
        self.repo
            .update(account_id, id, &fields)
            .await?
            .or_not_found(ENTITY)
    }
}

pub struct DeleteMortgage<'a, R: MortgageRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MortgageRepository + ?Sized> DeleteMortgage<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let payments = self.repo.count_payments(account_id, id).await?;
        if payments > 0 {
            return Err(ServiceError::conflict(format!(
                "Cannot delete mortgage with {payments} payment(s)"
            )));
        }
        self.repo.delete(account_id, id).await?;
        Ok(())
    }
}

/// Confirms the bank account and every linked property belong to the
/// account. Linked ids are deduplicated in place.
async fn check_references<P, B>(
    properties: &P,
    bank_accounts: &B,
    account_id: Uuid,
    fields: &mut MortgageFields,
) -> ServiceResult<()>
where
    P: PropertyRepository + ?Sized,
    B: BankAccountRepository + ?Sized,
{
    if let Some(bank_account_id) = fields.bank_account_id {
        bank_accounts
            .get(account_id, bank_account_id)
            .await?
            .or_not_found("Bank account")?;
    }
    let linked: Vec<Uuid> = fields
        .linked_properties
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if !linked.is_empty() {
        let owned = properties.count_owned(account_id, &linked).await?;
        if owned != linked.len() as i64 {
            return Err(ServiceError::bad_request(
                "linked_properties contains unknown properties",
            ));
        }
    }
    fields.linked_properties = linked;
    Ok(())
}
