use uuid::Uuid;

use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::mortgage_repository::MortgageRepository;
use crate::application::use_cases::mortgages::manage_mortgages::ENTITY;
use crate::domain::mortgages::{MortgagePayment, PaymentFields};

pub struct ListPayments<'a, R: MortgageRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MortgageRepository + ?Sized> ListPayments<'a, R> {
    pub async fn execute(&self, account_id: Uuid, mortgage_id: Uuid) -> ServiceResult<Vec<MortgagePayment>> {
        self.repo
            .get(account_id, mortgage_id)
            .await?
            .or_not_found(ENTITY)?;
        Ok(self.repo.list_payments(account_id, mortgage_id).await?)
    }
}

pub struct RecordPayment<'a, R: MortgageRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MortgageRepository + ?Sized> RecordPayment<'a, R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        mortgage_id: Uuid,
        fields: PaymentFields,
    ) -> ServiceResult<MortgagePayment> {
        fields.validate()?;
        self.repo
            .get(account_id, mortgage_id)
            .await?
            .or_not_found(ENTITY)?;
        Ok(self
            .repo
            .insert_payment(account_id, mortgage_id, &fields)
            .await?)
    }
}

pub struct DeletePayment<'a, R: MortgageRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MortgageRepository + ?Sized> DeletePayment<'a, R> {
    pub async fn execute(&self, account_id: Uuid, mortgage_id: Uuid, payment_id: Uuid) -> ServiceResult<()> {
        if self
            .repo
            .delete_payment(account_id, mortgage_id, payment_id)
            .await?
        {
            Ok(())
        } else {
            Err(ServiceError::not_found("Payment"))
        }
    }
}
