use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::application::dto::mortgages::MortgageFilter;
use crate::application::dto::pagination::PageRequest;
use crate::domain::mortgages::{Mortgage, MortgageFields, MortgagePayment, PaymentFields};

#[async_trait]
pub trait MortgageRepository: Send + Sync {
    async fn list(
        &self,
        account_id: Uuid,
        filter: &MortgageFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<Mortgage>, i64)>;
    /// Every mortgage of the account with the principal repaid on it so far.
    async fn list_with_principal_paid(
        &self,
        account_id: Uuid,
    ) -> anyhow::Result<Vec<(Mortgage, Decimal)>>;
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Mortgage>>;
    async fn insert(&self, account_id: Uuid, fields: &MortgageFields) -> anyhow::Result<Mortgage>;
    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &MortgageFields,
    ) -> anyhow::Result<Option<Mortgage>>;
    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;

    async fn list_payments(
        &self,
        account_id: Uuid,
        mortgage_id: Uuid,
    ) -> anyhow::Result<Vec<MortgagePayment>>;
    async fn count_payments(&self, account_id: Uuid, mortgage_id: Uuid) -> anyhow::Result<i64>;
    async fn insert_payment(
        &self,
        account_id: Uuid,
        mortgage_id: Uuid,
        fields: &PaymentFields,
    ) -> anyhow::Result<MortgagePayment>;
    async fn delete_payment(
        &self,
        account_id: Uuid,
        mortgage_id: Uuid,
        payment_id: Uuid,
    ) -> anyhow::Result<bool>;
    /// `(payment_date, amount)` of every payment in the inclusive range.
    async fn payments_between(
        &self,
        account_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<(NaiveDate, Decimal)>>;
}
