use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::investment_companies::{InvestmentCompany, InvestmentCompanyFields};

#[async_trait]
pub trait InvestmentCompanyRepository: Send + Sync {
    /// Ordered by name, with the number of linked properties.
    async fn list(&self, account_id: Uuid) -> anyhow::Result<Vec<(InvestmentCompany, i64)>>;
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<InvestmentCompany>>;
    async fn find_by_name(
        &self,
        account_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>>;
    async fn insert(
        &self,
        account_id: Uuid,
        fields: &InvestmentCompanyFields,
    ) -> anyhow::Result<InvestmentCompany>;
    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &InvestmentCompanyFields,
    ) -> anyhow::Result<Option<InvestmentCompany>>;
    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
    async fn count_properties(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<i64>;
}
