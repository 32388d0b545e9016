use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::plot_info::{PlotInfo, PlotInfoFields};

#[async_trait]
pub trait PlotInfoRepository: Send + Sync {
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<PlotInfo>>;
    async fn get_by_property(
        &self,
        account_id: Uuid,
        property_id: Uuid,
    ) -> anyhow::Result<Option<PlotInfo>>;
    async fn insert(
        &self,
        account_id: Uuid,
        property_id: Uuid,
        fields: &PlotInfoFields,
    ) -> anyhow::Result<PlotInfo>;
    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &PlotInfoFields,
    ) -> anyhow::Result<Option<PlotInfo>>;
    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
}
