use uuid::Uuid;

use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::plot_info_repository::PlotInfoRepository;
use crate::application::ports::property_repository::PropertyRepository;
use crate::domain::plot_info::{PlotInfo, PlotInfoFields, PlotInfoPatch};

const ENTITY: &str = "Plot info";

pub struct CreatePlotInfo<'a, R, P>
where
    R: PlotInfoRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
}

impl<'a, R, P> CreatePlotInfo<'a, R, P>
where
    R: PlotInfoRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub async fn execute(
        &self,
        account_id: Uuid,
        property_id: Uuid,
        fields: PlotInfoFields,
    ) -> ServiceResult<PlotInfo> {
        self.properties
            .get(account_id, property_id)
            .await?
            .or_not_found("Property")?;
        if self
            .repo
            .get_by_property(account_id, property_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict(
                "Plot info already exists for this property",
            ));
        }
        Ok(self.repo.insert(account_id, property_id, &fields).await?)
    }
}

pub struct GetPlotInfo<'a, R: PlotInfoRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PlotInfoRepository + ?Sized> GetPlotInfo<'a, R> {
    pub async fn by_id(&self, account_id: Uuid, id: Uuid) -> ServiceResult<PlotInfo> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)
    }

    pub async fn by_property(&self, account_id: Uuid, property_id: Uuid) -> ServiceResult<PlotInfo> {
        self.repo
            .get_by_property(account_id, property_id)
            .await?
            .or_not_found(ENTITY)
    }
}

pub struct UpdatePlotInfo<'a, R: PlotInfoRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PlotInfoRepository + ?Sized> UpdatePlotInfo<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid, patch: PlotInfoPatch) -> ServiceResult<PlotInfo> {
        let mut fields = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?.fields;
        patch.apply(&mut fields);
        self.repo
            .update(account_id, id, &fields)
            .await?
            .or_not_found(ENTITY)
    }
}

pub struct DeletePlotInfo<'a, R: PlotInfoRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PlotInfoRepository + ?Sized> DeletePlotInfo<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        if self.repo.delete(account_id, id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found(ENTITY))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{MemPlots, MemProperties};

    fn plot(gush: &str, chelka: &str) -> PlotInfoFields {
        PlotInfoFields {
            gush: Some(gush.into()),
            chelka: Some(chelka.into()),
            ..PlotInfoFields::default()
        }
    }

    #[tokio::test]
    async fn second_plot_for_a_property_conflicts() {
        let repo = MemPlots::default();
        let properties = MemProperties::default();
        let account = Uuid::new_v4();
        let property_id = properties.seed(account, "הרצל 10, תל אביב");
        let create = CreatePlotInfo { repo: &repo, properties: &properties };

        create.execute(account, property_id, plot("6942", "17")).await.unwrap();
        let err = create
            .execute(account, property_id, plot("6942", "18"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn plot_for_a_missing_property_is_not_found() {
        let repo = MemPlots::default();
        let properties = MemProperties::default();
        let err = CreatePlotInfo { repo: &repo, properties: &properties }
            .execute(Uuid::new_v4(), Uuid::new_v4(), plot("6942", "17"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
