use uuid::Uuid;

use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::property_repository::PropertyRepository;
use crate::application::ports::valuation_repository::ValuationRepository;
use crate::domain::valuations::{Valuation, ValuationFields, ValuationPatch};

const ENTITY: &str = "Valuation";

/// Records a valuation. The newest one also becomes the property's estimate.
pub struct CreateValuation<'a, R, P>
where
    R: ValuationRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
}

impl<'a, R, P> CreateValuation<'a, R, P>
where
    R: ValuationRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, fields: ValuationFields) -> ServiceResult<Valuation> {
        fields.validate()?;
        self.properties
            .get(account_id, fields.property_id)
            .await?
            .or_not_found("Property")?;
        let previous = self
            .repo
            .latest_for_property(account_id, fields.property_id)
            .await?;
        let valuation = self.repo.insert(account_id, &fields).await?;

        let is_newest = previous
            .map(|p| fields.valuation_date >= p.fields.valuation_date)
            .unwrap_or(true);
        if is_newest {
            self.properties
                .set_valuation(
                    account_id,
                    fields.property_id,
                    fields.estimated_value,
                    fields.valuation_date,
                )
                .await?;
            tracing::debug!(property_id = %fields.property_id, "property_estimate_updated");
        }
        Ok(valuation)
    }
}

/// Edits a valuation and keeps the estimate of every affected property on its
/// newest valuation.
pub struct UpdateValuation<'a, R, P>
where
    R: ValuationRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
}

impl<'a, R, P> UpdateValuation<'a, R, P>
where
    R: ValuationRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, id: Uuid, patch: ValuationPatch) -> ServiceResult<Valuation> {
        let current = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let old_property = current.fields.property_id;
        let was_newest = self
            .repo
            .latest_for_property(account_id, old_property)
            .await?
            .is_some_and(|v| v.id == id);

        let mut fields = current.fields;
        patch.apply(&mut fields);
        fields.validate()?;
        if fields.property_id != old_property {
            self.properties
                .get(account_id, fields.property_id)
                .await?
                .or_not_found("Property")?;
        }
        let updated = self
            .repo
            .update(account_id, id, &fields)
            .await?
            .or_not_found(ENTITY)?;

        let moved = old_property != fields.property_id;
        if was_newest && moved {
            self.sync_estimate(account_id, old_property, None).await?;
        }
        self.sync_estimate(account_id, fields.property_id, Some((id, was_newest && !moved)))
            .await?;
        Ok(updated)
    }

    /// Copies the newest valuation onto the property. With `edited` set, only
    /// when the edited valuation is or was the newest one.
    async fn sync_estimate(
        &self,
        account_id: Uuid,
        property_id: Uuid,
        edited: Option<(Uuid, bool)>,
    ) -> ServiceResult<()> {
        let Some(latest) = self.repo.latest_for_property(account_id, property_id).await? else {
            return Ok(());
        };
        let touches_newest = match edited {
            Some((id, was_newest)) => was_newest || latest.id == id,
            None => true,
        };
        if touches_newest {
            self.properties
                .set_valuation(
                    account_id,
                    property_id,
                    latest.fields.estimated_value,
                    latest.fields.valuation_date,
                )
                .await?;
            tracing::debug!(%property_id, "property_estimate_updated");
        }
        Ok(())
    }
}

pub struct ListPropertyValuations<'a, R, P>
where
    R: ValuationRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
}

impl<'a, R, P> ListPropertyValuations<'a, R, P>
where
    R: ValuationRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, property_id: Uuid) -> ServiceResult<Vec<Valuation>> {
        self.properties
            .get(account_id, property_id)
            .await?
            .or_not_found("Property")?;
        Ok(self.repo.list_for_property(account_id, property_id).await?)
    }
}

pub struct GetLatestValuation<'a, R: ValuationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ValuationRepository + ?Sized> GetLatestValuation<'a, R> {
    pub async fn execute(&self, account_id: Uuid, property_id: Uuid) -> ServiceResult<Valuation> {
        self.repo
            .latest_for_property(account_id, property_id)
            .await?
            .or_not_found(ENTITY)
    }
}

pub struct GetValuation<'a, R: ValuationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ValuationRepository + ?Sized> GetValuation<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<Valuation> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)
    }
}

pub struct DeleteValuation<'a, R: ValuationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ValuationRepository + ?Sized> DeleteValuation<'a, R> {
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
    use crate::application::use_cases::leases::test_support::d;
    use crate::application::use_cases::test_support::{MemProperties, MemValuations};
    use crate::domain::valuations::ValuationType;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn valuation(property_id: Uuid, date: &str, value: Decimal) -> ValuationFields {
        ValuationFields {
            property_id,
            valuation_date: d(date),
            estimated_value: value,
            valuation_type: ValuationType::Market,
            valued_by: None,
            notes: None,
        }
    }

    fn patch(body: serde_json::Value) -> ValuationPatch {
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn only_the_newest_valuation_sets_the_estimate() {
        let repo = MemValuations::default();
        let properties = MemProperties::default();
        let account = Uuid::new_v4();
        let property = properties.seed(account, "הרצל 10, תל אביב");
        let create = CreateValuation { repo: &repo, properties: &properties };

        create
            .execute(account, valuation(property, "2024-06-01", dec!(2000000)))
            .await
            .unwrap();
        assert_eq!(properties.estimate_of(property), Some((dec!(2000000), d("2024-06-01"))));

        create
            .execute(account, valuation(property, "2023-01-01", dec!(1500000)))
            .await
            .unwrap();
        assert_eq!(properties.estimate_of(property), Some((dec!(2000000), d("2024-06-01"))));

        create
            .execute(account, valuation(property, "2025-01-01", dec!(2200000)))
            .await
            .unwrap();
        assert_eq!(properties.estimate_of(property), Some((dec!(2200000), d("2025-01-01"))));
    }

    #[tokio::test]
    async fn editing_the_newest_valuation_resyncs_the_estimate() {
        let repo = MemValuations::default();
        let properties = MemProperties::default();
        let account = Uuid::new_v4();
        let property = properties.seed(account, "הרצל 10, תל אביב");
        let create = CreateValuation { repo: &repo, properties: &properties };
        let newest = create
            .execute(account, valuation(property, "2024-06-01", dec!(2000000)))
            .await
            .unwrap();
        create
            .execute(account, valuation(property, "2023-01-01", dec!(1500000)))
            .await
            .unwrap();
        let update = UpdateValuation { repo: &repo, properties: &properties };

        update
            .execute(account, newest.id, patch(serde_json::json!({"estimated_value": "2100000"})))
            .await
            .unwrap();
        assert_eq!(properties.estimate_of(property), Some((dec!(2100000), d("2024-06-01"))));

        update
            .execute(account, newest.id, patch(serde_json::json!({"valuation_date": "2022-01-01"})))
            .await
            .unwrap();
        assert_eq!(properties.estimate_of(property), Some((dec!(1500000), d("2023-01-01"))));

        let err = update
            .execute(account, newest.id, patch(serde_json::json!({"estimated_value": "-1"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn editing_an_older_valuation_leaves_the_estimate_alone() {
        let repo = MemValuations::default();
        let properties = MemProperties::default();
        let account = Uuid::new_v4();
        let property = properties.seed(account, "הרצל 10, תל אביב");
        let create = CreateValuation { repo: &repo, properties: &properties };
        create
            .execute(account, valuation(property, "2024-06-01", dec!(2000000)))
            .await
            .unwrap();
        let older = create
            .execute(account, valuation(property, "2023-01-01", dec!(1500000)))
            .await
            .unwrap();
        properties
            .set_valuation(account, property, dec!(1999999), d("2024-07-01"))
            .await
            .unwrap();

        UpdateValuation { repo: &repo, properties: &properties }
            .execute(account, older.id, patch(serde_json::json!({"estimated_value": "1600000"})))
            .await
            .unwrap();
        assert_eq!(properties.estimate_of(property), Some((dec!(1999999), d("2024-07-01"))));
    }

    #[tokio::test]
    async fn moving_the_newest_valuation_resyncs_both_properties() {
        let repo = MemValuations::default();
        let properties = MemProperties::default();
        let account = Uuid::new_v4();
        let from = properties.seed(account, "הרצל 10, תל אביב");
        let to = properties.seed(account, "ביאליק 3, רמת גן");
        let create = CreateValuation { repo: &repo, properties: &properties };
        let moved = create
            .execute(account, valuation(from, "2024-06-01", dec!(2000000)))
            .await
            .unwrap();
        create
            .execute(account, valuation(from, "2023-01-01", dec!(1500000)))
            .await
            .unwrap();
        create
            .execute(account, valuation(to, "2020-01-01", dec!(900000)))
            .await
            .unwrap();

        let updated = UpdateValuation { repo: &repo, properties: &properties }
            .execute(account, moved.id, patch(serde_json::json!({"property_id": to})))
            .await
            .unwrap();
        assert_eq!(updated.fields.property_id, to);
        assert_eq!(properties.estimate_of(from), Some((dec!(1500000), d("2023-01-01"))));
        assert_eq!(properties.estimate_of(to), Some((dec!(2000000), d("2024-06-01"))));

        let err = UpdateValuation { repo: &repo, properties: &properties }
            .execute(account, moved.id, patch(serde_json::json!({"property_id": Uuid::new_v4()})))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
