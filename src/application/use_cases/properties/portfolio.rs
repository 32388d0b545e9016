use std::collections::BTreeMap;

use chrono::NaiveDate;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::application::dto::properties::{PortfolioSummary, PropertyStatistics};
use crate::application::errors::{OrNotFound, ServiceResult};
use crate::application::ports::mortgage_repository::MortgageRepository;
use crate::application::ports::property_repository::{OccupancyCounts, PropertyRepository};
use crate::application::ports::valuation_repository::ValuationRepository;
use crate::domain::money::percentage;
use crate::domain::mortgages::{MortgageStatus, remaining_balance};
use crate::domain::properties::Property;
use crate::domain::valuations::{
    PortfolioValuationPoint, ValuationPoint, history_points, portfolio_history_points,
};

pub struct GetPropertyStatistics<'a, R: PropertyRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PropertyRepository + ?Sized> GetPropertyStatistics<'a, R> {
    pub async fn execute(&self, account_id: Uuid) -> ServiceResult<PropertyStatistics> {
        let counts = self.repo.occupancy_counts(account_id).await?;
        Ok(statistics_from_counts(counts))
    }
}

pub(crate) fn statistics_from_counts(c: OccupancyCounts) -> PropertyStatistics {
    PropertyStatistics {
        total_properties: c.total_properties,
        total_units: c.total_units,
        occupied_units: c.occupied_units,
        active_leases: c.active_leases,
        occupancy_rate: percentage(
            Decimal::from(c.occupied_units),
            Decimal::from(c.total_units),
        ),
    }
}

pub struct GetPortfolioSummary<'a, R, M>
where
    R: PropertyRepository + ?Sized,
    M: MortgageRepository + ?Sized,
{
    pub repo: &'a R,
    pub mortgages: &'a M,
}

impl<'a, R, M> GetPortfolioSummary<'a, R, M>
where
    R: PropertyRepository + ?Sized,
    M: MortgageRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid) -> ServiceResult<PortfolioSummary> {
        let properties = self.repo.list_all(account_id).await?;
        let mortgages = self.mortgages.list_with_principal_paid(account_id).await?;
        let debt = mortgages
            .iter()
            .filter(|(m, _)| m.fields.status == MortgageStatus::Active)
            .map(|(m, paid)| remaining_balance(m.fields.loan_amount, *paid))
            .sum();
        Ok(summarize_portfolio(&properties, debt))
    }
}

pub(crate) fn summarize_portfolio(properties: &[Property], mortgage_debt: Decimal) -> PortfolioSummary {
    let mut by_type = BTreeMap::new();
    let mut by_status = BTreeMap::new();
    let mut value = Decimal::ZERO;
    for p in properties {
        value += p.fields.estimated_value.unwrap_or_default();
        let ty = p.fields.property_type.map(|t| t.as_str()).unwrap_or("UNKNOWN");
        *by_type.entry(ty.to_string()).or_insert(0) += 1;
        let st = p.fields.status.map(|s| s.as_str()).unwrap_or("UNKNOWN");
        *by_status.entry(st.to_string()).or_insert(0) += 1;
    }
    PortfolioSummary {
        total_properties: properties.len(),
        total_estimated_value: value,
        total_mortgage_debt: mortgage_debt,
        net_equity: value - mortgage_debt,
        properties_by_type: by_type,
        properties_by_status: by_status,
    }
}

pub struct GetValuationHistory<'a, R, V>
where
    R: PropertyRepository + ?Sized,
    V: ValuationRepository + ?Sized,
{
    pub repo: &'a R,
    pub valuations: &'a V,
}

impl<'a, R, V> GetValuationHistory<'a, R, V>
where
    R: PropertyRepository + ?Sized,
    V: ValuationRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, property_id: Uuid) -> ServiceResult<Vec<ValuationPoint>> {
        self.repo
            .get(account_id, property_id)
            .await?
            .or_not_found("Property")?;
        let rows = self.valuations.list_for_property(account_id, property_id).await?;
        Ok(history_points(&rows))
    }
}

/// Portfolio value over time: every valuation in the range summed per date.
pub struct GetPortfolioValuationHistory<'a, V: ValuationRepository + ?Sized> {
    pub valuations: &'a V,
}

impl<'a, V: ValuationRepository + ?Sized> GetPortfolioValuationHistory<'a, V> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> ServiceResult<Vec<PortfolioValuationPoint>> {
        let rows = self.valuations.list_between(account_id, start, end).await?;
        Ok(portfolio_history_points(&rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::leases::test_support::d;
    use crate::application::use_cases::test_support::MemValuations;
    use crate::domain::properties::{PropertyFields, PropertyStatus, PropertyType};
    use crate::domain::valuations::{ValuationFields, ValuationType};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn property(value: Option<Decimal>, ty: Option<PropertyType>) -> Property {
        let mut fields = PropertyFields::new("A");
        fields.estimated_value = value;
        fields.property_type = ty;
        fields.status = Some(PropertyStatus::Owned);
        Property {
            id: Uuid::new_v4(),
            account_id: Uuid::nil(),
            fields,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn occupancy_rate_is_share_of_occupied_units() {
        let s = statistics_from_counts(OccupancyCounts {
            total_properties: 2,
            total_units: 3,
            occupied_units: 2,
            active_leases: 2,
        });
        assert_eq!(s.occupancy_rate, dec!(66.67));
        let empty = statistics_from_counts(OccupancyCounts::default());
        assert_eq!(empty.occupancy_rate, Decimal::ZERO);
    }

    #[test]
    fn portfolio_nets_debt_and_counts_by_type() {
        let props = vec![
            property(Some(dec!(2000000)), Some(PropertyType::Residential)),
            property(Some(dec!(1000000)), Some(PropertyType::Residential)),
            property(None, None),
        ];
        let s = summarize_portfolio(&props, dec!(500000));
        assert_eq!(s.total_estimated_value, dec!(3000000));
        assert_eq!(s.net_equity, dec!(2500000));
        assert_eq!(s.properties_by_type.get("RESIDENTIAL"), Some(&2));
        assert_eq!(s.properties_by_type.get("UNKNOWN"), Some(&1));
        assert_eq!(s.properties_by_status.get("OWNED"), Some(&3));
    }

    #[tokio::test]
    async fn portfolio_history_keeps_only_the_requested_dates() {
        let valuations = MemValuations::default();
        let account = Uuid::new_v4();
        let dated = [
            ("2023-01-01", dec!(1000000)),
            ("2024-01-01", dec!(1200000)),
            ("2025-01-01", dec!(1300000)),
        ];
        for (date, value) in dated {
            for _ in 0..2 {
                let fields = ValuationFields {
                    property_id: Uuid::new_v4(),
                    valuation_date: d(date),
                    estimated_value: value,
                    valuation_type: ValuationType::Market,
                    valued_by: None,
                    notes: None,
                };
                valuations.insert(account, &fields).await.unwrap();
            }
        }

        let points = GetPortfolioValuationHistory { valuations: &valuations }
            .execute(account, Some(d("2024-01-01")), None)
            .await
            .unwrap();
        let totals: Vec<_> = points.iter().map(|p| (p.date, p.total_value)).collect();
        assert_eq!(
            totals,
            vec![(d("2024-01-01"), dec!(2400000)), (d("2025-01-01"), dec!(2600000))]
        );

        let none = GetPortfolioValuationHistory { valuations: &valuations }
            .execute(Uuid::new_v4(), None, None)
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
