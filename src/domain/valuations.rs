use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::money::round2;
use crate::domain::patch::{DoubleOption, deserialize_double_option, set_if};
use crate::domain::rules::{RuleResult, ensure};

crate::text_enum!(ValuationType {
    Market => "MARKET",
    Appraisal => "APPRAISAL",
    Tax => "TAX",
    Purchase => "PURCHASE",
});

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValuationFields {
    pub property_id: Uuid,
    pub valuation_date: NaiveDate,
    #[schema(value_type = String)]
    pub estimated_value: Decimal,
    #[serde(default = "default_valuation_type")]
    pub valuation_type: ValuationType,
    pub valued_by: Option<String>,
    pub notes: Option<String>,
}

fn default_valuation_type() -> ValuationType {
    ValuationType::Market
}

impl ValuationFields {
    pub fn validate(&self) -> RuleResult {
        ensure(
            self.estimated_value >= Decimal::ZERO,
            "estimated_value must not be negative",
        )
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Valuation {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(flatten)]
    pub fields: ValuationFields,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ValuationPatch {
    pub property_id: Option<Uuid>,
    pub valuation_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub estimated_value: Option<Decimal>,
    pub valuation_type: Option<ValuationType>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub valued_by: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: DoubleOption<String>,
}

impl ValuationPatch {
    pub fn apply(self, f: &mut ValuationFields) {
        set_if(self.property_id, &mut f.property_id);
        set_if(self.valuation_date, &mut f.valuation_date);
        set_if(self.estimated_value, &mut f.estimated_value);
        set_if(self.valuation_type, &mut f.valuation_type);
        self.valued_by.apply_to(&mut f.valued_by);
        self.notes.apply_to(&mut f.notes);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ValuationPoint {
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub value: Decimal,
}

/// One point per date, ascending; for several valuations on the same day the
/// most recently recorded one wins.
pub fn history_points(valuations: &[Valuation]) -> Vec<ValuationPoint> {
    let mut by_date: BTreeMap<NaiveDate, (DateTime<Utc>, Decimal)> = BTreeMap::new();
    for v in valuations {
        let entry = by_date
            .entry(v.fields.valuation_date)
            .or_insert((v.created_at, v.fields.estimated_value));
        if v.created_at > entry.0 {
            *entry = (v.created_at, v.fields.estimated_value);
        }
    }
    by_date
        .into_iter()
        .map(|(date, (_, value))| ValuationPoint { date, value })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PortfolioValuationPoint {
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub total_value: Decimal,
}

/// Sum of every valuation recorded on each date across the portfolio, ascending.
pub fn portfolio_history_points(valuations: &[Valuation]) -> Vec<PortfolioValuationPoint> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for v in valuations {
        *by_date.entry(v.fields.valuation_date).or_default() += v.fields.estimated_value;
    }
    by_date
        .into_iter()
        .map(|(date, total)| PortfolioValuationPoint {
            date,
            total_value: round2(total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn valuation(date: &str, value: Decimal, recorded_secs: i64) -> Valuation {
        Valuation {
            id: Uuid::new_v4(),
            account_id: Uuid::nil(),
            fields: ValuationFields {
                property_id: Uuid::nil(),
                valuation_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                estimated_value: value,
                valuation_type: ValuationType::Market,
                valued_by: None,
                notes: None,
            },
            created_at: Utc.timestamp_opt(recorded_secs, 0).unwrap(),
        }
    }

    #[test]
    fn history_is_ascending_with_latest_entry_per_day() {
        let vals = vec![
            valuation("2024-03-01", dec!(2000000), 10),
            valuation("2023-01-01", dec!(1500000), 5),
            valuation("2024-03-01", dec!(2100000), 20),
        ];
        let points = history_points(&vals);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, dec!(1500000));
        assert_eq!(points[1].value, dec!(2100000));
    }

    #[test]
    fn portfolio_history_sums_every_property_per_date() {
        let mut a = valuation("2024-03-01", dec!(2000000.004), 10);
        a.fields.property_id = Uuid::new_v4();
        let b = valuation("2024-03-01", dec!(1000000), 11);
        let c = valuation("2023-06-30", dec!(750000), 12);
        let points = portfolio_history_points(&[a, b, c]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2023, 6, 30).unwrap());
        assert_eq!(points[0].total_value, dec!(750000));
        assert_eq!(points[1].total_value, dec!(3000000.00));
    }
}
