use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::money::{percentage, round2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PeriodGrouping {
    #[default]
    Month,
    Quarter,
    Year,
}

impl PeriodGrouping {
    pub fn key(&self, date: NaiveDate) -> String {
        match self {
            PeriodGrouping::Year => format!("{}", date.year()),
            PeriodGrouping::Quarter => format!("{}-Q{}", date.year(), (date.month() - 1) / 3 + 1),
            PeriodGrouping::Month => format!("{}-{:02}", date.year(), date.month()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashFlowKind {
    Income,
    Expense,
    MortgagePayment,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CashFlowPeriod {
    pub period: String,
    #[schema(value_type = String)]
    pub income: Decimal,
    #[schema(value_type = String)]
    pub expenses: Decimal,
    #[schema(value_type = String)]
    pub mortgage_payments: Decimal,
    #[schema(value_type = String)]
    pub cash_flow: Decimal,
}

/// Buckets dated amounts per period, ascending by period key.
pub fn cash_flow_by_period(
    entries: impl IntoIterator<Item = (CashFlowKind, NaiveDate, Decimal)>,
    grouping: PeriodGrouping,
) -> Vec<CashFlowPeriod> {
    let mut buckets: BTreeMap<String, [Decimal; 3]> = BTreeMap::new();
    for (kind, date, amount) in entries {
        let slot = buckets.entry(grouping.key(date)).or_default();
        let idx = match kind {
            CashFlowKind::Income => 0,
            CashFlowKind::Expense => 1,
            CashFlowKind::MortgagePayment => 2,
        };
        slot[idx] += amount;
    }
    buckets
        .into_iter()
        .map(|(period, [income, expenses, mortgage_payments])| CashFlowPeriod {
            period,
            income: round2(income),
            expenses: round2(expenses),
            mortgage_payments: round2(mortgage_payments),
            cash_flow: round2(income - expenses - mortgage_payments),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PortfolioRoi {
    #[schema(value_type = String)]
    pub portfolio_roi: Decimal,
    #[schema(value_type = String)]
    pub total_income: Decimal,
    #[schema(value_type = String)]
    pub total_expenses: Decimal,
    #[schema(value_type = String)]
    pub net_income: Decimal,
    #[schema(value_type = String)]
    pub total_property_value: Decimal,
}

impl PortfolioRoi {
    pub fn compute(total_property_value: Decimal, total_income: Decimal, total_expenses: Decimal) -> Self {
        let net = total_income - total_expenses;
        Self {
            portfolio_roi: percentage(net, total_property_value),
            total_income: round2(total_income),
            total_expenses: round2(total_expenses),
            net_income: round2(net),
            total_property_value: round2(total_property_value),
        }
    }
}
