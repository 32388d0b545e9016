use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::application::dto::dashboard::{CashFlowQuery, DateRange};
use crate::application::dto::financials::FinancialFilter;
use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::financial_repository::FinancialRepository;
use crate::application::ports::mortgage_repository::MortgageRepository;
use crate::application::ports::property_repository::PropertyRepository;
use crate::application::ports::valuation_repository::ValuationRepository;
use crate::domain::dashboard::{CashFlowKind, CashFlowPeriod, PortfolioRoi, cash_flow_by_period};
use crate::domain::properties::Property;

fn range_filter(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> ServiceResult<FinancialFilter> {
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start > end {
            return Err(ServiceError::bad_request("start_date must be on or before end_date"));
        }
    }
    Ok(FinancialFilter {
        start_date,
        end_date,
        ..FinancialFilter::default()
    })
}

/// Portfolio value for the ROI report: stored estimate first, then the latest valuation.
pub(crate) fn portfolio_value(properties: &[Property], latest_valuations: &[(Uuid, Decimal)]) -> Decimal {
    let latest: HashMap<Uuid, Decimal> = latest_valuations.iter().copied().collect();
    properties
        .iter()
        .filter_map(|p| p.fields.estimated_value.or_else(|| latest.get(&p.id).copied()))
        .sum()
}

pub struct GetPortfolioRoi<'a, P, V, F>
where
    P: PropertyRepository + ?Sized,
    V: ValuationRepository + ?Sized,
    F: FinancialRepository + ?Sized,
{
    pub properties: &'a P,
    pub valuations: &'a V,
    pub financials: &'a F,
}

impl<'a, P, V, F> GetPortfolioRoi<'a, P, V, F>
where
    P: PropertyRepository + ?Sized,
    V: ValuationRepository + ?Sized,
    F: FinancialRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, range: &DateRange) -> ServiceResult<PortfolioRoi> {
        let filter = range_filter(range.start_date, range.end_date)?;
        let properties = self.properties.list_all(account_id).await?;
        let latest = self.valuations.latest_values(account_id).await?;
        let income: Decimal = self
            .financials
            .list_income(account_id, &filter)
            .await?
            .iter()
            .map(|i| i.fields.amount)
            .sum();
        let expenses: Decimal = self
            .financials
            .list_expenses(account_id, &filter)
            .await?
            .iter()
            .map(|e| e.fields.amount)
            .sum();
        Ok(PortfolioRoi::compute(
            portfolio_value(&properties, &latest),
            income,
            expenses,
        ))
    }
}

pub struct GetCashFlow<'a, F, M>
where
    F: FinancialRepository + ?Sized,
    M: MortgageRepository + ?Sized,
{
    pub financials: &'a F,
    pub mortgages: &'a M,
}

impl<'a, F, M> GetCashFlow<'a, F, M>
where
    F: FinancialRepository + ?Sized,
    M: MortgageRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, query: &CashFlowQuery) -> ServiceResult<Vec<CashFlowPeriod>> {
        let filter = range_filter(query.start_date, query.end_date)?;
        let income = self.financials.list_income(account_id, &filter).await?;
        let expenses = self.financials.list_expenses(account_id, &filter).await?;
        let payments = self
            .mortgages
            .payments_between(account_id, query.start_date, query.end_date)
            .await?;

        let entries = income
            .iter()
            .map(|i| (CashFlowKind::Income, i.fields.income_date, i.fields.amount))
            .chain(
                expenses
                    .iter()
                    .map(|e| (CashFlowKind::Expense, e.fields.expense_date, e.fields.amount)),
            )
            .chain(
                payments
                    .into_iter()
                    .map(|(date, amount)| (CashFlowKind::MortgagePayment, date, amount)),
            );
        Ok(cash_flow_by_period(entries, query.group_by))
    }
}
