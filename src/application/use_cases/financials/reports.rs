use rust_decimal::Decimal;
use uuid::Uuid;

use crate::application::dto::financials::{
    FinancialBreakdown, FinancialFilter, PropertyFinancialDashboard,
};
use crate::application::errors::{OrNotFound, ServiceResult};
use crate::application::ports::financial_repository::FinancialRepository;
use crate::application::ports::property_repository::PropertyRepository;
use crate::application::ports::valuation_repository::ValuationRepository;
use crate::domain::financials::{Expense, FinancialSummary, Income, breakdown_by_type};
use crate::domain::money::percentage;

/// Summaries cover every type; only property and date range narrow them.
fn period_only(filter: &FinancialFilter) -> FinancialFilter {
    FinancialFilter {
        property_id: filter.property_id,
        start_date: filter.start_date,
        end_date: filter.end_date,
        expense_type: None,
        income_type: None,
    }
}

pub(crate) fn summarize(expenses: &[Expense], income: &[Income]) -> FinancialSummary {
    let total_expenses: Decimal = expenses.iter().map(|e| e.fields.amount).sum();
    let total_income: Decimal = income.iter().map(|i| i.fields.amount).sum();
    FinancialSummary::new(total_income, total_expenses)
}

pub(crate) fn break_down(expenses: &[Expense], income: &[Income]) -> FinancialBreakdown {
    FinancialBreakdown {
        expenses: breakdown_by_type(
            expenses
                .iter()
                .map(|e| (e.fields.expense_type.as_str(), e.fields.amount)),
        ),
        income: breakdown_by_type(
            income
                .iter()
                .map(|i| (i.fields.income_type.as_str(), i.fields.amount)),
        ),
    }
}

pub struct GetFinancialSummary<'a, R: FinancialRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FinancialRepository + ?Sized> GetFinancialSummary<'a, R> {
    pub async fn execute(&self, account_id: Uuid, filter: &FinancialFilter) -> ServiceResult<FinancialSummary> {
        let filter = period_only(filter);
        let expenses = self.repo.list_expenses(account_id, &filter).await?;
        let income = self.repo.list_income(account_id, &filter).await?;
        Ok(summarize(&expenses, &income))
    }
}

pub struct GetFinancialBreakdown<'a, R: FinancialRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FinancialRepository + ?Sized> GetFinancialBreakdown<'a, R> {
    pub async fn execute(&self, account_id: Uuid, filter: &FinancialFilter) -> ServiceResult<FinancialBreakdown> {
        let filter = period_only(filter);
        let expenses = self.repo.list_expenses(account_id, &filter).await?;
        let income = self.repo.list_income(account_id, &filter).await?;
        Ok(break_down(&expenses, &income))
    }
}

pub struct GetPropertyFinancialDashboard<'a, R, P, V>
where
    R: FinancialRepository + ?Sized,
    P: PropertyRepository + ?Sized,
    V: ValuationRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
    pub valuations: &'a V,
}

impl<'a, R, P, V> GetPropertyFinancialDashboard<'a, R, P, V>
where
    R: FinancialRepository + ?Sized,
    P: PropertyRepository + ?Sized,
    V: ValuationRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, property_id: Uuid) -> ServiceResult<PropertyFinancialDashboard> {
        let property = self
            .properties
            .get(account_id, property_id)
            .await?
            .or_not_found("Property")?;
        let filter = FinancialFilter {
            property_id: Some(property_id),
            ..FinancialFilter::default()
        };
        let expenses = self.repo.list_expenses(account_id, &filter).await?;
        let income = self.repo.list_income(account_id, &filter).await?;
        let latest = self
            .valuations
            .latest_for_property(account_id, property_id)
            .await?;
        let current_value = latest
            .map(|v| v.fields.estimated_value)
            .or(property.fields.estimated_value);

        let summary = summarize(&expenses, &income);
        let roi = percentage(summary.net_income, current_value.unwrap_or_default());
        Ok(PropertyFinancialDashboard {
            property_id,
            breakdown: break_down(&expenses, &income),
            summary,
            current_value,
            roi,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::financials::{ExpenseFields, ExpenseType, IncomeFields, IncomeType};
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn expense(kind: ExpenseType, amount: Decimal) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            account_id: Uuid::nil(),
            fields: ExpenseFields {
                property_id: Uuid::nil(),
                expense_date: day(),
                amount,
                expense_type: kind,
                category: "general".into(),
                description: None,
                payment_method: None,
            },
            created_at: Utc::now(),
        }
    }

    fn income(kind: IncomeType, amount: Decimal) -> Income {
        Income {
            id: Uuid::new_v4(),
            account_id: Uuid::nil(),
            fields: IncomeFields {
                property_id: Uuid::nil(),
                income_date: day(),
                amount,
                income_type: kind,
                source: None,
                description: None,
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summary_nets_income_against_expenses() {
        let expenses = [expense(ExpenseType::Tax, dec!(1200)), expense(ExpenseType::Maintenance, dec!(300))];
        let income = [income(IncomeType::Rent, dec!(5000))];
        let summary = summarize(&expenses, &income);
        assert_eq!(summary.total_expenses, dec!(1500));
        assert_eq!(summary.net_income, dec!(3500));
    }

    #[test]
    fn breakdown_splits_each_side_by_type() {
        let expenses = [
            expense(ExpenseType::Tax, dec!(300)),
            expense(ExpenseType::Tax, dec!(300)),
            expense(ExpenseType::Legal, dec!(400)),
        ];
        let income = [income(IncomeType::Rent, dec!(1000))];
        let breakdown = break_down(&expenses, &income);
        assert_eq!(breakdown.expenses[0].kind, "TAX");
        assert_eq!(breakdown.expenses[0].count, 2);
        assert_eq!(breakdown.expenses[0].percentage, dec!(60));
        assert_eq!(breakdown.income[0].percentage, dec!(100));
    }

    #[test]
    fn summary_filter_drops_type_narrowing() {
        let filter = FinancialFilter {
            expense_type: Some(ExpenseType::Tax),
            income_type: Some(IncomeType::Rent),
            ..FinancialFilter::default()
        };
        let period = period_only(&filter);
        assert!(period.expense_type.is_none() && period.income_type.is_none());
    }
}
