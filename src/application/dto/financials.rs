use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::financials::{ExpenseType, FinancialSummary, IncomeType, TypeBreakdown};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FinancialFilter {
    pub property_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub expense_type: Option<ExpenseType>,
    pub income_type: Option<IncomeType>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FinancialBreakdown {
    pub expenses: Vec<TypeBreakdown>,
    pub income: Vec<TypeBreakdown>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PropertyFinancialDashboard {
    pub property_id: Uuid,
    pub summary: FinancialSummary,
    pub breakdown: FinancialBreakdown,
    #[schema(value_type = Option<String>)]
    pub current_value: Option<Decimal>,
    #[schema(value_type = String)]
    pub roi: Decimal,
}
