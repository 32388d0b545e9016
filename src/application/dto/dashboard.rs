use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::dashboard::PeriodGrouping;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CashFlowQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// `month` (default), `quarter` or `year`.
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub group_by: PeriodGrouping,
}
