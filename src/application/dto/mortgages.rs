use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::mortgages::{Mortgage, MortgagePayment, MortgageStatus};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MortgageFilter {
    pub property_id: Option<Uuid>,
    pub status: Option<MortgageStatus>,
    /// Case-insensitive match on the bank name.
    pub bank: Option<String>,
    pub bank_account_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MortgageDetail {
    #[serde(flatten)]
    pub mortgage: Mortgage,
    pub payments: Vec<MortgagePayment>,
    #[schema(value_type = String)]
    pub remaining_balance: Decimal,
}
