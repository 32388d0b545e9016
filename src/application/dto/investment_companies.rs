use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::investment_companies::InvestmentCompany;
use crate::domain::properties::Property;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvestmentCompanyListItem {
    #[serde(flatten)]
    pub company: InvestmentCompany,
    pub property_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvestmentCompanyDetail {
    #[serde(flatten)]
    pub company: InvestmentCompany,
    pub properties: Vec<Property>,
}
