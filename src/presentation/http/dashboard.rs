use axum::{
    Router,
    extract::State,
    routing::get,
};

use crate::application::dto::dashboard::{CashFlowQuery, DateRange};
use crate::application::use_cases::dashboard::reports::{GetCashFlow, GetPortfolioRoi};
use crate::bootstrap::app_context::AppContext;
use crate::domain::dashboard::{CashFlowPeriod, PortfolioRoi};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Query};

#[utoipa::path(get, path = "/api/dashboard/roi", tag = "Dashboard",
    params(DateRange),
    responses((status = 200, body = PortfolioRoi)))]
pub async fn portfolio_roi(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(range): Query<DateRange>,
) -> ApiResult<Json<PortfolioRoi>> {
    let properties = ctx.property_repo();
    let valuations = ctx.valuation_repo();
    let financials = ctx.financial_repo();
    let uc = GetPortfolioRoi {
        properties: properties.as_ref(),
        valuations: valuations.as_ref(),
        financials: financials.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &range).await?))
}

#[utoipa::path(get, path = "/api/dashboard/cash-flow", tag = "Dashboard",
    params(CashFlowQuery),
    responses((status = 200, body = [CashFlowPeriod])))]
pub async fn cash_flow(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(query): Query<CashFlowQuery>,
) -> ApiResult<Json<Vec<CashFlowPeriod>>> {
    let financials = ctx.financial_repo();
    let mortgages = ctx.mortgage_repo();
    let uc = GetCashFlow {
        financials: financials.as_ref(),
        mortgages: mortgages.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &query).await?))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/dashboard/roi", get(portfolio_roi))
        .route("/dashboard/cash-flow", get(cash_flow))
        .with_state(ctx)
}
