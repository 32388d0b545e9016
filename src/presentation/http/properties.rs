use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::application::dto::dashboard::DateRange;
use crate::application::dto::pagination::Page;
use crate::application::dto::properties::{
    PortfolioSummary, PropertyFilter, PropertyListItem, PropertyStatistics,
};
use crate::application::use_cases::properties::manage_properties::{
    CreateProperty, DeleteProperty, GetProperty, ListProperties, UpdateProperty,
};
use crate::application::use_cases::properties::portfolio::{
    GetPortfolioSummary, GetPortfolioValuationHistory, GetPropertyStatistics, GetValuationHistory,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::properties::{Property, PropertyFields, PropertyPatch};
use crate::domain::valuations::{PortfolioValuationPoint, ValuationPoint};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path, Query};
use crate::presentation::http::params::PageParams;

#[utoipa::path(get, path = "/api/properties", tag = "Properties",
    params(PropertyFilter, PageParams),
    responses((status = 200, body = crate::application::dto::pagination::PropertyPage)))]
pub async fn list_properties(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(filter): Query<PropertyFilter>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<Page<PropertyListItem>>> {
    let repo = ctx.property_repo();
    let uc = ListProperties {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &filter, page.into()).await?))
}

#[utoipa::path(get, path = "/api/properties/{id}", tag = "Properties",
    params(("id" = Uuid, Path, description = "Property id")),
    responses((status = 200, body = PropertyListItem), (status = 404)))]
pub async fn get_property(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PropertyListItem>> {
    let repo = ctx.property_repo();
    let uc = GetProperty {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(post, path = "/api/properties", tag = "Properties",
    request_body = PropertyFields,
    responses((status = 201, body = Property), (status = 400), (status = 404, description = "Unknown investment company")))]
pub async fn create_property(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(fields): Json<PropertyFields>,
) -> ApiResult<(StatusCode, Json<Property>)> {
    let repo = ctx.property_repo();
    let companies = ctx.investment_company_repo();
    let uc = CreateProperty {
        repo: repo.as_ref(),
        companies: companies.as_ref(),
    };
    let created = uc.execute(account_id, fields).await?;
    tracing::debug!(property_id = %created.id, "property_created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/api/properties/{id}", tag = "Properties",
    params(("id" = Uuid, Path, description = "Property id")),
    request_body = PropertyPatch,
    responses((status = 200, body = Property), (status = 400), (status = 404)))]
pub async fn update_property(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<PropertyPatch>,
) -> ApiResult<Json<Property>> {
    let repo = ctx.property_repo();
    let companies = ctx.investment_company_repo();
    let uc = UpdateProperty {
        repo: repo.as_ref(),
        companies: companies.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/properties/{id}", tag = "Properties",
    params(("id" = Uuid, Path, description = "Property id")),
    responses((status = 204), (status = 404), (status = 409, description = "Property has units")))]
pub async fn delete_property(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.property_repo();
    let uc = DeleteProperty {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/properties/statistics", tag = "Properties",
    responses((status = 200, body = PropertyStatistics)))]
pub async fn property_statistics(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
) -> ApiResult<Json<PropertyStatistics>> {
    let repo = ctx.property_repo();
    let uc = GetPropertyStatistics {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id).await?))
}

#[utoipa::path(get, path = "/api/properties/portfolio/summary", tag = "Properties",
    responses((status = 200, body = PortfolioSummary)))]
pub async fn portfolio_summary(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
) -> ApiResult<Json<PortfolioSummary>> {
    let repo = ctx.property_repo();
    let mortgages = ctx.mortgage_repo();
    let uc = GetPortfolioSummary {
        repo: repo.as_ref(),
        mortgages: mortgages.as_ref(),
    };
    Ok(Json(uc.execute(account_id).await?))
}

#[utoipa::path(get, path = "/api/properties/portfolio/valuation-history", tag = "Properties",
    params(DateRange),
    responses((status = 200, body = [PortfolioValuationPoint])))]
pub async fn portfolio_valuation_history(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(range): Query<DateRange>,
) -> ApiResult<Json<Vec<PortfolioValuationPoint>>> {
    let valuations = ctx.valuation_repo();
    let uc = GetPortfolioValuationHistory {
        valuations: valuations.as_ref(),
    };
    Ok(Json(uc.execute(account_id, range.start_date, range.end_date).await?))
}

#[utoipa::path(get, path = "/api/properties/{id}/valuation-history", tag = "Properties",
    params(("id" = Uuid, Path, description = "Property id")),
    responses((status = 200, body = [ValuationPoint]), (status = 404)))]
pub async fn valuation_history(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<ValuationPoint>>> {
    let repo = ctx.property_repo();
    let valuations = ctx.valuation_repo();
    let uc = GetValuationHistory {
        repo: repo.as_ref(),
        valuations: valuations.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/properties", get(list_properties).post(create_property))
        .route("/properties/statistics", get(property_statistics))
        .route("/properties/portfolio/summary", get(portfolio_summary))
        .route(
            "/properties/portfolio/valuation-history",
            get(portfolio_valuation_history),
        )
        .route(
            "/properties/:id",
            get(get_property).patch(update_property).delete(delete_property),
        )
        .route("/properties/:id/valuation-history", get(valuation_history))
        .with_state(ctx)
}
