use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::application::dto::investment_companies::{
    InvestmentCompanyDetail, InvestmentCompanyListItem,
};
use crate::application::use_cases::investment_companies::manage_investment_companies::{
    CreateInvestmentCompany, DeleteInvestmentCompany, GetInvestmentCompany,
    ListInvestmentCompanies, UpdateInvestmentCompany,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::investment_companies::{
    InvestmentCompany, InvestmentCompanyFields, InvestmentCompanyPatch,
};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path};

#[utoipa::path(get, path = "/api/investment-companies", tag = "Investment companies",
    responses((status = 200, body = [InvestmentCompanyListItem])))]
pub async fn list_investment_companies(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
) -> ApiResult<Json<Vec<InvestmentCompanyListItem>>> {
    let repo = ctx.investment_company_repo();
    let uc = ListInvestmentCompanies {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id).await?))
}

#[utoipa::path(get, path = "/api/investment-companies/{id}", tag = "Investment companies",
    params(("id" = Uuid, Path, description = "Investment company id")),
    responses((status = 200, body = InvestmentCompanyDetail), (status = 404)))]
pub async fn get_investment_company(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<InvestmentCompanyDetail>> {
    let repo = ctx.investment_company_repo();
    let properties = ctx.property_repo();
    let uc = GetInvestmentCompany {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(post, path = "/api/investment-companies", tag = "Investment companies",
    request_body = InvestmentCompanyFields,
    responses((status = 201, body = InvestmentCompany), (status = 400), (status = 409, description = "Name already used")))]
pub async fn create_investment_company(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(fields): Json<InvestmentCompanyFields>,
) -> ApiResult<(StatusCode, Json<InvestmentCompany>)> {
    let repo = ctx.investment_company_repo();
    let uc = CreateInvestmentCompany {
        repo: repo.as_ref(),
    };
    let created = uc.execute(account_id, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/api/investment-companies/{id}", tag = "Investment companies",
    params(("id" = Uuid, Path, description = "Investment company id")),
    request_body = InvestmentCompanyPatch,
    responses((status = 200, body = InvestmentCompany), (status = 400), (status = 404), (status = 409)))]
pub async fn update_investment_company(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<InvestmentCompanyPatch>,
) -> ApiResult<Json<InvestmentCompany>> {
    let repo = ctx.investment_company_repo();
    let uc = UpdateInvestmentCompany {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/investment-companies/{id}", tag = "Investment companies",
    params(("id" = Uuid, Path, description = "Investment company id")),
    responses((status = 204), (status = 404), (status = 409, description = "Properties are linked")))]
pub async fn delete_investment_company(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.investment_company_repo();
    let uc = DeleteInvestmentCompany {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/investment-companies",
            get(list_investment_companies).post(create_investment_company),
        )
        .route(
            "/investment-companies/:id",
            get(get_investment_company)
                .patch(update_investment_company)
                .delete(delete_investment_company),
        )
        .with_state(ctx)
}
