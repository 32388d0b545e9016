use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch},
};
use uuid::Uuid;

use crate::application::dto::financials::{
    FinancialBreakdown, FinancialFilter, PropertyFinancialDashboard,
};
use crate::application::use_cases::financials::ledger::{
    CreateExpense, CreateIncome, DeleteExpense, DeleteIncome, ListExpenses, ListIncome,
    UpdateExpense, UpdateIncome,
};
use crate::application::use_cases::financials::reports::{
    GetFinancialBreakdown, GetFinancialSummary, GetPropertyFinancialDashboard,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::financials::{
    Expense, ExpenseFields, ExpensePatch, FinancialSummary, Income, IncomeFields, IncomePatch,
};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path, Query};

#[utoipa::path(get, path = "/api/financials/expenses", tag = "Financials",
    params(FinancialFilter),
    responses((status = 200, body = [Expense])))]
pub async fn list_expenses(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(filter): Query<FinancialFilter>,
) -> ApiResult<Json<Vec<Expense>>> {
    let repo = ctx.financial_repo();
    let uc = ListExpenses {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &filter).await?))
}

#[utoipa::path(post, path = "/api/financials/expenses", tag = "Financials",
    request_body = ExpenseFields,
    responses((status = 201, body = Expense), (status = 400), (status = 404, description = "Unknown property")))]
pub async fn create_expense(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(fields): Json<ExpenseFields>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let repo = ctx.financial_repo();
    let properties = ctx.property_repo();
    let uc = CreateExpense {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
    };
    let created = uc.execute(account_id, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/api/financials/expenses/{id}", tag = "Financials",
    params(("id" = Uuid, Path, description = "Expense id")),
    request_body = ExpensePatch,
    responses((status = 200, body = Expense), (status = 400), (status = 404)))]
pub async fn update_expense(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<ExpensePatch>,
) -> ApiResult<Json<Expense>> {
    let repo = ctx.financial_repo();
    let uc = UpdateExpense {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/financials/expenses/{id}", tag = "Financials",
    params(("id" = Uuid, Path, description = "Expense id")),
    responses((status = 204), (status = 404)))]
pub async fn delete_expense(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.financial_repo();
    let uc = DeleteExpense {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/financials/income", tag = "Financials",
    params(FinancialFilter),
    responses((status = 200, body = [Income])))]
pub async fn list_income(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(filter): Query<FinancialFilter>,
) -> ApiResult<Json<Vec<Income>>> {
    let repo = ctx.financial_repo();
    let uc = ListIncome {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &filter).await?))
}

#[utoipa::path(post, path = "/api/financials/income", tag = "Financials",
    request_body = IncomeFields,
    responses((status = 201, body = Income), (status = 400), (status = 404, description = "Unknown property")))]
pub async fn create_income(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(fields): Json<IncomeFields>,
) -> ApiResult<(StatusCode, Json<Income>)> {
    let repo = ctx.financial_repo();
    let properties = ctx.property_repo();
    let uc = CreateIncome {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
    };
    let created = uc.execute(account_id, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/api/financials/income/{id}", tag = "Financials",
    params(("id" = Uuid, Path, description = "Income id")),
    request_body = IncomePatch,
    responses((status = 200, body = Income), (status = 400), (status = 404)))]
pub async fn update_income(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<IncomePatch>,
) -> ApiResult<Json<Income>> {
    let repo = ctx.financial_repo();
    let uc = UpdateIncome {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/financials/income/{id}", tag = "Financials",
    params(("id" = Uuid, Path, description = "Income id")),
    responses((status = 204), (status = 404)))]
pub async fn delete_income(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.financial_repo();
    let uc = DeleteIncome {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/financials/summary", tag = "Financials",
    params(FinancialFilter),
    responses((status = 200, body = FinancialSummary)))]
pub async fn financial_summary(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(filter): Query<FinancialFilter>,
) -> ApiResult<Json<FinancialSummary>> {
    let repo = ctx.financial_repo();
    let uc = GetFinancialSummary {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &filter).await?))
}

#[utoipa::path(get, path = "/api/financials/breakdown", tag = "Financials",
    params(FinancialFilter),
    responses((status = 200, body = FinancialBreakdown)))]
pub async fn financial_breakdown(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(filter): Query<FinancialFilter>,
) -> ApiResult<Json<FinancialBreakdown>> {
    let repo = ctx.financial_repo();
    let uc = GetFinancialBreakdown {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &filter).await?))
}

#[utoipa::path(get, path = "/api/properties/{id}/financial-dashboard", tag = "Financials",
    params(("id" = Uuid, Path, description = "Property id")),
    responses((status = 200, body = PropertyFinancialDashboard), (status = 404)))]
pub async fn property_financial_dashboard(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(property_id): Path<Uuid>,
) -> ApiResult<Json<PropertyFinancialDashboard>> {
    let repo = ctx.financial_repo();
    let properties = ctx.property_repo();
    let valuations = ctx.valuation_repo();
    let uc = GetPropertyFinancialDashboard {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
        valuations: valuations.as_ref(),
    };
    Ok(Json(uc.execute(account_id, property_id).await?))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/financials/expenses", get(list_expenses).post(create_expense))
        .route(
            "/financials/expenses/:id",
            patch(update_expense).delete(delete_expense),
        )
        .route("/financials/income", get(list_income).post(create_income))
        .route(
            "/financials/income/:id",
            patch(update_income).delete(delete_income),
        )
        .route("/financials/summary", get(financial_summary))
        .route("/financials/breakdown", get(financial_breakdown))
        .route(
            "/properties/:id/financial-dashboard",
            get(property_financial_dashboard),
        )
        .with_state(ctx)
}
