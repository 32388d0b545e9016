use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};
use uuid::Uuid;

use crate::application::dto::mortgages::{MortgageDetail, MortgageFilter};
use crate::application::dto::pagination::Page;
use crate::application::use_cases::mortgages::manage_mortgages::{
    CreateMortgage, DeleteMortgage, GetMortgage, GetMortgageSummary, ListMortgages,
    UpdateMortgage,
};
use crate::application::use_cases::mortgages::payments::{
    DeletePayment, ListPayments, RecordPayment,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::mortgages::{
    Mortgage, MortgageFields, MortgagePatch, MortgagePayment, MortgageSummary, PaymentFields,
};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path, Query};
use crate::presentation::http::params::PageParams;

#[utoipa::path(get, path = "/api/mortgages", tag = "Mortgages",
    params(MortgageFilter, PageParams),
    responses((status = 200, body = crate::application::dto::pagination::MortgagePage)))]
pub async fn list_mortgages(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(filter): Query<MortgageFilter>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<Page<Mortgage>>> {
    let repo = ctx.mortgage_repo();
    let uc = ListMortgages {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &filter, page.into()).await?))
}

#[utoipa::path(get, path = "/api/mortgages/summary", tag = "Mortgages",
    responses((status = 200, body = MortgageSummary)))]
pub async fn mortgage_summary(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
) -> ApiResult<Json<MortgageSummary>> {
    let repo = ctx.mortgage_repo();
    let uc = GetMortgageSummary {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id).await?))
}

#[utoipa::path(get, path = "/api/mortgages/{id}", tag = "Mortgages",
    params(("id" = Uuid, Path, description = "Mortgage id")),
    responses((status = 200, body = MortgageDetail), (status = 404)))]
pub async fn get_mortgage(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MortgageDetail>> {
    let repo = ctx.mortgage_repo();
    let uc = GetMortgage {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(post, path = "/api/mortgages", tag = "Mortgages",
    request_body = MortgageFields,
    responses(
        (status = 201, body = Mortgage),
        (status = 400),
        (status = 404, description = "Unknown property or bank account")
    ))]
pub async fn create_mortgage(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(fields): Json<MortgageFields>,
) -> ApiResult<(StatusCode, Json<Mortgage>)> {
    let repo = ctx.mortgage_repo();
    let properties = ctx.property_repo();
    let bank_accounts = ctx.bank_account_repo();
    let uc = CreateMortgage {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
        bank_accounts: bank_accounts.as_ref(),
    };
    let created = uc.execute(account_id, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/api/mortgages/{id}", tag = "Mortgages",
    params(("id" = Uuid, Path, description = "Mortgage id")),
    request_body = MortgagePatch,
    responses((status = 200, body = Mortgage), (status = 400), (status = 404)))]
pub async fn update_mortgage(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<MortgagePatch>,
) -> ApiResult<Json<Mortgage>> {
    let repo = ctx.mortgage_repo();
    let properties = ctx.property_repo();
    let bank_accounts = ctx.bank_account_repo();
    let uc = UpdateMortgage {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
        bank_accounts: bank_accounts.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/mortgages/{id}", tag = "Mortgages",
    params(("id" = Uuid, Path, description = "Mortgage id")),
    responses((status = 204), (status = 404), (status = 409, description = "Mortgage has payments")))]
pub async fn delete_mortgage(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.mortgage_repo();
    let uc = DeleteMortgage {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/mortgages/{id}/payments", tag = "Mortgages",
    params(("id" = Uuid, Path, description = "Mortgage id")),
    responses((status = 200, body = [MortgagePayment]), (status = 404)))]
pub async fn list_payments(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<MortgagePayment>>> {
    let repo = ctx.mortgage_repo();
    let uc = ListPayments {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(post, path = "/api/mortgages/{id}/payments", tag = "Mortgages",
    params(("id" = Uuid, Path, description = "Mortgage id")),
    request_body = PaymentFields,
    responses((status = 201, body = MortgagePayment), (status = 400), (status = 404)))]
pub async fn record_payment(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(fields): Json<PaymentFields>,
) -> ApiResult<(StatusCode, Json<MortgagePayment>)> {
    let repo = ctx.mortgage_repo();
    let uc = RecordPayment {
        repo: repo.as_ref(),
    };
    let payment = uc.execute(account_id, id, fields).await?;
    tracing::debug!(mortgage_id = %id, payment_id = %payment.id, "mortgage_payment_recorded");
    Ok((StatusCode::CREATED, Json(payment)))
}

#[utoipa::path(delete, path = "/api/mortgages/{id}/payments/{payment_id}", tag = "Mortgages",
    params(
        ("id" = Uuid, Path, description = "Mortgage id"),
        ("payment_id" = Uuid, Path, description = "Payment id")
    ),
    responses((status = 204), (status = 404)))]
pub async fn delete_payment(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path((id, payment_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    let repo = ctx.mortgage_repo();
    let uc = DeletePayment {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id, payment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/mortgages", get(list_mortgages).post(create_mortgage))
        .route("/mortgages/summary", get(mortgage_summary))
        .route(
            "/mortgages/:id",
            get(get_mortgage).patch(update_mortgage).delete(delete_mortgage),
        )
        .route(
            "/mortgages/:id/payments",
            get(list_payments).post(record_payment),
        )
        .route("/mortgages/:id/payments/:payment_id", delete(delete_payment))
        .with_state(ctx)
}
