use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::application::dto::pagination::Page;
use crate::application::use_cases::bank_accounts::manage_bank_accounts::{
    CreateBankAccount, DeleteBankAccount, GetBankAccount, ListBankAccounts, SetBankAccountActive,
    UpdateBankAccount,
};
use crate::application::use_cases::mortgages::manage_mortgages::ListBankAccountMortgages;
use crate::bootstrap::app_context::AppContext;
use crate::domain::bank_accounts::{BankAccount, BankAccountFields, BankAccountPatch};
use crate::domain::mortgages::Mortgage;
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path, Query};
use crate::presentation::http::params::PageParams;

async fn list(ctx: &AppContext, account_id: Uuid, active_only: bool) -> ApiResult<Vec<BankAccount>> {
    let repo = ctx.bank_account_repo();
    let uc = ListBankAccounts {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, active_only).await
}

#[utoipa::path(get, path = "/api/bank-accounts", tag = "Bank accounts",
    responses((status = 200, body = [BankAccount])))]
pub async fn list_bank_accounts(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
) -> ApiResult<Json<Vec<BankAccount>>> {
    Ok(Json(list(&ctx, account_id, false).await?))
}

#[utoipa::path(get, path = "/api/bank-accounts/active", tag = "Bank accounts",
    responses((status = 200, body = [BankAccount])))]
pub async fn list_active_bank_accounts(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
) -> ApiResult<Json<Vec<BankAccount>>> {
    Ok(Json(list(&ctx, account_id, true).await?))
}

#[utoipa::path(get, path = "/api/bank-accounts/{id}", tag = "Bank accounts",
    params(("id" = Uuid, Path, description = "Bank account id")),
    responses((status = 200, body = BankAccount), (status = 404)))]
pub async fn get_bank_account(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BankAccount>> {
    let repo = ctx.bank_account_repo();
    let uc = GetBankAccount {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(post, path = "/api/bank-accounts", tag = "Bank accounts",
    request_body = BankAccountFields,
    responses((status = 201, body = BankAccount), (status = 409, description = "Duplicate account number")))]
pub async fn create_bank_account(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(fields): Json<BankAccountFields>,
) -> ApiResult<(StatusCode, Json<BankAccount>)> {
    let repo = ctx.bank_account_repo();
    let uc = CreateBankAccount {
        repo: repo.as_ref(),
    };
    let created = uc.execute(account_id, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/api/bank-accounts/{id}", tag = "Bank accounts",
    params(("id" = Uuid, Path, description = "Bank account id")),
    request_body = BankAccountPatch,
    responses((status = 200, body = BankAccount), (status = 404), (status = 409)))]
pub async fn update_bank_account(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<BankAccountPatch>,
) -> ApiResult<Json<BankAccount>> {
    let repo = ctx.bank_account_repo();
    let uc = UpdateBankAccount {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch).await?))
}

async fn set_active(ctx: &AppContext, account_id: Uuid, id: Uuid, active: bool) -> ApiResult<BankAccount> {
    let repo = ctx.bank_account_repo();
    let uc = SetBankAccountActive {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id, active).await
}

#[utoipa::path(post, path = "/api/bank-accounts/{id}/activate", tag = "Bank accounts",
    params(("id" = Uuid, Path, description = "Bank account id")),
    responses((status = 200, body = BankAccount), (status = 404)))]
pub async fn activate_bank_account(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BankAccount>> {
    Ok(Json(set_active(&ctx, account_id, id, true).await?))
}

#[utoipa::path(post, path = "/api/bank-accounts/{id}/deactivate", tag = "Bank accounts",
    params(("id" = Uuid, Path, description = "Bank account id")),
    responses((status = 200, body = BankAccount), (status = 404)))]
pub async fn deactivate_bank_account(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BankAccount>> {
    Ok(Json(set_active(&ctx, account_id, id, false).await?))
}

#[utoipa::path(get, path = "/api/bank-accounts/{id}/mortgages", tag = "Bank accounts",
    params(("id" = Uuid, Path, description = "Bank account id"), PageParams),
    responses((status = 200, body = crate::application::dto::pagination::MortgagePage), (status = 404)))]
pub async fn list_bank_account_mortgages(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<Page<Mortgage>>> {
    let repo = ctx.mortgage_repo();
    let bank_accounts = ctx.bank_account_repo();
    let uc = ListBankAccountMortgages {
        repo: repo.as_ref(),
        bank_accounts: bank_accounts.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, page.into()).await?))
}

#[utoipa::path(delete, path = "/api/bank-accounts/{id}", tag = "Bank accounts",
    params(("id" = Uuid, Path, description = "Bank account id")),
    responses((status = 204), (status = 404), (status = 409, description = "Referenced by mortgages")))]
pub async fn delete_bank_account(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.bank_account_repo();
    let uc = DeleteBankAccount {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/bank-accounts", get(list_bank_accounts).post(create_bank_account))
        .route("/bank-accounts/active", get(list_active_bank_accounts))
        .route(
            "/bank-accounts/:id",
            get(get_bank_account)
                .patch(update_bank_account)
                .delete(delete_bank_account),
        )
        .route("/bank-accounts/:id/activate", post(activate_bank_account))
        .route("/bank-accounts/:id/deactivate", post(deactivate_bank_account))
        .route("/bank-accounts/:id/mortgages", get(list_bank_account_mortgages))
        .with_state(ctx)
}
