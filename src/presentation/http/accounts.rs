use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::accounts::create_account::CreateAccount;
use crate::application::use_cases::accounts::list_accounts::ListAccounts;
use crate::bootstrap::app_context::AppContext;
use crate::domain::accounts::{Account, AccountStatus};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::Json;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    pub id: Option<Uuid>,
    pub name: String,
    pub status: Option<AccountStatus>,
}

#[utoipa::path(get, path = "/api/accounts", tag = "Accounts",
    responses((status = 200, body = [Account])))]
pub async fn list_accounts(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<Account>>> {
    let repo = ctx.account_repo();
    let uc = ListAccounts {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute().await?))
}

#[utoipa::path(post, path = "/api/accounts", tag = "Accounts",
    request_body = CreateAccountRequest,
    responses((status = 201, body = Account), (status = 409, description = "Id already taken")))]
pub async fn create_account(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateAccountRequest>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    let repo = ctx.account_repo();
    let uc = CreateAccount {
        repo: repo.as_ref(),
    };
    let account = uc.execute(req.id, &req.name, req.status).await?;
    tracing::info!(account_id = %account.id, "account_created");
    Ok((StatusCode::CREATED, Json(account)))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .with_state(ctx)
}
