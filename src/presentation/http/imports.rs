use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::dto::imports::{ImportPreview, RollbackResult};
use crate::application::use_cases::imports::history::{
    GetImport, ListImportHistory, RollbackImport,
};
use crate::application::use_cases::imports::rows::preview_import;
use crate::application::use_cases::imports::run_import::RunImport;
use crate::bootstrap::app_context::AppContext;
use crate::domain::imports::{ImportRecord, ImportType};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path, Query};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImportRequest {
    /// One JSON object per spreadsheet row, keyed by column name.
    #[schema(value_type = Vec<Object>)]
    pub rows: Vec<Value>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImportHistoryQuery {
    #[param(value_type = Option<String>)]
    pub import_type: Option<ImportType>,
}

#[utoipa::path(post, path = "/api/import/{import_type}/preview", tag = "Imports",
    params(("import_type" = String, Path, description = "properties, owners, ownerships, mortgages or plot-info")),
    request_body = ImportRequest,
    responses((status = 200, body = ImportPreview)))]
pub async fn preview(
    AccountId(_account_id): AccountId,
    Path(import_type): Path<ImportType>,
    Json(req): Json<ImportRequest>,
) -> ApiResult<Json<ImportPreview>> {
    Ok(Json(preview_import(import_type, &req.rows)))
}

#[utoipa::path(post, path = "/api/import/{import_type}", tag = "Imports",
    params(("import_type" = String, Path, description = "properties, owners, ownerships, mortgages or plot-info")),
    request_body = ImportRequest,
    responses((status = 201, body = ImportRecord), (status = 400, description = "No rows")))]
pub async fn run_import(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(import_type): Path<ImportType>,
    Json(req): Json<ImportRequest>,
) -> ApiResult<(StatusCode, Json<ImportRecord>)> {
    let properties = ctx.property_repo();
    let companies = ctx.investment_company_repo();
    let owners = ctx.owner_repo();
    let ownerships = ctx.ownership_repo();
    let mortgages = ctx.mortgage_repo();
    let bank_accounts = ctx.bank_account_repo();
    let plot_info = ctx.plot_info_repo();
    let history = ctx.import_history();
    let uc = RunImport {
        properties: properties.as_ref(),
        companies: companies.as_ref(),
        owners: owners.as_ref(),
        ownerships: ownerships.as_ref(),
        mortgages: mortgages.as_ref(),
        bank_accounts: bank_accounts.as_ref(),
        plot_info: plot_info.as_ref(),
        history: history.as_ref(),
    };
    let record = uc.execute(account_id, import_type, &req.rows).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(get, path = "/api/import/history", tag = "Imports",
    params(ImportHistoryQuery),
    responses((status = 200, body = [ImportRecord])))]
pub async fn list_history(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(q): Query<ImportHistoryQuery>,
) -> ApiResult<Json<Vec<ImportRecord>>> {
    let history = ctx.import_history();
    let uc = ListImportHistory {
        history: history.as_ref(),
    };
    Ok(Json(uc.execute(account_id, q.import_type).await?))
}

#[utoipa::path(get, path = "/api/import/history/{id}", tag = "Imports",
    params(("id" = Uuid, Path, description = "Import id")),
    responses((status = 200, body = ImportRecord), (status = 404)))]
pub async fn get_history(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ImportRecord>> {
    let history = ctx.import_history();
    let uc = GetImport {
        history: history.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(post, path = "/api/import/history/{id}/rollback", tag = "Imports",
    params(("id" = Uuid, Path, description = "Import id")),
    responses((status = 200, body = RollbackResult), (status = 400, description = "Already rolled back"), (status = 404)))]
pub async fn rollback(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<RollbackResult>> {
    let properties = ctx.property_repo();
    let owners = ctx.owner_repo();
    let ownerships = ctx.ownership_repo();
    let mortgages = ctx.mortgage_repo();
    let plot_info = ctx.plot_info_repo();
    let history = ctx.import_history();
    let uc = RollbackImport {
        properties: properties.as_ref(),
        owners: owners.as_ref(),
        ownerships: ownerships.as_ref(),
        mortgages: mortgages.as_ref(),
        plot_info: plot_info.as_ref(),
        history: history.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/import/history", get(list_history))
        .route("/import/history/:id", get(get_history))
        .route("/import/history/:id/rollback", post(rollback))
        .route("/import/:import_type", post(run_import))
        .route("/import/:import_type/preview", post(preview))
        .with_state(ctx)
}
