use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::application::use_cases::valuations::manage_valuations::{
    CreateValuation, DeleteValuation, GetLatestValuation, GetValuation, ListPropertyValuations,
    UpdateValuation,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::valuations::{Valuation, ValuationFields, ValuationPatch};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path};

#[utoipa::path(post, path = "/api/valuations", tag = "Valuations",
    request_body = ValuationFields,
    responses((status = 201, body = Valuation), (status = 400), (status = 404, description = "Unknown property")))]
pub async fn create_valuation(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(fields): Json<ValuationFields>,
) -> ApiResult<(StatusCode, Json<Valuation>)> {
    let repo = ctx.valuation_repo();
    let properties = ctx.property_repo();
    let uc = CreateValuation {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
    };
    let created = uc.execute(account_id, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/properties/{id}/valuations", tag = "Valuations",
    params(("id" = Uuid, Path, description = "Property id")),
    responses((status = 200, body = [Valuation]), (status = 404)))]
pub async fn list_property_valuations(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(property_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Valuation>>> {
    let repo = ctx.valuation_repo();
    let properties = ctx.property_repo();
    let uc = ListPropertyValuations {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
    };
    Ok(Json(uc.execute(account_id, property_id).await?))
}

#[utoipa::path(get, path = "/api/properties/{id}/valuations/latest", tag = "Valuations",
    params(("id" = Uuid, Path, description = "Property id")),
    responses((status = 200, body = Valuation), (status = 404)))]
pub async fn latest_valuation(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(property_id): Path<Uuid>,
) -> ApiResult<Json<Valuation>> {
    let repo = ctx.valuation_repo();
    let uc = GetLatestValuation {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, property_id).await?))
}

#[utoipa::path(get, path = "/api/valuations/{id}", tag = "Valuations",
    params(("id" = Uuid, Path, description = "Valuation id")),
    responses((status = 200, body = Valuation), (status = 404)))]
pub async fn get_valuation(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Valuation>> {
    let repo = ctx.valuation_repo();
    let uc = GetValuation {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(patch, path = "/api/valuations/{id}", tag = "Valuations",
    params(("id" = Uuid, Path, description = "Valuation id")),
    request_body = ValuationPatch,
    responses((status = 200, body = Valuation), (status = 400), (status = 404)))]
pub async fn update_valuation(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<ValuationPatch>,
) -> ApiResult<Json<Valuation>> {
    let repo = ctx.valuation_repo();
    let properties = ctx.property_repo();
    let uc = UpdateValuation {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/valuations/{id}", tag = "Valuations",
    params(("id" = Uuid, Path, description = "Valuation id")),
    responses((status = 204), (status = 404)))]
pub async fn delete_valuation(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.valuation_repo();
    let uc = DeleteValuation {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/valuations", post(create_valuation))
        .route(
            "/valuations/:id",
            get(get_valuation)
                .patch(update_valuation)
                .delete(delete_valuation),
        )
        .route("/properties/:id/valuations", get(list_property_valuations))
        .route("/properties/:id/valuations/latest", get(latest_valuation))
        .with_state(ctx)
}
