use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::application::dto::owners::OwnershipRecord;
use crate::application::use_cases::ownerships::manage_ownerships::{
    CreateOwnership, DeleteOwnership, GetOwnership, GetOwnershipSummary, ListPropertyOwnerships,
    UpdateOwnership,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::ownerships::{Ownership, OwnershipFields, OwnershipPatch, OwnershipSummary};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path};
use crate::presentation::http::params::today;

#[utoipa::path(post, path = "/api/ownerships", tag = "Ownerships",
    request_body = OwnershipFields,
    responses(
        (status = 201, body = Ownership),
        (status = 404, description = "Unknown property or owner"),
        (status = 409, description = "Owner already holds this property")
    ))]
pub async fn create_ownership(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(fields): Json<OwnershipFields>,
) -> ApiResult<(StatusCode, Json<Ownership>)> {
    let repo = ctx.ownership_repo();
    let properties = ctx.property_repo();
    let owners = ctx.owner_repo();
    let uc = CreateOwnership {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
        owners: owners.as_ref(),
    };
    let created = uc.execute(account_id, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/properties/{id}/ownerships", tag = "Ownerships",
    params(("id" = Uuid, Path, description = "Property id")),
    responses((status = 200, body = [OwnershipRecord]), (status = 404)))]
pub async fn list_property_ownerships(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(property_id): Path<Uuid>,
) -> ApiResult<Json<Vec<OwnershipRecord>>> {
    let repo = ctx.ownership_repo();
    let properties = ctx.property_repo();
    let uc = ListPropertyOwnerships {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
    };
    Ok(Json(uc.execute(account_id, property_id).await?))
}

#[utoipa::path(get, path = "/api/properties/{id}/ownerships/summary", tag = "Ownerships",
    params(("id" = Uuid, Path, description = "Property id")),
    responses((status = 200, body = OwnershipSummary), (status = 404)))]
pub async fn ownership_summary(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(property_id): Path<Uuid>,
) -> ApiResult<Json<OwnershipSummary>> {
    let repo = ctx.ownership_repo();
    let properties = ctx.property_repo();
    let uc = GetOwnershipSummary {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
    };
    Ok(Json(uc.execute(account_id, property_id, today()).await?))
}

#[utoipa::path(get, path = "/api/ownerships/{id}", tag = "Ownerships",
    params(("id" = Uuid, Path, description = "Ownership id")),
    responses((status = 200, body = Ownership), (status = 404)))]
pub async fn get_ownership(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Ownership>> {
    let repo = ctx.ownership_repo();
    let uc = GetOwnership {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(patch, path = "/api/ownerships/{id}", tag = "Ownerships",
    params(("id" = Uuid, Path, description = "Ownership id")),
    request_body = OwnershipPatch,
    responses((status = 200, body = Ownership), (status = 400), (status = 404)))]
pub async fn update_ownership(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<OwnershipPatch>,
) -> ApiResult<Json<Ownership>> {
    let repo = ctx.ownership_repo();
    let uc = UpdateOwnership {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/ownerships/{id}", tag = "Ownerships",
    params(("id" = Uuid, Path, description = "Ownership id")),
    responses((status = 204), (status = 404)))]
pub async fn delete_ownership(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.ownership_repo();
    let uc = DeleteOwnership {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/ownerships", post(create_ownership))
        .route(
            "/ownerships/:id",
            get(get_ownership).patch(update_ownership).delete(delete_ownership),
        )
        .route("/properties/:id/ownerships", get(list_property_ownerships))
        .route("/properties/:id/ownerships/summary", get(ownership_summary))
        .with_state(ctx)
}
