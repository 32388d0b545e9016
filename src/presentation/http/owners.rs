use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::application::dto::owners::{OwnerListItem, OwnershipRecord};
use crate::application::dto::pagination::Page;
use crate::application::use_cases::owners::manage_owners::{
    CreateOwner, DeleteOwner, GetOwner, ListOwnerProperties, ListOwners, UpdateOwner,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::owners::{Owner, OwnerFields, OwnerPatch};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path, Query};
use crate::presentation::http::params::PageParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnerSearch {
    /// Case-insensitive match on name, email or phone.
    pub search: Option<String>,
}

#[utoipa::path(get, path = "/api/owners", tag = "Owners",
    params(OwnerSearch, PageParams),
    responses((status = 200, body = crate::application::dto::pagination::OwnerPage)))]
pub async fn list_owners(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(q): Query<OwnerSearch>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<Page<OwnerListItem>>> {
    let repo = ctx.owner_repo();
    let uc = ListOwners {
        repo: repo.as_ref(),
    };
    Ok(Json(
        uc.execute(account_id, q.search.as_deref(), page.into()).await?,
    ))
}

#[utoipa::path(get, path = "/api/owners/{id}", tag = "Owners",
    params(("id" = Uuid, Path, description = "Owner id")),
    responses((status = 200, body = Owner), (status = 404)))]
pub async fn get_owner(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Owner>> {
    let repo = ctx.owner_repo();
    let uc = GetOwner {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(post, path = "/api/owners", tag = "Owners",
    request_body = OwnerFields,
    responses((status = 201, body = Owner), (status = 409, description = "Email already used")))]
pub async fn create_owner(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(fields): Json<OwnerFields>,
) -> ApiResult<(StatusCode, Json<Owner>)> {
    let repo = ctx.owner_repo();
    let uc = CreateOwner {
        repo: repo.as_ref(),
    };
    let created = uc.execute(account_id, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/api/owners/{id}", tag = "Owners",
    params(("id" = Uuid, Path, description = "Owner id")),
    request_body = OwnerPatch,
    responses((status = 200, body = Owner), (status = 404), (status = 409)))]
pub async fn update_owner(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<OwnerPatch>,
) -> ApiResult<Json<Owner>> {
    let repo = ctx.owner_repo();
    let uc = UpdateOwner {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/owners/{id}", tag = "Owners",
    params(("id" = Uuid, Path, description = "Owner id")),
    responses((status = 204), (status = 404), (status = 409, description = "Owner has ownerships")))]
pub async fn delete_owner(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.owner_repo();
    let uc = DeleteOwner {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/owners/{id}/properties", tag = "Owners",
    params(("id" = Uuid, Path, description = "Owner id")),
    responses((status = 200, body = [OwnershipRecord]), (status = 404)))]
pub async fn list_owner_properties(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<OwnershipRecord>>> {
    let repo = ctx.owner_repo();
    let ownerships = ctx.ownership_repo();
    let uc = ListOwnerProperties {
        repo: repo.as_ref(),
        ownerships: ownerships.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/owners", get(list_owners).post(create_owner))
        .route(
            "/owners/:id",
            get(get_owner).patch(update_owner).delete(delete_owner),
        )
        .route("/owners/:id/properties", get(list_owner_properties))
        .with_state(ctx)
}
