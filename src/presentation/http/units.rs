use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::application::dto::units::{UnitFilter, UnitView};
use crate::application::use_cases::units::manage_units::{
    CreateUnit, DeleteUnit, GetUnit, ListUnits, UpdateUnit,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::units::{Unit, UnitFields, UnitPatch};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path, Query};

#[utoipa::path(get, path = "/api/units", tag = "Units",
    params(UnitFilter),
    responses((status = 200, body = [UnitView])))]
pub async fn list_units(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(filter): Query<UnitFilter>,
) -> ApiResult<Json<Vec<UnitView>>> {
    let repo = ctx.unit_repo();
    let leases = ctx.lease_repo();
    let uc = ListUnits {
        repo: repo.as_ref(),
        leases: leases.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &filter).await?))
}

#[utoipa::path(get, path = "/api/units/{id}", tag = "Units",
    params(("id" = Uuid, Path, description = "Unit id")),
    responses((status = 200, body = UnitView), (status = 404)))]
pub async fn get_unit(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UnitView>> {
    let repo = ctx.unit_repo();
    let leases = ctx.lease_repo();
    let uc = GetUnit {
        repo: repo.as_ref(),
        leases: leases.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(post, path = "/api/units", tag = "Units",
    request_body = UnitFields,
    responses((status = 201, body = Unit), (status = 404, description = "Unknown property"), (status = 409, description = "Apartment number taken")))]
pub async fn create_unit(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(fields): Json<UnitFields>,
) -> ApiResult<(StatusCode, Json<Unit>)> {
    let repo = ctx.unit_repo();
    let properties = ctx.property_repo();
    let uc = CreateUnit {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
    };
    let created = uc.execute(account_id, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/api/units/{id}", tag = "Units",
    params(("id" = Uuid, Path, description = "Unit id")),
    request_body = UnitPatch,
    responses((status = 200, body = Unit), (status = 404), (status = 409)))]
pub async fn update_unit(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<UnitPatch>,
) -> ApiResult<Json<Unit>> {
    let repo = ctx.unit_repo();
    let uc = UpdateUnit {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/units/{id}", tag = "Units",
    params(("id" = Uuid, Path, description = "Unit id")),
    responses((status = 204), (status = 404), (status = 409, description = "Unit has leases")))]
pub async fn delete_unit(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.unit_repo();
    let uc = DeleteUnit {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/units", get(list_units).post(create_unit))
        .route("/units/:id", get(get_unit).patch(update_unit).delete(delete_unit))
        .with_state(ctx)
}
