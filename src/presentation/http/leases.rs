use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::application::dto::leases::{ExpiringLease, LeaseFilter, LeaseRecord, RefreshResult};
use crate::application::dto::pagination::Page;
use crate::application::use_cases::leases::manage_leases::{
    CreateLease, DeleteLease, GetLease, ListLeases, TerminateLease, UpdateLease,
};
use crate::application::use_cases::leases::timeline::{
    GetExpirationTimeline, RefreshLeaseStatuses,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::leases::{LeaseFields, LeasePatch};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path, Query};
use crate::presentation::http::params::{PageParams, today};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TimelineQuery {
    /// Look-ahead window in months, 1..=120 (default 12).
    pub months: Option<u32>,
}

#[utoipa::path(get, path = "/api/leases", tag = "Leases",
    params(LeaseFilter, PageParams),
    responses((status = 200, body = crate::application::dto::pagination::LeasePage)))]
pub async fn list_leases(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(filter): Query<LeaseFilter>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<Page<LeaseRecord>>> {
    let repo = ctx.lease_repo();
    let uc = ListLeases {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &filter, page.into()).await?))
}

#[utoipa::path(get, path = "/api/leases/{id}", tag = "Leases",
    params(("id" = Uuid, Path, description = "Lease id")),
    responses((status = 200, body = LeaseRecord), (status = 404)))]
pub async fn get_lease(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<LeaseRecord>> {
    let repo = ctx.lease_repo();
    let uc = GetLease {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(post, path = "/api/leases", tag = "Leases",
    request_body = LeaseFields,
    responses(
        (status = 201, body = LeaseRecord),
        (status = 400, description = "Invalid dates or the unit is already leased"),
        (status = 404, description = "Unknown unit or tenant")
    ))]
pub async fn create_lease(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(fields): Json<LeaseFields>,
) -> ApiResult<(StatusCode, Json<LeaseRecord>)> {
    let repo = ctx.lease_repo();
    let units = ctx.unit_repo();
    let tenants = ctx.tenant_repo();
    let uc = CreateLease {
        repo: repo.as_ref(),
        units: units.as_ref(),
        tenants: tenants.as_ref(),
    };
    let created = uc.execute(account_id, fields, today()).await?;
    tracing::info!(lease_id = %created.lease.id, status = created.lease.status.as_str(), "lease_created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/api/leases/{id}", tag = "Leases",
    params(("id" = Uuid, Path, description = "Lease id")),
    request_body = LeasePatch,
    responses((status = 200, body = LeaseRecord), (status = 400), (status = 404)))]
pub async fn update_lease(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<LeasePatch>,
) -> ApiResult<Json<LeaseRecord>> {
    let repo = ctx.lease_repo();
    let units = ctx.unit_repo();
    let tenants = ctx.tenant_repo();
    let uc = UpdateLease {
        repo: repo.as_ref(),
        units: units.as_ref(),
        tenants: tenants.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch, today()).await?))
}

#[utoipa::path(post, path = "/api/leases/{id}/terminate", tag = "Leases",
    params(("id" = Uuid, Path, description = "Lease id")),
    responses((status = 200, body = LeaseRecord), (status = 404)))]
pub async fn terminate_lease(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<LeaseRecord>> {
    let repo = ctx.lease_repo();
    let uc = TerminateLease {
        repo: repo.as_ref(),
    };
    let lease = uc.execute(account_id, id).await?;
    tracing::info!(lease_id = %id, "lease_terminated");
    Ok(Json(lease))
}

#[utoipa::path(delete, path = "/api/leases/{id}", tag = "Leases",
    params(("id" = Uuid, Path, description = "Lease id")),
    responses((status = 204), (status = 404)))]
pub async fn delete_lease(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.lease_repo();
    let uc = DeleteLease {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/leases/refresh-statuses", tag = "Leases",
    responses((status = 200, body = RefreshResult)))]
pub async fn refresh_lease_statuses(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
) -> ApiResult<Json<RefreshResult>> {
    let repo = ctx.lease_repo();
    let uc = RefreshLeaseStatuses {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, today()).await?))
}

#[utoipa::path(get, path = "/api/leases/expiration-timeline", tag = "Leases",
    params(TimelineQuery),
    responses((status = 200, body = [ExpiringLease]), (status = 400, description = "months out of range")))]
pub async fn expiration_timeline(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(q): Query<TimelineQuery>,
) -> ApiResult<Json<Vec<ExpiringLease>>> {
    let repo = ctx.lease_repo();
    let uc = GetExpirationTimeline {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, q.months, today()).await?))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/leases", get(list_leases).post(create_lease))
        .route("/leases/refresh-statuses", post(refresh_lease_statuses))
        .route("/leases/expiration-timeline", get(expiration_timeline))
        .route(
            "/leases/:id",
            get(get_lease).patch(update_lease).delete(delete_lease),
        )
        .route("/leases/:id/terminate", post(terminate_lease))
        .with_state(ctx)
}
