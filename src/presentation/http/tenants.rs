use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::application::dto::tenants::TenantDetail;
use crate::application::use_cases::tenants::manage_tenants::{
    CreateTenant, DeleteTenant, GetTenant, SearchTenants, UpdateTenant,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::tenants::{Tenant, TenantFields, TenantPatch};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path, Query};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TenantSearch {
    /// Case-insensitive match on name, email or phone.
    pub search: Option<String>,
}

#[utoipa::path(get, path = "/api/tenants", tag = "Tenants",
    params(TenantSearch),
    responses((status = 200, body = [Tenant])))]
pub async fn list_tenants(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(q): Query<TenantSearch>,
) -> ApiResult<Json<Vec<Tenant>>> {
    let repo = ctx.tenant_repo();
    let uc = SearchTenants {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, q.search.as_deref()).await?))
}

#[utoipa::path(get, path = "/api/tenants/{id}", tag = "Tenants",
    params(("id" = Uuid, Path, description = "Tenant id")),
    responses((status = 200, body = TenantDetail), (status = 404)))]
pub async fn get_tenant(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TenantDetail>> {
    let repo = ctx.tenant_repo();
    let leases = ctx.lease_repo();
    let uc = GetTenant {
        repo: repo.as_ref(),
        leases: leases.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(post, path = "/api/tenants", tag = "Tenants",
    request_body = TenantFields,
    responses((status = 201, body = Tenant), (status = 409, description = "Email already used")))]
pub async fn create_tenant(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(fields): Json<TenantFields>,
) -> ApiResult<(StatusCode, Json<Tenant>)> {
    let repo = ctx.tenant_repo();
    let uc = CreateTenant {
        repo: repo.as_ref(),
    };
    let created = uc.execute(account_id, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/api/tenants/{id}", tag = "Tenants",
    params(("id" = Uuid, Path, description = "Tenant id")),
    request_body = TenantPatch,
    responses((status = 200, body = Tenant), (status = 404), (status = 409)))]
pub async fn update_tenant(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<TenantPatch>,
) -> ApiResult<Json<Tenant>> {
    let repo = ctx.tenant_repo();
    let uc = UpdateTenant {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/tenants/{id}", tag = "Tenants",
    params(("id" = Uuid, Path, description = "Tenant id")),
    responses((status = 204), (status = 404), (status = 409, description = "Tenant has open leases")))]
pub async fn delete_tenant(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.tenant_repo();
    let leases = ctx.lease_repo();
    let uc = DeleteTenant {
        repo: repo.as_ref(),
        leases: leases.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/tenants", get(list_tenants).post(create_tenant))
        .route(
            "/tenants/:id",
            get(get_tenant).patch(update_tenant).delete(delete_tenant),
        )
        .with_state(ctx)
}
