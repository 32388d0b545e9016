use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::application::use_cases::plot_info::manage_plot_info::{
    CreatePlotInfo, DeletePlotInfo, GetPlotInfo, UpdatePlotInfo,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::plot_info::{PlotInfo, PlotInfoFields, PlotInfoPatch};
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path};

#[utoipa::path(post, path = "/api/properties/{id}/plot-info", tag = "Plot info",
    params(("id" = Uuid, Path, description = "Property id")),
    request_body = PlotInfoFields,
    responses((status = 201, body = PlotInfo), (status = 404), (status = 409, description = "Plot info already exists")))]
pub async fn create_plot_info(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(property_id): Path<Uuid>,
    Json(fields): Json<PlotInfoFields>,
) -> ApiResult<(StatusCode, Json<PlotInfo>)> {
    let repo = ctx.plot_info_repo();
    let properties = ctx.property_repo();
    let uc = CreatePlotInfo {
        repo: repo.as_ref(),
        properties: properties.as_ref(),
    };
    let created = uc.execute(account_id, property_id, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/properties/{id}/plot-info", tag = "Plot info",
    params(("id" = Uuid, Path, description = "Property id")),
    responses((status = 200, body = PlotInfo), (status = 404)))]
pub async fn get_property_plot_info(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(property_id): Path<Uuid>,
) -> ApiResult<Json<PlotInfo>> {
    let repo = ctx.plot_info_repo();
    let uc = GetPlotInfo {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.by_property(account_id, property_id).await?))
}

#[utoipa::path(get, path = "/api/plot-info/{id}", tag = "Plot info",
    params(("id" = Uuid, Path, description = "Plot info id")),
    responses((status = 200, body = PlotInfo), (status = 404)))]
pub async fn get_plot_info(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PlotInfo>> {
    let repo = ctx.plot_info_repo();
    let uc = GetPlotInfo {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.by_id(account_id, id).await?))
}

#[utoipa::path(patch, path = "/api/plot-info/{id}", tag = "Plot info",
    params(("id" = Uuid, Path, description = "Plot info id")),
    request_body = PlotInfoPatch,
    responses((status = 200, body = PlotInfo), (status = 404)))]
pub async fn update_plot_info(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(patch): Json<PlotInfoPatch>,
) -> ApiResult<Json<PlotInfo>> {
    let repo = ctx.plot_info_repo();
    let uc = UpdatePlotInfo {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id, patch).await?))
}

#[utoipa::path(delete, path = "/api/plot-info/{id}", tag = "Plot info",
    params(("id" = Uuid, Path, description = "Plot info id")),
    responses((status = 204), (status = 404)))]
pub async fn delete_plot_info(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ctx.plot_info_repo();
    let uc = DeletePlotInfo {
        repo: repo.as_ref(),
    };
    uc.execute(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/properties/:id/plot-info",
            get(get_property_plot_info).post(create_plot_info),
        )
        .route(
            "/plot-info/:id",
            get(get_plot_info).patch(update_plot_info).delete(delete_plot_info),
        )
        .with_state(ctx)
}
