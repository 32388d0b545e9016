use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::notifications::{
    BulkRetryResult, GenerateResult, NotificationFilter, NotificationRecord, NotificationSettings,
    ProcessResult,
};
use crate::application::dto::pagination::Page;
use crate::application::use_cases::notifications::browse::{
    GetNotification, ListNotifications, ListUpcomingNotifications,
};
use crate::application::use_cases::notifications::deliver::{
    ProcessNotifications, RetryNotification, RetryNotifications,
};
use crate::application::use_cases::notifications::generate::GenerateNotifications;
use crate::application::use_cases::notifications::settings::{
    GetNotificationSettings, UpdateNotificationSettings,
};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::{Json, Path, Query};
use crate::presentation::http::params::{PageParams, today};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Reminder offsets in days; the account settings apply when omitted.
    pub days_before_expiration: Option<Vec<i32>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkRetryRequest {
    pub ids: Vec<Uuid>,
}

#[utoipa::path(post, path = "/api/notifications/generate", tag = "Notifications",
    request_body(content = GenerateRequest, description = "Optional override of the reminder offsets"),
    responses((status = 200, body = GenerateResult), (status = 400)))]
pub async fn generate_notifications(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    body: Option<Json<GenerateRequest>>,
) -> ApiResult<Json<GenerateResult>> {
    let days = body.and_then(|Json(b)| b.days_before_expiration);
    let repo = ctx.notification_repo();
    let leases = ctx.lease_repo();
    let uc = GenerateNotifications {
        repo: repo.as_ref(),
        leases: leases.as_ref(),
    };
    let result = uc
        .execute(account_id, days, &ctx.cfg.notification_days, today())
        .await?;
    tracing::info!(%account_id, created = result.created, "notifications_generated");
    Ok(Json(result))
}

#[utoipa::path(post, path = "/api/notifications/process", tag = "Notifications",
    responses((status = 200, body = ProcessResult)))]
pub async fn process_notifications(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
) -> ApiResult<Json<ProcessResult>> {
    let repo = ctx.notification_repo();
    let sender = ctx.notification_sender();
    let uc = ProcessNotifications {
        repo: repo.as_ref(),
        sender: sender.as_ref(),
    };
    Ok(Json(uc.execute(account_id).await?))
}

#[utoipa::path(get, path = "/api/notifications", tag = "Notifications",
    params(NotificationFilter, PageParams),
    responses((status = 200, body = crate::application::dto::pagination::NotificationPage)))]
pub async fn list_notifications(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Query(filter): Query<NotificationFilter>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<Page<NotificationRecord>>> {
    let repo = ctx.notification_repo();
    let uc = ListNotifications {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &filter, page.into()).await?))
}

#[utoipa::path(get, path = "/api/notifications/upcoming", tag = "Notifications",
    responses((status = 200, body = crate::application::dto::pagination::NotificationPage)))]
pub async fn upcoming_notifications(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
) -> ApiResult<Json<Page<NotificationRecord>>> {
    let repo = ctx.notification_repo();
    let uc = ListUpcomingNotifications {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id).await?))
}

#[utoipa::path(get, path = "/api/notifications/{id}", tag = "Notifications",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses((status = 200, body = NotificationRecord), (status = 404)))]
pub async fn get_notification(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<NotificationRecord>> {
    let repo = ctx.notification_repo();
    let uc = GetNotification {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(post, path = "/api/notifications/{id}/retry", tag = "Notifications",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses((status = 200, body = NotificationRecord), (status = 400, description = "Not failed"), (status = 404)))]
pub async fn retry_notification(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<NotificationRecord>> {
    let repo = ctx.notification_repo();
    let sender = ctx.notification_sender();
    let uc = RetryNotification {
        repo: repo.as_ref(),
        sender: sender.as_ref(),
    };
    Ok(Json(uc.execute(account_id, id).await?))
}

#[utoipa::path(post, path = "/api/notifications/retry-bulk", tag = "Notifications",
    request_body = BulkRetryRequest,
    responses((status = 200, body = BulkRetryResult), (status = 400)))]
pub async fn retry_notifications(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(req): Json<BulkRetryRequest>,
) -> ApiResult<Json<BulkRetryResult>> {
    let repo = ctx.notification_repo();
    let sender = ctx.notification_sender();
    let uc = RetryNotifications {
        repo: repo.as_ref(),
        sender: sender.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &req.ids).await?))
}

#[utoipa::path(get, path = "/api/notifications/settings", tag = "Notifications",
    responses((status = 200, body = NotificationSettings)))]
pub async fn get_settings(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
) -> ApiResult<Json<NotificationSettings>> {
    let repo = ctx.notification_repo();
    let uc = GetNotificationSettings {
        repo: repo.as_ref(),
    };
    Ok(Json(
        uc.execute(account_id, &ctx.cfg.notification_days).await?,
    ))
}

#[utoipa::path(put, path = "/api/notifications/settings", tag = "Notifications",
    request_body = NotificationSettings,
    responses((status = 200, body = NotificationSettings), (status = 400)))]
pub async fn update_settings(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(req): Json<NotificationSettings>,
) -> ApiResult<Json<NotificationSettings>> {
    let repo = ctx.notification_repo();
    let uc = UpdateNotificationSettings {
        repo: repo.as_ref(),
    };
    Ok(Json(
        uc.execute(account_id, &req.days_before_expiration).await?,
    ))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/generate", post(generate_notifications))
        .route("/notifications/process", post(process_notifications))
        .route("/notifications/upcoming", get(upcoming_notifications))
        .route("/notifications/retry-bulk", post(retry_notifications))
        .route(
            "/notifications/settings",
            get(get_settings).put(update_settings),
        )
        .route("/notifications/:id", get(get_notification))
        .route("/notifications/:id/retry", post(retry_notification))
        .with_state(ctx)
}
