use axum::{Router, extract::State, routing::post};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::application::dto::matching::AddressMatch;
use crate::application::use_cases::matching::match_addresses::MatchAddresses;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::account::AccountId;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::extract::Json;

#[derive(Debug, Deserialize, ToSchema)]
pub struct MatchRequest {
    pub addresses: Vec<String>,
}

#[utoipa::path(post, path = "/api/matching/addresses", tag = "Matching",
    request_body = MatchRequest,
    responses((status = 200, body = [AddressMatch]), (status = 400, description = "Too many addresses")))]
pub async fn match_addresses(
    State(ctx): State<AppContext>,
    AccountId(account_id): AccountId,
    Json(req): Json<MatchRequest>,
) -> ApiResult<Json<Vec<AddressMatch>>> {
    let repo = ctx.property_repo();
    let uc = MatchAddresses {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(account_id, &req.addresses).await?))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/matching/addresses", post(match_addresses))
        .with_state(ctx)
}
