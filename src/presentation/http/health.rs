use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::infrastructure::db::PgPool;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

impl HealthResp {
    fn from_db(db_ok: bool) -> Self {
        Self {
            status: if db_ok { "ok" } else { "degraded" },
            database: if db_ok { "up" } else { "down" },
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(pool): State<PgPool>) -> Json<HealthResp> {
    let ping = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await;
    if let Err(e) = &ping {
        tracing::warn!(error = ?e, "health_db_unreachable");
    }
    Json(HealthResp::from_db(ping.is_ok()))
}

pub fn routes(pool: PgPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_database_degrades_status() {
        let resp = HealthResp::from_db(false);
        assert_eq!(resp.status, "degraded");
        assert_eq!(resp.database, "down");
        assert_eq!(HealthResp::from_db(true).status, "ok");
    }
}
