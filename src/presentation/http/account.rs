use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::error_response;

pub const ACCOUNT_HEADER: &str = "x-account-id";

/// Tenant account a request operates on, taken from `X-Account-Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountId(pub Uuid);

#[derive(Debug, PartialEq, Eq)]
pub enum AccountRejection {
    Missing,
    Invalid,
}

impl IntoResponse for AccountRejection {
    fn into_response(self) -> Response {
        match self {
            AccountRejection::Missing => {
                error_response(StatusCode::UNAUTHORIZED, "X-Account-Id header is required")
            }
            AccountRejection::Invalid => {
                error_response(StatusCode::BAD_REQUEST, "X-Account-Id must be a valid UUID")
            }
        }
    }
}

pub(crate) fn resolve_account(
    header: Option<&str>,
    fallback: Option<Uuid>,
) -> Result<Uuid, AccountRejection> {
    match header.map(str::trim) {
        Some(raw) => Uuid::parse_str(raw).map_err(|_| AccountRejection::Invalid),
        None => fallback.ok_or(AccountRejection::Missing),
    }
}

#[axum::async_trait]
impl FromRequestParts<AppContext> for AccountId {
    type Rejection = AccountRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(ACCOUNT_HEADER) {
            Some(v) => Some(v.to_str().map_err(|_| AccountRejection::Invalid)?),
            None => None,
        };
        resolve_account(header, ctx.cfg.fallback_account()).map(AccountId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_wins_over_the_fallback() {
        let id = Uuid::new_v4();
        let fallback = Some(Uuid::new_v4());
        assert_eq!(resolve_account(Some(&id.to_string()), fallback), Ok(id));
        assert_eq!(resolve_account(None, fallback), Ok(fallback.unwrap()));
    }

    #[test]
    fn bad_or_missing_headers_are_rejected() {
        assert_eq!(
            resolve_account(Some("not-a-uuid"), Some(Uuid::nil())),
            Err(AccountRejection::Invalid)
        );
        assert_eq!(resolve_account(None, None), Err(AccountRejection::Missing));
    }
}
