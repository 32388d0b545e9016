use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::application::dto::pagination::PageRequest;

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number (default 1).
    pub page: Option<i64>,
    /// Page size, 1..=100 (default 10).
    pub limit: Option<i64>,
}

impl From<PageParams> for PageRequest {
    fn from(p: PageParams) -> Self {
        PageRequest::new(p.page, p.limit)
    }
}

/// Calendar date the server runs in; lease rules compare dates only.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
