use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::leases::LeaseRecord;
use crate::application::dto::notifications::NotificationRecord;
use crate::application::dto::owners::OwnerListItem;
use crate::application::dto::properties::PropertyListItem;
use crate::domain::mortgages::Mortgage;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Clamps to `page >= 1` and `1 <= limit <= 100`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(
    PropertyPage = Page<PropertyListItem>,
    LeasePage = Page<LeaseRecord>,
    OwnerPage = Page<OwnerListItem>,
    MortgagePage = Page<Mortgage>,
    NotificationPage = Page<NotificationRecord>
)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, req: PageRequest) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + req.limit - 1) / req.limit
        };
        Self {
            data,
            meta: PageMeta {
                page: req.page,
                limit: req.limit,
                total,
                total_pages,
            },
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_clamped_and_offset_computed() {
        let req = PageRequest::new(Some(0), Some(500));
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, MAX_LIMIT);
        assert_eq!(PageRequest::new(Some(3), Some(20)).offset(), 40);
        assert_eq!(PageRequest::default().limit, DEFAULT_LIMIT);
    }

    #[test]
    fn total_pages_round_up() {
        let req = PageRequest::new(Some(1), Some(10));
        assert_eq!(Page::new(Vec::<u8>::new(), 0, req).meta.total_pages, 0);
        assert_eq!(Page::new(Vec::<u8>::new(), 10, req).meta.total_pages, 1);
        assert_eq!(Page::new(Vec::<u8>::new(), 11, req).meta.total_pages, 2);
    }
}
