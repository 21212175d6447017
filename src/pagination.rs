use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Sort direction for `createdAt` ordering on list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

/// Query parameters shared by GET /users and GET /users/:id/friends.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub sort: SortOrder,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl PageQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.page < 1 {
            return Err(ApiError::Validation("page must be >= 1".into()));
        }
        if self.limit < 1 {
            return Err(ApiError::Validation("limit must be >= 1".into()));
        }
        Ok(())
    }

    pub fn offset(&self) -> i64 {
        if self.page == 1 {
            0
        } else {
            (self.page - 1) * self.limit
        }
    }
}

/// Pagination metadata. `total` is the count of all matching rows, not the
/// size of the returned page.
#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub page: i64,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: i64, limit: i64) -> PageQuery {
        PageQuery {
            page,
            limit,
            sort: SortOrder::default(),
        }
    }

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(query(1, 10).offset(), 0);
        assert_eq!(query(1, 50).offset(), 0);
    }

    #[test]
    fn later_pages_skip_full_pages() {
        assert_eq!(query(2, 10).offset(), 10);
        assert_eq!(query(3, 10).offset(), 20);
        assert_eq!(query(4, 7).offset(), 21);
    }

    #[test]
    fn defaults_from_empty_query() {
        let q: PageQuery = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 10);
        assert_eq!(q.sort, SortOrder::Desc);
    }

    #[test]
    fn sort_parses_lowercase() {
        let q: PageQuery = serde_json::from_str(r#"{"sort":"asc"}"#).expect("deserialize");
        assert_eq!(q.sort, SortOrder::Asc);
    }

    #[test]
    fn rejects_non_positive_page_and_limit() {
        assert!(query(0, 10).validate().is_err());
        assert!(query(-1, 10).validate().is_err());
        assert!(query(1, 0).validate().is_err());
        assert!(query(2, 10).validate().is_ok());
    }
}
