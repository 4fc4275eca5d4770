use serde::Deserialize;

/// Pagination parameters shared by the listing endpoints. `page` wins over
/// `offset` when both are supplied; the mobile client pages, scripts offset.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub page: Option<i64>,
}

impl PaginationParams {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 100;
    // Keeps page * limit far from i64 overflow for hostile query strings.
    pub const MAX_PAGE: i64 = 1_000_000;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        match self.page {
            Some(page) if page > 1 => (page.min(Self::MAX_PAGE) - 1) * self.limit(),
            _ => self.offset.unwrap_or(0).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn limit_is_clamped() {
        let params = PaginationParams {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(params.limit(), PaginationParams::MAX_LIMIT);

        let params = PaginationParams {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn page_takes_precedence_over_offset() {
        let params = PaginationParams {
            limit: Some(25),
            offset: Some(7),
            page: Some(3),
        };
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn huge_page_is_clamped_without_overflow() {
        let params = PaginationParams {
            limit: Some(100),
            page: Some(i64::MAX),
            ..Default::default()
        };
        assert_eq!(params.offset(), (PaginationParams::MAX_PAGE - 1) * 100);
    }

    #[test]
    fn negative_offset_is_floored() {
        let params = PaginationParams {
            offset: Some(-5),
            ..Default::default()
        };
        assert_eq!(params.offset(), 0);
    }
}
