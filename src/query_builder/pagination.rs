use serde::{Deserialize, Serialize};

/// LIMIT/OFFSET parameters carried by a query
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    /// Create pagination with only limit
    pub fn limit_only(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: None,
        }
    }

    /// Create pagination with only offset
    pub fn offset_only(offset: u32) -> Self {
        Self {
            limit: None,
            offset: Some(offset),
        }
    }

    /// Create pagination with both limit and offset
    pub fn limit_offset(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        sql
    }
}

/// Pagination descriptor returned alongside a page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total_count: i64,
    pub page_size: u32,
    pub page: u32,
}

impl PageInfo {
    pub fn new(total_count: i64, page_size: u32, page: u32) -> Self {
        Self {
            total_count,
            page_size,
            page,
        }
    }

    /// Total number of pages implied by the count, using ceiling division.
    pub fn total_pages(&self) -> i64 {
        if self.page_size == 0 {
            return 0;
        }
        let size = i64::from(self.page_size);
        (self.total_count + size - 1) / size
    }
}

/// One page of repository results plus its descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_only() {
        let pagination = Pagination::limit_only(5);
        assert_eq!(pagination.limit, Some(5));
        assert_eq!(pagination.offset, None);
        assert_eq!(pagination.to_sql(), " LIMIT 5");
    }

    #[test]
    fn test_offset_only() {
        let pagination = Pagination::offset_only(15);
        assert_eq!(pagination.limit, None);
        assert_eq!(pagination.offset, Some(15));
        assert_eq!(pagination.to_sql(), " OFFSET 15");
    }

    #[test]
    fn test_limit_and_offset() {
        let pagination = Pagination::limit_offset(10, 30);
        assert_eq!(pagination.to_sql(), " LIMIT 10 OFFSET 30");
    }

    #[test]
    fn test_total_pages_calculation() {
        let info = PageInfo::new(25, 10, 1);
        assert_eq!(info.total_pages(), 3);

        let info = PageInfo::new(30, 10, 1);
        assert_eq!(info.total_pages(), 3);

        let info = PageInfo::new(31, 10, 1);
        assert_eq!(info.total_pages(), 4);
    }

    #[test]
    fn test_total_pages_with_zero_page_size() {
        let info = PageInfo::new(31, 0, 1);
        assert_eq!(info.total_pages(), 0);
    }
}
