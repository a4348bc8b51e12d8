/// Pagination support for list queries
use serde::{Deserialize, Serialize};

use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

/// Pagination parameters for queries (1-based pages)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, page_size: u32) -> AppResult<Self> {
        Validator::validate_pagination(page, page_size)?;
        Ok(Self { page, page_size })
    }

    /// Offset for database queries
    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.page_size as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

/// Paginated result wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, params: &PaginationParams) -> Self {
        let total_pages = ((total_count as f64) / (params.page_size as f64)).ceil() as u32;

        Self {
            items,
            total_count,
            page: params.page,
            page_size: params.page_size,
            total_pages,
        }
    }

    /// Slices an already loaded, already ordered list
    pub fn from_slice(all: &[T], params: &PaginationParams) -> Self
    where
        T: Clone,
    {
        let start = (params.offset() as usize).min(all.len());
        let end = (start + params.page_size as usize).min(all.len());
        Self::new(all[start..end].to_vec(), all.len() as u64, params)
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_requested_page() {
        let data: Vec<u32> = (1..=45).collect();
        let params = PaginationParams::new(3, 20).unwrap();
        let page = PaginatedResult::from_slice(&data, &params);
        assert_eq!(page.items, (41..=45).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next_page());
    }

    #[test]
    fn page_past_end_is_empty() {
        let data = vec![1, 2, 3];
        let params = PaginationParams::new(5, 10).unwrap();
        assert!(PaginatedResult::from_slice(&data, &params).items.is_empty());
    }

    #[test]
    fn rejects_zero_page() {
        assert!(PaginationParams::new(0, 10).is_err());
    }
}
