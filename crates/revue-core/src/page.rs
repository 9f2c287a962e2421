//! Pagination protocol
//!
//! Callers address pages 1-indexed; stores work with 0-indexed offsets.
//! `PageRequest` owns that translation, `PageResponse` carries one bounded
//! slice of an ordered result set plus the counts needed to compute total
//! pages. Concatenating pages `1..=total_pages` reproduces the full ordered
//! result set with no duplicates or gaps.

use crate::{Result, RevueError};
use serde::{Deserialize, Serialize};

/// A validated, 1-indexed page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_no: u64,
    page_size: u64,
}

impl PageRequest {
    /// Both `page_no` and `page_size` must be at least 1
    pub fn new(page_no: u64, page_size: u64) -> Result<Self> {
        if page_no < 1 {
            return Err(RevueError::Validation(
                "pageNo must be at least 1".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(RevueError::Validation(
                "pageSize must be at least 1".to_string(),
            ));
        }
        Ok(Self { page_no, page_size })
    }

    pub fn page_no(&self) -> u64 {
        self.page_no
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// 0-indexed offset for the store query
    pub fn offset(&self) -> u64 {
        (self.page_no - 1) * self.page_size
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// One page of an ordered result set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page_no: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub last: bool,
}

impl<T> PageResponse<T> {
    /// Build a response from a store slice and total count
    ///
    /// `last` is true iff the request addresses the final page, or the
    /// result set is empty.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(request.page_size());
        let last = total_pages == 0 || request.page_no() >= total_pages;
        Self {
            content,
            page_no: request.page_no(),
            page_size: request.page_size(),
            total_elements,
            total_pages,
            last,
        }
    }

    /// Convert the content items, keeping the page bookkeeping
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            content: self.content.into_iter().map(f).collect(),
            page_no: self.page_no,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last: self.last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_page_no_and_size() {
        assert!(PageRequest::new(0, 10).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, 1).is_ok());
    }

    #[test]
    fn test_offset_translation() {
        let first = PageRequest::new(1, 10).unwrap();
        assert_eq!(first.offset(), 0);
        assert_eq!(first.limit(), 10);

        let third = PageRequest::new(3, 25).unwrap();
        assert_eq!(third.offset(), 50);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let request = PageRequest::new(1, 10).unwrap();

        let exact = PageResponse::new(vec![0u8; 10], &request, 20);
        assert_eq!(exact.total_pages, 2);

        let ragged = PageResponse::new(vec![0u8; 10], &request, 21);
        assert_eq!(ragged.total_pages, 3);
    }

    #[test]
    fn test_last_flag() {
        let size = 10;
        let total = 25;

        for page_no in 1..=3u64 {
            let request = PageRequest::new(page_no, size).unwrap();
            let response = PageResponse::new(Vec::<u8>::new(), &request, total);
            assert_eq!(response.last, page_no == 3, "page {page_no}");
        }
    }

    #[test]
    fn test_empty_result_set_is_last() {
        let request = PageRequest::new(1, 10).unwrap();
        let response = PageResponse::new(Vec::<u8>::new(), &request, 0);

        assert_eq!(response.total_pages, 0);
        assert_eq!(response.total_elements, 0);
        assert!(response.last);
    }

    #[test]
    fn test_map_preserves_bookkeeping() {
        let request = PageRequest::new(2, 2).unwrap();
        let response = PageResponse::new(vec![1, 2], &request, 5).map(|n| n * 10);

        assert_eq!(response.content, vec![10, 20]);
        assert_eq!(response.page_no, 2);
        assert_eq!(response.total_elements, 5);
        assert_eq!(response.total_pages, 3);
        assert!(!response.last);
    }
}
