use serde::{Deserialize, Serialize};

/// Pagination metadata of a paginated list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of records matching the query
    pub total: u64,
    /// 1-based page number
    pub page: u32,
    /// Maximum number of records per page
    pub limit: u32,
    /// Number of pages, `ceil(total / limit)`
    pub total_pages: u32,
}

impl PaginationMeta {
    /// Creates pagination metadata, deriving `total_pages` from `total` and `limit`.
    pub fn new(total: u64, page: u32, limit: u32) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: Self::pages_for(total, limit),
        }
    }

    /// Number of pages needed to hold `total` records at `limit` per page.
    pub fn pages_for(total: u64, limit: u32) -> u32 {
        if limit == 0 {
            return 0;
        }
        total.div_ceil(u64::from(limit)) as u32
    }

    /// Checks the envelope invariants for a page holding `len` records.
    ///
    /// A page may never hold more than `limit` records and `total_pages` must equal
    /// `ceil(total / limit)`.
    pub fn is_consistent(&self, len: usize) -> bool {
        len as u64 <= u64::from(self.limit)
            && self.total_pages == Self::pages_for(self.total, self.limit)
    }
}

/// Paginated list envelope as sent by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Normalized list result handed out by services.
///
/// Every list response shape the API produces (bare array, `{data}`, `{data, meta}` and the
/// double-wrapped `{data: {data, meta}}`) is normalized into this type at the client boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Present only for paginated endpoints
    pub meta: Option<PaginationMeta>,
}

impl<T> Page<T> {
    /// Page with no items and no pagination metadata.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            meta: None,
        }
    }

    pub fn unpaginated(items: Vec<T>) -> Self {
        Self { items, meta: None }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Paginated<T>> for Page<T> {
    fn from(paginated: Paginated<T>) -> Self {
        Self {
            items: paginated.data,
            meta: Some(paginated.meta),
        }
    }
}

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect total pages to be the ceiling of total over limit
    #[test]
    fn computes_total_pages() {
        assert_eq!(PaginationMeta::new(0, 1, 20).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 1, 20).total_pages, 1);
        assert_eq!(PaginationMeta::new(20, 1, 20).total_pages, 1);
        assert_eq!(PaginationMeta::new(21, 1, 20).total_pages, 2);
        assert_eq!(PaginationMeta::new(5, 1, 0).total_pages, 0);
    }

    /// Expect consistency checks to catch oversized pages and wrong page counts
    #[test]
    fn checks_invariants() {
        let meta = PaginationMeta::new(45, 1, 20);
        assert!(meta.is_consistent(20));
        assert!(!meta.is_consistent(21));

        let wrong_pages = PaginationMeta {
            total: 45,
            page: 1,
            limit: 20,
            total_pages: 2,
        };
        assert!(!wrong_pages.is_consistent(20));
    }

    /// Expect camelCase wire names for pagination metadata
    #[test]
    fn deserializes_wire_names() {
        let json = r#"{"data":[1,2],"meta":{"total":2,"page":1,"limit":10,"totalPages":1}}"#;
        let paginated: Paginated<u32> = serde_json::from_str(json).unwrap();
        let page = Page::from(paginated);
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.meta.unwrap().total_pages, 1);
    }
}
