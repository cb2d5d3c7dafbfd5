//! Offset pagination.
//!
//! Pages are zero-indexed. A `Page` carries the total element count of the
//! filtered set alongside its slice, so callers can derive the page count and
//! neighbour availability without a second round trip.

use crate::error::DomainError;

/// Page index used when the caller does not supply one.
pub const DEFAULT_PAGE: u32 = 0;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A validated request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `size` is zero.
    pub fn new(page: u32, size: u32) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::validation("size", "must be at least 1"));
        }
        Ok(Self { page, size })
    }

    /// Zero-based page index.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of rows to skip before this page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a filtered, ordered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in result order.
    pub items: Vec<T>,
    /// Size of the whole filtered set.
    pub total_elements: u64,
    /// The request that produced this page.
    pub request: PageRequest,
}

impl<T> Page<T> {
    /// Assembles a page from its slice and the total element count.
    #[must_use]
    pub fn new(items: Vec<T>, total_elements: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_elements,
            request,
        }
    }

    /// Zero-based index of this page.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.request.page()
    }

    /// Requested page size.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.request.size()
    }

    /// `ceil(total_elements / page_size)`.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.request.size()))
    }

    /// Whether a page follows this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.current_page()) + 1 < self.total_pages()
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page() > 0
    }

    /// Converts the items while keeping the pagination metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            request: self.request,
        }
    }
}
