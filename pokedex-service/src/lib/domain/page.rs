use thiserror::Error;

/// Error for page request validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Page must be at least 1, got {0}")]
    InvalidPage(u32),

    #[error("Page size must be between 1 and {max}, got {actual}")]
    InvalidSize { max: u32, actual: u32 },
}

/// Validated page request (1-based page number and page size).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 10;
    pub const MAX_SIZE: u32 = 100;

    /// Create a new page request.
    ///
    /// # Errors
    /// * `InvalidPage` - Page number is zero
    /// * `InvalidSize` - Size is zero or above `MAX_SIZE`
    pub fn new(page: u32, size: u32) -> Result<Self, PageError> {
        if page < 1 {
            return Err(PageError::InvalidPage(page));
        }
        if size < 1 || size > Self::MAX_SIZE {
            return Err(PageError::InvalidSize {
                max: Self::MAX_SIZE,
                actual: size,
            });
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }

    /// Number of rows to fetch.
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            size: request.size(),
        }
    }

    /// Total number of pages.
    pub fn pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.size))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}
