/// One page of a paginated list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage<T> {
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> ResultPage<T> {
    /// The cursor to continue from, if the service has more results.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}

/// Cursor and size of a list request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pagination {
    pub start_cursor: Option<String>,
    pub page_size: Option<u32>,
}

impl Pagination {
    pub fn first(page_size: u32) -> Self {
        Self {
            start_cursor: None,
            page_size: Some(page_size),
        }
    }

    pub fn after(cursor: impl Into<String>) -> Self {
        Self {
            start_cursor: Some(cursor.into()),
            page_size: None,
        }
    }
}
