// src/api/pagination.rs
//! Cursor-following over paginated endpoints.

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::NotionError;
use crate::model::{Pagination, ResultPage};
use std::future::Future;

/// Fetches pages until the service reports no more results.
pub async fn collect_all<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, NotionError>
where
    F: FnMut(Pagination) -> Fut,
    Fut: Future<Output = Result<ResultPage<T>, NotionError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages_fetched = 0u32;

    loop {
        let page = fetch_page(Pagination {
            start_cursor: cursor.take(),
            page_size: Some(NOTION_API_PAGE_SIZE),
        })
        .await?;
        pages_fetched += 1;

        cursor = page.continuation().map(str::to_string);
        items.extend(page.results);

        if cursor.is_none() {
            break;
        }
    }

    log::debug!("Collected {} items over {} pages", items.len(), pages_fetched);
    Ok(items)
}
