// src/api/simple_pagination.rs
//! Cursor looping over paginated endpoints.

use super::types::PaginationResult;
use crate::constants::MAX_PAGINATION_REQUESTS;
use crate::error::AppError;
use crate::model::PaginatedList;

/// Fetches every page of a listing by following `next_cursor`.
///
/// `fetch_page` receives the cursor to resume from, `None` for the first request.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_page: F) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedList<T>, AppError>>,
{
    let mut items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0usize;

    loop {
        let page = fetch_page(cursor.take()).await?;
        pages_fetched += 1;
        items.extend(page.results);

        match (page.has_more, page.next_cursor) {
            (true, Some(next)) => cursor = Some(next),
            (true, None) => {
                log::warn!("Server reported more results without a cursor; stopping");
                break;
            }
            (false, _) => break,
        }

        if pages_fetched >= MAX_PAGINATION_REQUESTS {
            log::warn!(
                "Stopped after {} pages; the listing may be incomplete",
                pages_fetched
            );
            break;
        }
    }

    log::debug!(
        "Fetched {} items over {} pages",
        items.len(),
        pages_fetched
    );

    Ok(PaginationResult {
        items,
        pages_fetched,
    })
}
