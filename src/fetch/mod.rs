pub mod client;
pub mod wire;

use std::future::Future;
use std::num::NonZeroU32;

use governor::{Quota, RateLimiter};
use indicatif::ProgressBar;

use crate::fetch::client::ApiClient;
use crate::fetch::wire::{QueryPage, RawRecord};
use crate::runner::RunnerError;

/// Follows the cursor protocol until the remote reports no more data:
/// request a page, append its records, advance to `next_cursor` while
/// `has_more` holds. `max_pages` bounds the number of requests so a remote
/// that always reports more data fails with a distinct error instead of
/// looping forever. Returns the records in arrival order and the number of
/// pages fetched.
pub(crate) async fn drain_pages<F, Fut>(
    pb: &ProgressBar,
    mut request_page: F,
    max_pages: u32,
) -> Result<(Vec<RawRecord>, u32), RunnerError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<QueryPage, RunnerError>>,
{
    let mut records: Vec<RawRecord> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages: u32 = 0;

    loop {
        if pages >= max_pages {
            return Err(RunnerError::PaginationOverrun { budget: max_pages });
        }
        let page = request_page(cursor.take()).await?;
        pages += 1;
        records.extend(page.results);
        pb.inc(1);
        pb.set_message(format!("{} records", records.len()));
        if !page.has_more {
            break;
        }
        cursor = page.next_cursor;
    }

    Ok((records, pages))
}

/// One sequential, rate-limited pass over the whole collection.
pub async fn fetch_all_records(
    client: &ApiClient,
    collection: &str,
    page_size: u32,
    max_pages: u32,
    rate: u32,
    pb: &ProgressBar,
) -> Result<(Vec<RawRecord>, u32), RunnerError> {
    let lim = RateLimiter::direct(Quota::per_second(
        NonZeroU32::new(rate.max(1)).unwrap_or(NonZeroU32::MIN),
    ));

    drain_pages(
        pb,
        |cursor| {
            let lim = &lim;
            async move {
                lim.until_ready().await;
                client.query_page(collection, page_size, cursor).await
            }
        },
        max_pages,
    )
    .await
}
