use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::types::Page;

#[derive(Debug)]
pub enum FetchError {
    /// The request never produced an HTTP status (connect, timeout, decode).
    Network(String),
    /// The API answered with a non-success status.
    Http(StatusCode),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Http(status),
            None => FetchError::Network(err.to_string()),
        }
    }
}

/// Fetches every page of a paginated collection into one ordered sequence.
///
/// Starts at `start_url` and follows the `next` link returned in each page
/// body, concatenating the `items` of every page. Order is preserved both
/// within a page and across pages. Pages are requested strictly
/// sequentially; each `next` link is only known after the previous page's
/// response.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `start_url` - Absolute URL of the first page
/// * `max_items` - Optional stop condition; fetching stops once the
///   accumulated count reaches this value, so the result holds between
///   `max_items` and `max_items + page_size - 1` items when more are
///   available
///
/// # Errors
///
/// Any HTTP failure mid-pagination aborts the whole fetch with
/// [`FetchError`], discarding the pages already accumulated. Downstream
/// bucketing relies on a fetch having either fully completed up to its stop
/// condition or not happened at all, so there is no partial-success return.
pub async fn fetch_all<T>(
    token: &str,
    start_url: &str,
    max_items: Option<usize>,
) -> Result<Vec<T>, FetchError>
where
    T: DeserializeOwned,
{
    let client = Client::new();
    let mut items: Vec<T> = Vec::new();
    let mut next_url = Some(start_url.to_string());

    while let Some(url) = next_url {
        let response = client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        let page: Page<T> = response.json().await?;
        items.extend(page.items);

        if fetch_complete(items.len(), page.next.is_some(), max_items) {
            break;
        }
        next_url = page.next;
    }

    Ok(items)
}

/// Decides whether pagination terminates after the current page.
///
/// Fetching always stops when the page carries no `next` link. With a cap,
/// it also stops once `fetched >= max_items` - the accumulated sequence may
/// overshoot the cap by at most one page.
pub fn fetch_complete(fetched: usize, has_next: bool, max_items: Option<usize>) -> bool {
    if !has_next {
        return true;
    }
    matches!(max_items, Some(max) if fetched >= max)
}
