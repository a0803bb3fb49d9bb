use reqwest::{header::HeaderMap, Client};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::check_status;
use crate::github::rate_limiter::RateLimiter;

pub const PER_PAGE: u32 = 100;
const MAX_RETRIES: u32 = 1;

pub struct Paginator<'a> {
    client: &'a Client,
    rate_limiter: &'a RateLimiter,
}

pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client, rate_limiter: &'a RateLimiter) -> Self {
        Self {
            client,
            rate_limiter,
        }
    }

    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
    ) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let Page { items, has_next } = self.fetch_page(base_url, per_page, page).await?;
            let items_count = items.len();
            all_items.extend(items);

            // Stop on the last advertised page or a short page
            if !has_next || items_count < per_page as usize {
                break;
            }

            page += 1;
        }

        Ok(all_items)
    }

    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Page<T>> {
        let url = page_url(base_url, per_page, page);
        let mut attempt = 0;

        loop {
            match self.request_page(&url).await {
                Err(e) if e.is_retryable() && attempt < MAX_RETRIES => {
                    attempt += 1;
                    tracing::warn!("Retrying {} after error: {}", url, e);
                }
                result => return result,
            }
        }
    }

    async fn request_page<T: DeserializeOwned>(&self, url: &str) -> Result<Page<T>> {
        // Blocks until the reset time when the previous response exhausted the quota
        self.rate_limiter.wait().await;

        tracing::debug!("Fetching: {}", url);
        let response = self.client.get(url).send().await?;
        self.rate_limiter.update(response.headers()).await;

        let has_next = has_next_page(response.headers());
        let response = check_status(response, url).await?;

        let items: Vec<T> = response.json().await?;
        Ok(Page { items, has_next })
    }
}

fn page_url(base_url: &str, per_page: u32, page: u32) -> String {
    let separator = if base_url.contains('?') { "&" } else { "?" };
    format!("{}{}per_page={}&page={}", base_url, separator, per_page, page)
}

fn has_next_page(headers: &HeaderMap) -> bool {
    headers
        .get("link")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("rel=\"next\""))
        .unwrap_or(false)
}
