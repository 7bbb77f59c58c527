//! Typed API client plus the list/detail browsing state the catalog UI
//! keeps on its side of the wire.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{CreateItemRequest, Item, Page, Stats};
use crate::query::{DEFAULT_LIMIT, DEFAULT_PAGE};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Thin wrapper over the four catalog endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn list_items(
        &self,
        q: Option<&str>,
        page: usize,
        limit: usize,
    ) -> Result<Page, ClientError> {
        let mut request = self
            .http
            .get(format!("{}/api/items", self.base_url))
            .query(&[("page", page.to_string()), ("limit", limit.to_string())]);
        if let Some(q) = q.filter(|q| !q.is_empty()) {
            request = request.query(&[("q", q)]);
        }
        decode(request.send().await?).await
    }

    pub async fn get_item(&self, id: i64) -> Result<Item, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/items/{id}", self.base_url))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create_item(&self, payload: &CreateItemRequest) -> Result<Item, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/items", self.base_url))
            .json(payload)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn stats(&self) -> Result<Stats, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/stats", self.base_url))
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let message = response
        .json::<ApiErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| status.to_string());
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Snapshot of the browsing state: the current list page and, when a
/// detail view is open, the selected item.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserView {
    pub items: Vec<Item>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub query: String,
    pub selected: Option<Item>,
}

impl Default for BrowserView {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            total: 0,
            total_pages: 1,
            query: String::new(),
            selected: None,
        }
    }
}

/// Client-side list/detail state.
///
/// Every list request carries a generation number; a response is applied
/// only if no newer request started while it was in flight, so a slow
/// response for a superseded search or page never clobbers newer state.
pub struct CatalogBrowser {
    client: ApiClient,
    view: Mutex<BrowserView>,
    generation: AtomicU64,
    page_size: usize,
}

impl CatalogBrowser {
    pub fn new(client: ApiClient) -> Self {
        Self::with_page_size(client, DEFAULT_LIMIT)
    }

    pub fn with_page_size(client: ApiClient, page_size: usize) -> Self {
        Self {
            client,
            view: Mutex::new(BrowserView::default()),
            generation: AtomicU64::new(0),
            page_size: page_size.max(1),
        }
    }

    pub fn view(&self) -> BrowserView {
        self.view.lock().expect("browser view lock poisoned").clone()
    }

    /// Loads one list page. Returns `Ok(false)` when the response was
    /// discarded because a newer request superseded this one. A fetch
    /// failure leaves the previous view in place.
    pub async fn load(&self, q: &str, page: usize) -> Result<bool, ClientError> {
        let generation = self.begin_request();

        let result = self
            .client
            .list_items(Some(q), page.max(1), self.page_size)
            .await;

        match result {
            Ok(fetched) => Ok(self.apply_if_current(generation, q, fetched)),
            Err(err) => {
                warn!(%err, "failed to fetch item list");
                Err(err)
            }
        }
    }

    /// New search always restarts from page 1.
    pub async fn search(&self, q: &str) -> Result<bool, ClientError> {
        self.load(q, 1).await
    }

    pub async fn go_to_page(&self, page: usize) -> Result<bool, ClientError> {
        let query = self.view().query;
        self.load(&query, page).await
    }

    /// Opens the detail view for `id`. Any failure (including 404) drops
    /// back to the list, mirroring a redirect to the index.
    pub async fn open_detail(&self, id: i64) -> Option<Item> {
        match self.client.get_item(id).await {
            Ok(item) => {
                self.view
                    .lock()
                    .expect("browser view lock poisoned")
                    .selected = Some(item.clone());
                Some(item)
            }
            Err(err) => {
                warn!(%err, id, "failed to fetch item detail, returning to list");
                self.close_detail();
                None
            }
        }
    }

    pub fn close_detail(&self) {
        self.view
            .lock()
            .expect("browser view lock poisoned")
            .selected = None;
    }

    fn begin_request(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn apply_if_current(&self, generation: u64, q: &str, fetched: Page) -> bool {
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding superseded list response");
            return false;
        }
        let mut view = self.view.lock().expect("browser view lock poisoned");
        view.items = fetched.items;
        view.page = fetched.page;
        view.limit = fetched.limit;
        view.total = fetched.total;
        view.total_pages = fetched.total_pages;
        view.query = q.to_string();
        true
    }
}
