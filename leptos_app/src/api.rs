//! HTTP bindings for the items API.

use thiserror::Error;

use crate::item::{CreateItemRequest, Item};

/// Used when no page origin is available.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response status {0}")]
    Status(u16),
}

#[derive(Clone, Debug)]
pub struct ItemsApi {
    client: reqwest::Client,
    base_url: String,
}

impl ItemsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client for the server that delivered the current page.
    pub fn same_origin() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(origin)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_items(&self) -> Result<Vec<Item>, ApiError> {
        let resp = self.client.get(self.url("/api/items")).send().await?;
        let resp = ensure_success(resp)?;
        Ok(resp.json().await?)
    }

    pub async fn create_item(&self, request: &CreateItemRequest) -> Result<Item, ApiError> {
        let resp = self
            .client
            .post(self.url("/api/items"))
            .json(request)
            .send()
            .await?;
        let resp = ensure_success(resp)?;
        Ok(resp.json().await?)
    }

    pub async fn delete_item(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/items/{id}")))
            .send()
            .await?;
        ensure_success(resp)?;
        Ok(())
    }
}

fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}
