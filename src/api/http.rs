//! reqwest-backed implementation of [`ShoppingApi`].

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use url::Url;

use crate::config::Config;
use crate::error::{Result, ShoplistError, TransportError};
use crate::types::{Item, ItemDraft, List};

use super::envelope::{decode_entity, decode_items, decode_lists};
use super::{Operation, ShoppingApi};

#[derive(Serialize)]
struct CreateListBody<'a> {
    name: &'a str,
}

/// HTTP client for the list service
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base: Url,
}

impl HttpClient {
    /// Create a client for the service rooted at `api_url`, without a request timeout.
    pub fn new(api_url: &str) -> Result<Self> {
        Self::build(api_url, None)
    }

    /// Create a client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::build(
            &config.api_url(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    fn build(api_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = Url::parse(api_url)
            .map_err(|e| ShoplistError::Config(format!("invalid api_url '{api_url}': {e}")))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ShoplistError::Config(format!(
                "invalid api_url '{api_url}': expected an http(s) URL"
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ShoplistError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.url(segments))
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, operation: Operation, request: RequestBuilder) -> Result<Vec<u8>> {
        let fail = |e: TransportError| ShoplistError::transport(operation, e);

        let response = request.send().await.map_err(|e| fail(e.into()))?;
        let status = response.status();
        tracing::debug!(%operation, url = %response.url(), %status, "response received");

        let body = response.bytes().await.map_err(|e| fail(e.into()))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body).trim().to_string();
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or("Unknown").to_string()
            } else {
                text
            };
            return Err(fail(TransportError::Status { status, message }));
        }

        Ok(body.to_vec())
    }

    async fn send_entity<T: serde::de::DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
        key: &'static str,
    ) -> Result<T> {
        let body = self.send(operation, request).await?;
        decode_entity(&body, key)
            .and_then(|entity| entity.ok_or(TransportError::MissingPayload(key)))
            .map_err(|e| ShoplistError::transport(operation, e))
    }
}

impl ShoppingApi for HttpClient {
    async fn lists(&self) -> Result<Vec<List>> {
        let operation = Operation::FetchLists;
        let body = self
            .send(operation, self.request(Method::GET, &["lists"]))
            .await?;
        decode_lists(&body).map_err(|e| ShoplistError::transport(operation, e))
    }

    async fn get_list(&self, list_id: &str) -> Result<List> {
        self.send_entity(
            Operation::FetchList,
            self.request(Method::GET, &["lists", list_id]),
            "list",
        )
        .await
    }

    async fn get_items(&self, list_id: &str) -> Result<Vec<Item>> {
        let operation = Operation::FetchItems;
        let body = self
            .send(operation, self.request(Method::GET, &["lists", list_id, "items"]))
            .await?;
        decode_items(&body).map_err(|e| ShoplistError::transport(operation, e))
    }

    async fn create_list(&self, name: &str) -> Result<List> {
        let request = self
            .request(Method::POST, &["list"])
            .json(&CreateListBody { name });
        self.send_entity(Operation::CreateList, request, "list")
            .await
    }

    async fn delete_list(&self, list_id: &str) -> Result<()> {
        self.send(
            Operation::DeleteList,
            self.request(Method::DELETE, &["lists", list_id]),
        )
        .await?;
        Ok(())
    }

    async fn add_item(&self, list_id: &str, draft: &ItemDraft) -> Result<Item> {
        let request = self
            .request(Method::POST, &["lists", list_id, "items"])
            .json(draft);
        self.send_entity(Operation::AddItem, request, "item").await
    }

    async fn update_item(&self, list_id: &str, item_id: &str, item: &Item) -> Result<Item> {
        let request = self
            .request(Method::PUT, &["lists", list_id, "items", item_id])
            .json(item);
        self.send_entity(Operation::UpdateItem, request, "item")
            .await
    }

    async fn toggle_item(&self, list_id: &str, item_id: &str) -> Result<()> {
        self.send(
            Operation::ToggleItem,
            self.request(Method::PATCH, &["lists", list_id, "items", item_id, "toggle"]),
        )
        .await?;
        Ok(())
    }

    async fn delete_item(&self, list_id: &str, item_id: &str) -> Result<()> {
        self.send(
            Operation::DeleteItem,
            self.request(Method::DELETE, &["lists", list_id, "items", item_id]),
        )
        .await?;
        Ok(())
    }
}
