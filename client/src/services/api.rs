use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use shared::{CreateExpenseResponse, Expense, ExpenseDraft};
use tracing::debug;

use super::remote::RemoteSyncClient;
use crate::config::ClientConfig;
use crate::error::NetworkError;

const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// HTTP client for the remote expense collection
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    collection: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Result<Self, NetworkError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, NetworkError> {
        Self::from_config(&ClientConfig::with_base_url(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, NetworkError> {
        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| NetworkError::Connection(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            collection: config.collection.trim_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.collection)
    }

    /// URL of a single record. The id is pushed as one escaped path segment.
    fn expense_url(&self, id: &str) -> Result<Url, NetworkError> {
        let collection_url = self.collection_url();
        let mut url = Url::parse(&collection_url).map_err(|e| {
            NetworkError::Connection(format!("invalid collection URL {}: {}", collection_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                NetworkError::Connection(format!("collection URL {} cannot take a path", collection_url))
            })?
            .push(id);
        Ok(url)
    }

    /// Turn a non-success status into an error, keeping the body for diagnostics
    async fn check_status(response: Response) -> Result<Response, NetworkError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(NetworkError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, NetworkError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| NetworkError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl RemoteSyncClient for ApiClient {
    async fn list(&self) -> Result<Vec<Expense>, NetworkError> {
        let url = self.collection_url();
        debug!("GET {}", url);

        let response = Self::check_status(self.http.get(&url).send().await?).await?;
        Self::parse_json(response).await
    }

    async fn create(&self, draft: &ExpenseDraft) -> Result<String, NetworkError> {
        let url = self.collection_url();
        debug!("POST {}", url);

        let response = Self::check_status(self.http.post(&url).json(draft).send().await?).await?;
        let created: CreateExpenseResponse = Self::parse_json(response).await?;
        Ok(created.id)
    }

    async fn update(&self, id: &str, draft: &ExpenseDraft) -> Result<(), NetworkError> {
        let url = self.expense_url(id)?;
        debug!("PUT {}", url);

        Self::check_status(self.http.put(url).json(draft).send().await?).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), NetworkError> {
        let url = self.expense_url(id)?;
        debug!("DELETE {}", url);

        Self::check_status(self.http.delete(url).send().await?).await?;
        Ok(())
    }
}
