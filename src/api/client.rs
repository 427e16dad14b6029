//! HTTP adapter for the research service.

use crate::api::errors;
use crate::api::types::{ChatRequest, ChatResponse, Session, UserId};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Longest query accepted, in characters.
pub const MAX_QUERY_CHARS: usize = 1000;

/// Message for an empty or whitespace-only query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a research query.";

/// Message for a query over `MAX_QUERY_CHARS`.
pub const LONG_QUERY_MESSAGE: &str = "Query is too long. Please limit to 1000 characters.";

/// Operations offered by the research service.
#[async_trait]
pub trait ResearchApi: Send + Sync {
    /// Fetch every session recorded for a user, in server order.
    ///
    /// # Errors
    ///
    /// Returns a normalized request error if the call fails.
    async fn fetch_history(&self, user_id: UserId) -> Result<Vec<Session>>;

    /// Submit a research query.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or over-length query
    /// without contacting the server, or a normalized request error.
    async fn submit_chat(&self, user_id: UserId, query: &str) -> Result<ChatResponse>;

    /// Liveness probe.
    ///
    /// # Errors
    ///
    /// Returns a normalized request error if the call fails.
    async fn health_check(&self) -> Result<Value>;
}

#[async_trait]
impl<T: ResearchApi + ?Sized> ResearchApi for Arc<T> {
    async fn fetch_history(&self, user_id: UserId) -> Result<Vec<Session>> {
        (**self).fetch_history(user_id).await
    }

    async fn submit_chat(&self, user_id: UserId, query: &str) -> Result<ChatResponse> {
        (**self).submit_chat(user_id, query).await
    }

    async fn health_check(&self) -> Result<Value> {
        (**self).health_check().await
    }
}

/// Check a query before it is sent and return the trimmed text.
///
/// # Errors
///
/// Returns a validation error if the query is blank or longer than
/// `MAX_QUERY_CHARS` characters.
pub fn validate_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(EMPTY_QUERY_MESSAGE.to_string()));
    }
    if query.chars().count() > MAX_QUERY_CHARS {
        return Err(Error::Validation(LONG_QUERY_MESSAGE.to_string()));
    }
    Ok(trimmed)
}

/// `ResearchApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client for the configured base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| errors::unexpected(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url().to_string(),
            client,
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and return the body of a successful response.
    async fn execute(&self, request: RequestBuilder, method: &str, path: &str) -> Result<String> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, "API request: {method} {path}");

        let response = request.send().await.map_err(|e| {
            let err = errors::from_transport(&e);
            warn!(%request_id, cause = %e, "API request failed: {err}");
            err
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let err = errors::from_transport(&e);
            warn!(%request_id, cause = %e, "failed to read response body: {err}");
            err
        })?;

        if !status.is_success() {
            let err = errors::from_status(status.as_u16(), &body);
            warn!(%request_id, status = status.as_u16(), "API response error: {err}");
            return Err(err);
        }

        debug!(%request_id, status = status.as_u16(), bytes = body.len(), "API response");
        Ok(body)
    }
}

/// Decode a JSON body, treating a decode failure as unexpected.
fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| errors::unexpected(e.to_string()))
}

#[async_trait]
impl ResearchApi for HttpClient {
    async fn fetch_history(&self, user_id: UserId) -> Result<Vec<Session>> {
        let path = format!("/api/history/{user_id}");
        let body = self
            .execute(self.client.get(self.url(&path)), "GET", &path)
            .await?;

        // A missing payload means no sessions yet
        let body = body.trim();
        if body.is_empty() || body == "null" {
            return Ok(Vec::new());
        }
        decode(body)
    }

    async fn submit_chat(&self, user_id: UserId, query: &str) -> Result<ChatResponse> {
        let query = validate_query(query)?;
        let path = "/api/chat";
        let request = self
            .client
            .post(self.url(path))
            .json(&ChatRequest { user_id, query });

        let body = self.execute(request, "POST", path).await?;
        decode(&body)
    }

    async fn health_check(&self) -> Result<Value> {
        let path = "/health";
        let body = self
            .execute(self.client.get(self.url(path)), "GET", path)
            .await?;

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        decode(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_query_trims() {
        assert_eq!(validate_query("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn validate_query_rejects_blank() {
        for query in ["", "   ", "\n\t"] {
            let err = validate_query(query).unwrap_err();
            assert_eq!(err.to_string(), EMPTY_QUERY_MESSAGE);
        }
    }

    #[test]
    fn validate_query_length_boundary() {
        let exact = "a".repeat(MAX_QUERY_CHARS);
        assert!(validate_query(&exact).is_ok());

        let over = "a".repeat(MAX_QUERY_CHARS + 1);
        let err = validate_query(&over).unwrap_err();
        assert_eq!(err.to_string(), LONG_QUERY_MESSAGE);
    }

    #[test]
    fn validate_query_counts_characters_not_bytes() {
        let accented = "é".repeat(MAX_QUERY_CHARS);
        assert!(validate_query(&accented).is_ok());
    }

    #[test]
    fn client_strips_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:9000/".to_string(),
            timeout_seconds: 5,
        };
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
        assert_eq!(client.url("/health"), "http://localhost:9000/health");
    }
}
