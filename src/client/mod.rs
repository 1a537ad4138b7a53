//! HTTP transport for the herdbook API.
//!
//! [`ApiClient`] is the single point of HTTP I/O: it builds requests, attaches the bearer
//! token when authentication is enabled, turns non-2xx responses into [`ApiError`], and hands
//! every successful body through the envelope adapter so callers always see the inner payload.
//! There is no retry, timeout or caching at this layer.

pub mod envelope;
pub mod query;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    error::{ApiError, ConfigError, Error},
    model::api::Page,
};

/// Per-request options: query string and cooperative cancellation.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query pairs appended to the URL
    pub query: Vec<(String, String)>,
    /// Cancelling this token abandons the request with `Error::Cancelled`
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// HTTP client for the herdbook API.
///
/// Cheap to clone: all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientRef>,
}

struct ApiClientRef {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

/// Builder for [`ApiClient`].
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    bearer_token: Option<String>,
    http: Option<reqwest::Client>,
}

impl ApiClientBuilder {
    /// Origin of the API, e.g. `https://api.herdbook.example`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Use an existing `reqwest::Client` instead of creating a new one.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Builds the client.
    ///
    /// # Returns
    /// - `Ok(ApiClient)` - Client ready to issue requests
    /// - `Err(Error::ConfigError)` - No base URL was provided
    pub fn build(self) -> Result<ApiClient, Error> {
        let base_url = self
            .base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("HERDBOOK_API_URL".to_string()))?;

        Ok(ApiClient {
            inner: Arc::new(ApiClientRef {
                http: self.http.unwrap_or_default(),
                base_url,
                bearer_token: self.bearer_token,
            }),
        })
    }
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Creates a client from the environment configuration.
    ///
    /// The bearer token is only attached when the authentication flag is enabled.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut builder = Self::builder().base_url(&config.api_url);
        if config.auth_enabled {
            if let Some(token) = &config.api_token {
                builder = builder.bearer_token(token);
            }
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<T, Error> {
        let value = self.execute(Method::GET, path, None, opts).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Issues a GET and normalizes the list payload into a [`Page`].
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<Page<T>, Error> {
        let value = self.execute(Method::GET, path, None, opts).await?;
        envelope::into_page(value)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, opts: &RequestOptions) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let value = self.execute(Method::POST, path, Some(body), opts).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, opts: &RequestOptions) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let value = self.execute(Method::PUT, path, Some(body), opts).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B, opts: &RequestOptions) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let value = self.execute(Method::PATCH, path, Some(body), opts).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Issues a DELETE; any response body is discarded.
    pub async fn delete(&self, path: &str, opts: &RequestOptions) -> Result<(), Error> {
        self.execute(Method::DELETE, path, None, opts).await?;
        Ok(())
    }

    /// Sends one request and returns the unwrapped JSON payload.
    ///
    /// # Arguments
    /// - `method` - HTTP method
    /// - `path` - Absolute path below the base URL, e.g. `/api/v1/breeds`
    /// - `body` - Optional JSON body
    /// - `opts` - Query pairs and cancellation token
    ///
    /// # Returns
    /// - `Ok(Value)` - Response payload with any `{success, data}` envelope removed, `Null` for empty bodies
    /// - `Err(Error::ApiError)` - Non-2xx response
    /// - `Err(Error::RequestError)` - Transport failure
    /// - `Err(Error::DecodeError)` - Body was not valid JSON
    /// - `Err(Error::Cancelled)` - The cancellation token fired before the response arrived
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        opts: &RequestOptions,
    ) -> Result<Value, Error> {
        let url = format!("{}{}", self.inner.base_url, path);

        let mut request = self.inner.http.request(method.clone(), &url);
        if !opts.query.is_empty() {
            request = request.query(&opts.query);
        }
        if let Some(token) = &self.inner.bearer_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;

            tracing::debug!("{} {} -> {}", method, path, status.as_u16());

            if !status.is_success() {
                return Err(Error::from(ApiError::from_body(status.as_u16(), &text)));
            }

            if text.trim().is_empty() {
                return Ok(Value::Null);
            }

            let value: Value = serde_json::from_str(&text)?;
            Ok::<_, Error>(envelope::unwrap_payload(value))
        };

        match &opts.cancel {
            Some(token) => {
                tokio::select! {
                    biased;

                    _ = token.cancelled() => {
                        tracing::debug!("{} {} cancelled", method, path);
                        Err(Error::Cancelled)
                    }
                    result = exchange => result,
                }
            }
            None => exchange.await,
        }
    }
}
