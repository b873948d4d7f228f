//! `BackendClient` - backend proxy client implementation.

use anyhow::{Context, Result, bail};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::instrument;
use url::Url;

use super::api::MovieApi;
use super::types::{
    MovieIdRequest, PopularResponse, RuntimeResponse, SearchRequest, SearchResponse,
    TrailerResponse,
};

/// Default base URL of the backend proxy.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";

/// Backend proxy client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BackendClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
}

/// Builder for `BackendClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BackendClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
}

impl BackendClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (config, CLI flag, or wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<BackendClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(BackendClient {
            http_client,
            base_url,
        })
    }
}

impl BackendClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> BackendClientBuilder {
        BackendClientBuilder::new()
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))
    }

    /// Sends a GET request and decodes the JSON response.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        self.send_json(self.http_client.get(url), path).await
    }

    /// Sends a POST request with a JSON body and decodes the JSON response.
    #[instrument(skip_all)]
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        self.send_json(self.http_client.post(url).json(body), path)
            .await
    }

    /// Executes a prepared request. Any non-success status is an error;
    /// there is no retry.
    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> Result<T> {
        let request = builder
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(method = %request.method(), url = %request.url(), "backend request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            bail!("backend error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

impl MovieApi for BackendClient {
    #[instrument(skip_all)]
    async fn popular(&self) -> Result<PopularResponse> {
        self.get_json("api/v1/popular").await
    }

    #[instrument(skip_all, fields(url_addon = %url_addon))]
    async fn search(&self, url_addon: &str) -> Result<SearchResponse> {
        let body = SearchRequest { url_addon };
        self.post_json("api/v1/search", &body).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn runtime(&self, movie_id: u64) -> Result<RuntimeResponse> {
        let body = MovieIdRequest { movie_id };
        self.post_json("api/v1/runtime", &body).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn trailer(&self, movie_id: u64) -> Result<TrailerResponse> {
        let body = MovieIdRequest { movie_id };
        self.post_json("api/v1/trailer", &body).await
    }
}
