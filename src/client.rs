//! HTTP client holding the NetHunt credentials and the request pipeline.
//!
//! The [`Client`] type is the main entry point. Use [`Client::new`] for the
//! defaults or [`ClientBuilder`] to point at a different base URL or set a
//! timeout. The per-endpoint operations live in the `api` module.

use crate::{
    credentials::Credentials,
    metadata::{RequestConfig, RequestMetadata},
    Error, Response, Result,
};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// The NetHunt integration API root used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://nethunt.com/api/v1/zapier";

/// A credentialed NetHunt API client.
///
/// The authorization headers are computed once at construction and never
/// change afterwards. Clones share the same configuration and connection
/// pool, so a client can be used from any number of concurrent tasks.
///
/// # Examples
///
/// ```no_run
/// use nethunt::Client;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), nethunt::Error> {
/// let client = Client::new("user@example.com", "api-key")?;
///
/// let folders = client.writable_folder().await?;
/// let folder = &folders[0];
///
/// let created = client
///     .create_record(&folder.id, &json!({ "Name": "Acme Ltd" }))
///     .await?;
/// println!("Created: {}", created.data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    config: RequestConfig,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl Client {
    /// Creates a client for the given username and API key with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BlankField`] if either argument is empty. No request is
    /// made in that case.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        Self::builder().credentials(username, secret).build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use nethunt::Client;
    /// use std::time::Duration;
    ///
    /// # fn example() -> Result<(), nethunt::Error> {
    /// let client = Client::builder()
    ///     .credentials("user@example.com", "api-key")
    ///     .timeout(Duration::from_secs(30))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The headers sent with every request.
    pub fn config(&self) -> &RequestConfig {
        &self.inner.config
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Makes a request and decodes the JSON response body into `Res`.
    ///
    /// The named operations on [`Client`] are thin wrappers around this; use it
    /// directly to decode an endpoint into your own type.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use nethunt::{metadata::RequestMetadata, Client, Endpoint};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Field { name: String }
    ///
    /// # async fn example() -> Result<(), nethunt::Error> {
    /// let client = Client::new("user@example.com", "api-key")?;
    ///
    /// let metadata = RequestMetadata::new(Endpoint::FolderField).with_id("596f644b8f6d05e16c24b810");
    /// let fields = client.call::<(), Vec<Field>>(metadata, None).await?;
    /// for field in fields.iter() {
    ///     println!("{}", field.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<Req, Res>(
        &self,
        metadata: RequestMetadata,
        body: Option<&Req>,
    ) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let start_time = Instant::now();
        let response = self.execute_request(&metadata, body).await?;
        let latency = start_time.elapsed();
        self.parse_response(response, latency).await
    }

    /// Makes a request and returns the response body undecoded.
    ///
    /// Non-2xx statuses still fail with [`Error::HttpError`].
    pub async fn call_raw<Req>(
        &self,
        metadata: RequestMetadata,
        body: Option<&Req>,
    ) -> Result<Response<String>>
    where
        Req: Serialize + ?Sized,
    {
        let start_time = Instant::now();
        let response = self.execute_request(&metadata, body).await?;
        let latency = start_time.elapsed();
        let (status, headers, raw_body) = read_response(response, latency).await?;

        Ok(Response::new(
            raw_body.clone(),
            raw_body,
            status,
            headers,
            latency,
        ))
    }

    /// Sends a single request.
    async fn execute_request<Req>(
        &self,
        metadata: &RequestMetadata,
        body: Option<&Req>,
    ) -> Result<reqwest::Response>
    where
        Req: Serialize + ?Sized,
    {
        let url = metadata.url(&self.inner.base_url)?;

        tracing::debug!(
            method = %metadata.method,
            endpoint = %metadata.endpoint,
            url = %url,
            "Executing HTTP request"
        );

        // Credential headers override defaults; per-request headers override both.
        let mut request = self
            .inner
            .http_client
            .request(metadata.method.clone(), url)
            .headers(self.inner.default_headers.clone())
            .headers(self.inner.config.headers().clone())
            .headers(metadata.headers.clone());

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            let json = serde_json::to_string(body)
                .map_err(|e| Error::SerializationFailed(e.to_string()))?;
            request = request.body(json);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::Network(e)
            }
        })
    }

    /// Parses the response and returns a typed `Response`.
    async fn parse_response<Res>(
        &self,
        response: reqwest::Response,
        latency: Duration,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let (status, headers, raw_body) = read_response(response, latency).await?;

        match serde_json::from_str::<Res>(&raw_body) {
            Ok(data) => Ok(Response::new(data, raw_body, status, headers, latency)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %raw_body,
                    "Failed to deserialize response"
                );

                Err(Error::DeserializationFailed {
                    raw_response: raw_body,
                    serde_error: e.to_string(),
                    status,
                })
            }
        }
    }
}

/// Reads the body of a response, turning non-2xx statuses into [`Error::HttpError`].
async fn read_response(
    response: reqwest::Response,
    latency: Duration,
) -> Result<(StatusCode, HeaderMap, String)> {
    let status = response.status();
    let headers = response.headers().clone();

    tracing::info!(
        status = status.as_u16(),
        latency_ms = latency.as_millis(),
        "Received HTTP response"
    );

    if !status.is_success() {
        let raw_response = response.text().await.unwrap_or_default();

        if status.is_client_error() {
            tracing::error!(
                status = status.as_u16(),
                response = %raw_response,
                "Client error (4xx)"
            );
        } else if status.is_server_error() {
            tracing::warn!(
                status = status.as_u16(),
                response = %raw_response,
                "Server error (5xx)"
            );
        }

        return Err(Error::HttpError {
            status,
            raw_response,
            headers,
        });
    }

    let raw_body = response.text().await?;
    Ok((status, headers, raw_body))
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use nethunt::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), nethunt::Error> {
/// let client = ClientBuilder::new()
///     .credentials("user@example.com", "api-key")
///     .base_url("https://nethunt.com/api/v1/zapier")?
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    username: String,
    secret: String,
    base_url: Option<Url>,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings and no credentials.
    pub fn new() -> Self {
        Self {
            username: String::new(),
            secret: String::new(),
            base_url: None,
            default_headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Sets the username and API key. Both are validated in [`build`](Self::build).
    pub fn credentials(mut self, username: impl Into<String>, secret: impl Into<String>) -> Self {
        self.username = username.into();
        self.secret = secret.into();
        self
    }

    /// Overrides the API root, [`DEFAULT_BASE_URL`] by default.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Adds a header that will be included in all requests.
    ///
    /// `Authorization` and `Content-Type` are always taken from the credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the request timeout. Without one the transport default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BlankField`] if the username or API key is empty, or a
    /// configuration error if the HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        let credentials = Credentials::new(self.username, self.secret)?;
        let config = RequestConfig::from_credentials(&credentials)?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        tracing::debug!(
            username = credentials.username(),
            base_url = %base_url,
            "Created NetHunt client"
        );

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                config,
                default_headers: self.default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
