//! Request metadata and configuration types.

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::Url;

use crate::{credentials::Credentials, Endpoint, Error, Result};

/// Headers derived once from a client's credentials and sent with every request.
///
/// Holds `Authorization: Basic <base64(username:secret)>` and
/// `Content-Type: application/json`. The authorization value is marked
/// sensitive so it is hidden from `Debug` output.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    headers: HeaderMap,
}

impl RequestConfig {
    /// Builds the configuration from already-encoded credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use nethunt::metadata::RequestConfig;
    ///
    /// let config = RequestConfig::from_encoded("dXNlcjprZXk=").unwrap();
    /// assert_eq!(config.headers()["authorization"], "Basic dXNlcjprZXk=");
    /// assert_eq!(config.headers()["content-type"], "application/json");
    /// ```
    pub fn from_encoded(encoded: &str) -> Result<Self> {
        let mut authorization = HeaderValue::try_from(format!("Basic {}", encoded))
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(Self { headers })
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self> {
        Self::from_encoded(&credentials.encode())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Metadata for an individual HTTP request.
///
/// Describes which endpoint to hit, the identifier it is scoped to, the
/// already-encoded query string and any extra headers.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// The endpoint being called.
    pub endpoint: Endpoint,

    /// The HTTP method, taken from the endpoint.
    pub method: Method,

    /// The folder or record identifier appended to the endpoint path.
    pub resource_id: Option<String>,

    /// The encoded query string, without the leading `?`.
    pub query: Option<String>,

    /// Additional headers for this request.
    pub headers: HeaderMap,
}

impl RequestMetadata {
    /// Creates metadata for the given endpoint.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            method: endpoint.method(),
            resource_id: None,
            query: None,
            headers: HeaderMap::new(),
        }
    }

    /// Scopes the request to a folder or record identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// Sets an already-encoded query string. An empty string clears it.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = if query.is_empty() { None } else { Some(query) };
        self
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Resolves the full request URL against `base_url`.
    ///
    /// The identifier is appended as one percent-encoded path segment. An empty
    /// identifier leaves a trailing slash; the remote service reports the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use nethunt::{metadata::RequestMetadata, Endpoint};
    /// use url::Url;
    ///
    /// let base = Url::parse("https://nethunt.com/api/v1/zapier").unwrap();
    /// let url = RequestMetadata::new(Endpoint::FolderField)
    ///     .with_id("abc123")
    ///     .url(&base)
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://nethunt.com/api/v1/zapier/triggers/folder-field/abc123"
    /// );
    /// ```
    pub fn url(&self, base_url: &Url) -> Result<Url> {
        let mut url = base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                Error::ConfigurationError(format!("Base URL cannot be a base: {}", base_url))
            })?;
            segments.pop_if_empty().extend(self.endpoint.segments());
            if let Some(id) = &self.resource_id {
                segments.push(id);
            }
        }
        url.set_query(self.query.as_deref());
        Ok(url)
    }
}
