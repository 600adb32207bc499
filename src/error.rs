//! Error types for NetHunt API calls.
//!
//! Every failure is surfaced to the caller unchanged. Errors that carry a
//! response keep the raw body so the remote service's own message (for example
//! an authentication failure) stays accessible.

use http::{HeaderMap, StatusCode};

/// The main error type for NetHunt API calls.
///
/// # Examples
///
/// ```no_run
/// use nethunt::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("user@example.com", "api-key")?;
///
/// match client.auth_test().await {
///     Ok(response) => println!("Authenticated: {:?}", response.data),
///     Err(Error::HttpError { status, raw_response, .. }) => {
///         eprintln!("HTTP error {}: {}", status, raw_response);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required credential field was empty.
    ///
    /// Raised by the client builder before any network activity.
    #[error("{0} cannot be blank")]
    BlankField(&'static str),

    /// Invalid configuration was provided, such as an invalid header value.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid base URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request took longer than the timeout configured on the client.
    #[error("Request timed out")]
    Timeout,

    /// The server returned a non-2xx HTTP status code.
    ///
    /// The body is kept verbatim. NetHunt answers bad credentials with a 401 and
    /// a plain-text explanation, which ends up in `raw_response`.
    #[error("HTTP error {status}: {raw_response}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The response headers
        headers: HeaderMap,
    },

    /// The response body could not be decoded as the expected JSON shape.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// A request body or query parameter map could not be encoded.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),
}

impl Error {
    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    ///
    /// # Examples
    ///
    /// ```
    /// use nethunt::Error;
    /// use http::{HeaderMap, StatusCode};
    ///
    /// let err = Error::HttpError {
    ///     status: StatusCode::UNAUTHORIZED,
    ///     raw_response: "Your email address or API key does not appear to be valid".to_string(),
    ///     headers: HeaderMap::new(),
    /// };
    ///
    /// assert_eq!(
    ///     err.raw_response(),
    ///     Some("Your email address or API key does not appear to be valid")
    /// );
    /// assert!(err.is_unauthorized());
    /// ```
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns `true` if the remote service rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Error::HttpError { status, .. } if *status == StatusCode::UNAUTHORIZED
        )
    }
}

/// A specialized `Result` type for NetHunt API calls.
pub type Result<T> = std::result::Result<T, Error>;
