//! NetHunt account credentials and their Basic auth encoding.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::fmt;

use crate::{Error, Result};

/// A NetHunt username paired with its API key.
///
/// Both fields are guaranteed non-empty. The key is redacted from the
/// `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    secret: String,
}

impl Credentials {
    /// Creates credentials, rejecting a blank username or API key.
    ///
    /// # Examples
    ///
    /// ```
    /// use nethunt::{Credentials, Error};
    ///
    /// assert!(Credentials::new("user@example.com", "key").is_ok());
    /// assert!(matches!(
    ///     Credentials::new("", "key"),
    ///     Err(Error::BlankField("Username"))
    /// ));
    /// ```
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let secret = secret.into();

        if username.is_empty() {
            return Err(Error::BlankField("Username"));
        }
        if secret.is_empty() {
            return Err(Error::BlankField("API key"));
        }

        Ok(Self { username, secret })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns `base64("username:secret")`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nethunt::Credentials;
    ///
    /// let credentials = Credentials::new("Aladdin", "open sesame").unwrap();
    /// assert_eq!(credentials.encode(), "QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
    /// ```
    pub fn encode(&self) -> String {
        encode(&self.username, &self.secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Base64-encodes `username:secret` with the standard padded alphabet.
pub fn encode(username: &str, secret: &str) -> String {
    BASE64.encode(format!("{}:{}", username, secret))
}
