//! # NetHunt - an async client for the NetHunt CRM integration API
//!
//! A credentialed client built on top of `reqwest`. Each public method maps to
//! exactly one remote endpoint: folders, records, comments, call logs and the
//! auth test. Responses keep their raw body, status and headers alongside the
//! decoded data.
//!
//! ## Quick Start
//!
//! ```no_run
//! use nethunt::Client;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nethunt::Error> {
//!     let client = Client::new("user@example.com", "api-key")?;
//!
//!     // Folders come back typed
//!     let folders = client.readable_folder().await?;
//!     for folder in folders.iter() {
//!         println!("{}: {}", folder.id, folder.name);
//!     }
//!
//!     // Records, comments and call logs are untyped JSON
//!     let folder_id = &folders[0].id;
//!     let changes = client
//!         .record_change(folder_id, &json!({ "created": "today" }))
//!         .await?;
//!     println!("Changes: {}", changes.data);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Nothing is retried or swallowed. The remote service's own error text stays
//! reachable:
//!
//! ```no_run
//! use nethunt::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! let client = Client::new("user@example.com", "wrong-key")?;
//! match client.auth_test().await {
//!     Ok(_) => println!("Credentials accepted"),
//!     Err(e) if e.is_unauthorized() => {
//!         eprintln!("Rejected: {}", e.raw_response().unwrap_or_default());
//!     }
//!     Err(e) => eprintln!("Request failed: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
pub mod credentials;
mod endpoint;
mod error;
pub mod metadata;
pub mod query;
mod response;
mod types;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use credentials::Credentials;
pub use endpoint::Endpoint;
pub use error::{Error, Result};
pub use response::Response;
pub use types::Folder;
