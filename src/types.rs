//! Entities returned by the NetHunt API.
//!
//! Only folders have a shape this crate relies on. Records, comments and call
//! logs are passed through as untyped JSON.

use serde::{Deserialize, Serialize};

/// A named collection of records.
///
/// Unknown fields returned by the service are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Folder {
    /// Opaque folder identifier.
    pub id: String,
    pub name: String,
}
