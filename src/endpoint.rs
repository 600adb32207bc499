//! The remote endpoints exposed by the NetHunt integration API.

use http::Method;
use std::fmt;

/// A single NetHunt endpoint: its HTTP method and path relative to the base URL.
///
/// Scoped endpoints take a folder or record identifier as their final path
/// segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ReadableFolder,
    WritableFolder,
    FolderField,
    FindRecord,
    NewRecord,
    NewComment,
    UpdatedRecord,
    RecordChange,
    CreateRecord,
    CreateComment,
    CreateCallLog,
    UpdateRecord,
    LinkGmailThread,
    AuthTest,
}

impl Endpoint {
    /// The path segments of this endpoint, without the identifier.
    pub fn segments(self) -> [&'static str; 2] {
        match self {
            Endpoint::ReadableFolder => ["triggers", "readable-folder"],
            Endpoint::WritableFolder => ["triggers", "writable-folder"],
            Endpoint::FolderField => ["triggers", "folder-field"],
            Endpoint::FindRecord => ["searches", "find-record"],
            Endpoint::NewRecord => ["triggers", "new-record"],
            Endpoint::NewComment => ["triggers", "new-comment"],
            Endpoint::UpdatedRecord => ["triggers", "updated-record"],
            Endpoint::RecordChange => ["triggers", "record-change"],
            Endpoint::CreateRecord => ["actions", "create-record"],
            Endpoint::CreateComment => ["actions", "create-comment"],
            Endpoint::CreateCallLog => ["actions", "create-call-log"],
            Endpoint::UpdateRecord => ["actions", "update-record"],
            Endpoint::LinkGmailThread => ["actions", "link-gmail-thread"],
            Endpoint::AuthTest => ["triggers", "auth-test"],
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::CreateRecord
            | Endpoint::CreateComment
            | Endpoint::CreateCallLog
            | Endpoint::UpdateRecord
            | Endpoint::LinkGmailThread => Method::POST,
            _ => Method::GET,
        }
    }

    /// Returns `true` if the endpoint expects a folder or record identifier.
    pub fn is_scoped(self) -> bool {
        !matches!(
            self,
            Endpoint::ReadableFolder | Endpoint::WritableFolder | Endpoint::AuthTest
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [kind, name] = self.segments();
        write!(f, "{}/{}", kind, name)
    }
}
