//! One method per NetHunt endpoint.
//!
//! Identifiers are forwarded as given. Parameter maps and bodies are untyped:
//! anything that serializes to a JSON object works, whether a
//! `serde_json::json!` value, a `HashMap` or your own struct.

use serde::Serialize;
use serde_json::Value;

use crate::{
    metadata::RequestMetadata, query, Client, Endpoint, Folder, Response, Result,
};

impl Client {
    /// Lists the folders the user can read.
    pub async fn readable_folder(&self) -> Result<Response<Vec<Folder>>> {
        self.call::<(), _>(RequestMetadata::new(Endpoint::ReadableFolder), None)
            .await
    }

    /// Lists the folders the user can create records in.
    pub async fn writable_folder(&self) -> Result<Response<Vec<Folder>>> {
        self.call::<(), _>(RequestMetadata::new(Endpoint::WritableFolder), None)
            .await
    }

    /// Lists the fields defined on a folder.
    pub async fn folder_field(&self, folder_id: &str) -> Result<Response<Value>> {
        let metadata = RequestMetadata::new(Endpoint::FolderField).with_id(folder_id);
        self.call::<(), _>(metadata, None).await
    }

    /// Searches a folder for records.
    ///
    /// The encoded parameters are sent as the value of the `query` parameter,
    /// unescaped, so `{"created": "today"}` becomes `?query=created=today`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), nethunt::Error> {
    /// let client = nethunt::Client::new("user@example.com", "api-key")?;
    /// let found = client
    ///     .find_record("596f644b8f6d05e16c24b810", &json!({ "Name": "Acme" }))
    ///     .await?;
    /// println!("{}", found.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_record<P>(&self, folder_id: &str, params: &P) -> Result<Response<Value>>
    where
        P: Serialize + ?Sized,
    {
        let encoded = format!("query={}", query::stringify(params)?);
        let metadata = RequestMetadata::new(Endpoint::FindRecord)
            .with_id(folder_id)
            .with_query(encoded);
        self.call::<(), _>(metadata, None).await
    }

    /// Polls a folder for newly created records.
    pub async fn new_record<P>(&self, folder_id: &str, params: &P) -> Result<Response<Value>>
    where
        P: Serialize + ?Sized,
    {
        self.poll(Endpoint::NewRecord, folder_id, params).await
    }

    /// Polls a folder for new comments.
    pub async fn new_comment<P>(&self, folder_id: &str, params: &P) -> Result<Response<Value>>
    where
        P: Serialize + ?Sized,
    {
        self.poll(Endpoint::NewComment, folder_id, params).await
    }

    /// Polls a folder for updated records.
    pub async fn updated_record<P>(&self, folder_id: &str, params: &P) -> Result<Response<Value>>
    where
        P: Serialize + ?Sized,
    {
        self.poll(Endpoint::UpdatedRecord, folder_id, params).await
    }

    /// Polls a folder for individual record changes.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), nethunt::Error> {
    /// let client = nethunt::Client::new("user@example.com", "api-key")?;
    /// let changes = client
    ///     .record_change("596f644b8f6d05e16c24b810", &json!({ "created": "today" }))
    ///     .await?;
    /// println!("{} changes", changes.as_array().map_or(0, Vec::len));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn record_change<P>(&self, folder_id: &str, params: &P) -> Result<Response<Value>>
    where
        P: Serialize + ?Sized,
    {
        self.poll(Endpoint::RecordChange, folder_id, params).await
    }

    /// Creates a record in a folder.
    pub async fn create_record<B>(&self, folder_id: &str, body: &B) -> Result<Response<Value>>
    where
        B: Serialize + ?Sized,
    {
        self.action(Endpoint::CreateRecord, folder_id, body).await
    }

    /// Adds a comment to a record.
    pub async fn create_comment<B>(&self, record_id: &str, body: &B) -> Result<Response<Value>>
    where
        B: Serialize + ?Sized,
    {
        self.action(Endpoint::CreateComment, record_id, body).await
    }

    /// Logs a call against a record.
    pub async fn create_call_log<B>(&self, record_id: &str, body: &B) -> Result<Response<Value>>
    where
        B: Serialize + ?Sized,
    {
        self.action(Endpoint::CreateCallLog, record_id, body).await
    }

    /// Updates the fields of a record.
    pub async fn update_record<B>(&self, record_id: &str, body: &B) -> Result<Response<Value>>
    where
        B: Serialize + ?Sized,
    {
        self.action(Endpoint::UpdateRecord, record_id, body).await
    }

    /// Links a Gmail thread to a record.
    ///
    /// Unlike the other actions the body is not decoded: `data` holds the raw
    /// response text.
    pub async fn link_gmail_thread<B>(&self, record_id: &str, body: &B) -> Result<Response<String>>
    where
        B: Serialize + ?Sized,
    {
        let metadata = RequestMetadata::new(Endpoint::LinkGmailThread).with_id(record_id);
        self.call_raw(metadata, Some(body)).await
    }

    /// Checks that the credentials are accepted.
    pub async fn auth_test(&self) -> Result<Response<Value>> {
        self.call::<(), _>(RequestMetadata::new(Endpoint::AuthTest), None)
            .await
    }

    async fn poll<P>(&self, endpoint: Endpoint, folder_id: &str, params: &P) -> Result<Response<Value>>
    where
        P: Serialize + ?Sized,
    {
        let metadata = RequestMetadata::new(endpoint)
            .with_id(folder_id)
            .with_query(query::stringify(params)?);
        self.call::<(), _>(metadata, None).await
    }

    async fn action<B>(&self, endpoint: Endpoint, id: &str, body: &B) -> Result<Response<Value>>
    where
        B: Serialize + ?Sized,
    {
        let metadata = RequestMetadata::new(endpoint).with_id(id);
        self.call(metadata, Some(body)).await
    }
}
