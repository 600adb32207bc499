//! Polls a folder for today's record activity and adds a comment to the newest record.
//!
//! Run with:
//! `NETHUNT_USERNAME=... NETHUNT_API_KEY=... NETHUNT_FOLDER_ID=... cargo run --example poll_records`

use nethunt::{Client, Error};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("nethunt=debug,poll_records=info")
        .init();

    let client = Client::new(
        std::env::var("NETHUNT_USERNAME").unwrap_or_default(),
        std::env::var("NETHUNT_API_KEY").unwrap_or_default(),
    )?;
    let folder_id = std::env::var("NETHUNT_FOLDER_ID").unwrap_or_default();

    let params = json!({ "created": "today" });

    let new_records = client.new_record(&folder_id, &params).await?;
    let updated = client.updated_record(&folder_id, &params).await?;
    let changes = client.record_change(&folder_id, &params).await?;
    let comments = client.new_comment(&folder_id, &params).await?;

    let count = |value: &serde_json::Value| value.as_array().map_or(0, Vec::len);
    println!("New records:     {}", count(&new_records.data));
    println!("Updated records: {}", count(&updated.data));
    println!("Record changes:  {}", count(&changes.data));
    println!("New comments:    {}", count(&comments.data));

    let newest = new_records
        .as_array()
        .and_then(|records| records.first())
        .and_then(|record| record["id"].as_str());

    if let Some(record_id) = newest {
        let comment = client
            .create_comment(record_id, &json!({ "text": "Picked up by poll_records" }))
            .await?;
        println!("Comment created: {}", comment.data);
    }

    Ok(())
}
