//! Lists the folders an account can read and write, then the fields of the first one.
//!
//! Run with:
//! `NETHUNT_USERNAME=you@example.com NETHUNT_API_KEY=... cargo run --example list_folders`

use nethunt::{Client, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("nethunt=debug,list_folders=info")
        .init();

    let username = std::env::var("NETHUNT_USERNAME").unwrap_or_default();
    let api_key = std::env::var("NETHUNT_API_KEY").unwrap_or_default();

    // Fails right here if either variable is missing
    let client = Client::new(username, api_key)?;

    println!("=== Auth Test ===");
    let auth = client.auth_test().await?;
    println!("{}", auth.data);
    println!();

    println!("=== Readable Folders ===");
    let readable = client.readable_folder().await?;
    for folder in readable.iter() {
        println!("{:<26} {}", folder.id, folder.name);
    }
    println!("Request latency: {:?}", readable.latency);
    println!();

    println!("=== Writable Folders ===");
    let writable = client.writable_folder().await?;
    for folder in writable.iter() {
        println!("{:<26} {}", folder.id, folder.name);
    }
    println!();

    if let Some(folder) = readable.first() {
        println!("=== Fields of {} ===", folder.name);
        let fields = client.folder_field(&folder.id).await?;
        println!("{}", serde_json::to_string_pretty(&fields.data).unwrap_or_default());
    }

    Ok(())
}
