//! Shows the error variants a caller has to deal with.
//!
//! Run with: `cargo run --example error_handling`

use nethunt::{Client, Error};
use std::time::Duration;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("nethunt=info,error_handling=info")
        .init();

    println!("=== Blank Credentials ===");
    match Client::new("", "api-key") {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("Rejected locally: {}", e),
    }
    println!();

    println!("=== Invalid Credentials ===");
    let client = match Client::new("nobody@example.com", "not-a-real-key") {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to build client: {}", e);
            return;
        }
    };
    match client.auth_test().await {
        Ok(response) => println!("Unexpectedly accepted: {}", response.data),
        Err(e) if e.is_unauthorized() => {
            println!("Remote said: {}", e.raw_response().unwrap_or_default());
        }
        Err(e) => report(&e),
    }
    println!();

    println!("=== Timeout ===");
    let client = Client::builder()
        .credentials("nobody@example.com", "not-a-real-key")
        .timeout(Duration::from_millis(1))
        .build();
    match client {
        Ok(client) => {
            if let Err(e) = client.readable_folder().await {
                report(&e);
            }
        }
        Err(e) => report(&e),
    }
}

fn report(error: &Error) {
    match error {
        Error::BlankField(field) => println!("Missing {}", field),
        Error::Timeout => println!("Timed out"),
        Error::Network(e) => println!("Network error: {}", e),
        Error::HttpError {
            status,
            raw_response,
            ..
        } => println!("HTTP {}: {}", status, raw_response),
        Error::DeserializationFailed {
            serde_error,
            raw_response,
            ..
        } => println!("Could not decode {:?}: {}", raw_response, serde_error),
        other => println!("Other error: {}", other),
    }
}
