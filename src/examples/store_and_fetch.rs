//! Store and Fetch Example
//!
//! Stores a text document in a running document service, fetches it back
//! and asks the service for its extracted text.
//!
//! Run with: cargo run --example store_and_fetch [config.json]
//!
//! The optional config file holds `{"host": "...", "port": 8118}`.

use docservice_rs::{Client, ClientConfig, Document};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("docservice_rs=debug")),
        )
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::load(&path)?,
        None => ClientConfig::default(),
    };
    tracing::info!("Using document service at {}", config.base_url());

    let client = Client::from_client_config(config)?;

    // Store a document with some metadata
    let mut doc = Document::from_text_with_content_type(
        "The quick brown fox jumps over the lazy dog.",
        "text/plain",
    );
    doc.set_metadata("source", "store_and_fetch example");

    let id = client.store(&mut doc).await?;
    println!("📝 Stored document: {}", id);

    // Fetch the raw bytes back
    let fetched = client.fetch(&id).await?;
    println!(
        "   Fetched {} bytes ({}): {}",
        fetched.len(),
        fetched.content_type(),
        fetched.data_as_string()
    );

    // Ask the service for extracted text
    match client.fetch_extracted_text(&id).await {
        Ok(json) => println!("🔍 Extracted text:\n{}", serde_json::to_string_pretty(&json)?),
        Err(e) => tracing::warn!(error = %e, "Extraction not available"),
    }

    Ok(())
}
