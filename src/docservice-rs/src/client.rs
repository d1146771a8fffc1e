use crate::transport::{HttpTransport, Transport};
use crate::url::document_url;
use crate::{ClientError, Result};
use anyhow::Context;
use docservice_core::{ClientConfig, Document, DEFAULT_CONTENT_TYPE};
use serde_json::Value;
use std::collections::HashMap;

/// Metadata/query key controlling server-side text extraction
const EXTRACT: &str = "extract";

const STORE_FAILED: &str = "Cannot store to document server";
const FETCH_FAILED: &str = "Cannot fetch from document server";
const PARSE_FAILED: &str = "Cannot parse extracted text";

/// Document service client
pub struct Client<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client {
    /// Create a new client for the service at `host:port`
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self> {
        Self::from_client_config(ClientConfig::new(host, port))
    }

    /// Client for the default service address, `localhost:8118`
    pub fn localhost() -> Result<Self> {
        Self::from_client_config(ClientConfig::default())
    }

    pub fn from_client_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new()
            .map_err(|e| ClientError::with_source("Cannot create HTTP client", e))?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client from a key/value configuration.
    /// Recognizes `host` and `port`, both required.
    pub fn from_config(config: &HashMap<String, String>) -> Result<Self> {
        let config = ClientConfig::from_map(config)?;
        Self::from_client_config(config)
    }
}

impl<T: Transport> Client<T> {
    /// Create a client that sends its requests through `transport`
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Store a document and return the ID assigned by the service
    pub async fn store(&self, doc: &mut Document) -> Result<String> {
        self.store_with_id(doc, "").await
    }

    /// Store text with the default content type
    pub async fn store_text(&self, text: impl Into<String>) -> Result<String> {
        self.store(&mut Document::from_text(text)).await
    }

    pub async fn store_text_with_content_type(
        &self,
        text: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<String> {
        self.store(&mut Document::from_text_with_content_type(text, content_type))
            .await
    }

    pub async fn store_bytes(
        &self,
        bytes: impl Into<Vec<u8>>,
        content_type: impl Into<String>,
    ) -> Result<String> {
        self.store(&mut Document::new(bytes, content_type)).await
    }

    /// Store a document under `id` (empty lets the service pick one).
    ///
    /// Sets the document's `extract` metadata to `false` and sends all of its
    /// metadata as query parameters.
    #[tracing::instrument(skip(self, doc), fields(bytes = doc.len(), content_type = %doc.content_type()))]
    pub async fn store_with_id(&self, doc: &mut Document, id: &str) -> Result<String> {
        doc.set_metadata(EXTRACT, false.to_string());

        let url = document_url(&self.config, id, doc.metadata())
            .map_err(|e| ClientError::with_source(STORE_FAILED, e))?;

        let id = self
            .transport
            .post(&url, doc.content_type(), doc.data_as_bytes())
            .await
            .and_then(|response| parse_id(&response.body))
            .map_err(|e| {
                tracing::warn!(%url, error = %e, "Store failed");
                ClientError::with_source(STORE_FAILED, e)
            })?;

        tracing::debug!(%id, "Document stored");
        Ok(id)
    }

    /// Fetch the raw bytes of a document
    pub async fn fetch(&self, id: &str) -> Result<Document> {
        self.fetch_with_options(id, DEFAULT_CONTENT_TYPE, false).await
    }

    /// Fetch a document, asking for `accept_type` and optionally for the
    /// service to extract its text
    #[tracing::instrument(skip(self))]
    pub async fn fetch_with_options(
        &self,
        id: &str,
        accept_type: &str,
        extract_text: bool,
    ) -> Result<Document> {
        let url = document_url(&self.config, id, [(EXTRACT, extract_text.to_string())])
            .map_err(|e| ClientError::with_source(FETCH_FAILED, e))?;

        let response = self.transport.get(&url, accept_type).await.map_err(|e| {
            tracing::warn!(%url, error = %e, "Fetch failed");
            ClientError::with_source(FETCH_FAILED, e)
        })?;

        tracing::debug!(bytes = response.body.len(), "Document fetched");
        Ok(Document::from_response(
            response.content_type.as_deref(),
            response.body,
        ))
    }

    /// Fetch the text the service extracted from a document, as a JSON object
    pub async fn fetch_extracted_text(&self, id: &str) -> Result<Value> {
        let doc = self
            .fetch_with_options(id, "application/json", true)
            .await?;

        let json: Value = serde_json::from_slice(doc.data_as_bytes())
            .map_err(|e| ClientError::with_source(PARSE_FAILED, e))?;

        if !json.is_object() {
            return Err(ClientError::new(format!(
                "{}: expected a JSON object",
                PARSE_FAILED
            )));
        }

        Ok(json)
    }
}

/// Extract the document ID from a `{"key": ...}` store response
fn parse_id(body: &[u8]) -> anyhow::Result<String> {
    let json: Value = serde_json::from_slice(body).context("Invalid JSON in store response")?;

    match json.get("key") {
        Some(Value::String(key)) => Ok(key.clone()),
        Some(Value::Null) | None => anyhow::bail!("Store response has no \"key\" field"),
        Some(other) => Ok(other.to_string()),
    }
}
