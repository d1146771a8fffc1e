use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Response, Url};

/// Body and content type returned by the document service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransportResponse {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Sends single GET/POST requests to the document service
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with the given `Accept` header
    async fn get(&self, url: &Url, accept_type: &str) -> Result<TransportResponse>;

    /// POST `data` to `url` with the given `Content-Type` header
    async fn post(&self, url: &Url, content_type: &str, data: &[u8])
        -> Result<TransportResponse>;
}

/// reqwest-backed transport.
///
/// Idle connections are not kept, so each request runs on its own
/// connection which is closed once the response body has been read.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: HttpClient,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = HttpClient::builder()
            .pool_max_idle_per_host(0)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// Use an existing reqwest client (timeouts, proxies, etc. are left to the caller)
    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }

    async fn read_response(response: Response) -> Result<TransportResponse> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Document service returned status {}: {}", status, body);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .context("Failed to read response body")?;

        Ok(TransportResponse {
            content_type,
            body: body.to_vec(),
        })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url, accept_type: &str) -> Result<TransportResponse> {
        tracing::debug!(%url, accept = accept_type, "GET");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, accept_type)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        tracing::debug!(%url, status = %response.status(), "GET completed");
        Self::read_response(response).await
    }

    async fn post(
        &self,
        url: &Url,
        content_type: &str,
        data: &[u8],
    ) -> Result<TransportResponse> {
        tracing::debug!(%url, content_type, bytes = data.len(), "POST");

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, content_type)
            .body(data.to_vec())
            .send()
            .await
            .with_context(|| format!("POST {} failed", url))?;

        tracing::debug!(%url, status = %response.status(), "POST completed");
        Self::read_response(response).await
    }
}
