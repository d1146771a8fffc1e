use docservice_core::ClientConfig;
use reqwest::Url;

use crate::{ClientError, Result};

/// Build the service URL for a document.
///
/// Produces `http://{host}:{port}/document`, followed by `/{id}` when `id`
/// is non-empty and by a `?k=v&...` query when `params` is non-empty. The
/// id, keys and values are percent-encoded as UTF-8, so an id always stays a
/// single path segment under `/document`. Parameters keep iteration order.
///
/// `.` and `..` are rejected as ids: URL parsing resolves them as dot
/// segments even when percent-encoded.
pub fn document_url<I, K, V>(config: &ClientConfig, id: &str, params: I) -> Result<Url>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = format!("{}/document", config.base_url());

    if !id.is_empty() {
        if id == "." || id == ".." {
            return Err(ClientError::new(format!("Invalid document ID: {}", id)));
        }
        url.push('/');
        url.push_str(&urlencoding::encode(id));
    }

    let query = params
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key.as_ref()),
                urlencoding::encode(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }

    Url::parse(&url).map_err(|e| ClientError::with_source(format!("Malformed URL: {}", url), e))
}
