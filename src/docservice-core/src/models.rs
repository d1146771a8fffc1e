use std::borrow::Cow;
use std::collections::BTreeMap;

/// Content type used when none is given or the service omits it
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Document represents a payload stored in (or fetched from) the document service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    data: Vec<u8>,
    content_type: String,
    metadata: BTreeMap<String, String>,
}

impl Document {
    /// Create a document from raw bytes with an explicit content type
    pub fn new(data: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Create a document from raw bytes with the default content type
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::new(data, DEFAULT_CONTENT_TYPE)
    }

    /// Create a document from text, stored as UTF-8
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_bytes(text.into().into_bytes())
    }

    pub fn from_text_with_content_type(
        text: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self::new(text.into().into_bytes(), content_type)
    }

    /// Build a document from a service response body.
    /// A missing or blank content type falls back to `application/octet-stream`.
    pub fn from_response(content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        let content_type = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);
        Self::new(body, content_type)
    }

    pub fn data_as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Payload decoded as UTF-8; invalid sequences are replaced.
    /// The content type's `charset` is not consulted.
    pub fn data_as_string(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The `charset` parameter of the content type, if present
    pub fn charset(&self) -> Option<&str> {
        self.content_type.split(';').skip(1).find_map(|param| {
            let (name, value) = param.split_once('=')?;
            if name.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches('"'))
            } else {
                None
            }
        })
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.metadata
    }

    /// Set a metadata entry, returning the previous value if any
    pub fn set_metadata(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.metadata.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::from_bytes(Vec::new())
    }
}
