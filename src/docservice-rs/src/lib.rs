//! DocService Client Library
//!
//! HTTP client for storing documents in, and fetching documents (or their
//! extracted text) from, a document service.

mod client;
mod transport;
mod url;

pub use client::Client;
pub use docservice_core::{ClientConfig, ConfigError, Document, DEFAULT_CONTENT_TYPE};
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use url::document_url;

/// Failure of any client operation: bad configuration, transport failure or
/// an unreadable response. The root cause, if any, is kept as the error source.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The first error of type `E` in the cause chain
    pub fn cause<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source
            .as_ref()?
            .chain()
            .find_map(|e| e.downcast_ref::<E>())
    }
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        Self::with_source("Invalid client configuration", err)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_message_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ClientError::with_source("Cannot store to document server", io);

        assert_eq!(err.to_string(), "Cannot store to document server");
        assert_eq!(
            err.cause::<std::io::Error>().map(|e| e.kind()),
            Some(std::io::ErrorKind::ConnectionRefused)
        );
        assert_eq!(err.source().unwrap().to_string(), "refused");
    }

    #[test]
    fn test_cause_found_behind_context() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let wrapped = anyhow::Error::new(io).context("POST http://localhost:8118/document failed");
        let err = ClientError::with_source("Cannot store to document server", wrapped);

        assert_eq!(
            err.cause::<std::io::Error>().map(|e| e.kind()),
            Some(std::io::ErrorKind::ConnectionRefused)
        );
        assert_eq!(
            err.source().unwrap().to_string(),
            "POST http://localhost:8118/document failed"
        );
    }

    #[test]
    fn test_without_source() {
        let err = ClientError::new("config is empty");
        assert_eq!(err.message(), "config is empty");
        assert!(err.source().is_none());
        assert!(err.cause::<std::io::Error>().is_none());
    }

    #[test]
    fn test_from_config_error() {
        let err: ClientError = ConfigError::MissingHost.into();
        assert_eq!(err.message(), "Invalid client configuration");
        assert!(matches!(err.cause::<ConfigError>(), Some(ConfigError::MissingHost)));
    }
}
