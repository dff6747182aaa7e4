/*!
 * Error types for the doctrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the translation backend
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Required configuration is missing (typically the API key)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The backend rejected the credential (HTTP 401)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The backend throttled the request (HTTP 429)
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Network-level failure reaching the backend (DNS, timeout, refused)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Any other backend failure: non-2xx status or an unusable response body
    #[error("Translation service error: {0}")]
    Service(String),
}

/// Errors that can occur while opening, rewriting or saving a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file extension is not one of the supported document formats
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The document container or its XML cannot be parsed
    #[error("Document is corrupted or not a valid office file: {0}")]
    Corrupted(String),

    /// Error from a file operation
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for DocumentError {
    fn from(error: zip::result::ZipError) -> Self {
        Self::Corrupted(error.to_string())
    }
}

impl From<quick_xml::Error> for DocumentError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Corrupted(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the translation backend
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from document processing
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Invalid request input (bad language code, empty filename, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// HTTP status the upstream boundary should surface for this error.
    ///
    /// Bad input and unsupported document types map to 400, everything
    /// else (service failures, corruption, I/O) to 500.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::Document(DocumentError::UnsupportedFormat(_)) => 400,
            _ => 500,
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Document(DocumentError::Io(error))
    }
}
