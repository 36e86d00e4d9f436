//! Error types for mail-triage.

use std::time::Duration;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("NLP error: {0}")]
    Nlp(#[from] NlpError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Completion provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Text normalization errors.
#[derive(Debug, thiserror::Error)]
pub enum NlpError {
    #[error("Failed to read lemma dictionary {path}: {source}")]
    DictionaryRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write lemma dictionary cache {path}: {source}")]
    DictionaryWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch lemma dictionary from {url}: {reason}")]
    DictionaryFetch { url: String, reason: String },

    #[error("Malformed lemma dictionary entry at line {line}: {content}")]
    DictionaryParse { line: usize, content: String },

    #[error("Tokenization failed: {0}")]
    Tokenize(String),
}

/// Email processing pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Normalization failed: {0}")]
    Normalization(#[from] NlpError),

    #[error("Processing timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors surfaced to HTTP callers.
///
/// `Display` is the exact `detail` string placed in the response body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("content or file required")]
    MissingInput,

    #[error("email content cannot be empty")]
    EmptyContent,

    #[error("unsupported file type, only .txt or .pdf")]
    UnsupportedFileType { content_type: String },

    #[error("uploaded file is not valid UTF-8 text")]
    InvalidEncoding,

    #[error("invalid form submission")]
    MalformedForm(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("PDF reading not yet implemented")]
    PdfNotImplemented,

    #[error("timed out processing the email")]
    Timeout,

    #[error("internal error processing the email")]
    Internal(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
