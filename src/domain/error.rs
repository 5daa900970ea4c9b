use std::io;

use thiserror::Error;

/// Library-wide error type for sovseas operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Form kind is not one of the supported forms.
    #[error("Invalid form kind '{0}': must be one of campaign, project")]
    InvalidFormKind(String),

    /// Field key is not declared by the form schema.
    #[error("Unknown field '{field}' for {form} form")]
    UnknownField { form: String, field: String },

    /// Field exists but holds a different kind of value.
    #[error("Field '{field}' is {actual}, expected {expected}")]
    FieldKindMismatch { field: String, expected: &'static str, actual: &'static str },

    /// List index outside the current list bounds.
    #[error("Index {index} out of range for '{field}' (length {len})")]
    IndexOutOfRange { field: String, index: usize, len: usize },

    /// Section identifier is not part of the wizard.
    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    /// Wizard step index outside the section list.
    #[error("Step {index} out of range (form has {len} sections)")]
    InvalidStep { index: usize, len: usize },

    /// Draft failed validation; carries the number of offending fields.
    #[error("Draft has {0} invalid field(s)")]
    ValidationFailed(usize),

    /// Generic input validation failure.
    #[error("{0}")]
    Validation(String),

    /// A submission is already running for this session.
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// Wallet is not connected or has no account.
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// Media file rejected before upload.
    #[error("Unsupported media '{path}': {reason}")]
    UnsupportedMedia { path: String, reason: String },

    /// Upload to the media store failed.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Connected chain does not match the target chain.
    #[error("Chain error: {0}")]
    Chain(String),

    /// Contract write or read failed.
    #[error("Contract error: {0}")]
    Contract(String),

    /// JSON-RPC error object returned by the node.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Argument could not be ABI-encoded or decoded.
    #[error("ABI error: {0}")]
    Abi(String),

    /// EVM address is malformed.
    #[error("Invalid address '{0}': expected 0x followed by 40 hex digits")]
    InvalidAddress(String),

    /// Draft file missing.
    #[error("Draft not found: {0}")]
    DraftNotFound(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Embedded asset or template failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn parse_error(what: impl Into<String>, details: impl ToString) -> Self {
        AppError::ParseError { what: what.into(), details: details.to_string() }
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit paths.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidConfig(_)
            | AppError::InvalidFormKind(_)
            | AppError::UnknownField { .. }
            | AppError::FieldKindMismatch { .. }
            | AppError::IndexOutOfRange { .. }
            | AppError::UnknownSection(_)
            | AppError::InvalidStep { .. }
            | AppError::ValidationFailed(_)
            | AppError::Validation(_)
            | AppError::UnsupportedMedia { .. }
            | AppError::Abi(_)
            | AppError::InvalidAddress(_)
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_)
            | AppError::Json(_) => io::ErrorKind::InvalidInput,
            AppError::DraftNotFound(_) => io::ErrorKind::NotFound,
            AppError::SubmissionInProgress => io::ErrorKind::WouldBlock,
            AppError::WalletNotConnected => io::ErrorKind::NotConnected,
            AppError::Upload(_)
            | AppError::Chain(_)
            | AppError::Contract(_)
            | AppError::Rpc { .. }
            | AppError::Http(_)
            | AppError::Internal(_) => io::ErrorKind::Other,
        }
    }
}
