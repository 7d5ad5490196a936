//! Error types for apprate operations.
//!
//! Business-rule outcomes (a store app that is not installed, a dialog the
//! presenter could not build) are not errors. Only configuration mistakes and
//! backend failures surface here.

use thiserror::Error;

/// Result type alias for apprate operations.
pub type AppRateResult<T> = Result<T, AppRateError>;

/// Main error type for all apprate operations.
#[derive(Error, Debug)]
pub enum AppRateError {
    /// Configuration is missing or inconsistent.
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        code: ErrorCode,
        suggestion: Option<String>,
    },

    /// An argument failed validation.
    #[error("Validation error: {message}")]
    Validation { message: String, code: ErrorCode },

    /// Preference backend failed.
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Parse error.
    #[error("Parse error: {message}")]
    Parse { message: String, code: ErrorCode },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Configuration (CFG_xxx)
    CfgMissingField,
    CfgInvalidStore,
    CfgInvalidValue,
    CfgUnsupportedFormat,

    // Validation (VAL_xxx)
    ValEmptyEventName,

    // Storage (STORE_xxx)
    StoreReadFailed,
    StoreWriteFailed,
    StoreOpenFailed,

    // Parse (PARSE_xxx)
    ParseInvalidConfig,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::CfgMissingField => "CFG_001",
            ErrorCode::CfgInvalidStore => "CFG_002",
            ErrorCode::CfgInvalidValue => "CFG_003",
            ErrorCode::CfgUnsupportedFormat => "CFG_004",
            ErrorCode::ValEmptyEventName => "VAL_001",
            ErrorCode::StoreReadFailed => "STORE_001",
            ErrorCode::StoreWriteFailed => "STORE_002",
            ErrorCode::StoreOpenFailed => "STORE_003",
            ErrorCode::ParseInvalidConfig => "PARSE_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl AppRateError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            code: ErrorCode::CfgInvalidValue,
            suggestion: None,
        }
    }

    /// Create a configuration error for a required value that was never set.
    pub fn missing(field: &str) -> Self {
        Self::Configuration {
            message: format!("'{}' must be set before building", field),
            code: ErrorCode::CfgMissingField,
            suggestion: None,
        }
    }

    /// Create a configuration error about the store selection.
    pub fn invalid_store(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            code: ErrorCode::CfgInvalidStore,
            suggestion: Some(suggestion.into()),
        }
    }

    /// Create the error returned for a blank custom event name.
    pub fn empty_event_name() -> Self {
        Self::Validation {
            message: "custom event name must not be empty".to_string(),
            code: ErrorCode::ValEmptyEventName,
        }
    }

    /// Create a storage read error.
    pub fn storage_read(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            code: ErrorCode::StoreReadFailed,
            source: None,
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            code: ErrorCode::ParseInvalidConfig,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Configuration { code, .. } => *code,
            Self::Validation { code, .. } => *code,
            Self::Storage { code, .. } => *code,
            Self::Parse { code, .. } => *code,
            _ => ErrorCode::Internal,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Configuration { suggestion, .. } => suggestion.as_deref(),
            Self::Storage { .. } => Some("Please check that the preference database is writable"),
            Self::Parse { .. } => Some("Please check the configuration file syntax"),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for AppRateError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
            code: ErrorCode::StoreWriteFailed,
            source: Some(Box::new(err)),
        }
    }
}
