//! Exchange base error types
//!
//! Errors are grouped the way callers react to them:
//! - Configuration family (fatal to adapter setup)
//!   - ConfigurationError
//! - Credential family (degrades to public-data-only mode)
//!   - CredentialError
//!   - AuthenticationError
//! - Capability family
//!   - NotSupported
//! - Venue family (the venue answered but rejected or garbled the call)
//!   - ExchangeError
//!   - BadSymbol
//!   - InvalidOrder
//!   - BadResponse
//!   - ParseError / JsonError
//! - Transport family (surfaced as-is, never retried here)
//!   - NetworkError
//!   - RequestTimeout
//!   - RateLimitExceeded
//! - Cache
//!   - CacheMiss

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BaseError {
    // === Configuration family ===
    /// Missing or empty required configuration
    #[error("Configuration error: {exchange} - {message}")]
    ConfigurationError { exchange: String, message: String },

    // === Credential family ===
    /// Credentials unset, default or undecodable
    #[error("Credential error: {exchange} - {message}")]
    CredentialError { exchange: String, message: String },

    /// Venue refused the supplied credentials
    #[error("Authentication error: {message}")]
    AuthenticationError { message: String },

    // === Capability family ===
    /// Operation not supported by this venue
    #[error("Not supported: {feature}")]
    NotSupported { feature: String },

    // === Venue family ===
    /// Generic venue-side rejection
    #[error("Exchange error: {exchange} - {message}")]
    ExchangeError { exchange: String, message: String },

    /// Pair could not be parsed or is unknown to the venue
    #[error("Bad symbol: {symbol}")]
    BadSymbol { symbol: String },

    /// Order parameters rejected before hitting the venue
    #[error("Invalid order: {message}")]
    InvalidOrder { message: String },

    /// Response shape did not match what the adapter expects
    #[error("Bad response: {message}")]
    BadResponse { message: String },

    /// Failed to parse response data
    #[error("Parse error: {data_type} - {message}")]
    ParseError { data_type: String, message: String },

    /// JSON (de)serialization error
    #[error("JSON error: {message}")]
    JsonError { message: String },

    // === Transport family ===
    /// Generic network error
    #[error("Network error: {url} - {message}")]
    NetworkError { url: String, message: String },

    /// Request timed out
    #[error("Request timeout: {url}")]
    RequestTimeout { url: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        message: String,
        /// Suggested retry after in milliseconds (if provided by exchange)
        retry_after_ms: Option<u64>,
    },

    // === Cache ===
    /// No snapshot stored for the key
    #[error("Cache miss: {kind} for {exchange} {pair} {asset}")]
    CacheMiss {
        kind: &'static str,
        exchange: String,
        pair: String,
        asset: String,
    },
}

impl BaseError {
    /// Returns the error code as a string constant
    pub fn code(&self) -> &'static str {
        match self {
            BaseError::ConfigurationError { .. } => "CONFIGURATION_ERROR",
            BaseError::CredentialError { .. } => "CREDENTIAL_ERROR",
            BaseError::AuthenticationError { .. } => "AUTHENTICATION_ERROR",
            BaseError::NotSupported { .. } => "NOT_SUPPORTED",
            BaseError::ExchangeError { .. } => "EXCHANGE_ERROR",
            BaseError::BadSymbol { .. } => "BAD_SYMBOL",
            BaseError::InvalidOrder { .. } => "INVALID_ORDER",
            BaseError::BadResponse { .. } => "BAD_RESPONSE",
            BaseError::ParseError { .. } => "PARSE_ERROR",
            BaseError::JsonError { .. } => "JSON_ERROR",
            BaseError::NetworkError { .. } => "NETWORK_ERROR",
            BaseError::RequestTimeout { .. } => "REQUEST_TIMEOUT",
            BaseError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            BaseError::CacheMiss { .. } => "CACHE_MISS",
        }
    }

    /// Returns true if the transport layer may retry the operation
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BaseError::NetworkError { .. }
                | BaseError::RequestTimeout { .. }
                | BaseError::RateLimitExceeded { .. }
        )
    }

    /// Returns true if this is a network-related error
    pub fn is_network_error(&self) -> bool {
        self.is_retryable()
    }

    /// Returns true if setup cannot continue
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, BaseError::ConfigurationError { .. })
    }

    /// Returns true if this is a credential or authentication problem
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            BaseError::CredentialError { .. } | BaseError::AuthenticationError { .. }
        )
    }

    /// Returns true if the venue does not offer the operation
    pub fn is_not_supported(&self) -> bool {
        matches!(self, BaseError::NotSupported { .. })
    }

    /// Shorthand for a configuration error
    pub fn configuration(exchange: impl Into<String>, message: impl Into<String>) -> Self {
        BaseError::ConfigurationError {
            exchange: exchange.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a venue-side rejection
    pub fn exchange(exchange: impl Into<String>, message: impl Into<String>) -> Self {
        BaseError::ExchangeError {
            exchange: exchange.into(),
            message: message.into(),
        }
    }
}

// === From implementations for common error types ===

impl From<serde_json::Error> for BaseError {
    fn from(err: serde_json::Error) -> Self {
        BaseError::JsonError {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for BaseError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        if err.is_timeout() {
            BaseError::RequestTimeout { url }
        } else if err.is_connect() {
            BaseError::NetworkError {
                url,
                message: "Connection failed".into(),
            }
        } else {
            BaseError::NetworkError {
                url,
                message: err.to_string(),
            }
        }
    }
}

impl From<std::io::Error> for BaseError {
    fn from(err: std::io::Error) -> Self {
        BaseError::NetworkError {
            url: String::new(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BaseError {
    fn from(err: toml::de::Error) -> Self {
        BaseError::ParseError {
            data_type: "toml".into(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for BaseError {
    fn from(err: toml::ser::Error) -> Self {
        BaseError::ParseError {
            data_type: "toml".into(),
            message: err.to_string(),
        }
    }
}

/// Result 타입 alias
pub type BaseResult<T> = Result<T, BaseError>;
