//! Error types and retry classification for the market data crate.

pub mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while talking to a market data provider.
///
/// Each variant maps to a [`RetryClass`] via [`retry_class`](Self::retry_class),
/// which decides whether the bounded backoff loop should try again.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No API key has been configured for the provider.
    /// Surfaced before any request is made.
    #[error("No API key configured for {provider}")]
    MissingApiKey {
        /// Provider that requires a key
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429 or an in-body
    /// throttling note on otherwise-200 responses).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The symbol exists but has no data points in the requested window.
    #[error("No data for range")]
    NoDataForRange,

    /// The provider does not implement this operation
    /// (e.g. Finnhub has no top-movers endpoint).
    #[error("Operation not supported by {provider}: {operation}")]
    NotSupported {
        /// The unsupported operation
        operation: String,
        /// The provider that lacks it
        provider: String,
    },

    /// Any other provider-side failure: HTTP errors, unparseable bodies,
    /// in-body error messages.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A transport-level error from the HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// - [`RetryClass::WithBackoff`]: transient, worth another attempt after a
    ///   delay (rate limiting, timeouts)
    /// - [`RetryClass::Never`]: terminal, retrying the same request cannot help
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::RateLimited { .. } | Self::Timeout { .. } => RetryClass::WithBackoff,

            Self::SymbolNotFound(_)
            | Self::MissingApiKey { .. }
            | Self::NoDataForRange
            | Self::NotSupported { .. }
            | Self::ProviderError { .. }
            | Self::Network(_) => RetryClass::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_retries_with_backoff() {
        let error = MarketDataError::RateLimited {
            provider: "ALPHA_VANTAGE".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn timeout_retries_with_backoff() {
        let error = MarketDataError::Timeout {
            provider: "FINNHUB".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn symbol_not_found_never_retries() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn missing_api_key_never_retries() {
        let error = MarketDataError::MissingApiKey {
            provider: "ALPHA_VANTAGE".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn provider_error_never_retries() {
        let error = MarketDataError::ProviderError {
            provider: "FINNHUB".to_string(),
            message: "Internal server error".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::RateLimited {
            provider: "ALPHA_VANTAGE".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: ALPHA_VANTAGE");
    }
}
