//! Market data source traits
//!
//! The HTTP transport, TLS, and JSON decoding live behind these traits. A
//! source either yields the parsed `(symbol, open, close)` tuples or a typed
//! failure describing where the request broke down.

use core::future::Future;

use heapless::{String, Vec};

use crate::market::{MAX_ID_LEN, MAX_SYMBOLS};
use crate::refresh::QuoteRequest;

/// One parsed daily bar
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quote {
    /// Symbol identifier as returned by the API
    pub symbol: String<MAX_ID_LEN>,
    /// Reference (day open) price
    pub open: f32,
    /// Latest (close) price
    pub close: f32,
}

impl Quote {
    /// Build a quote, returning `None` if the symbol does not fit
    pub fn new(symbol: &str, open: f32, close: f32) -> Option<Self> {
        let mut id = String::new();
        id.push_str(symbol).ok()?;
        Some(Self {
            symbol: id,
            open,
            close,
        })
    }
}

/// All quotes from one response
pub type QuoteBatch = Vec<Quote, MAX_SYMBOLS>;

/// Outcome of a single fetch
pub type FetchResult = Result<QuoteBatch, FetchError>;

/// Typed failures reported by a quote source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// No network link
    NoNetwork,
    /// TCP/TLS connection could not be established
    ConnectFailed,
    /// Request headers or body could not be sent
    SendFailed,
    /// Response body was not the expected document
    ParseFailed,
    /// HTTP 400
    BadRequest,
    /// HTTP 403
    Forbidden,
    /// HTTP 429
    TooManyRequests,
    /// HTTP 500
    InternalServerError,
    /// Any other non-success HTTP status
    HttpOther(u16),
}

impl FetchError {
    /// Classify a non-success HTTP status code
    pub fn from_http_status(code: u16) -> Self {
        match code {
            400 => FetchError::BadRequest,
            403 => FetchError::Forbidden,
            429 => FetchError::TooManyRequests,
            500 => FetchError::InternalServerError,
            other => FetchError::HttpOther(other),
        }
    }
}

/// Blocking quote source
///
/// Runs the request to completion (or to the transport's own timeout)
/// before returning.
pub trait QuoteSource {
    /// Fetch the latest daily bars for every symbol in `request`
    fn fetch(&mut self, request: &QuoteRequest) -> FetchResult;
}

/// Async quote source, for running the fetch in its own task
pub trait AsyncQuoteSource {
    /// Fetch the latest daily bars for every symbol in `request`
    fn fetch(&mut self, request: &QuoteRequest) -> impl Future<Output = FetchResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_classification() {
        assert_eq!(FetchError::from_http_status(400), FetchError::BadRequest);
        assert_eq!(FetchError::from_http_status(403), FetchError::Forbidden);
        assert_eq!(
            FetchError::from_http_status(429),
            FetchError::TooManyRequests
        );
        assert_eq!(
            FetchError::from_http_status(500),
            FetchError::InternalServerError
        );
        assert_eq!(
            FetchError::from_http_status(502),
            FetchError::HttpOther(502)
        );
    }

    #[test]
    fn test_quote_rejects_oversize_symbol() {
        assert!(Quote::new("AAPL", 1.0, 2.0).is_some());
        let long = "ABCDEFGHIJKLMNOPQRSTUVWXYZABCDEFGHIJ";
        assert!(long.len() > MAX_ID_LEN);
        assert!(Quote::new(long, 1.0, 2.0).is_none());
    }
}
