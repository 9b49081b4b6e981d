//! Market data request description
//!
//! Everything the HTTP collaborator needs to issue the snapshot request,
//! prepared once at startup so the refresh path does no formatting.

use core::fmt::Write;

use heapless::String;

use crate::market::{ConfigError, SymbolTable};
use crate::settings::{Feed, API_KEY_ID_CAPACITY, API_SECRET_KEY_CAPACITY};

/// Market data API host
pub const API_HOST: &str = "data.alpaca.markets";

/// API port (HTTPS)
pub const API_PORT: u16 = 443;

/// Header carrying the API key ID
pub const KEY_ID_HEADER: &str = "APCA-API-KEY-ID";

/// Header carrying the API secret key
pub const SECRET_KEY_HEADER: &str = "APCA-API-SECRET-KEY";

/// Maximum request path length
pub const MAX_PATH_LEN: usize = 320;

const SNAPSHOTS_PATH: &str = "/v2/stocks/snapshots?symbols=";

/// A prepared snapshot request
#[derive(Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    path: String<MAX_PATH_LEN>,
    key_id: String<API_KEY_ID_CAPACITY>,
    secret_key: String<API_SECRET_KEY_CAPACITY>,
    feed: Feed,
}

impl QuoteRequest {
    /// Prepare the request for every symbol admitted to `table`
    pub fn new<const N: usize>(
        table: &SymbolTable<N>,
        feed: Feed,
        key_id: &str,
        secret_key: &str,
    ) -> Result<Self, ConfigError> {
        let mut path: String<MAX_PATH_LEN> = String::new();
        path.push_str(SNAPSHOTS_PATH)
            .map_err(|_| ConfigError::RequestTooLong)?;
        for (i, id) in table.ids().enumerate() {
            if i > 0 {
                path.push(',').map_err(|_| ConfigError::RequestTooLong)?;
            }
            path.push_str(id).map_err(|_| ConfigError::RequestTooLong)?;
        }
        write!(path, "&feed={}", feed.as_str()).map_err(|_| ConfigError::RequestTooLong)?;

        let mut key: String<API_KEY_ID_CAPACITY> = String::new();
        key.push_str(key_id)
            .map_err(|_| ConfigError::RequestTooLong)?;
        let mut secret: String<API_SECRET_KEY_CAPACITY> = String::new();
        secret
            .push_str(secret_key)
            .map_err(|_| ConfigError::RequestTooLong)?;

        Ok(Self {
            path,
            key_id: key,
            secret_key: secret,
            feed,
        })
    }

    /// Host to connect to
    pub fn host(&self) -> &'static str {
        API_HOST
    }

    /// Request path including the query string
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Feed being requested
    pub fn feed(&self) -> Feed {
        self.feed
    }

    /// Credential headers as `(name, value)` pairs
    pub fn headers(&self) -> [(&'static str, &str); 2] {
        [
            (KEY_ID_HEADER, self.key_id.as_str()),
            (SECRET_KEY_HEADER, self.secret_key.as_str()),
        ]
    }
}

impl core::fmt::Debug for QuoteRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuoteRequest")
            .field("path", &self.path.as_str())
            .field("key_id", &self.key_id.as_str())
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path_uses_admitted_symbols() {
        let table = SymbolTable::<4>::from_csv("AAPL, MSFT,AAPL").unwrap();
        let request = QuoteRequest::new(&table, Feed::Iex, "PKID", "SECRET").unwrap();

        assert_eq!(
            request.path(),
            "/v2/stocks/snapshots?symbols=AAPL,MSFT&feed=iex"
        );
        assert_eq!(request.host(), "data.alpaca.markets");
    }

    #[test]
    fn test_request_headers() {
        let table = SymbolTable::<1>::from_csv("SPY").unwrap();
        let request = QuoteRequest::new(&table, Feed::DelayedSip, "PKID", "SECRET").unwrap();

        let headers = request.headers();
        assert_eq!(headers[0], ("APCA-API-KEY-ID", "PKID"));
        assert_eq!(headers[1], ("APCA-API-SECRET-KEY", "SECRET"));
        assert!(request.path().ends_with("&feed=delayed_sip"));
    }

    #[test]
    fn test_request_too_long() {
        let csv = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123,BCDEFGHIJKLMNOPQRSTUVWXYZ01234,\
                   CDEFGHIJKLMNOPQRSTUVWXYZ012345,DEFGHIJKLMNOPQRSTUVWXYZ0123456,\
                   EFGHIJKLMNOPQRSTUVWXYZ01234567,FGHIJKLMNOPQRSTUVWXYZ012345678,\
                   GHIJKLMNOPQRSTUVWXYZ0123456789,HIJKLMNOPQRSTUVWXYZ0123456789A,\
                   IJKLMNOPQRSTUVWXYZ0123456789AB,JKLMNOPQRSTUVWXYZ0123456789ABC";
        let table = SymbolTable::<16>::from_csv(csv).unwrap();
        assert_eq!(table.len(), 10);
        assert_eq!(
            QuoteRequest::new(&table, Feed::Iex, "PKID", "SECRET").unwrap_err(),
            ConfigError::RequestTooLong
        );
    }
}
