//! Refresh outcome classification

use crate::traits::FetchError;

/// Outcome of the most recent refresh attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshStatus {
    /// Prices fetched and applied
    #[default]
    Ok,
    /// No network link
    NoNetwork,
    /// Could not connect to the API host
    ConnectFailed,
    /// Could not send the request
    RequestSendFailed,
    /// Response could not be parsed or held invalid prices
    MalformedResponse,
    /// HTTP 400, usually bad credentials
    BadRequest,
    /// HTTP 403, credentials lack permission
    Forbidden,
    /// HTTP 429, request period too short for the API plan
    RateLimited,
    /// HTTP 500
    ServerError,
    /// Any other failure
    Unknown,
}

impl RefreshStatus {
    /// Operator-facing description, distinct per class
    pub fn message(self) -> &'static str {
        match self {
            RefreshStatus::Ok => "OK",
            RefreshStatus::NoNetwork => "No network connection",
            RefreshStatus::ConnectFailed => "Failed to connect to market data server",
            RefreshStatus::RequestSendFailed => "Failed to send market data request",
            RefreshStatus::MalformedResponse => "Bad response from market data server",
            RefreshStatus::BadRequest => "Bad request (400), check API key ID and secret key",
            RefreshStatus::Forbidden => "Forbidden (403), check API key permissions and feed",
            RefreshStatus::RateLimited => "Too many requests (429), increase request period",
            RefreshStatus::ServerError => "Market data server error (500)",
            RefreshStatus::Unknown => "Unknown market data error",
        }
    }

    /// Check if the last refresh succeeded
    pub fn is_ok(self) -> bool {
        self == RefreshStatus::Ok
    }
}

impl From<FetchError> for RefreshStatus {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::NoNetwork => RefreshStatus::NoNetwork,
            FetchError::ConnectFailed => RefreshStatus::ConnectFailed,
            FetchError::SendFailed => RefreshStatus::RequestSendFailed,
            FetchError::ParseFailed => RefreshStatus::MalformedResponse,
            FetchError::BadRequest => RefreshStatus::BadRequest,
            FetchError::Forbidden => RefreshStatus::Forbidden,
            FetchError::TooManyRequests => RefreshStatus::RateLimited,
            FetchError::InternalServerError => RefreshStatus::ServerError,
            FetchError::HttpOther(_) => RefreshStatus::Unknown,
        }
    }
}

impl core::fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// Where the scheduler is in its fetch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshPhase {
    /// Waiting for the request deadline
    #[default]
    Idle,
    /// Request posted, response not yet applied
    Fetching,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_mapping() {
        assert_eq!(
            RefreshStatus::from(FetchError::TooManyRequests),
            RefreshStatus::RateLimited
        );
        assert_eq!(
            RefreshStatus::from(FetchError::ParseFailed),
            RefreshStatus::MalformedResponse
        );
        assert_eq!(
            RefreshStatus::from(FetchError::HttpOther(418)),
            RefreshStatus::Unknown
        );
        assert_eq!(
            RefreshStatus::from(FetchError::SendFailed),
            RefreshStatus::RequestSendFailed
        );
    }

    #[test]
    fn test_credential_and_rate_limit_messages_differ() {
        let messages = [
            RefreshStatus::BadRequest.message(),
            RefreshStatus::Forbidden.message(),
            RefreshStatus::RateLimited.message(),
            RefreshStatus::ServerError.message(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
