//! Quote refresh
//!
//! - [`RefreshScheduler`]: period-gated fetch, classification and apply
//! - [`QuoteRequest`]: the prepared snapshot request
//! - [`FetchChannel`]: deferred fetch through a separate task

pub mod channel;
pub mod request;
pub mod scheduler;
pub mod status;

pub use channel::{serve_fetch, serve_one, FetchChannel};
pub use request::{QuoteRequest, API_HOST, API_PORT, KEY_ID_HEADER, SECRET_KEY_HEADER};
pub use scheduler::{PriceChange, RefreshScheduler};
pub use status::{RefreshPhase, RefreshStatus};
