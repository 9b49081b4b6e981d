//! Hand-off between the refresh scheduler and a fetch task
//!
//! The scheduler posts a request and keeps scrolling; a separate task runs
//! the network round trip and posts the outcome back. Both sides are
//! latest-value signals, so a stale request or response is overwritten
//! rather than queued.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

use super::request::QuoteRequest;
use crate::traits::{AsyncQuoteSource, FetchResult};

/// Request/response pair shared by the scheduler and the fetch task
pub struct FetchChannel<M: RawMutex> {
    request: Signal<M, QuoteRequest>,
    response: Signal<M, FetchResult>,
}

impl<M: RawMutex> FetchChannel<M> {
    /// Create an idle channel
    pub const fn new() -> Self {
        Self {
            request: Signal::new(),
            response: Signal::new(),
        }
    }

    /// Post a request for the fetch task
    pub fn submit(&self, request: QuoteRequest) {
        self.response.reset();
        self.request.signal(request);
    }

    /// Check whether a request is waiting to be served
    pub fn has_request(&self) -> bool {
        self.request.signaled()
    }

    /// Wait for the next request
    pub async fn next_request(&self) -> QuoteRequest {
        self.request.wait().await
    }

    /// Post the outcome of a fetch
    pub fn respond(&self, result: FetchResult) {
        self.response.signal(result);
    }

    /// Take the posted outcome, if any
    pub fn take_response(&self) -> Option<FetchResult> {
        self.response.try_take()
    }
}

impl<M: RawMutex> Default for FetchChannel<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Serve a single request from `channel`
pub async fn serve_one<M: RawMutex, S: AsyncQuoteSource>(
    channel: &FetchChannel<M>,
    source: &mut S,
) {
    let request = channel.next_request().await;
    debug!("Fetching {}", request.path());
    let result = source.fetch(&request).await;
    channel.respond(result);
}

/// Fetch task body: serve requests from `channel` forever
pub async fn serve_fetch<M: RawMutex, S: AsyncQuoteSource>(
    channel: &FetchChannel<M>,
    source: &mut S,
) -> ! {
    info!("Fetch task started");
    loop {
        serve_one(channel, source).await;
    }
}
