//! Rate-limited quote refresh
//!
//! Owns the symbol table and the ticker line. Once per request period it
//! asks the quote source for fresh bars, classifies the outcome, and on
//! success applies the prices and rebuilds the line. Failures leave both the
//! table and the line untouched and are surfaced only through
//! [`RefreshScheduler::status`]. There is no retry faster than the period.

use embassy_sync::blocking_mutex::raw::RawMutex;

use super::channel::FetchChannel;
use super::request::QuoteRequest;
use super::status::{RefreshPhase, RefreshStatus};
use crate::market::{build, ConfigError, DisplayBuffer, SymbolTable, DISPLAY_CAPACITY, MAX_SYMBOLS};
use crate::settings::TickerSettings;
use crate::time::{Deadline, Instant};
use crate::traits::{FetchResult, Quote, QuoteSource};

/// Price change derived from one bar
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PriceChange {
    /// Latest price
    pub price: f32,
    /// `close - open`
    pub change: f32,
    /// `change / open * 100`
    pub change_percent: f32,
}

impl PriceChange {
    /// Derive the change from a day open and latest close
    ///
    /// Returns `None` if the prices cannot produce a meaningful change.
    pub fn from_bar(open: f32, close: f32) -> Option<Self> {
        if !open.is_finite() || !close.is_finite() || open <= 0.0 || close < 0.0 {
            return None;
        }
        let change = close - open;
        Some(Self {
            price: close,
            change,
            change_percent: change / open * 100.0,
        })
    }
}

/// Periodic quote refresh driving the symbol table and ticker line
pub struct RefreshScheduler<const N: usize = MAX_SYMBOLS, const B: usize = DISPLAY_CAPACITY> {
    table: SymbolTable<N>,
    display: DisplayBuffer<B>,
    request: QuoteRequest,
    period_ms: u32,
    next_request: Deadline,
    status: RefreshStatus,
    phase: RefreshPhase,
}

impl<const N: usize, const B: usize> RefreshScheduler<N, B> {
    /// Create a scheduler whose first tick fetches immediately
    ///
    /// The ticker line starts out with a placeholder for every symbol.
    pub fn new(table: SymbolTable<N>, request: QuoteRequest, period_ms: u32) -> Self {
        let mut display = DisplayBuffer::new();
        build(&table, &mut display);
        Self {
            table,
            display,
            request,
            period_ms: period_ms.max(1),
            next_request: Deadline::Due,
            status: RefreshStatus::Ok,
            phase: RefreshPhase::Idle,
        }
    }

    /// Create a scheduler from ticker settings
    pub fn from_settings(settings: &TickerSettings) -> Result<Self, ConfigError> {
        let table = SymbolTable::from_csv(&settings.symbols)?;
        let request = QuoteRequest::new(
            &table,
            settings.feed,
            &settings.api_key_id,
            &settings.api_secret_key,
        )?;
        info!(
            "Ticker configured with {} symbols, refresh every {} ms",
            table.len(),
            settings.request_period_ms
        );
        Ok(Self::new(table, request, settings.request_period_ms))
    }

    /// Fetch and apply quotes if the request deadline has passed
    ///
    /// Blocks for the duration of the fetch. Returns `true` if a fetch was
    /// performed. Before the deadline this is a no-op.
    pub fn tick<S: QuoteSource>(&mut self, now: Instant, source: &mut S) -> bool {
        if !self.next_request.is_due(now) {
            return false;
        }

        self.phase = RefreshPhase::Fetching;
        debug!("Requesting quotes for {} symbols", self.table.len());
        let result = source.fetch(&self.request);

        self.apply(result);
        self.next_request = Deadline::after(now, self.period_ms);
        true
    }

    /// Deferred variant of [`tick`](Self::tick) for a separate fetch task
    ///
    /// When due, posts the request to `channel` and returns immediately. A
    /// later call applies the response once it has arrived. At most one
    /// request is ever outstanding. Returns `true` when a response was
    /// applied.
    pub fn tick_deferred<M: RawMutex>(&mut self, now: Instant, channel: &FetchChannel<M>) -> bool {
        if self.phase == RefreshPhase::Fetching {
            return match channel.take_response() {
                Some(result) => {
                    self.apply(result);
                    true
                }
                None => false,
            };
        }

        if !self.next_request.is_due(now) {
            return false;
        }

        debug!("Posting quote request for {} symbols", self.table.len());
        channel.submit(self.request.clone());
        self.phase = RefreshPhase::Fetching;
        self.next_request = Deadline::after(now, self.period_ms);
        false
    }

    /// Make the next tick fetch regardless of the deadline
    pub fn force_refresh(&mut self) {
        self.next_request = Deadline::Due;
    }

    /// Classify and apply one fetch outcome
    fn apply(&mut self, result: FetchResult) {
        self.status = match result {
            Err(e) => RefreshStatus::from(e),
            Ok(batch) => {
                if batch.iter().all(|q| PriceChange::from_bar(q.open, q.close).is_some()) {
                    let applied = self.apply_quotes(&batch);
                    build(&self.table, &mut self.display);
                    info!("Applied {} of {} quotes", applied, batch.len());
                    RefreshStatus::Ok
                } else {
                    RefreshStatus::MalformedResponse
                }
            }
        };

        if !self.status.is_ok() {
            warn!("Quote refresh failed: {}", self.status.message());
        }

        self.phase = RefreshPhase::Idle;
    }

    fn apply_quotes(&mut self, batch: &[Quote]) -> usize {
        let mut applied = 0;
        for quote in batch {
            let Some(change) = PriceChange::from_bar(quote.open, quote.close) else {
                continue;
            };
            if self
                .table
                .update(
                    &quote.symbol,
                    change.price,
                    change.change,
                    change.change_percent,
                )
                .is_ok()
            {
                applied += 1;
            }
        }
        applied
    }

    /// Classified outcome of the most recent fetch
    pub fn status(&self) -> RefreshStatus {
        self.status
    }

    /// Current point in the fetch cycle
    pub fn phase(&self) -> RefreshPhase {
        self.phase
    }

    /// Ticker line built from the last successful refresh
    pub fn display_text(&self) -> &str {
        self.display.as_str()
    }

    /// Symbol prices
    pub fn table(&self) -> &SymbolTable<N> {
        &self.table
    }

    /// The prepared request
    pub fn request(&self) -> &QuoteRequest {
        &self.request
    }

    /// When the next fetch is permitted
    pub fn next_request(&self) -> Deadline {
        self.next_request
    }

    /// Time between fetches
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}
