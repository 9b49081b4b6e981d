//! Control loop step
//!
//! One call per pass of the main loop: watch the network link, refresh
//! quotes when due, and shift the scroll when due.

use crate::market::{ConfigError, DISPLAY_CAPACITY, MAX_SYMBOLS};
use crate::refresh::{RefreshScheduler, RefreshStatus};
use crate::scroll::{print_static, ScrollEngine};
use crate::settings::TickerSettings;
use crate::time::Instant;
use crate::traits::{DisplayError, MatrixSurface, QuoteSource};

/// Shown while the network link is down
pub const CONNECTING_MESSAGE: &str = "Connecting to WiFi...";

/// Network link state reported by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Connected
    Up,
    /// Not connected
    Down,
}

/// The ticker application
pub struct TickerApp<const N: usize = MAX_SYMBOLS, const B: usize = DISPLAY_CAPACITY> {
    refresh: RefreshScheduler<N, B>,
    scroll: ScrollEngine,
    last_status: RefreshStatus,
    last_link: Option<LinkState>,
}

impl<const N: usize, const B: usize> TickerApp<N, B> {
    /// Assemble the app from its parts
    pub fn new(refresh: RefreshScheduler<N, B>, scroll: ScrollEngine) -> Self {
        Self {
            refresh,
            scroll,
            last_status: RefreshStatus::Ok,
            last_link: None,
        }
    }

    /// Build the app for a field `columns` wide from ticker settings
    pub fn from_settings(settings: &TickerSettings, columns: u16) -> Result<Self, ConfigError> {
        let refresh = RefreshScheduler::from_settings(settings)?;
        let scroll = ScrollEngine::new(columns, settings.scroll_period_ms);
        Ok(Self::new(refresh, scroll))
    }

    /// Run one pass of the control loop
    ///
    /// While the link is down the connecting message is shown and nothing
    /// else runs. The first pass with the link up, at boot or after an
    /// outage, restarts the scroll and fetches immediately.
    pub fn step<S: QuoteSource, D: MatrixSurface>(
        &mut self,
        now: Instant,
        link: LinkState,
        source: &mut S,
        surface: &mut D,
    ) -> Result<(), DisplayError> {
        match link {
            LinkState::Down => {
                if self.last_link != Some(LinkState::Down) {
                    warn!("WiFi link down");
                    print_static(surface, CONNECTING_MESSAGE)?;
                    self.last_link = Some(LinkState::Down);
                }
                return Ok(());
            }
            LinkState::Up => {
                if self.last_link != Some(LinkState::Up) {
                    info!("WiFi link up");
                    self.scroll.reset();
                    self.refresh.force_refresh();
                    self.last_link = Some(LinkState::Up);
                }
            }
        }

        if self.refresh.tick(now, source) {
            let status = self.refresh.status();
            if status != self.last_status {
                info!("Refresh status changed: {}", status.message());
                self.last_status = status;
            }
        }

        self.scroll.tick(now, self.refresh.display_text(), surface)?;
        Ok(())
    }

    /// Refresh scheduler
    pub fn refresh(&self) -> &RefreshScheduler<N, B> {
        &self.refresh
    }

    /// Mutable refresh scheduler, for forcing a refresh
    pub fn refresh_mut(&mut self) -> &mut RefreshScheduler<N, B> {
        &mut self.refresh
    }

    /// Scroll engine
    pub fn scroll(&self) -> &ScrollEngine {
        &self.scroll
    }

    /// Mutable scroll engine, for resetting the scroll
    pub fn scroll_mut(&mut self) -> &mut ScrollEngine {
        &mut self.scroll
    }

    /// Current ticker line
    pub fn display_text(&self) -> &str {
        self.refresh.display_text()
    }

    /// Outcome of the most recent refresh
    pub fn status(&self) -> RefreshStatus {
        self.refresh.status()
    }

    /// Link state seen on the last step
    pub fn link(&self) -> Option<LinkState> {
        self.last_link
    }
}
