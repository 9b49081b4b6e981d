//! Wrapping millisecond clock
//!
//! Timestamps come from a free-running 32-bit millisecond counter that wraps
//! roughly every 49.7 days. Deadlines are compared by subtracting timestamps,
//! never by ordering them directly, so comparisons stay correct across the
//! wrap as long as the two points are less than 2^31 ms apart.

/// A point on the wrapping millisecond clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant(u32);

impl Instant {
    /// Create an instant from a raw millisecond counter value
    pub const fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    /// Raw millisecond counter value
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// The instant `ms` milliseconds later, wrapping at `u32::MAX`
    pub const fn wrapping_add(self, ms: u32) -> Self {
        Self(self.0.wrapping_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`
    pub const fn wrapping_since(self, earlier: Instant) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Check whether `self` is at or past `deadline`
    pub const fn has_reached(self, deadline: Instant) -> bool {
        (self.0.wrapping_sub(deadline.0) as i32) >= 0
    }
}

/// When a periodic action may next run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Deadline {
    /// Run on the next poll regardless of the clock
    Due,
    /// Run once the clock reaches this instant
    At(Instant),
}

impl Deadline {
    /// Deadline `period_ms` after `now`
    pub const fn after(now: Instant, period_ms: u32) -> Self {
        Deadline::At(now.wrapping_add(period_ms))
    }

    /// Check whether the action may run at `now`
    pub const fn is_due(self, now: Instant) -> bool {
        match self {
            Deadline::Due => true,
            Deadline::At(at) => now.has_reached(at),
        }
    }
}
