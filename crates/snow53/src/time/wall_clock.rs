use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::time::TimeSource;

/// Custom epoch: Saturday, January 1, 2000 00:00:00 UTC.
///
/// All timestamp fields count whole seconds from this instant. The 32-bit
/// timestamp field lasts until the year 2136 from this origin.
pub const CUSTOM_EPOCH: Duration = Duration::from_secs(946_684_800);

/// A wall-clock time source with second resolution, anchored to
/// [`CUSTOM_EPOCH`].
///
/// Readings come straight from [`SystemTime::now`], so external clock
/// adjustments (NTP steps, manual changes) are visible to callers. The
/// generator's clamp logic absorbs backward movement, which keeps this
/// simple source sufficient for id generation.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;

impl WallClock {
    /// Creates a new wall-clock source.
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for WallClock {
    fn epoch_seconds(&self) -> u64 {
        // Saturating on both ends: a system clock before 1970 or before the
        // custom epoch reads as second 0 rather than panicking.
        let unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        unix.as_secs().saturating_sub(CUSTOM_EPOCH.as_secs())
    }
}
