use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::{id::CompactId, time::TimeSource};

/// Mutable counter state, owned exclusively by the generator's mutex.
struct GeneratorState {
    /// The most recent second handled by this generator, relative to
    /// [`CUSTOM_EPOCH`]. May run ahead of the wall clock after a borrow.
    ///
    /// [`CUSTOM_EPOCH`]: crate::time::CUSTOM_EPOCH
    last_epoch: u64,
    /// Per-second counter. Incremented before use, so the first id minted in
    /// a given second carries sequence 1.
    sequence: u16,
}

/// A lock-based id generator suitable for multi-threaded environments.
///
/// The generator wraps its `(last_epoch, sequence)` state in an
/// [`Arc<Mutex<_>>`], so all callers observe a strictly serialized view of
/// the counter. The critical section contains only cheap arithmetic; the
/// clock is read before the lock is taken.
///
/// Generation never fails and never blocks beyond lock contention:
///
/// - If the clock moves backward relative to the last observed second, the
///   reading is clamped to that second and the sequence keeps counting,
///   which prevents duplicates across a simple software clock regression.
/// - If the 16-bit sequence space for the current second is exhausted, the
///   generator borrows the next second's space and keeps going. Timestamps
///   drift ahead of the wall clock during such sustained bursts and
///   reconverge once load drops.
///
/// # Example
/// ```
/// use snow53::{LockIdGenerator, WallClock};
///
/// let generator = LockIdGenerator::new(3, WallClock::new());
///
/// let a = generator.next_id();
/// let b = generator.next_id();
/// assert!(a < b);
/// assert_eq!(b.shard_id(), 3);
/// ```
pub struct LockIdGenerator<T>
where
    T: TimeSource,
{
    state: Arc<Mutex<GeneratorState>>,
    shard_id: u8,
    time: T,
}

impl<T> LockIdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new generator for the given shard.
    ///
    /// # Parameters
    ///
    /// - `shard_id`: identifier of this process/node, encoded into the low
    ///   bits of every generated id. Masked to the 5-bit shard field.
    /// - `time`: a [`TimeSource`] implementation (e.g. [`WallClock`]) that
    ///   supplies second-resolution readings during generation.
    ///
    /// [`WallClock`]: crate::time::WallClock
    pub fn new(shard_id: u8, time: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(GeneratorState {
                last_epoch: 0,
                sequence: 0,
            })),
            shard_id,
            time,
        }
    }

    /// Returns the shard id this generator encodes into every id.
    pub fn shard_id(&self) -> u8 {
        self.shard_id
    }

    /// Generates the next identifier.
    ///
    /// Ids returned to racing callers are pairwise distinct; their relative
    /// order reflects lock-acquisition order. Within one observed second,
    /// successive ids carry strictly increasing sequence values.
    pub fn next_id(&self) -> CompactId {
        let now = self.time.epoch_seconds();
        let mut state = self.state.lock();

        let mut epoch = now;
        if epoch < state.last_epoch {
            Self::warn_clock_behind(now, state.last_epoch);
            // Clamp to the last handled second. The sequence is deliberately
            // not reset: it keeps counting where the prior call left off.
            epoch = state.last_epoch;
        }

        loop {
            if epoch != state.last_epoch {
                state.last_epoch = epoch;
                state.sequence = 0;
            }
            state.sequence = state.sequence.wrapping_add(1);
            if state.sequence == 0 {
                // 65,535 ids already minted for this second. Borrow the next
                // second's sequence space rather than failing or blocking.
                Self::warn_sequence_exhausted(epoch);
                epoch += 1;
                continue;
            }
            return CompactId::from_components(epoch, state.sequence, self.shard_id);
        }
    }

    #[cold]
    #[inline(never)]
    fn warn_clock_behind(observed: u64, last_epoch: u64) {
        warn!(
            observed,
            last_epoch, "clock moved backward; clamping to the last observed second"
        );
    }

    #[cold]
    #[inline(never)]
    fn warn_sequence_exhausted(epoch: u64) {
        warn!(epoch, "sequence space exhausted; borrowing the next second");
    }
}

/// Clones share the underlying counter state, so a cloned generator never
/// duplicates ids produced by the original.
impl<T> Clone for LockIdGenerator<T>
where
    T: TimeSource + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            shard_id: self.shard_id,
            time: self.time.clone(),
        }
    }
}
