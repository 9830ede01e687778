use std::sync::OnceLock;

use crate::{
    generator::LockIdGenerator,
    id::CompactId,
    shard::resolve_shard_id,
    time::WallClock,
};

static GLOBAL: OnceLock<LockIdGenerator<WallClock>> = OnceLock::new();

fn global() -> &'static LockIdGenerator<WallClock> {
    GLOBAL.get_or_init(|| LockIdGenerator::new(resolve_shard_id(), WallClock::new()))
}

/// Returns the next identifier from the process-wide generator.
///
/// The generator is built lazily on first use from the resolved shard id
/// (see [`resolve_shard_id`]) and the wall clock, then shared by all
/// callers for the lifetime of the process.
///
/// # Example
/// ```
/// let a = snow53::next_id();
/// let b = snow53::next_id();
/// assert!(a < b);
/// ```
pub fn next_id() -> CompactId {
    global().next_id()
}
