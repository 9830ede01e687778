use std::env;
use std::sync::{LazyLock, OnceLock};

use rand::{Rng, rng};
use regex::Regex;
use tracing::{info, warn};

/// The largest shard id the 5-bit field can hold.
pub const MAX_SHARD_ID: u8 = 31;

/// Shard ids below this bound are reserved for convention-based host names
/// (`host-0` through `host-7`); the randomized fallback draws from the
/// disjoint range above it.
const HOST_SHARD_LIMIT: u8 = 8;

// Any non-digit prefix followed by one or more trailing decimal digits.
static HOSTNAME_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*\D+([0-9]+)$").expect("hostname suffix pattern"));

static PROCESS_SHARD: OnceLock<u8> = OnceLock::new();

/// Returns the shard id for this process, resolving it on first use.
///
/// The value is derived from the host name's trailing numeric suffix when it
/// falls in `[0, 8)` (deployment conventions such as `host-0` .. `host-7`),
/// and otherwise drawn uniformly at random from `[8, 32)`. The randomized
/// range is disjoint from the convention range to reduce, but not
/// eliminate, collisions with convention-based assignments.
///
/// Resolution happens exactly once per process; every subsequent call
/// returns the cached value.
pub fn resolve_shard_id() -> u8 {
    *PROCESS_SHARD.get_or_init(derive_shard_id)
}

fn derive_shard_id() -> u8 {
    let Some(host) = host_name() else {
        warn!("host name unavailable; falling back to a random shard id");
        return random_fallback_shard();
    };
    match shard_from_hostname(&host) {
        Some(shard_id) => {
            info!(host = %host, shard_id, "derived shard id from host name suffix");
            shard_id
        }
        None => {
            let shard_id = random_fallback_shard();
            warn!(
                host = %host,
                shard_id,
                "host name has no usable numeric suffix; using a random shard id"
            );
            shard_id
        }
    }
}

/// Extracts a convention-based shard id from a host name.
///
/// Returns `Some` only when the host name ends in decimal digits preceded by
/// at least one non-digit character and the suffix parses to a value in
/// `[0, 8)`.
pub fn shard_from_hostname(host: &str) -> Option<u8> {
    let caps = HOSTNAME_SUFFIX.captures(host)?;
    let suffix: u64 = caps[1].parse().ok()?;
    (suffix < u64::from(HOST_SHARD_LIMIT)).then_some(suffix as u8)
}

fn host_name() -> Option<String> {
    env::var("HOSTNAME").or_else(|_| env::var("HOST")).ok()
}

fn random_fallback_shard() -> u8 {
    rng().random_range(HOST_SHARD_LIMIT..=MAX_SHARD_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_convention_suffixes() {
        assert_eq!(shard_from_hostname("host-0"), Some(0));
        assert_eq!(shard_from_hostname("host-7"), Some(7));
        assert_eq!(shard_from_hostname("web3"), Some(3));
        assert_eq!(shard_from_hostname("node-007"), Some(7));
    }

    #[test]
    fn rejects_out_of_range_suffixes() {
        assert_eq!(shard_from_hostname("host-8"), None);
        assert_eq!(shard_from_hostname("host-31"), None);
        assert_eq!(shard_from_hostname("host-99999999999999999999"), None);
    }

    #[test]
    fn rejects_hosts_without_a_suffix() {
        assert_eq!(shard_from_hostname("plain"), None);
        assert_eq!(shard_from_hostname(""), None);
        // All-digit names have no non-digit prefix and do not match.
        assert_eq!(shard_from_hostname("42"), None);
        assert_eq!(shard_from_hostname("host-3a"), None);
    }

    #[test]
    fn fallback_draws_from_the_disjoint_range() {
        for _ in 0..256 {
            let shard_id = random_fallback_shard();
            assert!((HOST_SHARD_LIMIT..=MAX_SHARD_ID).contains(&shard_id));
        }
    }

    #[test]
    fn resolution_is_stable_across_calls() {
        let first = resolve_shard_id();
        assert!(first <= MAX_SHARD_ID);
        assert_eq!(resolve_shard_id(), first);
    }
}
