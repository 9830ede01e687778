use std::sync::LazyLock;

use regex::Regex;
use sha1::{Digest, Sha1};

use crate::{
    error::{Error, Result},
    id::CompactId,
    time::CUSTOM_EPOCH,
};

// A legacy composite id is 15 ASCII digits (epoch milliseconds), a 32-char
// hex token (historically a UUID), and a 3-char hex shard tag.
static COMPOSITE_LAYOUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{15})([0-9a-fA-F]{32})([0-9a-fA-F]{3})$").expect("composite id pattern")
});

/// Re-encodes a legacy 50-character composite id into the compact numeric
/// space.
///
/// The mapping is deterministic: converting the same literal input always
/// yields the same id, so previously bridged identifiers stay reproducible.
/// It is *not* collision-free against live generation: the sequence field
/// is a pseudo-sequence derived from the first four bytes of the SHA-1
/// digest of the middle token, masked to 16 bits.
///
/// The millisecond timestamp is truncated (not rounded) to whole seconds.
/// Timestamps before the year-2000 epoch clamp to timestamp field 0.
///
/// The 3-char shard tag holds 12 bits but the id format only carries 5; the
/// tag is truncated to its low 5 bits, matching the legacy scheme this
/// bridge replaces. Rejecting out-of-range tags instead would break the
/// reproducibility of ids bridged under that scheme.
///
/// # Errors
///
/// Returns [`Error::InvalidLegacyFormat`] when the input does not match the
/// fixed 15+32+3 layout. No other condition fails.
///
/// # Example
/// ```
/// use snow53::convert_legacy_id;
///
/// let composite = "0017000000000000123456789abcdef0123456789abcdef01a";
/// let id = convert_legacy_id(composite).unwrap();
/// assert_eq!(id, convert_legacy_id(composite).unwrap());
/// ```
pub fn convert_legacy_id(composite_id: &str) -> Result<CompactId> {
    let caps = COMPOSITE_LAYOUT
        .captures(composite_id)
        .ok_or_else(|| Error::InvalidLegacyFormat(composite_id.to_owned()))?;

    let millis: u64 = caps[1]
        .parse()
        .map_err(|_| Error::InvalidLegacyFormat(composite_id.to_owned()))?;
    let epoch_second = (millis / 1000).saturating_sub(CUSTOM_EPOCH.as_secs());

    let digest = Sha1::digest(caps[2].as_bytes());
    let prefix = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let sequence = (prefix & CompactId::SEQUENCE_MASK as u32) as u16;

    let shard_tag = u16::from_str_radix(&caps[3], 16)
        .map_err(|_| Error::InvalidLegacyFormat(composite_id.to_owned()))?;
    let shard_id = (shard_tag & CompactId::SHARD_MASK as u16) as u8;

    Ok(CompactId::from_components(epoch_second, sequence, shard_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPOSITE: &str = "0017000000000000123456789abcdef0123456789abcdef01a";

    #[test]
    fn conversion_is_idempotent() {
        let a = convert_legacy_id(COMPOSITE).unwrap();
        let b = convert_legacy_id(COMPOSITE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn converts_to_the_expected_components() {
        let id = convert_legacy_id(COMPOSITE).unwrap();

        // 1_700_000_000_000 ms -> 1_700_000_000 s -> 753_315_200 past the
        // 2000-01-01 epoch.
        assert_eq!(id.timestamp(), 753_315_200);
        // First four bytes of sha1("0123456789abcdef0123456789abcdef") are
        // b1 77 5a 78; 0xb1775a78 & 0xffff == 23_160.
        assert_eq!(id.sequence(), 23_160);
        // Tag 0x01a truncated to 5 bits.
        assert_eq!(id.shard_id(), 26);
        assert_eq!(id.to_raw(), 1_579_816_479_051_546);
        assert!(id.is_valid());
    }

    #[test]
    fn accepts_uppercase_hex_segments() {
        let upper = "0017000000000000123456789ABCDEF0123456789ABCDEF01A";
        let id = convert_legacy_id(upper).unwrap();
        assert_eq!(id, convert_legacy_id(upper).unwrap());
        assert_eq!(id.shard_id(), 26);
        // The digest is computed over the literal token, so case changes
        // the pseudo-sequence.
        assert_ne!(id, convert_legacy_id(COMPOSITE).unwrap());
    }

    #[test]
    fn truncates_out_of_range_shard_tags() {
        let fff = "0017000000000000123456789abcdef0123456789abcdeffff";
        assert_eq!(convert_legacy_id(fff).unwrap().shard_id(), 31);

        let low = "0017000000000000123456789abcdef0123456789abcdef020";
        assert_eq!(convert_legacy_id(low).unwrap().shard_id(), 0);
    }

    #[test]
    fn truncates_milliseconds_toward_zero() {
        let late = "0017000000019990123456789abcdef0123456789abcdef01a";
        assert_eq!(convert_legacy_id(late).unwrap().timestamp(), 753_315_201);
    }

    #[test]
    fn clamps_pre_epoch_timestamps() {
        let ancient = "0000000000000010123456789abcdef0123456789abcdef01a";
        assert_eq!(convert_legacy_id(ancient).unwrap().timestamp(), 0);
    }

    #[test]
    fn rejects_wrong_lengths() {
        let short = &COMPOSITE[..49];
        let long = format!("{COMPOSITE}0");
        assert!(matches!(
            convert_legacy_id(short),
            Err(Error::InvalidLegacyFormat(_))
        ));
        assert!(matches!(
            convert_legacy_id(&long),
            Err(Error::InvalidLegacyFormat(_))
        ));
        assert!(matches!(
            convert_legacy_id(""),
            Err(Error::InvalidLegacyFormat(_))
        ));
    }

    #[test]
    fn rejects_non_hex_and_non_digit_segments() {
        // 'g' in the token segment.
        let bad_token = "001700000000000g123456789abcdef0123456789abcdef01a";
        // Letter in the timestamp segment.
        let bad_millis = "00170000000000a00123456789abcdef0123456789abcde01a";
        // Non-hex shard tag.
        let bad_tag = "0017000000000000123456789abcdef0123456789abcdef0zz";
        for input in [bad_token, bad_millis, bad_tag] {
            assert!(matches!(
                convert_legacy_id(input),
                Err(Error::InvalidLegacyFormat(_))
            ));
        }
    }
}
