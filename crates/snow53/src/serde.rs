use ::serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::id::CompactId;

/// Serializes as the raw integer representation. The value fits the 53-bit
/// safe-integer budget, so JSON consumers can treat it as a plain number.
impl Serialize for CompactId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.to_raw())
    }
}

/// Deserializes from the raw integer representation, rejecting values that
/// exceed the 53-bit range.
impl<'de> Deserialize<'de> for CompactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        let id = CompactId::from_raw(raw);
        if !id.is_valid() {
            return Err(de::Error::custom(format_args!(
                "identifier {raw} exceeds the 53-bit range"
            )));
        }
        Ok(id)
    }
}
