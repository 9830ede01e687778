/// A result type that defaults to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `snow53` can surface.
///
/// Live id generation is infallible: clock regression and sequence
/// exhaustion are absorbed into documented fallback behavior and reported
/// only as log events. The sole fallible entry point is the legacy bridge,
/// which rejects malformed composite ids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The supplied legacy composite id does not match the fixed layout of
    /// 15 ASCII digits, 32 hex characters, and 3 hex characters.
    #[error("invalid legacy composite id: {0:?}")]
    InvalidLegacyFormat(String),
}
