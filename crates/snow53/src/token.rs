use uuid::Uuid;

/// Returns a time-ordered opaque token as an uppercase, hyphenated UUID.
///
/// Tokens are UUIDv7 values: the leading bits encode wall-clock
/// milliseconds, so tokens sort roughly by creation time. This producer is
/// independent of the numeric id path and shares no state with it.
///
/// # Example
/// ```
/// let token = snow53::time_token();
/// assert_eq!(token.len(), 36);
/// ```
pub fn time_token() -> String {
    Uuid::now_v7()
        .hyphenated()
        .encode_upper(&mut Uuid::encode_buffer())
        .to_owned()
}

/// Returns a time-ordered opaque token as an uppercase hex string without
/// hyphens.
///
/// Same producer as [`time_token`], formatted for contexts that want a bare
/// 32-character token.
pub fn time_token_compact() -> String {
    Uuid::now_v7()
        .simple()
        .encode_upper(&mut Uuid::encode_buffer())
        .to_owned()
}
