/// A trait for time sources that return a second-resolution timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests.
///
/// Readings are whole seconds relative to [`CUSTOM_EPOCH`]. The generator
/// tolerates a source that moves backward (it clamps to the last observed
/// second), so a plain wall clock is an acceptable implementation.
///
/// # Example
///
/// ```
/// use snow53::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn epoch_seconds(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.epoch_seconds(), 1234);
/// ```
///
/// [`CUSTOM_EPOCH`]: crate::time::CUSTOM_EPOCH
pub trait TimeSource {
    /// Returns the current time in whole seconds since [`CUSTOM_EPOCH`].
    ///
    /// [`CUSTOM_EPOCH`]: crate::time::CUSTOM_EPOCH
    fn epoch_seconds(&self) -> u64;
}
