//! Time source trait

/// Monotonic microsecond clock
pub trait MonotonicClock {
    /// Microseconds since an arbitrary fixed epoch
    fn now_us(&mut self) -> u64;
}
