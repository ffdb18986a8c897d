//! Sample transform trait
//!
//! Per-sample maps used by the envelope sweep. Any `Fn(i32) -> i64` closure
//! is a transform too, so one-off maps need no named type.

/// Maps one decoded 16-bit sample to an unclipped result
///
/// The result may fall outside the 16-bit range; the sweep clips it with the
/// byte-level codec when re-encoding.
pub trait SampleTransform {
    fn apply(&self, sample: i32) -> i64;

    /// Short name used in log output
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> SampleTransform for F
where
    F: Fn(i32) -> i64,
{
    #[inline]
    fn apply(&self, sample: i32) -> i64 {
        self(sample)
    }
}
