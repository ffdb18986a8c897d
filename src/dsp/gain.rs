//! Level transforms
//!
//! Percentage scaling, constant offset and muting. Volume here is a plain
//! linear percentage, not a dB curve.

use crate::dsp::effect::SampleTransform;

// ============================================================================
// Amplify
// ============================================================================

/// Scale samples by a percentage
///
/// `result = trunc(sample * (percentage / 100.0))`, computed in `f64` and
/// truncated toward zero. Values below 100 attenuate, above 100 boost.
///
/// # Example
/// ```
/// use cutplay::dsp::{Amplify, SampleTransform};
///
/// assert_eq!(Amplify::new(50).apply(1000), 500);
/// assert_eq!(Amplify::new(50).apply(-3), -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amplify {
    percentage: i32,
}

impl Amplify {
    pub fn new(percentage: i32) -> Self {
        Self { percentage }
    }

    pub fn percentage(&self) -> i32 {
        self.percentage
    }
}

impl SampleTransform for Amplify {
    #[inline]
    fn apply(&self, sample: i32) -> i64 {
        (sample as f64 * (self.percentage as f64 / 100.0)) as i64
    }

    fn name(&self) -> &'static str {
        "amplify"
    }
}

// ============================================================================
// Offset
// ============================================================================

/// Add a constant to every sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    delta: i64,
}

impl Offset {
    pub fn new(delta: i64) -> Self {
        Self { delta }
    }

    pub fn delta(&self) -> i64 {
        self.delta
    }
}

impl SampleTransform for Offset {
    #[inline]
    fn apply(&self, sample: i32) -> i64 {
        sample as i64 + self.delta
    }

    fn name(&self) -> &'static str {
        "offset"
    }
}

// ============================================================================
// Mute
// ============================================================================

/// Replace every sample with silence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mute;

impl SampleTransform for Mute {
    #[inline]
    fn apply(&self, _sample: i32) -> i64 {
        0
    }

    fn name(&self) -> &'static str {
        "mute"
    }
}
