//! Time and position arithmetic
//!
//! Two conversions live here and they are intentionally different:
//!
//! - [`clip_offset`] maps seconds to an absolute byte offset in a [`Clip`]
//!   buffer, using the full format (rate, depth and channels).
//! - [`view_units`] maps seconds to units of a [`SampleView`], which only
//!   knows its sample rate and a fixed resolution of 2 bytes.
//!
//! For multi-channel audio the two disagree by the channel count. Callers
//! must use the one that matches the buffer they index into.
//!
//! [`Clip`]: crate::engine::Clip
//! [`SampleView`]: crate::engine::SampleView

use crate::engine::clip::Format;

/// Bytes per sample in a [`SampleView`](crate::engine::SampleView)
pub const VIEW_RESOLUTION: u32 = 2;

/// Tolerance used when snapping a fractional unit count to an integer
const UNIT_EPSILON: f64 = 1e-6;

/// Convert seconds to a byte offset in a clip buffer
///
/// Returns `floor(seconds * bytes_per_second)`, or 0 when no format is set.
/// Negative inputs saturate to 0; range checks belong to the caller.
#[inline]
pub fn clip_offset(format: Option<&Format>, seconds: f64) -> usize {
    match format {
        Some(format) => (seconds * format.bytes_per_second() as f64).floor() as usize,
        None => 0,
    }
}

/// Convert seconds to view units: `seconds * rate * resolution / 4`
#[inline]
pub fn view_units(sample_rate: u32, seconds: f64) -> f64 {
    seconds * sample_rate as f64 * VIEW_RESOLUTION as f64 / 4.0
}

/// Convert view units back to seconds: `4 * units / (rate * resolution)`
#[inline]
pub fn units_to_seconds(sample_rate: u32, units: f64) -> f64 {
    4.0 * units / (sample_rate as f64 * VIEW_RESOLUTION as f64)
}

/// Number of whole units a countdown of `units` covers
///
/// A countdown that steps while the counter is positive covers `ceil(units)`
/// steps. Values within a hair of an integer are snapped first so that
/// float noise from a seconds round trip does not add a stray unit.
#[inline]
pub(crate) fn unit_count(units: f64) -> usize {
    if units <= 0.0 {
        return 0;
    }
    let nearest = units.round();
    if (units - nearest).abs() < UNIT_EPSILON {
        nearest as usize
    } else {
        units.ceil() as usize
    }
}
