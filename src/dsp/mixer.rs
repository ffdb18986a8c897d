//! Byte-wise mixer
//!
//! Mixing adds or subtracts the *encoded bytes* of two views, each byte
//! treated as a signed 8-bit value and clamped to [-128, 127] on its own.
//! Low and high bytes of a 16-bit sample are combined independently; this is
//! not a 16-bit sample sum, and the byte results are what callers observe.

use log::debug;

use crate::engine::SampleView;
use crate::error::{CutplayError, Result};

/// Byte operation used when combining two views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixOp {
    Add,
    Subtract,
}

impl MixOp {
    /// Combine two signed bytes and clamp to the signed byte range
    #[inline]
    pub fn apply(self, base: i8, overlay: i8) -> i8 {
        let value = match self {
            MixOp::Add => base as i16 + overlay as i16,
            MixOp::Subtract => base as i16 - overlay as i16,
        };
        value.clamp(i8::MIN as i16, i8::MAX as i16) as i8
    }

    pub fn name(self) -> &'static str {
        match self {
            MixOp::Add => "add",
            MixOp::Subtract => "subtract",
        }
    }
}

/// Combine two views byte by byte
///
/// The longer view is the base and the other is laid over its start; on equal
/// lengths `a` is the base. Base bytes past the overlay are copied as-is.
pub fn combine(op: MixOp, a: &SampleView, b: &SampleView) -> SampleView {
    let (base, overlay) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut out = base.bytes().to_vec();
    for (byte, &over) in out.iter_mut().zip(overlay.bytes()) {
        *byte = op.apply(*byte as i8, over as i8) as u8;
    }

    base.derived(out)
}

/// Fold `views` pairwise from left to right with `op`
///
/// # Errors
/// * `EmptyInput` - if `views` is empty
pub fn mix(op: MixOp, views: &[SampleView]) -> Result<SampleView> {
    let (first, rest) = views.split_first().ok_or(CutplayError::EmptyInput {
        operation: op.name(),
    })?;

    debug!("Mixing {} views with {}", views.len(), op.name());
    let mut result = first.clone();
    for view in rest {
        result = combine(op, &result, view);
    }
    Ok(result)
}
