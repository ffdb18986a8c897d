//! Splicer
//!
//! Byte-range removal and insertion on raw buffers. Clip-level splices use
//! [`clip_offset`] and keep results frame-aligned; [`cut_view`] works in view
//! units and is what autocut uses to excise a silent run.

use log::debug;

use crate::engine::position::{clip_offset, unit_count, view_units};
use crate::engine::{Clip, Format, SampleView};
use crate::error::{CutplayError, Result};

/// Byte offset of `seconds` in a clip, rounded down to a frame boundary
fn frame_offset(format: &Format, seconds: f64, len: usize) -> usize {
    let offset = clip_offset(Some(format), seconds).min(len);
    offset - offset % format.frame_size()
}

fn check_time(name: &str, seconds: f64, duration: f64) -> Result<()> {
    if !seconds.is_finite() || seconds < 0.0 || seconds > duration {
        return Err(CutplayError::invalid_range(format!(
            "{} {:.3}s is outside [0, {:.3}]s",
            name, seconds, duration
        )));
    }
    Ok(())
}

/// Remove `[from, to)` seconds from a clip's buffer
///
/// # Errors
/// * `InvalidRange` - unless `0 <= from <= to <= duration`
pub fn cut(clip: &Clip, from: f64, to: f64) -> Result<Vec<u8>> {
    let duration = clip.duration_secs();
    check_time("from", from, duration)?;
    check_time("to", to, duration)?;
    if to < from {
        return Err(CutplayError::invalid_range(format!(
            "to {:.3}s is before from {:.3}s",
            to, from
        )));
    }

    let data = clip.buffer();
    let start = frame_offset(clip.format(), from, data.len());
    let end = frame_offset(clip.format(), to, data.len());
    debug!("Cutting bytes [{}, {}) from clip {}", start, end, clip.id());

    let mut out = Vec::with_capacity(data.len() - (end - start));
    out.extend_from_slice(&data[..start]);
    out.extend_from_slice(&data[end..]);
    Ok(out)
}

/// Insert `seconds` of silence at `at` seconds
///
/// # Errors
/// * `InvalidRange` - unless `0 <= at <= duration` and `seconds >= 0`, or
///   if the result would be too large to allocate
pub fn insert_silence(clip: &Clip, at: f64, seconds: f64) -> Result<Vec<u8>> {
    let duration = clip.duration_secs();
    check_time("at", at, duration)?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(CutplayError::invalid_range(format!(
            "silence length {:.3}s must be non-negative",
            seconds
        )));
    }

    let data = clip.buffer();
    let position = frame_offset(clip.format(), at, data.len());
    let silence = frame_offset(clip.format(), seconds, usize::MAX);
    debug!(
        "Inserting {} silent bytes at byte {} of clip {}",
        silence,
        position,
        clip.id()
    );

    let total = data
        .len()
        .checked_add(silence)
        .filter(|&total| total <= isize::MAX as usize)
        .ok_or_else(|| {
            CutplayError::invalid_range(format!(
                "silence of {:.3}s does not fit in a buffer",
                seconds
            ))
        })?;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&data[..position]);
    out.resize(position + silence, 0);
    out.extend_from_slice(&data[position..]);
    Ok(out)
}

/// Check that every clip shares the first clip's format
pub fn ensure_same_format(clips: &[&Clip]) -> Result<()> {
    if let Some((first, rest)) = clips.split_first() {
        if let Some(other) = rest.iter().find(|c| c.format() != first.format()) {
            return Err(CutplayError::FormatMismatch {
                expected: first.format().to_string(),
                found: other.format().to_string(),
            });
        }
    }
    Ok(())
}

/// Join clip buffers in order
///
/// # Errors
/// * `EmptyInput` - if `clips` is empty
/// * `FormatMismatch` - if any clip's format differs from the first
pub fn concat(clips: &[&Clip]) -> Result<Vec<u8>> {
    if clips.is_empty() {
        return Err(CutplayError::EmptyInput {
            operation: "concat",
        });
    }
    ensure_same_format(clips)?;

    let total = clips.iter().map(|c| c.len()).sum();
    let mut out = Vec::with_capacity(total);
    for clip in clips {
        out.extend_from_slice(clip.buffer());
    }
    Ok(out)
}

/// Drop `duration` view units starting `start_time` units into the view
///
/// View units here count bytes; both counts are rounded up to a whole
/// sample so the result keeps an even length.
///
/// # Errors
/// * `InvalidRange` - for negative or non-finite times, or a window past
///   the end
pub fn cut_view(view: &SampleView, start_time: f64, duration: f64) -> Result<SampleView> {
    let valid = |t: f64| t.is_finite() && t >= 0.0;
    if !(valid(start_time) && valid(duration)) {
        return Err(CutplayError::invalid_range(format!(
            "view cut at {:.6}s for {:.6}s must be finite and non-negative",
            start_time, duration
        )));
    }

    let rate = view.sample_rate();
    let past_end = || {
        CutplayError::invalid_range(format!(
            "view cut at {:.6}s for {:.6}s exceeds {} bytes",
            start_time,
            duration,
            view.len()
        ))
    };
    let keep = round_to_sample(unit_count(view_units(rate, start_time))).ok_or_else(past_end)?;
    let drop = round_to_sample(unit_count(view_units(rate, duration))).ok_or_else(past_end)?;
    let end = keep
        .checked_add(drop)
        .filter(|&end| end <= view.len())
        .ok_or_else(past_end)?;

    let data = view.bytes();
    let mut out = Vec::with_capacity(data.len() - drop);
    out.extend_from_slice(&data[..keep]);
    out.extend_from_slice(&data[end..]);
    Ok(view.derived(out))
}

/// Round a byte count up to a whole sample; `None` on overflow
#[inline]
fn round_to_sample(bytes: usize) -> Option<usize> {
    bytes.checked_add(bytes % 2)
}
