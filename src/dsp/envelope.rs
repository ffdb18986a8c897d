//! Envelope engine
//!
//! [`sweep`] is the one primitive: decode every sample inside a time window,
//! run it through a [`SampleTransform`], and re-encode with the clipping codec.
//! Amplify, offset and both fades are built on it.
//!
//! Fades are a 100-step staircase, not a smooth ramp. Each step is a separate
//! sweep over the previous step's output.

use log::debug;

use crate::dsp::effect::SampleTransform;
use crate::dsp::gain::{Amplify, Mute, Offset};
use crate::engine::codec::{decode_sample, encode_clipped};
use crate::engine::position::{unit_count, view_units};
use crate::engine::SampleView;

/// Number of steps in a fade staircase
pub const FADE_STEPS: i32 = 100;

/// Apply `transform` to the samples in `[start_time, start_time + duration)`
///
/// Times are in the view convention (see [`view_units`]); a window edge that
/// falls inside a sample includes that sample. Samples outside the window are
/// copied unchanged. The output has the same length as the input.
pub fn sweep<T: SampleTransform>(
    view: &SampleView,
    start_time: f64,
    duration: f64,
    transform: T,
) -> SampleView {
    let rate = view.sample_rate();
    let skip = unit_count(view_units(rate, start_time));
    let span = unit_count(view_units(rate, duration));
    let end = skip.saturating_add(span);

    let mut out = Vec::with_capacity(view.len());
    for (index, pair) in view.bytes().chunks_exact(2).enumerate() {
        if index < skip || index >= end {
            out.extend_from_slice(pair);
        } else {
            let sample = decode_sample(pair[0], pair[1]) as i32;
            out.extend_from_slice(&encode_clipped(transform.apply(sample)));
        }
    }

    view.derived(out)
}

/// Scale the whole view by `percentage`
pub fn amplify_all(view: &SampleView, percentage: i32) -> SampleView {
    debug!("Amplify {} samples by {}%", view.num_samples(), percentage);
    sweep(view, 0.0, view.duration_secs(), Amplify::new(percentage))
}

/// Add `delta` to every sample of the view
pub fn offset_all(view: &SampleView, delta: i64) -> SampleView {
    debug!("Offset {} samples by {}", view.num_samples(), delta);
    sweep(view, 0.0, view.duration_secs(), Offset::new(delta))
}

/// Fade in from silence, reaching full level at `to_time`
///
/// The first hundredth of the span is muted; step `i` (1..=99) is scaled to
/// `i` percent.
pub fn fade_in(view: &SampleView, to_time: f64) -> SampleView {
    let step = to_time / FADE_STEPS as f64;
    debug!("Fade in over {:.4}s in steps of {:.6}s", to_time, step);

    let mut start = 0.0;
    let mut result = sweep(view, start, step, Mute);
    start += step;

    for percentage in 1..FADE_STEPS {
        result = sweep(&result, start, step, Amplify::new(percentage));
        start += step;
    }

    result
}

/// Fade out from `from_time` to the end of the view
///
/// The first step after `from_time` keeps full level; later steps go from
/// 99 percent down to 0.
pub fn fade_out(view: &SampleView, from_time: f64) -> SampleView {
    let step = (view.duration_secs() - from_time) / FADE_STEPS as f64;
    debug!("Fade out from {:.4}s in steps of {:.6}s", from_time, step);

    let mut start = from_time + step;
    let mut result = view.clone();

    for percentage in (0..FADE_STEPS).rev() {
        result = sweep(&result, start, step, Amplify::new(percentage));
        start += step;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::position::units_to_seconds;

    const RATE: u32 = 8000;

    fn constant_view(value: i16, samples: usize) -> SampleView {
        SampleView::from_samples(&vec![value; samples], RATE).unwrap()
    }

    fn decoded(view: &SampleView) -> Vec<i16> {
        view.samples().collect()
    }

    /// Seconds covering `n` samples in the view convention
    fn secs(n: usize) -> f64 {
        units_to_seconds(RATE, n as f64)
    }

    #[test]
    fn test_secs_helper_matches_view_units() {
        assert!((view_units(RATE, secs(10)) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_window_only() {
        let view = constant_view(1000, 10);
        let out = sweep(&view, secs(2), secs(3), Amplify::new(50));
        assert_eq!(
            decoded(&out),
            vec![1000, 1000, 500, 500, 500, 1000, 1000, 1000, 1000, 1000]
        );
        assert_eq!(out.len(), view.len());
        // input untouched
        assert!(decoded(&view).iter().all(|&s| s == 1000));
    }

    #[test]
    fn test_sweep_clips_per_byte() {
        let view = constant_view(30000, 4);
        let out = amplify_all(&view, 200);
        assert!(out.bytes().chunks(2).all(|pair| pair == [127u8, 127]));
        assert!(decoded(&out).iter().all(|&s| s == 32639));

        let view = constant_view(-30000, 4);
        let out = amplify_all(&view, 200);
        assert!(decoded(&out).iter().all(|&s| s == -32640));
    }

    #[test]
    fn test_sweep_fractional_edge_includes_sample() {
        let view = constant_view(1000, 6);
        // 2.5 units of duration touch three samples
        let out = sweep(&view, 0.0, units_to_seconds(RATE, 2.5), Mute);
        assert_eq!(decoded(&out), vec![0, 0, 0, 1000, 1000, 1000]);
    }

    #[test]
    fn test_sweep_window_past_end() {
        let view = constant_view(1000, 4);
        let out = sweep(&view, secs(2), secs(100), Mute);
        assert_eq!(decoded(&out), vec![1000, 1000, 0, 0]);
    }

    #[test]
    fn test_amplify_all_half() {
        let out = amplify_all(&constant_view(1000, 8), 50);
        assert!(decoded(&out).iter().all(|&s| s == 500));
    }

    #[test]
    fn test_offset_all_saturates() {
        let out = offset_all(&constant_view(32000, 2), 1000);
        assert_eq!(decoded(&out), vec![32639, 32639]);
        let out = offset_all(&constant_view(-5, 2), 10);
        assert_eq!(decoded(&out), vec![5, 5]);
    }

    #[test]
    fn test_closure_transform() {
        let out = sweep(&constant_view(7, 3), 0.0, secs(3), |s: i32| -(s as i64));
        assert_eq!(decoded(&out), vec![-7, -7, -7]);
    }

    #[test]
    fn test_fade_in_staircase() {
        // 1000 samples, fade over all of them: 10 samples per step
        let view = constant_view(10000, 1000);
        let out = fade_in(&view, secs(1000));
        let samples = decoded(&out);

        assert!(samples[..10].iter().all(|&s| s == 0));
        for step in 1..100usize {
            let expected = (10000.0 * (step as f64 / 100.0)) as i16;
            assert!(
                samples[step * 10..(step + 1) * 10]
                    .iter()
                    .all(|&s| s == expected),
                "step {} expected {}",
                step,
                expected
            );
        }
        // monotonic staircase
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_fade_in_leaves_tail() {
        let view = constant_view(10000, 2000);
        let out = fade_in(&view, secs(1000));
        assert!(decoded(&out)[1000..].iter().all(|&s| s == 10000));
    }

    #[test]
    fn test_fade_out_staircase() {
        // fade over the last 1000 of 2000 samples
        let view = constant_view(10000, 2000);
        let out = fade_out(&view, secs(1000));
        let samples = decoded(&out);

        // untouched before the fade plus one full-level step
        assert!(samples[..1010].iter().all(|&s| s == 10000));
        for (n, percentage) in (1..100).rev().enumerate() {
            let from = 1010 + n * 10;
            let expected = (10000.0 * (percentage as f64 / 100.0)) as i16;
            assert!(
                samples[from..from + 10].iter().all(|&s| s == expected),
                "window at {} expected {}",
                from,
                expected
            );
        }
        assert_eq!(samples.len(), 2000);
        assert!(samples[1000..].windows(2).all(|w| w[0] >= w[1]));
    }
}
