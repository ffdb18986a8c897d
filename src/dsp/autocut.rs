//! Silence trimmer
//!
//! Removes every run of quiet samples longer than a minimum duration. The
//! scan is greedy and leftmost-first: the first qualifying run is excised,
//! then the shortened view is scanned again from the start. A run only counts
//! once a loud sample ends it, so trailing silence is kept.

use log::debug;

use crate::dsp::splicer::cut_view;
use crate::engine::position::units_to_seconds;
use crate::engine::SampleView;
use crate::error::{CutplayError, Result};

/// Width of the 16-bit magnitude range the threshold percentage applies to
pub const MAGNITUDE_RANGE: f64 = 65536.0;

/// A quiet run found by the scan, in view-convention seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilentRun {
    /// Time of the first quiet sample
    pub start_secs: f64,
    /// Length of the run
    pub duration_secs: f64,
}

/// Absolute sample level below which a sample counts as quiet
#[inline]
pub fn threshold_level(threshold_percent: u8) -> f64 {
    MAGNITUDE_RANGE * (threshold_percent as f64 / 100.0)
}

/// Find the first quiet run longer than `min_duration` seconds
///
/// Returns `None` when a full scan finds no such run.
pub fn find_silent_run(view: &SampleView, min_duration: f64, threshold: f64) -> Option<SilentRun> {
    let rate = view.sample_rate();
    let mut run = 0usize;
    let mut candidate = 0usize;

    for (scanned, sample) in view.samples().enumerate() {
        if ((sample as i32).abs() as f64) < threshold {
            run += 1;
            continue;
        }

        candidate = run;
        run = 0;

        // a non-empty run keeps auto_cut making progress even when a direct
        // caller passes a negative minimum
        let candidate_secs = units_to_seconds(rate, candidate as f64);
        if candidate > 0 && candidate_secs > min_duration {
            return Some(SilentRun {
                start_secs: units_to_seconds(rate, scanned as f64) - candidate_secs,
                duration_secs: candidate_secs,
            });
        }
    }

    debug!(
        "No quiet run above {:.4}s (last candidate {} samples)",
        min_duration, candidate
    );
    None
}

/// Excise every quiet run longer than `min_duration` seconds
///
/// `threshold_percent` is a share of the full 16-bit magnitude range, so 50
/// or more treats every sample as quiet.
///
/// # Errors
/// * `InvalidRange` - if `min_duration` is negative or not finite, or
///   `threshold_percent` is above 100
pub fn auto_cut(view: &SampleView, min_duration: f64, threshold_percent: u8) -> Result<SampleView> {
    if !min_duration.is_finite() || min_duration < 0.0 {
        return Err(CutplayError::invalid_range(format!(
            "minimum silence {}s must be a non-negative number",
            min_duration
        )));
    }
    if threshold_percent > 100 {
        return Err(CutplayError::invalid_range(format!(
            "threshold {}% is above 100%",
            threshold_percent
        )));
    }

    let threshold = threshold_level(threshold_percent);
    let mut current = view.clone();
    let mut excised = 0usize;

    while let Some(run) = find_silent_run(&current, min_duration, threshold) {
        debug!(
            "Excising quiet run at {:.4}s lasting {:.4}s",
            run.start_secs, run.duration_secs
        );
        // view cuts count bytes, twice the sample units of the scan
        current = cut_view(&current, 2.0 * run.start_secs, 2.0 * run.duration_secs)?;
        excised += 1;
    }

    debug!(
        "Autocut removed {} runs, {} -> {} bytes",
        excised,
        view.len(),
        current.len()
    );
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 8000;

    fn view_of(parts: &[(i16, usize)]) -> SampleView {
        let samples: Vec<i16> = parts
            .iter()
            .flat_map(|&(value, count)| std::iter::repeat(value).take(count))
            .collect();
        SampleView::from_samples(&samples, RATE).unwrap()
    }

    #[test]
    fn test_threshold_level() {
        assert_eq!(threshold_level(0), 0.0);
        assert_eq!(threshold_level(10), 6553.6);
        assert_eq!(threshold_level(100), 65536.0);
    }

    #[test]
    fn test_excises_single_run() {
        // 2000 quiet samples last 0.5s in the view convention
        let view = view_of(&[(20000, 1000), (0, 2000), (-20000, 1000)]);
        let out = auto_cut(&view, 0.4, 10).unwrap();

        assert_eq!(out.num_samples(), 2000);
        let samples: Vec<i16> = out.samples().collect();
        assert!(samples[..1000].iter().all(|&s| s == 20000));
        assert!(samples[1000..].iter().all(|&s| s == -20000));

        // converged: a second pass changes nothing
        let again = auto_cut(&out, 0.4, 10).unwrap();
        assert_eq!(again, out);
    }

    #[test]
    fn test_short_runs_survive() {
        let view = view_of(&[(20000, 100), (0, 500), (20000, 100)]);
        let out = auto_cut(&view, 0.4, 10).unwrap();
        assert_eq!(out, view);
    }

    #[test]
    fn test_excises_every_long_run() {
        let view = view_of(&[
            (20000, 10),
            (5, 2000),
            (20000, 10),
            (0, 100),
            (20000, 10),
            (-3, 3000),
            (20000, 10),
        ]);
        let out = auto_cut(&view, 0.4, 10).unwrap();
        // both long runs go, the 100-sample gap stays
        assert_eq!(out.num_samples(), 140);
        let quiet = out.samples().filter(|s| s.abs() < 6554).count();
        assert_eq!(quiet, 100);
    }

    #[test]
    fn test_trailing_silence_is_kept() {
        let view = view_of(&[(20000, 10), (0, 4000)]);
        let out = auto_cut(&view, 0.1, 10).unwrap();
        assert_eq!(out, view);
    }

    #[test]
    fn test_leading_silence_is_removed() {
        let view = view_of(&[(0, 3000), (20000, 10)]);
        let out = auto_cut(&view, 0.1, 10).unwrap();
        assert_eq!(out.samples().collect::<Vec<_>>(), vec![20000; 10]);
    }

    #[test]
    fn test_zero_threshold_never_cuts() {
        let view = view_of(&[(20000, 10), (0, 4000), (20000, 10)]);
        assert_eq!(auto_cut(&view, 0.0, 0).unwrap(), view);
    }

    #[test]
    fn test_find_silent_run_position() {
        let view = view_of(&[(20000, 1000), (0, 2000), (20000, 1)]);
        let run = find_silent_run(&view, 0.4, threshold_level(10)).unwrap();
        assert!((run.start_secs - units_to_seconds(RATE, 1000.0)).abs() < 1e-12);
        assert!((run.duration_secs - units_to_seconds(RATE, 2000.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let view = view_of(&[(0, 10)]);
        assert!(auto_cut(&view, -1.0, 10).is_err());
        assert!(auto_cut(&view, f64::NAN, 10).is_err());
        assert!(auto_cut(&view, 0.5, 101).is_err());
    }

    #[test]
    fn test_negative_minimum_ignores_empty_runs() {
        let view = view_of(&[(20000, 5), (0, 3), (20000, 5)]);
        let run = find_silent_run(&view, -1.0, threshold_level(10)).unwrap();
        assert!((run.start_secs - units_to_seconds(RATE, 5.0)).abs() < 1e-12);
        assert!((run.duration_secs - units_to_seconds(RATE, 3.0)).abs() < 1e-12);

        let loud = view_of(&[(20000, 10)]);
        assert_eq!(find_silent_run(&loud, -1.0, threshold_level(10)), None);
    }
}
