//! Clip editor
//!
//! The [`Editor`] is the clip-level front of the engine. It owns the id
//! generator, so every clip it ingests or derives gets a fresh id, and it
//! validates arguments before any buffer is touched. Each operation borrows
//! its inputs and returns a new modified clip.
//!
//! # Example
//! ```
//! use cutplay::{Editor, Format};
//!
//! let editor = Editor::new();
//! let clip = editor
//!     .ingest("tone", vec![0u8; 32000], Format::pcm16(8000, 1))
//!     .unwrap();
//!
//! let shorter = editor.cut(&clip, 0.5, 1.0).unwrap();
//! assert_eq!(shorter.len(), 24000);
//! assert!(shorter.is_modified());
//! assert!(shorter.id() > clip.id());
//! ```

use log::{debug, info};

use crate::dsp::{autocut, envelope, mixer, splicer, MixOp};
use crate::engine::{to_view, Clip, Format, IdGenerator, SampleView};
use crate::error::{CutplayError, Result};

/// Clip-level editing operations
#[derive(Debug, Default)]
pub struct Editor {
    ids: IdGenerator,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            ids: IdGenerator::new(),
        }
    }

    /// The generator used for every clip this editor builds
    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Wrap freshly decoded PCM into an unmodified clip
    ///
    /// # Errors
    /// * `InvalidFormat` - if the format has zero-valued fields
    /// * `Misaligned` - if the buffer is not a whole number of frames
    pub fn ingest(&self, name: impl Into<String>, buffer: Vec<u8>, format: Format) -> Result<Clip> {
        let clip = Clip::new(&self.ids, name, buffer, format, false)?;
        info!("Ingested {} ({})", clip, format);
        Ok(clip)
    }

    /// Wrap a view into a modified clip named `name` with `format`
    pub fn to_clip(&self, view: SampleView, name: &str, format: &Format) -> Result<Clip> {
        view.into_clip(&self.ids, name, format)
    }

    /// New modified clip carrying `source`'s name and format
    fn derive(&self, source: &Clip, buffer: Vec<u8>) -> Result<Clip> {
        let clip = Clip::new(&self.ids, source.name(), buffer, *source.format(), true)?;
        debug!("Derived clip {} from clip {}", clip.id(), source.id());
        Ok(clip)
    }

    /// Run a view transform on `clip` and wrap the result
    fn transform<F>(&self, clip: &Clip, op: F) -> Result<Clip>
    where
        F: FnOnce(&SampleView) -> Result<SampleView>,
    {
        let view = to_view(clip)?;
        let result = op(&view)?;
        let derived = self.to_clip(result, clip.name(), clip.format())?;
        debug!("Derived clip {} from clip {}", derived.id(), clip.id());
        Ok(derived)
    }

    // ------------------------------------------------------------------------
    // Splicing
    // ------------------------------------------------------------------------

    /// Remove `[from, to)` seconds
    pub fn cut(&self, clip: &Clip, from: f64, to: f64) -> Result<Clip> {
        let buffer = splicer::cut(clip, from, to)?;
        self.derive(clip, buffer)
    }

    /// Insert `seconds` of silence at `at`
    pub fn insert_silence(&self, clip: &Clip, at: f64, seconds: f64) -> Result<Clip> {
        let buffer = splicer::insert_silence(clip, at, seconds)?;
        self.derive(clip, buffer)
    }

    /// Join clips in order; the result takes the first clip's name and format
    pub fn concat(&self, clips: &[&Clip]) -> Result<Clip> {
        let buffer = splicer::concat(clips)?;
        self.derive(clips[0], buffer)
    }

    // ------------------------------------------------------------------------
    // Levels and fades
    // ------------------------------------------------------------------------

    /// Scale the whole clip by `percentage`
    pub fn volume(&self, clip: &Clip, percentage: i32) -> Result<Clip> {
        self.transform(clip, |view| Ok(envelope::amplify_all(view, percentage)))
    }

    /// Add `delta` to every sample
    pub fn offset(&self, clip: &Clip, delta: i64) -> Result<Clip> {
        self.transform(clip, |view| Ok(envelope::offset_all(view, delta)))
    }

    /// Fade in up to `to` seconds
    ///
    /// Times follow the view convention, in which one second of a mono clip
    /// spans two seconds of view time.
    pub fn fade_in(&self, clip: &Clip, to: f64) -> Result<Clip> {
        self.transform(clip, |view| {
            check_view_time("fade-in end", to, view)?;
            Ok(envelope::fade_in(view, to))
        })
    }

    /// Fade out from `from` seconds to the end (view convention)
    pub fn fade_out(&self, clip: &Clip, from: f64) -> Result<Clip> {
        self.transform(clip, |view| {
            check_view_time("fade-out start", from, view)?;
            Ok(envelope::fade_out(view, from))
        })
    }

    // ------------------------------------------------------------------------
    // Silence trimming
    // ------------------------------------------------------------------------

    /// Excise quiet runs longer than `min_duration` seconds
    pub fn auto_cut(&self, clip: &Clip, threshold_percent: u8, min_duration: f64) -> Result<Clip> {
        self.transform(clip, |view| {
            autocut::auto_cut(view, min_duration, threshold_percent)
        })
    }

    // ------------------------------------------------------------------------
    // Mixing
    // ------------------------------------------------------------------------

    /// Byte-wise saturating sum of all clips
    pub fn add(&self, clips: &[&Clip]) -> Result<Clip> {
        self.mix(MixOp::Add, clips)
    }

    /// Byte-wise saturating difference, folded left to right
    pub fn subtract(&self, clips: &[&Clip]) -> Result<Clip> {
        self.mix(MixOp::Subtract, clips)
    }

    fn mix(&self, op: MixOp, clips: &[&Clip]) -> Result<Clip> {
        let first = clips.first().ok_or(CutplayError::EmptyInput {
            operation: op.name(),
        })?;
        splicer::ensure_same_format(clips)?;

        let views = clips
            .iter()
            .map(|clip| to_view(clip))
            .collect::<Result<Vec<_>>>()?;
        let result = mixer::mix(op, &views)?;
        self.to_clip(result, first.name(), first.format())
    }
}

fn check_view_time(name: &str, seconds: f64, view: &SampleView) -> Result<()> {
    let duration = view.duration_secs();
    if !seconds.is_finite() || seconds < 0.0 || seconds > duration {
        return Err(CutplayError::invalid_range(format!(
            "{} {:.3}s is outside [0, {:.3}]s",
            name, seconds, duration
        )));
    }
    Ok(())
}
