//! Sample views
//!
//! A [`SampleView`] is the working buffer the sample algorithms run on. It
//! treats the PCM bytes as one flat stream of 16-bit values and does not
//! know about channels, so amplify, fade and autocut act the same on mono
//! and interleaved audio.

use log::warn;

use crate::engine::clip::{Clip, Format, IdGenerator};
use crate::engine::codec;
use crate::engine::position::VIEW_RESOLUTION;
use crate::error::{CutplayError, Result};

/// Flat 16-bit working buffer tagged with a sample rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleView {
    buffer: Vec<u8>,
    sample_rate: u32,
}

impl SampleView {
    /// Wrap an even-length byte buffer
    pub fn from_bytes(buffer: Vec<u8>, sample_rate: u32) -> Result<Self> {
        if buffer.len() % 2 != 0 {
            return Err(CutplayError::Misaligned {
                len: buffer.len(),
                frame_size: VIEW_RESOLUTION as usize,
            });
        }
        if sample_rate == 0 {
            return Err(CutplayError::InvalidFormat {
                reason: "sample rate must be positive".to_string(),
            });
        }
        Ok(Self {
            buffer,
            sample_rate,
        })
    }

    /// Build a view from decoded sample values
    pub fn from_samples(samples: &[i16], sample_rate: u32) -> Result<Self> {
        let buffer = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        Self::from_bytes(buffer, sample_rate)
    }

    /// Output of an algorithm that already guarantees an even length
    pub(crate) fn derived(&self, buffer: Vec<u8>) -> Self {
        debug_assert!(buffer.len() % 2 == 0);
        Self {
            buffer,
            sample_rate: self.sample_rate,
        }
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Bytes per value; always 2
    #[inline]
    pub fn resolution(&self) -> u32 {
        VIEW_RESOLUTION
    }

    /// Length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of 16-bit values
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.buffer.len() / VIEW_RESOLUTION as usize
    }

    /// Length in seconds under the view convention: `2 * len / (rate * 2)`
    ///
    /// Converting this back with `view_units` yields the sample count.
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        2.0 * self.buffer.len() as f64 / (self.sample_rate as f64 * VIEW_RESOLUTION as f64)
    }

    /// Decoded sample values
    pub fn samples(&self) -> impl Iterator<Item = i16> + '_ {
        codec::samples(&self.buffer)
    }

    /// Wrap the view's bytes into a new, modified clip
    ///
    /// Channel-agnostic edits can leave a tail shorter than one frame of a
    /// multi-channel format; that tail is dropped so the clip stays aligned.
    pub fn into_clip(self, ids: &IdGenerator, name: &str, format: &Format) -> Result<Clip> {
        let mut buffer = self.buffer;
        let frame_size = format.frame_size();
        if frame_size > 0 {
            let tail = buffer.len() % frame_size;
            if tail != 0 {
                warn!(
                    "Dropping {} trailing bytes of a partial {}-byte frame from '{}'",
                    tail, frame_size, name
                );
                buffer.truncate(buffer.len() - tail);
            }
        }
        Clip::new(ids, name, buffer, *format, true)
    }
}

/// Copy a clip into a fresh sample view
///
/// # Errors
/// * `UnsupportedBitDepth` - if the clip is not 16-bit
pub fn to_view(clip: &Clip) -> Result<SampleView> {
    let format = clip.format();
    if format.bit_depth != 16 {
        return Err(CutplayError::UnsupportedBitDepth {
            bit_depth: format.bit_depth,
        });
    }
    SampleView::from_bytes(clip.buffer().to_vec(), format.sample_rate)
}

/// Wrap a view into a new modified clip named `name` with `format`
pub fn to_clip(view: SampleView, ids: &IdGenerator, name: &str, format: &Format) -> Result<Clip> {
    view.into_clip(ids, name, format)
}
