//! Clip storage
//!
//! A [`Clip`] is the named, immutable unit of audio exchanged with the rest of
//! the program. Its bytes are 16-bit little-endian PCM, interleaved by channel.
//! Every edit produces a new clip with a fresh id from an [`IdGenerator`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{CutplayError, Result};

// ============================================================================
// Format
// ============================================================================

/// PCM format descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Format {
    /// Sample rate in Hz (e.g., 8000, 44100)
    pub sample_rate: u32,
    /// Bits per sample; the engine edits 16-bit audio only
    pub bit_depth: u16,
    /// Number of interleaved channels
    pub channel_count: u16,
}

impl Format {
    /// Create a format descriptor, rejecting zero-valued fields
    pub fn new(sample_rate: u32, bit_depth: u16, channel_count: u16) -> Result<Self> {
        let format = Self {
            sample_rate,
            bit_depth,
            channel_count,
        };
        format.validate()?;
        Ok(format)
    }

    /// 16-bit PCM at the given rate and channel count
    pub fn pcm16(sample_rate: u32, channel_count: u16) -> Self {
        Self {
            sample_rate,
            bit_depth: 16,
            channel_count,
        }
    }

    /// Check that every field is positive and the bit depth is whole bytes
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 || self.bit_depth == 0 || self.channel_count == 0 {
            return Err(CutplayError::InvalidFormat {
                reason: format!("all fields must be positive, got {}", self),
            });
        }
        if self.bit_depth % 8 != 0 {
            return Err(CutplayError::InvalidFormat {
                reason: format!("bit depth {} is not a whole number of bytes", self.bit_depth),
            });
        }
        Ok(())
    }

    /// Bytes per single-channel sample
    #[inline]
    pub fn bytes_per_sample(&self) -> usize {
        self.bit_depth as usize / 8
    }

    /// Bytes per frame (one sample for every channel)
    #[inline]
    pub fn frame_size(&self) -> usize {
        self.bytes_per_sample() * self.channel_count as usize
    }

    /// Bytes of audio per second of playback
    #[inline]
    pub fn bytes_per_second(&self) -> usize {
        self.sample_rate as usize * self.frame_size()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz / {}-bit / {} ch",
            self.sample_rate, self.bit_depth, self.channel_count
        )
    }
}

// ============================================================================
// Identity
// ============================================================================

/// Hands out clip ids
///
/// Ids start at 1 and are never reused for the lifetime of the generator.
/// A single `fetch_add` keeps them unique when clips are built on several
/// threads at once.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Reserve the next id
    #[inline]
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Clip
// ============================================================================

/// Immutable, named PCM buffer
///
/// `Clip` is not `Clone`: a copy would carry the same id, and
/// ids identify exactly one construction.
#[derive(Debug)]
pub struct Clip {
    id: u64,
    name: String,
    buffer: Vec<u8>,
    format: Format,
    modified: bool,
}

impl Clip {
    /// Build a clip, taking ownership of `buffer`
    ///
    /// # Errors
    /// * `InvalidFormat` - if the format has zero-valued fields
    /// * `Misaligned` - if the buffer is not a whole number of frames
    pub fn new(
        ids: &IdGenerator,
        name: impl Into<String>,
        buffer: Vec<u8>,
        format: Format,
        modified: bool,
    ) -> Result<Self> {
        format.validate()?;
        let frame_size = format.frame_size();
        if buffer.len() % frame_size != 0 {
            return Err(CutplayError::Misaligned {
                len: buffer.len(),
                frame_size,
            });
        }

        Ok(Self {
            id: ids.next_id(),
            name: name.into(),
            buffer,
            format,
            modified,
        })
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw little-endian PCM bytes
    #[inline]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[inline]
    pub fn format(&self) -> &Format {
        &self.format
    }

    /// True for clips produced by an edit rather than ingested
    #[inline]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Length of the buffer in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of frames in the buffer
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.buffer.len() / self.format.frame_size()
    }

    /// Duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.buffer.len() as f64 / self.format.bytes_per_second() as f64
    }

    /// SHA-256 of the PCM bytes as lowercase hex
    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.buffer);
        format!("{:x}", hasher.finalize())
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} |{:.2} s", self.id, self.name, self.duration_secs())?;
        if self.modified {
            write!(f, " (modified)")?;
        }
        Ok(())
    }
}
