//! Audio Engine Module
//!
//! Core audio representation including:
//! - Clip storage and identity
//! - Time/position arithmetic
//! - 16-bit sample codec
//! - Flat sample views used by the transformations
//! - WAV file I/O

pub mod clip;
pub mod codec;
pub mod io;
pub mod position;
pub mod view;

pub use clip::{Clip, Format, IdGenerator};
pub use io::{export_wav, import_wav, import_wav_from_reader, probe_wav};
pub use position::{clip_offset, units_to_seconds, view_units};
pub use view::{to_clip, to_view, SampleView};
