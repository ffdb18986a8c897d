//! Cutplay - PCM Clip Editing Engine
//!
//! Cutplay edits 16-bit linear PCM clips: cutting, inserting silence,
//! concatenating, scaling, offsetting, fading, mixing and trimming silence.
//!
//! # Architecture
//!
//! - `engine`: clips, time arithmetic, the sample codec, sample views, WAV I/O
//! - `dsp`: the pure transformation algorithms
//! - `editor`: clip-level operations that own clip identity
//! - `cli`: the command-line front end
//!
//! Every operation borrows its inputs and returns a new clip; nothing is
//! edited in place.

pub mod cli;
pub mod config;
pub mod dsp;
pub mod editor;
pub mod engine;
pub mod error;

pub use config::EditorConfig;
pub use editor::Editor;
pub use engine::{Clip, Format, IdGenerator, SampleView};
pub use error::{CutplayError, Result};
