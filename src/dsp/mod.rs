//! Sample Transformation Library
//!
//! Pure algorithms that turn one or more buffers into a new buffer.
//! Nothing here mutates its input.

pub mod autocut;
mod effect;
pub mod envelope;
mod gain;
pub mod mixer;
pub mod splicer;

pub use autocut::{auto_cut, find_silent_run, SilentRun};
pub use effect::SampleTransform;
pub use envelope::{amplify_all, fade_in, fade_out, offset_all, sweep, FADE_STEPS};
pub use gain::{Amplify, Mute, Offset};
pub use mixer::{combine, mix, MixOp};
pub use splicer::{concat, cut, cut_view, insert_silence};
