//! Tick-driven animation state tree.
//!
//! Clip, multi-clip and mixer states are arranged per layer. Activating a state crossfades
//! it against its siblings and bubbles the activation up through owning mixers. The
//! controller advances clip cursors at a fixed tick rate, interpolates presentation values
//! at render rate and writes both to a [`PlayableBackend`] that does the actual evaluation.

#![forbid(unsafe_code)]

mod error;
mod model;
mod runtime;
mod version;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "binary")]
pub mod binary;

pub use error::*;
pub use model::*;
pub use runtime::*;
pub use version::*;
