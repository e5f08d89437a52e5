//! Replay of the best candidate for display.
//!
//! A replay is pulled one frame at a time by the caller, which owns the
//! pause between frames. While a replay is unfinished the evolution
//! controller refuses both grid edits and phase advances.

mod replay;

pub use replay::Replay;
