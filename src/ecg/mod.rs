pub mod catalog;
pub mod trace;
pub mod waveform;

pub use catalog::{Category, Condition};
pub use trace::{Trace, generate_trace, generate_trace_for_key};
pub use waveform::{BeatSegment, PathCommand, QrsShape};
