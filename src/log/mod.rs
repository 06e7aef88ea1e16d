//! Per-analysis operation recording.

pub mod record;

pub use record::*;
