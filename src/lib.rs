//! Optical emission spectral analysis engine.
//!
//! Turns one raw spectrum `(x, y)` plus a fitting configuration into one
//! characteristic value — the scaled signal-to-reference peak ratio used
//! to track a process quantity over time — along with the peak
//! measurements, baseline, calibration shift, and integration-area
//! snapshots behind it.
//!
//! The engine is stateless and reentrant: every operation takes all of
//! its state as arguments and returns a fresh result, so callers may run
//! it from any number of worker threads, one spectrum per call. File
//! reading, export, and presentation belong to collaborator layers.
//!
//! Typical flow:
//!
//! ```
//! use oes_monitor::{analyze, AnalysisRecord, BasicSetting, FittingDescriptor};
//! use oes_monitor::data::RawSample;
//! use chrono::Local;
//!
//! let raw = RawSample::new(
//!     (0..64).map(|i| i as f64).collect(),
//!     vec![10.0; 64],
//!     Local::now(),
//! );
//! let setting = BasicSetting {
//!     wavelength: Some(450.0),
//!     dispersion: Some(0.05),
//!     ..Default::default()
//! };
//! let descriptor = FittingDescriptor::from_json(
//!     r#"{"name": "CN", "central_wavelength": 450.0, "shift_up": 0.3, "shift_down": 0.3}"#,
//! );
//!
//! let mut record = AnalysisRecord::new();
//! let result = analyze(&raw, &setting, &descriptor, None, None, &mut record);
//! assert!(result.characteristic_value.is_none()); // no reference peak configured
//! ```

pub mod data;
pub mod fitting;
pub mod log;
pub mod pipeline;

pub use data::{BasicSetting, CalibrationTable, IntegrationArea, ProcessedSample, RawSample};
pub use fitting::{ErrorFlag, FittingConfig, FittingDescriptor, Peak, ReferencePeak};
pub use log::record::AnalysisRecord;
pub use pipeline::baseline::BaselineParams;
pub use pipeline::calibration::{CalibrationError, CalibrationParams};
pub use pipeline::handler::{analyze, AnalysisOptions, AnalysisResult, AnalysisWarning};
pub use pipeline::wavelength::MissingParameterError;
