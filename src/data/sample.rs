use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which peak of a fitting an integration area belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeakType {
    Signal,
    Reference,
}

impl std::fmt::Display for PeakType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeakType::Signal => write!(f, "signal"),
            PeakType::Reference => write!(f, "reference"),
        }
    }
}

/// Which intensity axis an integration area was sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectrumType {
    Raw,
    Processed,
}

impl std::fmt::Display for SpectrumType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectrumType::Raw => write!(f, "raw"),
            SpectrumType::Processed => write!(f, "processed"),
        }
    }
}

/// One spectrum exactly as a reader collaborator produced it: a sample
/// axis (pixel indices or wavelengths), intensities, the acquisition
/// timestamp, and whatever named parameters the file carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Sample axis: monotonically increasing pixel indices or wavelengths in nm
    pub x: Vec<f64>,
    /// Intensity per sample, same length as `x`
    pub y: Vec<f64>,
    /// Acquisition time reported by the reader
    pub timestamp: DateTime<Local>,
    /// Optional named acquisition parameters (e.g. grating-derived
    /// dispersion, recorded central wavelength). Unknown keys are ignored.
    pub params: HashMap<String, f64>,
}

impl RawSample {
    pub fn new(x: Vec<f64>, y: Vec<f64>, timestamp: DateTime<Local>) -> Self {
        Self {
            x,
            y,
            timestamp,
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: f64) -> Self {
        self.params.insert(key.to_string(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// A spectrum after axis mapping and intensity post-processing.
/// Same length as the `RawSample` it was derived from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedSample {
    /// Wavelength per sample, nm
    pub wavelength: Vec<f64>,
    /// Intensity per sample, possibly baseline-corrected and/or normalized
    pub intensity: Vec<f64>,
}

impl ProcessedSample {
    pub fn new(wavelength: Vec<f64>, intensity: Vec<f64>) -> Self {
        Self {
            wavelength,
            intensity,
        }
    }

    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }
}

/// The samples under one integrated peak window, kept for shading and
/// export. Purely descriptive — never fed back into the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationArea {
    pub x_data: Vec<f64>,
    pub y_data: Vec<f64>,
    pub peak_type: PeakType,
    pub spectrum_type: SpectrumType,
}
