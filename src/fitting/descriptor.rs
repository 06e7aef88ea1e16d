use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::peak::{Peak, ReferencePeak};

/// Why a fitting is unusable. Flags accumulate in discovery order; an
/// empty set means the fitting is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorFlag {
    /// The configuration could not be turned into a peak at all
    Fitting,
    /// The signal peak failed its self-check
    Peak,
    /// A reference was supplied but is invalid or undecidable
    Reference,
}

impl ErrorFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorFlag::Fitting => "FITTING",
            ErrorFlag::Peak => "PEAK",
            ErrorFlag::Reference => "REFERENCE",
        }
    }
}

impl std::fmt::Display for ErrorFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display form of an accumulated flag set: names concatenated in
/// discovery order with `!` appended, empty string when there are none.
pub fn format_error_code(flags: &[ErrorFlag]) -> String {
    if flags.is_empty() {
        return String::new();
    }
    let mut code: String = flags.iter().map(ErrorFlag::as_str).collect();
    code.push('!');
    code
}

/// Reference-peak section of a raw fitting configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceConfig {
    pub central_wavelength: Option<f64>,
    pub shift_up: Option<f64>,
    pub shift_down: Option<f64>,
    pub minimum_height: Option<f64>,
}

/// A fitting configuration exactly as the configuration collaborator
/// stores it: every field optional. [`FittingDescriptor::from_config`]
/// decides what is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FittingConfig {
    pub name: Option<String>,
    pub central_wavelength: Option<f64>,
    pub shift_up: Option<f64>,
    pub shift_down: Option<f64>,
    pub normalization_factor: Option<f64>,
    pub normalization_offset: Option<f64>,
    /// Path to the two-column calibration table, resolved and loaded by
    /// the file-loading collaborator
    pub calibration_table: Option<PathBuf>,
    pub reference: Option<ReferenceConfig>,
}

/// A named, validated fitting: the signal peak, an optional calibration
/// table reference, and the error flags discovered while building it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingDescriptor {
    name: String,
    peak: Option<Peak>,
    calibration_table_ref: Option<PathBuf>,
    flags: Vec<ErrorFlag>,
}

impl FittingDescriptor {
    /// Build a descriptor from a raw configuration.
    ///
    /// Failure to construct the peak at all sets `FITTING` and stops — no
    /// further checks run. A constructed peak that fails its self-check
    /// sets `PEAK`. A reference section that is missing required fields or
    /// fails its own check sets `REFERENCE`; an absent reference section
    /// is not an error.
    pub fn from_config(config: &FittingConfig) -> Self {
        let name = config.name.clone().unwrap_or_default();
        let mut flags = Vec::new();

        let peak = match Self::build_peak(config) {
            Some(peak) => peak,
            None => {
                log::warn!("fitting '{}': required peak parameters missing", name);
                return Self {
                    name,
                    peak: None,
                    calibration_table_ref: config.calibration_table.clone(),
                    flags: vec![ErrorFlag::Fitting],
                };
            }
        };

        if !peak.is_valid() {
            flags.push(ErrorFlag::Peak);
        }

        let mut peak = peak;
        if let Some(reference_config) = &config.reference {
            match Self::build_reference(reference_config) {
                Some(reference) => {
                    if !reference.is_valid() {
                        flags.push(ErrorFlag::Reference);
                    }
                    peak.reference = Some(reference);
                }
                None => flags.push(ErrorFlag::Reference),
            }
        }

        Self {
            name,
            peak: Some(peak),
            calibration_table_ref: config.calibration_table.clone(),
            flags,
        }
    }

    /// Parse a JSON fitting configuration and build the descriptor.
    /// Unparseable JSON is a `FITTING`-flagged descriptor, not a panic.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<FittingConfig>(raw) {
            Ok(config) => Self::from_config(&config),
            Err(e) => {
                log::warn!("fitting configuration is not valid JSON: {e}");
                Self {
                    name: String::new(),
                    peak: None,
                    calibration_table_ref: None,
                    flags: vec![ErrorFlag::Fitting],
                }
            }
        }
    }

    fn build_peak(config: &FittingConfig) -> Option<Peak> {
        let central_wavelength = config.central_wavelength?;
        let shift_up = config.shift_up?;
        let shift_down = config.shift_down?;
        Some(Peak {
            name: config.name.clone().unwrap_or_default(),
            central_wavelength,
            shift_up,
            shift_down,
            normalization_factor: config.normalization_factor.unwrap_or(1.0),
            normalization_offset: config.normalization_offset.unwrap_or(0.0),
            reference: None,
        })
    }

    fn build_reference(config: &ReferenceConfig) -> Option<ReferencePeak> {
        Some(ReferencePeak {
            central_wavelength: config.central_wavelength?,
            shift_up: config.shift_up?,
            shift_down: config.shift_down?,
            minimum_height: config.minimum_height.unwrap_or(0.0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn peak(&self) -> Option<&Peak> {
        self.peak.as_ref()
    }

    pub fn calibration_table_ref(&self) -> Option<&Path> {
        self.calibration_table_ref.as_deref()
    }

    pub fn flags(&self) -> &[ErrorFlag] {
        &self.flags
    }

    pub fn has_flag(&self, flag: ErrorFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Display form of the accumulated flags (`""` when valid).
    pub fn error_code(&self) -> String {
        format_error_code(&self.flags)
    }

    pub fn is_valid(&self) -> bool {
        self.flags.is_empty()
    }

    /// The signal peak, when it exists and passed its self-check.
    pub fn usable_peak(&self) -> Option<&Peak> {
        if self.has_flag(ErrorFlag::Fitting) || self.has_flag(ErrorFlag::Peak) {
            return None;
        }
        self.peak.as_ref()
    }

    /// The reference peak, when one is configured and not flagged.
    pub fn usable_reference(&self) -> Option<&ReferencePeak> {
        if self.has_flag(ErrorFlag::Reference) {
            return None;
        }
        self.usable_peak()?.reference.as_ref()
    }
}
