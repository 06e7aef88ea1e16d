use serde::{Deserialize, Serialize};

/// A peak used to normalize the signal peak: a wavelength window plus the
/// minimum height it must reach for the fitting to count as a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePeak {
    /// Expected line position, nm
    pub central_wavelength: f64,
    /// Window extent above the central wavelength, nm
    pub shift_up: f64,
    /// Window extent below the central wavelength, nm
    pub shift_down: f64,
    /// Minimum observed height for the reference to validate the fitting
    pub minimum_height: f64,
}

impl ReferencePeak {
    pub fn new(central_wavelength: f64, shift_up: f64, shift_down: f64) -> Self {
        Self {
            central_wavelength,
            shift_up,
            shift_down,
            minimum_height: 0.0,
        }
    }

    /// Integration window as `(lower, upper)` wavelengths.
    pub fn window_bounds(&self) -> (f64, f64) {
        (
            self.central_wavelength - self.shift_down,
            self.central_wavelength + self.shift_up,
        )
    }

    pub fn is_valid(&self) -> bool {
        self.central_wavelength >= 0.0
            && self.central_wavelength.is_finite()
            && self.shift_up >= 0.0
            && self.shift_down >= 0.0
            && self.minimum_height >= 0.0
    }
}

/// The signal peak of a fitting. A peak without a reference is legal —
/// its raw characteristics are still measured, but no characteristic
/// value can be computed from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub name: String,
    /// Expected line position, nm
    pub central_wavelength: f64,
    /// Window extent above the central wavelength, nm
    pub shift_up: f64,
    /// Window extent below the central wavelength, nm
    pub shift_down: f64,
    /// Scale applied to the signal/reference area ratio
    pub normalization_factor: f64,
    /// Offset subtracted from the scaled ratio
    pub normalization_offset: f64,
    pub reference: Option<ReferencePeak>,
}

impl Peak {
    pub fn new(name: &str, central_wavelength: f64, shift_up: f64, shift_down: f64) -> Self {
        Self {
            name: name.to_string(),
            central_wavelength,
            shift_up,
            shift_down,
            normalization_factor: 1.0,
            normalization_offset: 0.0,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: ReferencePeak) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Integration window as `(lower, upper)` wavelengths.
    pub fn window_bounds(&self) -> (f64, f64) {
        (
            self.central_wavelength - self.shift_down,
            self.central_wavelength + self.shift_up,
        )
    }

    /// Positional and normalization self-check. Does not look at the
    /// reference — reference validity is tracked separately.
    pub fn is_valid(&self) -> bool {
        self.central_wavelength >= 0.0
            && self.central_wavelength.is_finite()
            && self.shift_up >= 0.0
            && self.shift_down >= 0.0
            && self.normalization_factor.is_finite()
            && self.normalization_offset.is_finite()
    }
}

impl std::fmt::Display for Peak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} @ {:.2} nm [-{:.2}, +{:.2}]",
            self.name, self.central_wavelength, self.shift_down, self.shift_up
        )
    }
}
