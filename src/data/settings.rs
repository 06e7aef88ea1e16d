use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameter-map key for the recorded central wavelength (nm)
pub const PARAM_WAVELENGTH: &str = "wavelength";
/// Parameter-map key for the grating-derived dispersion (nm/pixel)
pub const PARAM_DISPERSION: &str = "dispersion";

/// Per-run analysis settings, supplied by the configuration collaborator.
/// Immutable for the duration of one analysis.
///
/// `wavelength` and `dispersion` are the explicit fallbacks used when the
/// raw sample's parameter map does not carry its own values; `None` means
/// the caller has no value either, which surfaces as a missing-parameter
/// condition at the wavelength-mapping step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicSetting {
    /// Central wavelength of the spectrometer, nm
    pub wavelength: Option<f64>,
    /// Dispersion, nm per pixel
    pub dispersion: Option<f64>,
    /// Name of the fitting driving this analysis
    pub selected_fitting: String,
    /// Names of the fittings enabled for batch runs
    pub checked_fittings: Vec<String>,
    /// Subtract the estimated baseline from the intensity axis
    pub baseline_correction: bool,
    /// Divide the intensity axis by the absolute baseline average
    pub normalize_data: bool,
    /// Align the wavelength axis against the fitting's calibration table
    pub calibration: bool,
}

impl Default for BasicSetting {
    fn default() -> Self {
        Self {
            wavelength: None,
            dispersion: None,
            selected_fitting: String::new(),
            checked_fittings: Vec::new(),
            baseline_correction: true,
            normalize_data: false,
            calibration: false,
        }
    }
}

impl BasicSetting {
    /// Central wavelength for one sample: the reader-supplied parameter
    /// wins, the explicit setting is the fallback. Non-finite values are
    /// treated as absent.
    pub fn resolved_wavelength(&self, params: &HashMap<String, f64>) -> Option<f64> {
        params
            .get(PARAM_WAVELENGTH)
            .copied()
            .filter(|v| v.is_finite())
            .or(self.wavelength.filter(|v| v.is_finite()))
    }

    /// Dispersion for one sample, same resolution order as
    /// [`resolved_wavelength`](Self::resolved_wavelength).
    pub fn resolved_dispersion(&self, params: &HashMap<String, f64>) -> Option<f64> {
        params
            .get(PARAM_DISPERSION)
            .copied()
            .filter(|v| v.is_finite())
            .or(self.dispersion.filter(|v| v.is_finite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_map_wins_over_setting() {
        let setting = BasicSetting {
            wavelength: Some(500.0),
            dispersion: Some(0.1),
            ..Default::default()
        };
        let mut params = HashMap::new();
        params.insert(PARAM_WAVELENGTH.to_string(), 420.0);

        assert_eq!(setting.resolved_wavelength(&params), Some(420.0));
        assert_eq!(setting.resolved_dispersion(&params), Some(0.1));
    }

    #[test]
    fn test_non_finite_param_falls_back() {
        let setting = BasicSetting {
            wavelength: Some(500.0),
            ..Default::default()
        };
        let mut params = HashMap::new();
        params.insert(PARAM_WAVELENGTH.to_string(), f64::NAN);

        assert_eq!(setting.resolved_wavelength(&params), Some(500.0));
        assert_eq!(setting.resolved_dispersion(&params), None);
    }
}
