use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::peak::nearest_index;

/// Calibration was attempted but is geometrically infeasible on this
/// spectrum. Surfaced to the caller; the analysis proceeds on the
/// uncorrected axis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("no reference wavelengths to calibrate against")]
    EmptyTable,
    #[error("spectrum too short to calibrate")]
    EmptySpectrum,
    #[error(
        "search window around {wavelength:.3} nm (±{max_shift} samples) runs past the spectrum edge"
    )]
    WindowOutOfRange { wavelength: f64, max_shift: usize },
    #[error("search window collapsed to zero samples")]
    ZeroSearchWindow,
}

/// Alignment constants. The window and iteration count are empirical and
/// instrument-dependent; override per run when the defaults don't fit the
/// dispersion in use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationParams {
    /// Half-width of the shift search, nm
    pub search_window_nm: f64,
    /// Number of refinement passes over the axis
    pub iterations: usize,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            search_window_nm: 0.3,
            iterations: 3,
        }
    }
}

/// Remove a uniform wavelength drift using known reference lines.
///
/// Each pass finds the integer sample shift that maximizes the summed
/// intensity of all reference lines moved together (the lines drift as
/// one under instrument shift), converts it into a mean wavelength
/// residual, and subtracts that residual from the whole axis. The input
/// axis is not touched; the corrected axis and the accumulated total
/// shift are returned.
pub fn calibrate(
    wavelength: &[f64],
    intensity: &[f64],
    known_peaks: &[f64],
    params: &CalibrationParams,
) -> Result<(Vec<f64>, f64), CalibrationError> {
    if known_peaks.is_empty() {
        return Err(CalibrationError::EmptyTable);
    }
    if wavelength.len() < 2 || intensity.len() != wavelength.len() {
        return Err(CalibrationError::EmptySpectrum);
    }

    let mut axis = wavelength.to_vec();
    let mut total_shift = 0.0;
    for _ in 0..params.iterations.max(1) {
        let shift = align_once(&axis, intensity, known_peaks, params.search_window_nm)?;
        for w in axis.iter_mut() {
            *w -= shift;
        }
        total_shift += shift;
    }
    log::debug!(
        "calibration converged: total shift {:.4} nm over {} passes",
        total_shift,
        params.iterations
    );
    Ok((axis, total_shift))
}

fn align_once(
    axis: &[f64],
    intensity: &[f64],
    known_peaks: &[f64],
    window_nm: f64,
) -> Result<f64, CalibrationError> {
    let n = axis.len();
    let indices: Vec<usize> = known_peaks.iter().map(|&w| nearest_index(axis, w)).collect();

    // Common search radius: the widest sample distance covering the
    // window constant at any reference line
    let mut max_shift = 0usize;
    for (&w, &idx) in known_peaks.iter().zip(&indices) {
        let up = nearest_index(axis, w + window_nm);
        max_shift = max_shift.max(up.abs_diff(idx));
    }
    if max_shift == 0 {
        return Err(CalibrationError::ZeroSearchWindow);
    }
    for (&w, &idx) in known_peaks.iter().zip(&indices) {
        if idx < max_shift || idx + max_shift >= n {
            return Err(CalibrationError::WindowOutOfRange {
                wavelength: w,
                max_shift,
            });
        }
    }

    // Summed response across all lines for every candidate shift; the
    // argmax is the collective best alignment
    let span = max_shift as isize;
    let mut best_shift = 0isize;
    let mut best_sum = f64::NEG_INFINITY;
    for s in -span..=span {
        let sum: f64 = indices
            .iter()
            .map(|&idx| intensity[(idx as isize + s) as usize])
            .sum();
        if sum > best_sum {
            best_sum = sum;
            best_shift = s;
        }
    }

    // Mean residual in wavelength units at the aligned sample positions
    let residual_sum: f64 = known_peaks
        .iter()
        .zip(&indices)
        .map(|(&w, &idx)| w - axis[(idx as isize - best_shift) as usize])
        .sum();
    Ok(residual_sum / known_peaks.len() as f64)
}
