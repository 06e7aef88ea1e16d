use std::ops::Range;

use crate::data::ProcessedSample;

/// Outcome of integrating one peak window. An all-zero result with an
/// empty range means the window fell outside the spectrum — a valid
/// "peak not found" outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakIntegration {
    /// Wavelength of the window's local maximum, nm
    pub position: f64,
    /// Intensity at the local maximum
    pub height: f64,
    /// Trapezoidal integral over the window
    pub area: f64,
    /// Sample indices of the window, end-exclusive
    pub range: Range<usize>,
}

impl PeakIntegration {
    pub fn not_found() -> Self {
        Self {
            position: 0.0,
            height: 0.0,
            area: 0.0,
            range: 0..0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Index of the sample whose wavelength is closest to `target`.
/// Assumes a non-empty axis.
pub(crate) fn nearest_index(wavelength: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &w) in wavelength.iter().enumerate() {
        let dist = (w - target).abs();
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

/// Find and integrate the peak inside `[lo, hi]` on the processed
/// spectrum.
///
/// Both bounds map to their nearest sample. A window that collapses
/// (right bound at index 0, or both bounds on the same sample) returns
/// the [`PeakIntegration::not_found`] sentinel. The trapezoid uses the
/// actual wavelength spacing — no uniform-grid assumption.
pub fn integrate(processed: &ProcessedSample, lo: f64, hi: f64) -> PeakIntegration {
    let wavelength = &processed.wavelength;
    let intensity = &processed.intensity;
    if wavelength.is_empty() || intensity.len() != wavelength.len() {
        return PeakIntegration::not_found();
    }

    let left = nearest_index(wavelength, lo);
    let right = nearest_index(wavelength, hi);
    if right == 0 || left == right {
        return PeakIntegration::not_found();
    }

    let mut apex = left;
    for i in left..=right {
        if intensity[i] > intensity[apex] {
            apex = i;
        }
    }

    let mut area = 0.0;
    for i in left..right {
        area += 0.5 * (intensity[i] + intensity[i + 1]) * (wavelength[i + 1] - wavelength[i]);
    }

    PeakIntegration {
        position: wavelength[apex],
        height: intensity[apex],
        area,
        range: left..right + 1,
    }
}
