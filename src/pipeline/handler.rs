/// Analysis orchestration
///
/// Runs one spectrum through axis mapping, baseline estimation, optional
/// calibration, and peak integration, and assembles the result. Every
/// recoverable failure is isolated to this spectrum's result — nothing
/// here aborts a batch.
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::data::{
    BasicSetting, CalibrationTable, IntegrationArea, PeakType, ProcessedSample, RawSample,
    SpectrumType,
};
use crate::fitting::FittingDescriptor;
use crate::log::record::AnalysisRecord;

use super::baseline::{self, BaselineParams};
use super::calibration::{self, CalibrationParams};
use super::characteristic;
use super::peak as integrator;
use super::wavelength;

/// A recoverable per-spectrum condition, surfaced so display and export
/// collaborators can render the affected fields distinctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnalysisWarning {
    /// Central wavelength or dispersion unavailable; the raw axis was
    /// used unmapped
    ParameterMissing { name: String },
    /// Baseline average was zero; normalization skipped
    NormalizationSkipped,
    /// Calibration infeasible on this spectrum; uncorrected axis used
    CalibrationFailed { reason: String },
    /// The fitting carries error flags; dependent steps were skipped
    InvalidFitting { code: String },
}

impl std::fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisWarning::ParameterMissing { name } => {
                write!(f, "pixel data: {name} not resolved")
            }
            AnalysisWarning::NormalizationSkipped => {
                write!(f, "normalization skipped (zero baseline average)")
            }
            AnalysisWarning::CalibrationFailed { reason } => {
                write!(f, "calibration failed: {reason}")
            }
            AnalysisWarning::InvalidFitting { code } => write!(f, "invalid fitting: {code}"),
        }
    }
}

/// Tunable constants for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub baseline: BaselineParams,
    pub calibration: CalibrationParams,
}

/// Everything one analysis produced. Created fresh per call, owned by the
/// caller, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub peak_height: f64,
    pub peak_area: f64,
    pub peak_position: f64,
    pub baseline_average: f64,
    /// `None`: no reference configured. `Some(0.0)`: gated non-match.
    pub characteristic_value: Option<f64>,
    /// `None` when calibration was off or failed on this spectrum
    pub calibration_shift: Option<f64>,
    /// Window snapshots for shading/export, raw and processed per peak
    pub integration_areas: Vec<IntegrationArea>,
    /// The corrected spectrum, for plotting
    pub processed: ProcessedSample,
    pub warnings: Vec<AnalysisWarning>,
}

/// Analyze one spectrum. `options` falls back to defaults when `None`.
///
/// The spectral steps always run; fitting-dependent steps degrade per the
/// descriptor's error flags. The record receives one entry per operation.
pub fn analyze(
    raw: &RawSample,
    setting: &BasicSetting,
    descriptor: &FittingDescriptor,
    table: Option<&CalibrationTable>,
    options: Option<&AnalysisOptions>,
    record: &mut AnalysisRecord,
) -> AnalysisResult {
    let default_options = AnalysisOptions::default();
    let options = options.unwrap_or(&default_options);
    let mut warnings = Vec::new();

    // Wavelength axis
    let central = setting.resolved_wavelength(&raw.params);
    let dispersion = setting.resolved_dispersion(&raw.params);
    let axis = match wavelength::map_axis(&raw.x, central, dispersion) {
        Ok(axis) => {
            record.add_entry(
                "Wavelength Mapping",
                &format!(
                    "central {:.2} nm, dispersion {:.4} nm/px, {} samples",
                    central.unwrap_or(f64::NAN),
                    dispersion.unwrap_or(f64::NAN),
                    axis.len()
                ),
            );
            axis
        }
        Err(e) => {
            log::warn!("{e}: falling back to the raw sample axis");
            record.add_entry("Wavelength Mapping", &format!("skipped: {e}"));
            warnings.push(AnalysisWarning::ParameterMissing {
                name: e.name.to_string(),
            });
            raw.x.clone()
        }
    };

    // Baseline
    let (baseline_curve, baseline_average) = baseline::estimate(&raw.y, &options.baseline);
    record.add_entry(
        "Baseline",
        &format!(
            "order {}, {} iterations, average {:.4}",
            options.baseline.order, options.baseline.iterations, baseline_average
        ),
    );
    let mut intensity = if setting.baseline_correction {
        baseline::correct(&raw.y, &baseline_curve)
    } else {
        raw.y.clone()
    };
    if setting.normalize_data {
        if baseline::normalize(&mut intensity, baseline_average) {
            record.add_entry(
                "Normalization",
                &format!("divided by |{:.4}|", baseline_average),
            );
        } else {
            record.add_entry("Normalization", "skipped: baseline average is zero");
            warnings.push(AnalysisWarning::NormalizationSkipped);
        }
    }

    // Calibration
    let mut axis = axis;
    let mut calibration_shift = None;
    if setting.calibration {
        if let Some(table) = table {
            match calibration::calibrate(&axis, &intensity, table.wavelengths(), &options.calibration)
            {
                Ok((corrected, shift)) => {
                    record.add_entry(
                        "Calibration",
                        &format!(
                            "shift {:.4} nm against {} reference lines",
                            shift,
                            table.len()
                        ),
                    );
                    axis = corrected;
                    calibration_shift = Some(shift);
                }
                Err(e) => {
                    log::warn!("calibration failed: {e}");
                    record.add_entry("Calibration", &format!("failed: {e}"));
                    warnings.push(AnalysisWarning::CalibrationFailed {
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    let processed = ProcessedSample::new(axis, intensity);

    // Fitting-dependent steps
    if !descriptor.is_valid() {
        warnings.push(AnalysisWarning::InvalidFitting {
            code: descriptor.error_code(),
        });
    }

    let mut peak_height = 0.0;
    let mut peak_area = 0.0;
    let mut peak_position = 0.0;
    let mut characteristic_value = None;
    let mut integration_areas = Vec::new();

    if let Some(peak) = descriptor.usable_peak() {
        let (lo, hi) = peak.window_bounds();
        let signal = integrator::integrate(&processed, lo, hi);
        record.add_entry(
            "Integration",
            &format!(
                "signal '{}' window {:.2}-{:.2} nm: height {:.4}, area {:.4}",
                peak.name, lo, hi, signal.height, signal.area
            ),
        );
        snapshot_areas(
            &mut integration_areas,
            raw,
            &processed,
            &signal.range,
            PeakType::Signal,
        );
        peak_height = signal.height;
        peak_area = signal.area;
        peak_position = signal.position;

        if let Some(reference) = descriptor.usable_reference() {
            let (ref_lo, ref_hi) = reference.window_bounds();
            let reference_result = integrator::integrate(&processed, ref_lo, ref_hi);
            record.add_entry(
                "Integration",
                &format!(
                    "reference window {:.2}-{:.2} nm: height {:.4}, area {:.4}",
                    ref_lo, ref_hi, reference_result.height, reference_result.area
                ),
            );
            snapshot_areas(
                &mut integration_areas,
                raw,
                &processed,
                &reference_result.range,
                PeakType::Reference,
            );
            characteristic_value = characteristic::compute(
                signal.area,
                reference_result.height,
                reference_result.area,
                peak,
            );
        }
    }

    AnalysisResult {
        peak_height,
        peak_area,
        peak_position,
        baseline_average,
        characteristic_value,
        calibration_shift,
        integration_areas,
        processed,
        warnings,
    }
}

/// Record the window's samples against both intensity axes.
fn snapshot_areas(
    areas: &mut Vec<IntegrationArea>,
    raw: &RawSample,
    processed: &ProcessedSample,
    range: &Range<usize>,
    peak_type: PeakType,
) {
    if range.is_empty() {
        return;
    }
    areas.push(IntegrationArea {
        x_data: raw.x[range.clone()].to_vec(),
        y_data: raw.y[range.clone()].to_vec(),
        peak_type,
        spectrum_type: SpectrumType::Raw,
    });
    areas.push(IntegrationArea {
        x_data: processed.wavelength[range.clone()].to_vec(),
        y_data: processed.intensity[range.clone()].to_vec(),
        peak_type,
        spectrum_type: SpectrumType::Processed,
    });
}
