pub mod baseline;
pub mod calibration;
pub mod characteristic;
pub mod handler;
pub mod peak;
pub mod wavelength;

#[cfg(test)]
mod tests {
    use super::handler::{analyze, AnalysisWarning};
    use crate::data::{BasicSetting, CalibrationTable, PeakType, RawSample, SpectrumType};
    use crate::fitting::{FittingConfig, FittingDescriptor, ReferenceConfig};
    use crate::log::record::AnalysisRecord;
    use approx::assert_relative_eq;
    use chrono::Local;

    const DISPERSION: f64 = 0.05;
    const CENTRAL: f64 = 450.0;

    /// Pixel-axis spectrum with emission lines at the given wavelengths
    /// (nm, as they appear after mapping around 450 nm).
    fn synthetic_sample(lines: &[(f64, f64)]) -> RawSample {
        let n = 2048usize;
        let center = ((n - 1) / 2) as f64;
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|&px| {
                let w = (px - center) * DISPERSION + CENTRAL;
                let peaks: f64 = lines
                    .iter()
                    .map(|&(c, h)| h * (-((w - c) / 0.15).powi(2)).exp())
                    .sum();
                100.0 + peaks
            })
            .collect();
        RawSample::new(x, y, Local::now())
    }

    fn setting() -> BasicSetting {
        BasicSetting {
            wavelength: Some(CENTRAL),
            dispersion: Some(DISPERSION),
            baseline_correction: true,
            ..Default::default()
        }
    }

    fn referenced_fitting() -> FittingDescriptor {
        FittingDescriptor::from_config(&FittingConfig {
            name: Some("CN 420".into()),
            central_wavelength: Some(420.0),
            shift_up: Some(0.5),
            shift_down: Some(0.5),
            reference: Some(ReferenceConfig {
                central_wavelength: Some(480.0),
                shift_up: Some(0.5),
                shift_down: Some(0.5),
                minimum_height: Some(10.0),
            }),
            ..Default::default()
        })
    }

    fn unreferenced_fitting() -> FittingDescriptor {
        FittingDescriptor::from_config(&FittingConfig {
            name: Some("CN 420".into()),
            central_wavelength: Some(420.0),
            shift_up: Some(0.5),
            shift_down: Some(0.5),
            ..Default::default()
        })
    }

    #[test]
    fn test_full_analysis_with_reference() {
        let raw = synthetic_sample(&[(420.0, 800.0), (480.0, 400.0)]);
        let mut record = AnalysisRecord::new();
        let result = analyze(
            &raw,
            &setting(),
            &referenced_fitting(),
            None,
            None,
            &mut record,
        );

        assert!(result.warnings.is_empty());
        assert_relative_eq!(result.peak_position, 420.0, epsilon = DISPERSION);
        assert!(result.peak_height > 700.0);
        assert!(result.peak_area > 0.0);

        // Equal line widths: the area ratio tracks the height ratio
        let value = result.characteristic_value.unwrap();
        assert_relative_eq!(value, 2.0, epsilon = 0.2);

        // Raw + processed snapshot for each of the two peaks
        assert_eq!(result.integration_areas.len(), 4);
        let signal_raw = &result.integration_areas[0];
        assert_eq!(signal_raw.peak_type, PeakType::Signal);
        assert_eq!(signal_raw.spectrum_type, SpectrumType::Raw);
        assert_eq!(
            result.integration_areas[3].spectrum_type,
            SpectrumType::Processed
        );

        assert!(record.len() >= 4);
    }

    #[test]
    fn test_unreferenced_peak_yields_no_characteristic_value() {
        let raw = synthetic_sample(&[(420.0, 800.0)]);
        let mut record = AnalysisRecord::new();
        let result = analyze(
            &raw,
            &setting(),
            &unreferenced_fitting(),
            None,
            None,
            &mut record,
        );

        assert_eq!(result.characteristic_value, None);
        assert!(result.peak_height > 0.0);
        assert!(result.peak_area > 0.0);
        assert_relative_eq!(result.peak_position, 420.0, epsilon = DISPERSION);
        assert_eq!(result.integration_areas.len(), 2);
    }

    #[test]
    fn test_repeated_analysis_is_identical() {
        let raw = synthetic_sample(&[(420.0, 800.0), (480.0, 400.0)]);
        let setting = setting();
        let descriptor = referenced_fitting();

        let mut record = AnalysisRecord::new();
        let first = analyze(&raw, &setting, &descriptor, None, None, &mut record);
        let second = analyze(&raw, &setting, &descriptor, None, None, &mut record);

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_parameters_fall_back_to_raw_axis() {
        let _ = env_logger::builder().is_test(true).try_init();
        let raw = synthetic_sample(&[(420.0, 800.0)]);
        let no_params = BasicSetting::default();
        let mut record = AnalysisRecord::new();

        let result = analyze(
            &raw,
            &no_params,
            &unreferenced_fitting(),
            None,
            None,
            &mut record,
        );

        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, AnalysisWarning::ParameterMissing { name } if name == "wavelength")));
        // Unmapped: the processed axis is the pixel axis itself
        assert_eq!(result.processed.wavelength, raw.x);
        assert!(result.baseline_average > 0.0);
    }

    #[test]
    fn test_calibration_corrects_drifted_lines() {
        // Lines drifted +0.05 nm (one sample) off their table positions
        let raw = synthetic_sample(&[(420.05, 800.0), (480.05, 400.0)]);
        let table = CalibrationTable::from_wavelengths(vec![420.0, 480.0]);
        let calibrated_setting = BasicSetting {
            calibration: true,
            ..setting()
        };
        let mut record = AnalysisRecord::new();

        let result = analyze(
            &raw,
            &calibrated_setting,
            &referenced_fitting(),
            Some(&table),
            None,
            &mut record,
        );

        let shift = result.calibration_shift.unwrap();
        assert_relative_eq!(shift, 0.05, epsilon = 0.02);
        assert_relative_eq!(result.peak_position, 420.0, epsilon = DISPERSION);
        assert!(result.characteristic_value.is_some());
    }

    #[test]
    fn test_calibration_failure_degrades_gracefully() {
        let raw = synthetic_sample(&[(420.0, 800.0), (480.0, 400.0)]);
        // 900 nm is far outside the mapped axis
        let table = CalibrationTable::from_wavelengths(vec![420.0, 900.0]);
        let calibrated_setting = BasicSetting {
            calibration: true,
            ..setting()
        };
        let mut record = AnalysisRecord::new();

        let result = analyze(
            &raw,
            &calibrated_setting,
            &referenced_fitting(),
            Some(&table),
            None,
            &mut record,
        );

        assert_eq!(result.calibration_shift, None);
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, AnalysisWarning::CalibrationFailed { .. })));
        // The rest of the analysis still ran
        assert!(result.peak_height > 0.0);
        assert!(result.characteristic_value.is_some());
    }

    #[test]
    fn test_invalid_fitting_skips_integration_only() {
        let raw = synthetic_sample(&[(420.0, 800.0)]);
        let broken = FittingDescriptor::from_config(&FittingConfig {
            name: Some("broken".into()),
            ..Default::default()
        });
        let mut record = AnalysisRecord::new();

        let result = analyze(&raw, &setting(), &broken, None, None, &mut record);

        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, AnalysisWarning::InvalidFitting { code } if code == "FITTING!")));
        assert_eq!(result.peak_height, 0.0);
        assert_eq!(result.characteristic_value, None);
        assert!(result.integration_areas.is_empty());
        // Spectral steps still ran
        assert!(result.baseline_average > 0.0);
        assert_eq!(result.processed.len(), raw.len());
    }
}
