use crate::fitting::Peak;

/// Combine the signal peak's area with the reference peak's measurements
/// into the characteristic value.
///
/// `None` means not computable (the peak has no reference) — distinct
/// from `Some(0.0)`, which is a definite non-match: the reference line
/// was too weak, the signal area non-positive, or the reference area
/// unusable. Areas enter as absolute values so that noise-induced sign
/// flips in baseline-corrected areas don't flip the ratio.
pub fn compute(
    signal_area: f64,
    reference_height: f64,
    reference_area: f64,
    peak: &Peak,
) -> Option<f64> {
    let reference = peak.reference.as_ref()?;

    if reference_height < reference.minimum_height || signal_area <= 0.0 || reference_area < 0.0 {
        return Some(0.0);
    }
    if reference_area == 0.0 {
        log::warn!(
            "peak '{}': reference area is zero, characteristic value forced to 0",
            peak.name
        );
        return Some(0.0);
    }

    Some(
        signal_area.abs() / reference_area.abs() * peak.normalization_factor
            - peak.normalization_offset,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting::ReferencePeak;
    use approx::assert_relative_eq;

    fn referenced_peak(minimum_height: f64) -> Peak {
        let mut reference = ReferencePeak::new(500.0, 0.4, 0.4);
        reference.minimum_height = minimum_height;
        Peak::new("signal", 388.3, 0.5, 0.5).with_reference(reference)
    }

    #[test]
    fn test_unreferenced_peak_is_not_computable() {
        let peak = Peak::new("signal", 388.3, 0.5, 0.5);
        assert_eq!(compute(10.0, 5.0, 2.0, &peak), None);
    }

    #[test]
    fn test_weak_reference_gates_to_zero() {
        let peak = referenced_peak(50.0);
        // Reference below its minimum height: exactly 0.0, even with a
        // zero reference area — never a division error
        assert_eq!(compute(10.0, 49.9, 0.0, &peak), Some(0.0));
    }

    #[test]
    fn test_non_positive_signal_area_gates_to_zero() {
        let peak = referenced_peak(0.0);
        assert_eq!(compute(0.0, 5.0, 2.0, &peak), Some(0.0));
        assert_eq!(compute(-3.0, 5.0, 2.0, &peak), Some(0.0));
    }

    #[test]
    fn test_negative_reference_area_gates_to_zero() {
        let peak = referenced_peak(0.0);
        assert_eq!(compute(10.0, 5.0, -1.0, &peak), Some(0.0));
    }

    #[test]
    fn test_zero_reference_area_in_passing_gate_stays_finite() {
        let _ = env_logger::builder().is_test(true).try_init();
        let peak = referenced_peak(0.0);
        assert_eq!(compute(10.0, 5.0, 0.0, &peak), Some(0.0));
    }

    #[test]
    fn test_normalization_factor_and_offset_apply() {
        let mut peak = referenced_peak(0.0);
        peak.normalization_factor = 2.5;
        peak.normalization_offset = 0.75;

        let value = compute(6.0, 5.0, 3.0, &peak).unwrap();
        assert_relative_eq!(value, 6.0 / 3.0 * 2.5 - 0.75, epsilon = 1e-12);
    }
}
