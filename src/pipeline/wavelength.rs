use thiserror::Error;

/// Central wavelength or dispersion unavailable: the raw axis cannot be
/// turned into wavelengths. Callers fall back to the unmapped axis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing or non-finite acquisition parameter: {name}")]
pub struct MissingParameterError {
    pub name: &'static str,
}

/// Index of the midpoint sample, lower-biased for even lengths.
fn center_index(len: usize) -> usize {
    (len.max(1) - 1) / 2
}

/// Convert a raw sample axis into a wavelength axis.
///
/// A pixel axis (adjacent difference exactly 1) gets the affine map
/// `x * dispersion + offset`, anchored so the center sample lands on
/// `central_wavelength`. An axis that already looks like wavelengths is
/// only translated so its center sample lands on `central_wavelength`.
///
/// `None` or non-finite parameters are a [`MissingParameterError`] — never
/// a silent default.
pub fn map_axis(
    raw_x: &[f64],
    central_wavelength: Option<f64>,
    dispersion: Option<f64>,
) -> Result<Vec<f64>, MissingParameterError> {
    let central = central_wavelength
        .filter(|v| v.is_finite())
        .ok_or(MissingParameterError { name: "wavelength" })?;
    let dispersion = dispersion
        .filter(|v| v.is_finite())
        .ok_or(MissingParameterError { name: "dispersion" })?;

    if raw_x.is_empty() {
        return Ok(Vec::new());
    }

    let center = raw_x[center_index(raw_x.len())];
    let is_pixel_axis = raw_x.len() >= 2 && raw_x[1] - raw_x[0] == 1.0;

    if is_pixel_axis {
        let offset = central - center * dispersion;
        Ok(raw_x.iter().map(|&x| x * dispersion + offset).collect())
    } else {
        let shift = central - center;
        Ok(raw_x.iter().map(|&x| x + shift).collect())
    }
}
