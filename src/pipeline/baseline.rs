use serde::{Deserialize, Serialize};

/// Baseline fit constants. The defaults suit typical emission spectra;
/// callers with unusual detectors can override per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineParams {
    /// Polynomial order of the fitted curve
    pub order: usize,
    /// Number of fit-and-clip refinement passes
    pub iterations: usize,
}

impl Default for BaselineParams {
    fn default() -> Self {
        Self {
            order: 3,
            iterations: 24,
        }
    }
}

/// Estimate a smooth baseline beneath the intensity curve.
///
/// Iterative polynomial clipping: fit a low-order polynomial by least
/// squares, clip the working curve to the fit wherever it lies above it,
/// refit. Peaks stop contributing after a few passes and the fit settles
/// onto the lower envelope. The fit runs on mean-centered data with the
/// mean added back, so a constant offset on the whole curve shifts the
/// baseline by exactly that constant.
///
/// Returns the baseline and its mean.
pub fn estimate(intensity: &[f64], params: &BaselineParams) -> (Vec<f64>, f64) {
    let n = intensity.len();
    if n == 0 {
        return (Vec::new(), 0.0);
    }
    if n <= params.order + 1 {
        // Too few samples to fit: the curve is its own baseline.
        let baseline = intensity.to_vec();
        let average = mean(&baseline);
        return (baseline, average);
    }

    let dc = mean(intensity);
    let mut work: Vec<f64> = intensity.iter().map(|&v| v - dc).collect();

    // Abscissa normalized to [-1, 1] to keep the normal equations sane
    let span = (n - 1) as f64;
    let t: Vec<f64> = (0..n).map(|i| 2.0 * i as f64 / span - 1.0).collect();

    let mut fit = vec![0.0; n];
    for _ in 0..params.iterations.max(1) {
        let coeffs = polyfit(&t, &work, params.order);
        for i in 0..n {
            fit[i] = polyval(&coeffs, t[i]);
            if work[i] > fit[i] {
                work[i] = fit[i];
            }
        }
    }

    let baseline: Vec<f64> = fit.iter().map(|&v| v + dc).collect();
    let average = mean(&baseline);
    (baseline, average)
}

/// Subtract the baseline from the intensity curve.
pub fn correct(intensity: &[f64], baseline: &[f64]) -> Vec<f64> {
    intensity
        .iter()
        .zip(baseline)
        .map(|(&v, &b)| v - b)
        .collect()
}

/// Divide the intensity curve by `|average|` in place. Returns `false`
/// and leaves the data untouched when the average is zero — the caller
/// reports the skipped normalization as a warning.
pub fn normalize(intensity: &mut [f64], average: f64) -> bool {
    let scale = average.abs();
    if !scale.is_finite() || scale < f64::EPSILON {
        log::warn!("normalization skipped: baseline average is zero");
        return false;
    }
    for v in intensity.iter_mut() {
        *v /= scale;
    }
    true
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Least-squares polynomial fit via normal equations. Returns
/// coefficients in ascending-power order.
fn polyfit(t: &[f64], y: &[f64], order: usize) -> Vec<f64> {
    let m = order + 1;
    let mut power_sums = vec![0.0; 2 * order + 1];
    let mut moments = vec![0.0; m];
    for (&ti, &yi) in t.iter().zip(y) {
        let mut p = 1.0;
        for (j, sum) in power_sums.iter_mut().enumerate() {
            *sum += p;
            if j < m {
                moments[j] += p * yi;
            }
            p *= ti;
        }
    }

    let mut augmented = vec![vec![0.0; m + 1]; m];
    for i in 0..m {
        for j in 0..m {
            augmented[i][j] = power_sums[i + j];
        }
        augmented[i][m] = moments[i];
    }
    gaussian_solve(&mut augmented)
}

/// Solve the augmented system in place, partial pivoting. A degenerate
/// column leaves its coefficient at zero instead of blowing up.
fn gaussian_solve(a: &mut [Vec<f64>]) -> Vec<f64> {
    let m = a.len();
    for col in 0..m {
        let mut pivot = col;
        for row in col + 1..m {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        a.swap(col, pivot);
        let diag = a[col][col];
        if diag.abs() < 1e-12 {
            continue;
        }
        let pivot_row = a[col].clone();
        for row in col + 1..m {
            let factor = a[row][col] / diag;
            for k in col..=m {
                a[row][k] -= factor * pivot_row[k];
            }
        }
    }

    let mut x = vec![0.0; m];
    for row in (0..m).rev() {
        let mut acc = a[row][m];
        for k in row + 1..m {
            acc -= a[row][k] * x[k];
        }
        let diag = a[row][row];
        x[row] = if diag.abs() < 1e-12 { 0.0 } else { acc / diag };
    }
    x
}

fn polyval(coeffs: &[f64], t: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}
