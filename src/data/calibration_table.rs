use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("calibration table has no data rows")]
    Empty,
    #[error("line {line}: cannot parse '{value}' as a wavelength")]
    Parse { line: usize, value: String },
}

/// Ordered list of known reference wavelengths (nm), read-only once
/// loaded. The source file is a two-column numeric table; only the first
/// column is consumed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationTable {
    wavelengths: Vec<f64>,
}

impl CalibrationTable {
    pub fn from_wavelengths(wavelengths: Vec<f64>) -> Self {
        Self { wavelengths }
    }

    /// Parse two-column numeric text: one reference line per row, columns
    /// separated by whitespace or commas. Blank lines and `#` comment
    /// lines are skipped; the second column (relative intensity in most
    /// lamp tables) is ignored.
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut wavelengths = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let first = trimmed
                .split(|c: char| c.is_whitespace() || c == ',')
                .find(|tok| !tok.is_empty())
                .unwrap_or(trimmed);
            let value: f64 = first.parse().map_err(|_| TableError::Parse {
                line: idx + 1,
                value: first.to_string(),
            })?;
            wavelengths.push(value);
        }
        if wavelengths.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(Self { wavelengths })
    }

    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }
}
